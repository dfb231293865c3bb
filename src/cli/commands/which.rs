//! Which command implementation.
//!
//! The `envchain which` command prints the env file the resolver would read.

use std::path::{Path, PathBuf};

use crate::config::{DirectoryWalker, Settings};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The which command implementation.
pub struct WhichCommand {
    start_dir: PathBuf,
    settings: Settings,
}

impl WhichCommand {
    /// Create a new which command.
    pub fn new(start_dir: &Path, settings: Settings) -> Self {
        Self {
            start_dir: start_dir.to_path_buf(),
            settings,
        }
    }
}

impl Command for WhichCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let walker = DirectoryWalker::new(self.settings.file_name.clone());

        match walker.find(&self.start_dir) {
            Some(path) => {
                ui.message(&path.display().to_string());
                Ok(CommandResult::success())
            }
            None => {
                ui.warning(&format!(
                    "No {} file found in {} or any parent directory",
                    self.settings.file_name,
                    self.start_dir.display()
                ));
                Ok(CommandResult::failure(2))
            }
        }
    }
}
