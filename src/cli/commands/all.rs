//! All command implementation.
//!
//! The `envchain all` command prints every entry of the nearest env file with
//! references expanded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::args::AllArgs;
use crate::config::{ConfigMap, Settings};
use crate::error::{EnvchainError, Result};
use crate::resolver::{render_env_lines, Resolver};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The all command implementation.
pub struct AllCommand {
    start_dir: PathBuf,
    settings: Settings,
    args: AllArgs,
}

impl AllCommand {
    /// Create a new all command.
    pub fn new(start_dir: &Path, settings: Settings, args: AllArgs) -> Self {
        Self {
            start_dir: start_dir.to_path_buf(),
            settings,
            args,
        }
    }
}

impl Command for AllCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolver = Resolver::new(&self.start_dir, self.settings.clone());
        if resolver.nearest_env_file().is_none() {
            ui.warning(&format!("No {} file found", self.settings.file_name));
        }

        print_map(&resolver.all(), self.args.json, ui)?;
        Ok(CommandResult::success())
    }
}

/// Print a resolved map as sorted `KEY=value` lines or a JSON object.
pub(crate) fn print_map(map: &ConfigMap, json: bool, ui: &mut dyn UserInterface) -> Result<()> {
    if json {
        let sorted: BTreeMap<_, _> = map.iter().collect();
        let json =
            serde_json::to_string_pretty(&sorted).map_err(|e| EnvchainError::Other(e.into()))?;
        ui.message(&json);
    } else {
        for line in render_env_lines(map) {
            ui.message(&line);
        }
    }
    Ok(())
}
