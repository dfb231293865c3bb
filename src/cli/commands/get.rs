//! Get command implementation.
//!
//! The `envchain get KEY` command prints a resolved value. By default an
//! undefined key only produces a warning; `--require` turns it into an error.

use std::path::{Path, PathBuf};

use crate::cli::args::GetArgs;
use crate::config::{ConfigValue, Settings};
use crate::error::{EnvchainError, Result};
use crate::resolver::{Resolver, WILDCARD};
use crate::ui::UserInterface;

use super::all::print_map;
use super::dispatcher::{Command, CommandResult};

/// The get command implementation.
pub struct GetCommand {
    start_dir: PathBuf,
    settings: Settings,
    args: GetArgs,
}

impl GetCommand {
    /// Create a new get command.
    pub fn new(start_dir: &Path, settings: Settings, args: GetArgs) -> Self {
        Self {
            start_dir: start_dir.to_path_buf(),
            settings,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &GetArgs {
        &self.args
    }
}

impl Command for GetCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolver = Resolver::new(&self.start_dir, self.settings.clone());
        let key = self.args.key.as_str();
        let default = self.args.default.clone().map(ConfigValue::from);

        if key == WILDCARD {
            print_map(&resolver.all(), self.args.json, ui)?;
            return Ok(CommandResult::success());
        }

        // Fire-and-forget: show whatever resolves, never fail
        if !self.args.require && !self.args.json && !self.args.source {
            resolver.display(key, default, ui);
            return Ok(CommandResult::success());
        }

        let resolved = match resolver.get_with_source(key, default) {
            Ok(resolved) => resolved,
            Err(e @ EnvchainError::MissingConfig { .. }) if !self.args.require => {
                ui.warning(&e.to_string());
                return Ok(CommandResult::success());
            }
            Err(e) => return Err(e),
        };

        if self.args.source {
            ui.message(&format!("# {}", resolved.source));
        }

        if self.args.json {
            let json = serde_json::to_string(&resolved.value)
                .map_err(|e| EnvchainError::Other(e.into()))?;
            ui.message(&json);
        } else {
            ui.message(&resolved.value.to_string());
        }

        Ok(CommandResult::success())
    }
}
