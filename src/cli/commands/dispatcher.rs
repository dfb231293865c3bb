//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Process exit status (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    start_dir: PathBuf,
    settings: Settings,
}

impl CommandDispatcher {
    /// Create a new dispatcher searching from `start_dir`.
    pub fn new(start_dir: PathBuf, settings: Settings) -> Self {
        Self {
            start_dir,
            settings,
        }
    }

    /// Get the search start directory.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Get the resolver settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Get(args) => {
                let cmd = super::get::GetCommand::new(
                    &self.start_dir,
                    self.settings.clone(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::All(args) => {
                let cmd = super::all::AllCommand::new(
                    &self.start_dir,
                    self.settings.clone(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Which => {
                let cmd = super::which::WhichCommand::new(&self.start_dir, self.settings.clone());
                cmd.execute(ui)
            }
            Commands::Pref(args) => {
                let cmd = super::pref::PrefCommand::new(self.settings.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
