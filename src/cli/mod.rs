//! Command-line interface for envchain.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AllArgs, Cli, Commands, CompletionsArgs, GetArgs, PrefAction, PrefArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
