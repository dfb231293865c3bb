//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by the [`CommandDispatcher`].

pub mod all;
pub mod completions;
pub mod dispatcher;
pub mod get;
pub mod pref;
pub mod which;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
