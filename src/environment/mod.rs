//! Environment variable access.
//!
//! The resolver reads the process environment through the [`EnvSource`]
//! trait so tests can substitute a [`MapEnv`] without touching global state.

pub mod system;

pub use system::{EnvSource, MapEnv, SystemEnv};
