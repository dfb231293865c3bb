//! Persistent user state.
//!
//! The only persisted state is the [`PreferenceStore`], consulted by the
//! resolver after the environment and the `.env` file.

pub mod preferences;

pub use preferences::{PreferenceSource, PreferenceStore};
