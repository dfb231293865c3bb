//! envchain - Layered configuration lookup.
//!
//! envchain resolves named configuration values by checking, in order, the
//! process environment, the nearest `.env` file (searched upward through
//! parent directories), and a saved preference store.
//!
//! # Modules
//!
//! - [`cache`] - Parsed env file cache with load-once or mtime refresh
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.env` grammar, file discovery, interpolation, settings
//! - [`environment`] - Process environment access
//! - [`error`] - Error types and result aliases
//! - [`resolver`] - The source priority chain and wildcard lookup
//! - [`state`] - The preference store
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use envchain::config::{ConfigValue, Settings};
//! use envchain::resolver::{Resolver, WILDCARD};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! std::fs::write(temp.path().join(".env"), "PORT=8080\nHOSTS={a,b}\n").unwrap();
//!
//! let resolver = Resolver::isolated(temp.path(), Settings::default());
//! assert_eq!(resolver.get("PORT", None).unwrap(), ConfigValue::Integer(8080));
//! assert_eq!(
//!     resolver.get("TIMEOUT", Some(ConfigValue::Integer(30))).unwrap(),
//!     ConfigValue::Integer(30)
//! );
//!
//! let all = resolver.resolve(WILDCARD, None).unwrap().into_map().unwrap();
//! assert_eq!(all.len(), 2);
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod resolver;
pub mod state;
pub mod ui;

pub use error::{EnvchainError, Result};
pub use resolver::Resolver;
