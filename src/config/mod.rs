//! `.env` parsing, discovery, and interpolation.
//!
//! This module handles the file side of configuration lookup:
//! - Typed values in [`value`]
//! - The line grammar and file loading in [`env_file`]
//! - Upward file discovery in [`walker`]
//! - `$NAME` expansion in [`interpolation`]
//! - Resolver settings in [`settings`]
//!
//! # Example
//!
//! ```
//! use envchain::config::{ConfigValue, DirectoryWalker, EnvFileParser};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".env"), "PORT=8080").unwrap();
//! let nested = temp.path().join("src");
//! fs::create_dir_all(&nested).unwrap();
//!
//! let path = DirectoryWalker::default().find(&nested).unwrap();
//! let vars = EnvFileParser::load(&path).unwrap();
//! assert_eq!(vars["PORT"], ConfigValue::Integer(8080));
//! ```

pub mod env_file;
pub mod interpolation;
pub mod settings;
pub mod value;
pub mod walker;

pub use env_file::EnvFileParser;
pub use interpolation::{
    expand, expand_value, extract_variables, has_interpolation, parse_references,
    value_references, Interpolation, VariableRef,
};
pub use settings::{CachePolicy, Settings, DEFAULT_PREFERENCE_GROUP};
pub use value::{ConfigMap, ConfigValue};
pub use walker::{DirectoryWalker, DEFAULT_FILE_NAME};
