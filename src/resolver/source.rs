//! Where a resolved value came from.

use std::fmt;
use std::path::PathBuf;

use crate::config::{ConfigMap, ConfigValue};

/// Origin of a resolved value.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Process environment variable.
    Environment,
    /// The nearest env file.
    EnvFile(PathBuf),
    /// Preference store group.
    Preferences {
        /// Group the value was read from.
        group: String,
    },
    /// Caller-supplied default.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::EnvFile(path) => write!(f, "{}", path.display()),
            Self::Preferences { group } => write!(f, "preferences ({})", group),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A value together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The value, expanded if interpolation was enabled.
    pub value: ConfigValue,
    /// Where the value came from.
    pub source: Source,
}

impl Resolved {
    /// Pair a value with its source.
    pub fn new(value: ConfigValue, source: Source) -> Self {
        Self { value, source }
    }
}

/// Result of [`Resolver::resolve`](super::Resolver::resolve).
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A single key.
    Value(ConfigValue),
    /// The wildcard key: every entry of the nearest env file.
    All(ConfigMap),
}

impl Lookup {
    /// The single value, if this was not a wildcard lookup.
    pub fn into_value(self) -> Option<ConfigValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::All(_) => None,
        }
    }

    /// The full map, if this was a wildcard lookup.
    pub fn into_map(self) -> Option<ConfigMap> {
        match self {
            Self::Value(_) => None,
            Self::All(map) => Some(map),
        }
    }
}
