//! Resolver settings.
//!
//! [`Settings`] controls which file the walker looks for, how parsed files are
//! cached, whether values are interpolated, and where preferences live.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::walker::DEFAULT_FILE_NAME;

/// Default preference group consulted by the resolver.
pub const DEFAULT_PREFERENCE_GROUP: &str = "envchain";

/// When a cached `.env` file is re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// The first successful load is kept for the life of the process.
    #[default]
    LoadOnce,
    /// Reload when the file's modification time is newer than the cached one.
    Mtime,
}

impl FromStr for CachePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "load-once" | "once" => Ok(Self::LoadOnce),
            "mtime" | "mtime-checked" => Ok(Self::Mtime),
            _ => Err(format!("unknown cache policy: {}", s)),
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadOnce => f.write_str("load-once"),
            Self::Mtime => f.write_str("mtime"),
        }
    }
}

/// Settings for a [`Resolver`](crate::resolver::Resolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the env file searched for by the walker.
    pub file_name: String,

    /// Cache refresh policy.
    pub cache_policy: CachePolicy,

    /// Expand `$NAME` references in resolved values.
    pub interpolate: bool,

    /// Preference store location. `None` uses the platform config dir.
    pub preferences_path: Option<PathBuf>,

    /// Preference group consulted after the env file.
    pub preference_group: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            cache_policy: CachePolicy::default(),
            interpolate: true,
            preferences_path: None,
            preference_group: DEFAULT_PREFERENCE_GROUP.to_string(),
        }
    }
}
