//! Saved preferences.
//!
//! This module provides the [`PreferenceStore`], a YAML file of named groups
//! holding key/value pairs. It is the last source the resolver consults.
//!
//! ```yaml
//! envchain:
//!   DATABASE_URL: postgres://localhost/dev
//!   WORKERS: 4
//! ```

use anyhow::Context;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConfigValue;
use crate::error::{EnvchainError, Result};

/// Read access to grouped preferences.
pub trait PreferenceSource: Send + Sync {
    /// Get `key` from `group`. Empty values count as absent.
    fn get(&self, group: &str, key: &str) -> Option<ConfigValue>;
}

/// Preferences grouped by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PreferenceStore {
    groups: BTreeMap<String, BTreeMap<String, ConfigValue>>,
}

impl PreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform location of the preference file.
    ///
    /// - Linux: `~/.config/envchain/preferences.yml`
    /// - macOS: `~/Library/Application Support/envchain/preferences.yml`
    /// - Windows: `%AppData%\envchain\config\preferences.yml`
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "envchain")
            .context("Failed to determine the user config directory")?;
        Ok(dirs.config_dir().join("preferences.yml"))
    }

    /// Load preferences from disk.
    ///
    /// A missing file yields an empty store. Only a file that is not a
    /// mapping of groups fails as a whole; a group or value that cannot be
    /// read is skipped with a warning. Booleans are kept as text and nulls
    /// leave the key undefined.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let parse_error = |message: String| EnvchainError::ConfigParseError {
            path: path.to_path_buf(),
            message,
        };
        let document: Value =
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
        let groups = match document {
            Value::Mapping(groups) => groups,
            Value::Null => return Ok(Self::default()),
            _ => return Err(parse_error("expected a mapping of groups".to_string())),
        };

        let mut store = Self::default();
        for (name, values) in groups {
            let Some(name) = scalar_text(&name) else {
                tracing::warn!(path = %path.display(), "skipping preference group with a non-text name");
                continue;
            };
            let values = match values {
                Value::Mapping(values) => values,
                Value::Null => continue,
                _ => {
                    tracing::warn!(path = %path.display(), group = %name, "skipping preference group that is not a mapping");
                    continue;
                }
            };

            for (key, value) in values {
                let Some(key) = scalar_text(&key) else {
                    tracing::warn!(path = %path.display(), group = %name, "skipping preference with a non-text key");
                    continue;
                };
                match value_from_yaml(&value) {
                    Some(value) => store.set(&name, &key, value),
                    None if value.is_null() => {}
                    None => {
                        tracing::warn!(path = %path.display(), group = %name, key = %key, "skipping unreadable preference value");
                    }
                }
            }
        }

        Ok(store)
    }

    /// Save preferences to disk using atomic write.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize preferences")?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get all values in a group.
    pub fn group(&self, group: &str) -> Option<&BTreeMap<String, ConfigValue>> {
        self.groups.get(group)
    }

    /// Names of all groups.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Set a value, creating the group if needed.
    pub fn set(&mut self, group: &str, key: &str, value: impl Into<ConfigValue>) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Remove a value. Empty groups are dropped.
    pub fn remove(&mut self, group: &str, key: &str) -> Option<ConfigValue> {
        let values = self.groups.get_mut(group)?;
        let removed = values.remove(key);
        if values.is_empty() {
            self.groups.remove(group);
        }
        removed
    }
}

/// Text form of a YAML scalar. Nulls and collections have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert one YAML value to a [`ConfigValue`].
///
/// Numbers that fit keep their numeric type, other scalars become text, and
/// a sequence of scalars becomes a list. Nulls, mappings and nested
/// sequences yield `None`.
fn value_from_yaml(value: &Value) -> Option<ConfigValue> {
    match value {
        Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => ConfigValue::Integer(i),
            (None, Some(f)) if n.is_f64() && f.is_finite() => ConfigValue::Float(f),
            _ => ConfigValue::Str(n.to_string()),
        }),
        Value::Sequence(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(ConfigValue::List),
        Value::Tagged(tagged) => value_from_yaml(&tagged.value),
        other => scalar_text(other).map(ConfigValue::Str),
    }
}

impl PreferenceSource for PreferenceStore {
    fn get(&self, group: &str, key: &str) -> Option<ConfigValue> {
        self.groups
            .get(group)?
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
    }
}
