//! Layered configuration lookup.
//!
//! The [`Resolver`] answers "what is the value of KEY?" by checking, in order:
//! 1. The process environment
//! 2. The nearest env file, found by walking up from the start directory
//! 3. The preference store
//!
//! The first non-empty value wins. When interpolation is enabled, `$NAME`
//! references inside the winning value are expanded by looking `NAME` up
//! through the same chain with interpolation disabled.
//!
//! # Example
//!
//! ```
//! use envchain::config::{ConfigValue, Settings};
//! use envchain::environment::MapEnv;
//! use envchain::resolver::Resolver;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! std::fs::write(temp.path().join(".env"), "HOST=db.local\nURL=http://$HOST/api\n").unwrap();
//!
//! let resolver = Resolver::isolated(temp.path(), Settings::default())
//!     .with_env(MapEnv::new().with("HOST", "db.prod"));
//!
//! let url = resolver.get("URL", None).unwrap();
//! assert_eq!(url, ConfigValue::from("http://db.prod/api"));
//! ```

pub mod source;

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{FileCache, FileCacheEntry};
use crate::config::{
    expand_value, value_references, ConfigMap, ConfigValue, DirectoryWalker, Interpolation,
    Settings,
};
use crate::environment::{EnvSource, MapEnv, SystemEnv};
use crate::error::{EnvchainError, Result};
use crate::state::{PreferenceSource, PreferenceStore};
use crate::ui::UserInterface;

pub use source::{Lookup, Resolved, Source};

/// Key that requests every entry of the nearest env file.
pub const WILDCARD: &str = "*";

/// Resolves keys across the environment, env file, and preferences.
pub struct Resolver {
    start_dir: PathBuf,
    settings: Settings,
    walker: DirectoryWalker,
    cache: Arc<FileCache>,
    env: Box<dyn EnvSource>,
    prefs: Box<dyn PreferenceSource>,
}

impl Resolver {
    /// Create a resolver reading the real environment and the preference
    /// store named by `settings`.
    ///
    /// An unreadable preference store is logged and treated as empty.
    pub fn new(start_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        let prefs = Self::load_preferences(&settings);
        Self::isolated(start_dir, settings)
            .with_env(SystemEnv)
            .with_preferences(prefs)
    }

    /// Create a resolver with an empty environment and no preferences.
    ///
    /// Only the env file is consulted until sources are attached with
    /// [`with_env`](Self::with_env) and
    /// [`with_preferences`](Self::with_preferences).
    pub fn isolated(start_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            start_dir: start_dir.into(),
            walker: DirectoryWalker::new(settings.file_name.clone()),
            cache: Arc::new(FileCache::new(settings.cache_policy)),
            env: Box::new(MapEnv::new()),
            prefs: Box::new(PreferenceStore::new()),
            settings,
        }
    }

    /// Replace the environment source.
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Replace the preference source.
    pub fn with_preferences(mut self, prefs: impl PreferenceSource + 'static) -> Self {
        self.prefs = Box::new(prefs);
        self
    }

    /// Share a file cache with other resolvers.
    ///
    /// The cache's own policy applies from then on.
    pub fn with_cache(mut self, cache: Arc<FileCache>) -> Self {
        self.cache = cache;
        self
    }

    fn load_preferences(settings: &Settings) -> PreferenceStore {
        let path = match &settings.preferences_path {
            Some(path) => path.clone(),
            None => match PreferenceStore::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(error = %e, "no preference store location, skipping");
                    return PreferenceStore::default();
                }
            },
        };

        PreferenceStore::load(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "preferences unavailable, skipping");
            PreferenceStore::default()
        })
    }

    /// Directory the env file search starts from.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The file cache.
    pub fn cache(&self) -> &Arc<FileCache> {
        &self.cache
    }

    /// Interpolation mode for top-level lookups.
    pub fn interpolation(&self) -> Interpolation {
        Interpolation::from_flag(self.settings.interpolate)
    }

    /// Path of the nearest env file, if any.
    pub fn nearest_env_file(&self) -> Option<PathBuf> {
        self.walker.find(&self.start_dir)
    }

    /// Parsed contents of the nearest env file.
    ///
    /// `None` when there is no file or it cannot be read.
    fn env_file(&self) -> Option<Arc<FileCacheEntry>> {
        let path = self.nearest_env_file()?;
        match self.cache.get(&path) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "env file unavailable, skipping");
                None
            }
        }
    }

    /// Look `key` up through the source chain.
    ///
    /// Returns `None` when no source has a non-empty value. Nested lookups
    /// made during expansion always use [`Interpolation::Disabled`].
    pub fn lookup(&self, key: &str, mode: Interpolation) -> Option<Resolved> {
        let raw = self.lookup_raw(key)?;
        if !mode.is_enabled() {
            return Some(raw);
        }

        let value = expand_value(&raw.value, mode, |name| self.reference_value(name));
        Some(Resolved::new(value, raw.source))
    }

    fn lookup_raw(&self, key: &str) -> Option<Resolved> {
        if let Some(value) = self.env.get(key) {
            tracing::trace!(key, "found in environment");
            return Some(Resolved::new(ConfigValue::Str(value), Source::Environment));
        }

        if let Some(entry) = self.env_file() {
            if let Some(value) = entry.map.get(key).filter(|v| !v.is_empty()) {
                tracing::trace!(key, path = %entry.path.display(), "found in env file");
                return Some(Resolved::new(
                    value.clone(),
                    Source::EnvFile(entry.path.clone()),
                ));
            }
        }

        let group = &self.settings.preference_group;
        let value = self.prefs.get(group, key)?;
        tracing::trace!(key, group = %group, "found in preferences");
        Some(Resolved::new(
            value,
            Source::Preferences {
                group: group.clone(),
            },
        ))
    }

    /// Text substituted for a `$NAME` reference. Undefined names become "".
    fn reference_value(&self, name: &str) -> String {
        self.lookup(name, Interpolation::Disabled)
            .map(|r| r.value.to_string())
            .unwrap_or_default()
    }

    /// Resolve `key`, falling back to `default`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvchainError::MissingConfig`] when no source defines the key
    /// and no default was given.
    pub fn get(&self, key: &str, default: Option<ConfigValue>) -> Result<ConfigValue> {
        self.get_with_source(key, default).map(|r| r.value)
    }

    /// Like [`get`](Self::get), also reporting where the value came from.
    pub fn get_with_source(&self, key: &str, default: Option<ConfigValue>) -> Result<Resolved> {
        if let Some(resolved) = self.lookup(key, self.interpolation()) {
            return Ok(resolved);
        }

        match default {
            Some(value) => {
                tracing::debug!(key, "not defined anywhere, using default");
                Ok(Resolved::new(value, Source::Default))
            }
            None => Err(EnvchainError::MissingConfig {
                key: key.to_string(),
            }),
        }
    }

    /// Resolve `key`, treating [`WILDCARD`] as a request for every entry.
    pub fn resolve(&self, key: &str, default: Option<ConfigValue>) -> Result<Lookup> {
        if key == WILDCARD {
            return Ok(Lookup::All(self.all()));
        }
        self.get(key, default).map(Lookup::Value)
    }

    /// Every entry of the nearest env file, expanded.
    ///
    /// The environment and preferences are not consulted for the file's own
    /// keys. With interpolation enabled, each value is expanded and every
    /// referenced name the file does not define is added to the result,
    /// resolved through the full chain (or "" when undefined). The cached
    /// map is never modified.
    pub fn all(&self) -> ConfigMap {
        let Some(entry) = self.env_file() else {
            return ConfigMap::new();
        };

        let mode = self.interpolation();
        if !mode.is_enabled() {
            return entry.map.clone();
        }

        let mut memo: HashMap<String, String> = HashMap::new();
        let mut resolve = |name: &str| {
            memo.entry(name.to_string())
                .or_insert_with(|| self.reference_value(name))
                .clone()
        };
        let mut all: ConfigMap = entry
            .map
            .iter()
            .map(|(key, value)| (key.clone(), expand_value(value, mode, &mut resolve)))
            .collect();

        let undefined: BTreeSet<String> = entry
            .map
            .values()
            .flat_map(value_references)
            .filter(|name| !entry.map.contains_key(name))
            .collect();

        tracing::debug!(
            keys = entry.map.len(),
            added = undefined.len(),
            "resolved all env file entries"
        );

        for name in undefined {
            let value = self
                .lookup(&name, Interpolation::Disabled)
                .map(|r| r.value)
                .unwrap_or_else(|| ConfigValue::Str(String::new()));
            all.insert(name, value);
        }

        all
    }

    /// Resolve `key` and show the result instead of returning it.
    ///
    /// An undefined key is reported as a warning, never as an error.
    pub fn display(&self, key: &str, default: Option<ConfigValue>, ui: &mut dyn UserInterface) {
        match self.resolve(key, default) {
            Ok(Lookup::Value(value)) => ui.message(&value.to_string()),
            Ok(Lookup::All(map)) => {
                for line in render_env_lines(&map) {
                    ui.message(&line);
                }
            }
            Err(e) => ui.warning(&e.to_string()),
        }
    }
}

/// Render a map as `KEY=value` lines sorted by key.
pub fn render_env_lines(map: &ConfigMap) -> Vec<String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| format!("{}={}", key, map[key]))
        .collect()
}
