//! Process environment access.

use std::collections::HashMap;

/// Read access to environment variables.
///
/// An empty value is reported as `None`: for lookup purposes a variable set
/// to the empty string is undefined.
pub trait EnvSource: Send + Sync {
    /// Get the value of `name`.
    fn get(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name)
            .map(|v| v.to_string_lossy().into_owned())
            .filter(|v| !v.is_empty())
    }
}

/// An in-memory environment, for tests and embedding.
///
/// # Example
///
/// ```
/// use envchain::environment::{EnvSource, MapEnv};
///
/// let env = MapEnv::new().with("HOME", "/home/dev").with("EMPTY", "");
/// assert_eq!(env.get("HOME"), Some("/home/dev".to_string()));
/// assert_eq!(env.get("EMPTY"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Add or replace a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl From<HashMap<String, String>> for MapEnv {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_env_reads_path() {
        // PATH is set in every test environment we run in
        assert!(SystemEnv.get("PATH").is_some());
    }

    #[test]
    fn system_env_missing_is_none() {
        assert_eq!(SystemEnv.get("ENVCHAIN_TEST_SURELY_UNSET_VARIABLE"), None);
    }

    #[test]
    fn map_env_treats_empty_as_unset() {
        let env = MapEnv::new().with("A", "1").with("B", "");
        assert_eq!(env.get("A"), Some("1".to_string()));
        assert_eq!(env.get("B"), None);
        assert_eq!(env.get("C"), None);
    }

    #[test]
    fn map_env_from_hashmap() {
        let mut vars = HashMap::new();
        vars.insert("KEY".to_string(), "value".to_string());

        let env = MapEnv::from(vars);
        assert_eq!(env.get("KEY"), Some("value".to_string()));
    }

    #[test]
    fn map_env_set_replaces() {
        let mut env = MapEnv::new().with("A", "1");
        env.set("A", "2");
        assert_eq!(env.get("A"), Some("2".to_string()));
    }
}
