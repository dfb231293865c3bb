//! Variable interpolation for configuration values.
//!
//! Values may reference other configuration keys with `$NAME` or `${NAME}`.
//! The braced form also accepts a modifier, `${NAME:modifier}`, which is
//! recorded but not applied.
//!
//! # Syntax
//!
//! - `$NAME` - name starts with a letter or underscore, then word characters
//! - `${NAME}` - braced form, useful before word characters: `${HOST}_backup`
//! - `${NAME:mod}` - modifier captured as [`VariableRef::modifier`]
//!
//! # Example
//!
//! ```
//! use envchain::config::{expand, Interpolation};
//!
//! let url = expand("http://$HOST/api", Interpolation::Enabled, |name| {
//!     assert_eq!(name, "HOST");
//!     "db.local".to_string()
//! });
//! assert_eq!(url, "http://db.local/api");
//! ```

use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::value::ConfigValue;

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_]\w*)(?::([^}]*))?\}|([A-Za-z_]\w*))").unwrap()
});

/// Whether a lookup may expand references inside the value it returns.
///
/// Nested lookups made while expanding a value always use
/// [`Interpolation::Disabled`], so a reference is expanded at most one level
/// deep and self-references cannot recurse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Expand `$NAME` references.
    #[default]
    Enabled,
    /// Return values verbatim.
    Disabled,
}

impl Interpolation {
    /// Build from a plain flag.
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    /// Check if expansion is on.
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// A single `$NAME` or `${NAME:modifier}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRef {
    /// Referenced key.
    pub name: String,
    /// Text after `:` in the braced form.
    pub modifier: Option<String>,
}

impl VariableRef {
    fn from_captures(caps: &Captures<'_>) -> Self {
        let name = caps
            .get(1)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        Self {
            name: name.to_string(),
            modifier: caps.get(2).map(|m| m.as_str().to_string()),
        }
    }
}

/// List every variable reference in `text`, in order of appearance.
pub fn parse_references(text: &str) -> Vec<VariableRef> {
    VARIABLE_RE
        .captures_iter(text)
        .map(|caps| VariableRef::from_captures(&caps))
        .collect()
}

/// Extract the unique variable names referenced in `text`.
pub fn extract_variables(text: &str) -> HashSet<String> {
    parse_references(text).into_iter().map(|r| r.name).collect()
}

/// Check if a string contains any variable reference.
pub fn has_interpolation(text: &str) -> bool {
    VARIABLE_RE.is_match(text)
}

/// Names referenced anywhere in a value (list items included).
pub fn value_references(value: &ConfigValue) -> HashSet<String> {
    match value {
        ConfigValue::Str(s) => extract_variables(s),
        ConfigValue::List(items) => items.iter().flat_map(|i| extract_variables(i)).collect(),
        ConfigValue::Integer(_) | ConfigValue::Float(_) => HashSet::new(),
    }
}

/// Replace each reference in `text` with `resolve(name)`.
///
/// `resolve` runs once per distinct name. With [`Interpolation::Disabled`]
/// the text is returned unchanged and `resolve` is never called.
pub fn expand<F>(text: &str, mode: Interpolation, mut resolve: F) -> String
where
    F: FnMut(&str) -> String,
{
    if !mode.is_enabled() || !has_interpolation(text) {
        return text.to_string();
    }

    let mut resolved: HashMap<String, String> = HashMap::new();
    VARIABLE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let reference = VariableRef::from_captures(caps);
            resolved
                .entry(reference.name)
                .or_insert_with_key(|name| resolve(name))
                .clone()
        })
        .into_owned()
}

/// Expand references inside a value.
///
/// Strings and list items are expanded; numbers are returned as-is.
pub fn expand_value<F>(value: &ConfigValue, mode: Interpolation, mut resolve: F) -> ConfigValue
where
    F: FnMut(&str) -> String,
{
    match value {
        ConfigValue::Str(s) => ConfigValue::Str(expand(s, mode, &mut resolve)),
        ConfigValue::List(items) => ConfigValue::List(
            items
                .iter()
                .map(|item| expand(item, mode, &mut resolve))
                .collect(),
        ),
        ConfigValue::Integer(_) | ConfigValue::Float(_) => value.clone(),
    }
}
