//! Typed configuration values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Mapping from key to value for one `.env` file.
///
/// Keys are case-sensitive. Later definitions of a key replace earlier ones.
pub type ConfigMap = HashMap<String, ConfigValue>;

/// A resolved configuration value.
///
/// Quoted text is always [`ConfigValue::Str`]. Unquoted text becomes a number
/// when it is a numeric literal, and brace-delimited text becomes a list.
///
/// # Example
///
/// ```
/// use envchain::config::ConfigValue;
///
/// let port = ConfigValue::from(8080);
/// assert_eq!(port.to_string(), "8080");
///
/// let hosts = ConfigValue::from(vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(hosts.to_string(), "a,b");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Whole number literal.
    Integer(i64),
    /// Decimal or exponent literal.
    Float(f64),
    /// Ordered list from `{a,b,c}` syntax.
    List(Vec<String>),
    /// Plain or quoted text.
    Str(String),
}

impl ConfigValue {
    /// Borrow the text of a scalar string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the items of a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric view of the value, if it was coerced to a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// True for an empty string or an empty list.
    ///
    /// Empty values count as "undefined" during source lookup.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Integer(_) | Self::Float(_) => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::List(items) => write!(f, "{}", items.join(",")),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
