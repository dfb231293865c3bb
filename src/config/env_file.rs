//! .env file parsing.
//!
//! This module turns `.env` text into a [`ConfigMap`]. Parsing is best-effort:
//! a line that does not fit the grammar is skipped or kept as plain text, and
//! never aborts the rest of the file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{EnvchainError, Result};

use super::value::{ConfigMap, ConfigValue};

/// Parses .env files into a map of typed values.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Numbers: `PORT=5432` becomes an integer, `RATIO=0.5` a float
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`, kept as text
/// - Escaped quotes: `KEY="say \"hi\""`
/// - Lists: `HOSTS={a, b, c}`
/// - Comments: lines starting with `#` or `;`
/// - Section headers: lines starting with `[` are ignored
///
/// A key with no value (`KEY=` or `KEY= # note`) is left undefined.
///
/// # Example
///
/// ```
/// use envchain::config::{ConfigValue, EnvFileParser};
///
/// let content = r#"
/// # Database config
/// DATABASE_URL=postgres://localhost/db
/// PORT=5432
/// DEBUG="true"
/// HOSTS={web1,web2}
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars["DATABASE_URL"], ConfigValue::from("postgres://localhost/db"));
/// assert_eq!(vars["PORT"], ConfigValue::Integer(5432));
/// assert_eq!(vars["DEBUG"], ConfigValue::from("true"));
/// assert_eq!(vars["HOSTS"].to_string(), "web1,web2");
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse env file content into a map of values.
    pub fn parse(content: &str) -> ConfigMap {
        content.lines().filter_map(Self::parse_line).collect()
    }

    /// Parse a single line into a key/value pair.
    ///
    /// Returns `None` for blank lines, comments, section headers, lines
    /// without `=`, and keys with no value.
    pub fn parse_line(line: &str) -> Option<(String, ConfigValue)> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(['#', ';', '[']) {
            return None;
        }

        let (key, raw) = line.split_once('=')?;
        let key = key.trim();
        let raw = raw.trim();
        if key.is_empty() || raw.is_empty() || raw.starts_with(['#', ';']) {
            return None;
        }

        Some((key.to_string(), Self::parse_value(raw)))
    }

    /// Parse the right-hand side of a `KEY=value` line.
    ///
    /// `raw` should already be trimmed.
    pub fn parse_value(raw: &str) -> ConfigValue {
        let mut chars = raw.chars();
        match chars.next() {
            Some(quote @ ('"' | '\'')) => ConfigValue::Str(Self::unquote(chars.as_str(), quote)),
            Some('{') => ConfigValue::List(Self::split_list(chars.as_str())),
            _ => Self::coerce(raw),
        }
    }

    /// Read up to the next unescaped `quote`.
    ///
    /// A backslash before `quote` yields the quote itself. Without a closing
    /// quote the rest of the text is taken as-is.
    fn unquote(rest: &str, quote: char) -> String {
        let mut value = String::with_capacity(rest.len());
        let mut chars = rest.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\\' && chars.peek() == Some(&quote) {
                value.push(quote);
                chars.next();
            } else if c == quote {
                break;
            } else {
                value.push(c);
            }
        }

        value
    }

    /// Split `a, b, c}` into trimmed items, stopping at the first `}`.
    fn split_list(rest: &str) -> Vec<String> {
        let body = rest.split_once('}').map_or(rest, |(body, _)| body);
        if body.trim().is_empty() {
            return Vec::new();
        }
        body.split(',').map(|item| item.trim().to_string()).collect()
    }

    /// Turn numeric literals into numbers, leaving everything else as text.
    ///
    /// Only text with a decimal point or exponent can become a float, so
    /// digit strings too long for an `i64` keep every digit.
    fn coerce(raw: &str) -> ConfigValue {
        if let Ok(n) = raw.parse::<i64>() {
            return ConfigValue::Integer(n);
        }

        if raw.contains(['.', 'e', 'E']) {
            if let Ok(n) = raw.parse::<f64>() {
                if n.is_finite() {
                    return ConfigValue::Float(n);
                }
            }
        }

        ConfigValue::Str(raw.to_string())
    }

    /// Load and parse an env file from a path.
    ///
    /// A missing file yields an empty map. Any other read failure is
    /// reported as [`EnvchainError::SourceUnavailable`]. Invalid UTF-8 is
    /// replaced rather than rejected.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envchain::config::EnvFileParser;
    /// use std::path::Path;
    ///
    /// let vars = EnvFileParser::load(Path::new(".env")).unwrap();
    /// for (key, value) in &vars {
    ///     println!("{}={}", key, value);
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<ConfigMap> {
        Ok(Self::load_existing(path)?.unwrap_or_default())
    }

    /// Like [`load`](Self::load), but a missing file yields `None`.
    pub fn load_existing(path: &Path) -> Result<Option<ConfigMap>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(Self::parse(&String::from_utf8_lossy(&bytes)))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EnvchainError::SourceUnavailable {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn value(line: &str) -> Option<ConfigValue> {
        EnvFileParser::parse_line(line).map(|(_, v)| v)
    }

    #[test]
    fn parses_simple_env_file() {
        let content = r#"
KEY1=value1
KEY2=value2
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("KEY1"), Some(&ConfigValue::from("value1")));
        assert_eq!(vars.get("KEY2"), Some(&ConfigValue::from("value2")));
    }

    #[test]
    fn skips_comments_and_sections() {
        let content = r#"
# hash comment
; semicolon comment
[production]
KEY=value
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY"), Some(&ConfigValue::from("value")));
    }

    #[test]
    fn coerces_bare_numbers_only() {
        assert_eq!(value("A=1"), Some(ConfigValue::Integer(1)));
        assert_eq!(value("A=-42"), Some(ConfigValue::Integer(-42)));
        assert_eq!(value("A=0.25"), Some(ConfigValue::Float(0.25)));
        assert_eq!(value("A=1e3"), Some(ConfigValue::Float(1000.0)));
        assert_eq!(value("B=\"1\""), Some(ConfigValue::from("1")));
        assert_eq!(value("C=1.2.3"), Some(ConfigValue::from("1.2.3")));
    }

    #[test]
    fn reserved_float_words_stay_text() {
        assert_eq!(value("A=inf"), Some(ConfigValue::from("inf")));
        assert_eq!(value("A=NaN"), Some(ConfigValue::from("NaN")));
        assert_eq!(value("A=-Infinity"), Some(ConfigValue::from("-Infinity")));
        assert_eq!(value("A=1e400"), Some(ConfigValue::from("1e400")));
    }

    #[test]
    fn oversized_integers_keep_their_digits() {
        assert_eq!(
            EnvFileParser::parse_value("12345678901234567890123"),
            ConfigValue::from("12345678901234567890123")
        );
        assert_eq!(
            EnvFileParser::parse_value("-99999999999999999999"),
            ConfigValue::from("-99999999999999999999")
        );
        assert_eq!(
            EnvFileParser::parse_value("1.5E2"),
            ConfigValue::Float(150.0)
        );
    }

    #[test]
    fn handles_quoted_values() {
        assert_eq!(value("C='x'"), Some(ConfigValue::from("x")));
        assert_eq!(
            value("D=\"double quoted\" # trailing"),
            Some(ConfigValue::from("double quoted"))
        );
        assert_eq!(value("E=''"), Some(ConfigValue::from("")));
    }

    #[test]
    fn honours_escaped_quotes() {
        assert_eq!(
            value(r#"A="say \"hi\"""#),
            Some(ConfigValue::from("say \"hi\""))
        );
        assert_eq!(value(r"A='it\'s'"), Some(ConfigValue::from("it's")));
        assert_eq!(value(r#"A="C:\path""#), Some(ConfigValue::from(r"C:\path")));
    }

    #[test]
    fn unterminated_quote_takes_rest_of_line() {
        assert_eq!(value("A=\"open ended"), Some(ConfigValue::from("open ended")));
    }

    #[test]
    fn parses_lists() {
        assert_eq!(
            value("D={a,b,c}"),
            Some(ConfigValue::List(vec!["a".into(), "b".into(), "c".into()]))
        );
        assert_eq!(
            value("D={ a , b }"),
            Some(ConfigValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(value("D={}"), Some(ConfigValue::List(vec![])));
        assert_eq!(
            value("D={x,y"),
            Some(ConfigValue::List(vec!["x".into(), "y".into()]))
        );
    }

    #[test]
    fn empty_or_commented_values_are_discarded() {
        assert_eq!(EnvFileParser::parse_line("EMPTY="), None);
        assert_eq!(EnvFileParser::parse_line("EMPTY=   # later"), None);
        assert_eq!(EnvFileParser::parse_line("EMPTY= ; later"), None);
        assert_eq!(EnvFileParser::parse_line("=value"), None);
    }

    #[test]
    fn handles_values_with_equals() {
        let vars = EnvFileParser::parse("URL=https://example.com?foo=bar");

        assert_eq!(
            vars.get("URL"),
            Some(&ConfigValue::from("https://example.com?foo=bar"))
        );
    }

    #[test]
    fn handles_whitespace_around_equals() {
        let vars = EnvFileParser::parse("  KEY = value with spaces  ");

        assert_eq!(vars.get("KEY"), Some(&ConfigValue::from("value with spaces")));
    }

    #[test]
    fn handles_lines_without_equals() {
        let content = r#"
KEY1=value1
invalid line without equals
KEY2=value2
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn last_definition_wins() {
        let vars = EnvFileParser::parse("KEY=first\nKEY=second");

        assert_eq!(vars.get("KEY"), Some(&ConfigValue::from("second")));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let vars = EnvFileParser::parse("key=lower\nKEY=upper");

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("key"), Some(&ConfigValue::from("lower")));
    }

    #[test]
    fn load_returns_empty_for_missing_file() {
        let result = EnvFileParser::load(Path::new("/nonexistent/path/.env"));

        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn load_existing_distinguishes_missing_from_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");

        assert!(EnvFileParser::load_existing(&path).unwrap().is_none());

        fs::write(&path, "").unwrap();
        assert_eq!(
            EnvFileParser::load_existing(&path).unwrap(),
            Some(ConfigMap::new())
        );
    }

    #[test]
    fn load_reads_file_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "A=1\nB=\"1\"\nC='x'\nD={a,b,c}\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();

        assert_eq!(vars["A"], ConfigValue::Integer(1));
        assert_eq!(vars["B"], ConfigValue::from("1"));
        assert_eq!(vars["C"], ConfigValue::from("x"));
        assert_eq!(
            vars["D"],
            ConfigValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn load_reports_directory_as_unavailable() {
        let temp = TempDir::new().unwrap();

        let err = EnvFileParser::load(temp.path()).unwrap_err();

        assert!(err.is_recoverable());
    }
}
