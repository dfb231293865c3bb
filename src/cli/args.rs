//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{CachePolicy, Settings, DEFAULT_FILE_NAME, DEFAULT_PREFERENCE_GROUP};

/// envchain - Resolve configuration from the environment, .env files, and saved preferences.
#[derive(Debug, Parser)]
#[command(name = "envchain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory to start the env file search from (overrides current directory)
    #[arg(short = 'C', long, global = true, env = "ENVCHAIN_DIR")]
    pub dir: Option<PathBuf>,

    /// Name of the env file to search for
    #[arg(long, global = true, env = "ENVCHAIN_FILE", default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// When a cached env file is re-read: load-once or mtime
    #[arg(long, global = true, env = "ENVCHAIN_CACHE_POLICY", default_value = "load-once")]
    pub policy: CachePolicy,

    /// Do not expand $NAME references in values
    #[arg(long, global = true)]
    pub no_interpolate: bool,

    /// Path to the preference store (overrides the platform default)
    #[arg(long, global = true, env = "ENVCHAIN_PREFERENCES")]
    pub preferences: Option<PathBuf>,

    /// Preference group to consult
    #[arg(long, global = true, env = "ENVCHAIN_GROUP", default_value = DEFAULT_PREFERENCE_GROUP)]
    pub group: String,

    /// Only print values and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolver settings from the global flags.
    pub fn settings(&self) -> Settings {
        Settings {
            file_name: self.file_name.clone(),
            cache_policy: self.policy,
            interpolate: !self.no_interpolate,
            preferences_path: self.preferences.clone(),
            preference_group: self.group.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the resolved value of a key (`*` for every env file entry)
    Get(GetArgs),

    /// Print every entry of the nearest env file, expanded
    All(AllArgs),

    /// Show which env file would be used
    Which,

    /// Manage saved preferences
    Pref(PrefArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GetArgs {
    /// Key to resolve
    pub key: String,

    /// Value to use when no source defines the key
    #[arg(short, long)]
    pub default: Option<String>,

    /// Fail when the key is undefined and no default is given
    #[arg(short, long)]
    pub require: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Also show where the value came from
    #[arg(long)]
    pub source: bool,
}

/// Arguments for the `all` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AllArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `pref` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PrefArgs {
    #[command(subcommand)]
    pub action: PrefAction,
}

/// Preference store operations.
#[derive(Debug, Clone, Subcommand)]
pub enum PrefAction {
    /// Print a saved value
    Get {
        /// Key to read
        key: String,
    },

    /// Save a value (parsed like an env file value)
    Set {
        /// Key to write
        key: String,
        /// Value to save
        value: String,
    },

    /// Remove a saved value
    Unset {
        /// Key to remove
        key: String,
    },

    /// List saved values in the group
    List,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_with_default() {
        let cli = Cli::parse_from(["envchain", "get", "PORT", "--default", "8080"]);
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(args.key, "PORT");
                assert_eq!(args.default.as_deref(), Some("8080"));
                assert!(!args.require);
            }
            _ => panic!("Expected Get command"),
        }
    }

    #[test]
    fn global_flags_build_settings() {
        let cli = Cli::parse_from([
            "envchain",
            "all",
            "--policy",
            "mtime",
            "--no-interpolate",
            "--file-name",
            ".env.local",
            "--group",
            "team",
        ]);
        let settings = cli.settings();
        assert_eq!(settings.cache_policy, CachePolicy::Mtime);
        assert!(!settings.interpolate);
        assert_eq!(settings.file_name, ".env.local");
        assert_eq!(settings.preference_group, "team");
    }

    #[test]
    fn defaults_match_settings_defaults() {
        let cli = Cli::parse_from(["envchain", "which"]);
        let settings = cli.settings();
        assert_eq!(settings.file_name, Settings::default().file_name);
        assert_eq!(settings.cache_policy, Settings::default().cache_policy);
        assert!(settings.interpolate);
    }

    #[test]
    fn rejects_unknown_policy() {
        let result = Cli::try_parse_from(["envchain", "all", "--policy", "weekly"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_pref_set() {
        let cli = Cli::parse_from(["envchain", "pref", "set", "WORKERS", "4"]);
        match cli.command {
            Commands::Pref(PrefArgs {
                action: PrefAction::Set { key, value },
            }) => {
                assert_eq!(key, "WORKERS");
                assert_eq!(value, "4");
            }
            _ => panic!("Expected pref set"),
        }
    }
}
