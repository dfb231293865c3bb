//! Pref command implementation.
//!
//! The `envchain pref` command reads and edits the preference store, the last
//! source consulted by the resolver.

use std::path::PathBuf;

use crate::cli::args::{PrefAction, PrefArgs};
use crate::config::{EnvFileParser, Settings};
use crate::error::Result;
use crate::state::{PreferenceSource, PreferenceStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The pref command implementation.
pub struct PrefCommand {
    settings: Settings,
    args: PrefArgs,
}

impl PrefCommand {
    /// Create a new pref command.
    pub fn new(settings: Settings, args: PrefArgs) -> Self {
        Self { settings, args }
    }

    fn store_path(&self) -> Result<PathBuf> {
        match &self.settings.preferences_path {
            Some(path) => Ok(path.clone()),
            None => PreferenceStore::default_path(),
        }
    }
}

impl Command for PrefCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = self.store_path()?;
        let group = self.settings.preference_group.as_str();
        let mut store = PreferenceStore::load(&path)?;

        match &self.args.action {
            PrefAction::Get { key } => match store.get(group, key) {
                Some(value) => ui.message(&value.to_string()),
                None => {
                    ui.warning(&format!("{} is not saved in group '{}'", key, group));
                    return Ok(CommandResult::failure(1));
                }
            },
            PrefAction::Set { key, value } => {
                store.set(group, key, EnvFileParser::parse_value(value.trim()));
                store.save(&path)?;
                tracing::debug!(path = %path.display(), key = %key, "saved preference");
                ui.success(&format!("Saved {} in group '{}'", key, group));
            }
            PrefAction::Unset { key } => {
                if store.remove(group, key).is_some() {
                    store.save(&path)?;
                    ui.success(&format!("Removed {} from group '{}'", key, group));
                } else {
                    ui.warning(&format!("{} is not saved in group '{}'", key, group));
                }
            }
            PrefAction::List => {
                if let Some(values) = store.group(group) {
                    for (key, value) in values {
                        ui.message(&format!("{}={}", key, value));
                    }
                }
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValue;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn run(temp: &TempDir, action: PrefAction) -> (CommandResult, MockUI) {
        let settings = Settings {
            preferences_path: Some(temp.path().join("preferences.yml")),
            ..Settings::default()
        };
        let mut ui = MockUI::new();
        let result = PrefCommand::new(settings, PrefArgs { action })
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn set_then_get() {
        let temp = TempDir::new().unwrap();

        run(
            &temp,
            PrefAction::Set {
                key: "WORKERS".into(),
                value: "4".into(),
            },
        );
        let (result, ui) = run(
            &temp,
            PrefAction::Get {
                key: "WORKERS".into(),
            },
        );

        assert!(result.success);
        assert_eq!(ui.messages(), ["4".to_string()]);

        let store = PreferenceStore::load(&temp.path().join("preferences.yml")).unwrap();
        assert_eq!(store.get("envchain", "WORKERS"), Some(ConfigValue::Integer(4)));
    }

    #[test]
    fn set_parses_lists() {
        let temp = TempDir::new().unwrap();

        run(
            &temp,
            PrefAction::Set {
                key: "HOSTS".into(),
                value: "{a, b}".into(),
            },
        );

        let store = PreferenceStore::load(&temp.path().join("preferences.yml")).unwrap();
        assert_eq!(
            store.get("envchain", "HOSTS"),
            Some(ConfigValue::List(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn get_missing_fails() {
        let temp = TempDir::new().unwrap();

        let (result, ui) = run(&temp, PrefAction::Get { key: "NOPE".into() });

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_warning("NOPE is not saved"));
    }

    #[test]
    fn unset_removes_value() {
        let temp = TempDir::new().unwrap();
        run(
            &temp,
            PrefAction::Set {
                key: "A".into(),
                value: "1".into(),
            },
        );

        let (_, ui) = run(&temp, PrefAction::Unset { key: "A".into() });
        assert!(!ui.successes().is_empty());

        let (_, ui) = run(&temp, PrefAction::Unset { key: "A".into() });
        assert!(ui.has_warning("A is not saved"));
    }

    #[test]
    fn list_prints_sorted_pairs() {
        let temp = TempDir::new().unwrap();
        for (key, value) in [("B", "2"), ("A", "x")] {
            run(
                &temp,
                PrefAction::Set {
                    key: key.into(),
                    value: value.into(),
                },
            );
        }

        let (_, ui) = run(&temp, PrefAction::List);

        assert_eq!(ui.messages(), ["A=x".to_string(), "B=2".to_string()]);
    }
}
