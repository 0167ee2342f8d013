//! Global settings, read from `config.toml`.
//!
//! Loading never fails: every problem is recorded in the [`ErrorCollector`]
//! and the affected values fall back to their defaults. Unknown keys are
//! detected with `serde_ignored` while deserializing into the all-optional
//! `Settings::Layer`, and reported with their line number.

use std::fs;
use std::path::Path;

use confique::Config;
use serde::Serialize;
use toml_edit::{ImDocument, TableLike};

use crate::collector::ErrorCollector;
use crate::error::{self, ChestfigError};

type SettingsLayer = <Settings as Config>::Layer;

#[derive(Config, Serialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Color code put in front of icon names that don't start with one.
    #[config(default = "&f")]
    pub default_color_name: String,

    /// Color code put in front of lore lines that don't start with one.
    #[config(default = "&7")]
    pub default_color_lore: String,

    /// Separator between actions written on a single line.
    #[config(default = ";")]
    pub multiple_commands_separator: String,

    /// Tell operators when a new version is available.
    #[config(default = true)]
    pub update_notifications: bool,

    /// Minimum delay between two clicks of the same player, in milliseconds.
    #[config(default = 200)]
    pub anti_click_spam_delay: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_color_name: "&f".to_string(),
            default_color_lore: "&7".to_string(),
            multiple_commands_separator: ";".to_string(),
            update_notifications: true,
            anti_click_spam_delay: 200,
        }
    }
}

impl Settings {
    /// Load `path`. A missing file yields the defaults without errors.
    pub fn load(path: &Path, errors: &mut ErrorCollector) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path, errors),
            Err(e) => {
                record(errors, path, ChestfigError::read(path, e));
                Self::default()
            }
        }
    }

    /// Parse settings text as if read from `path`.
    pub fn parse(content: &str, path: &Path, errors: &mut ErrorCollector) -> Self {
        let document = match ImDocument::parse(content) {
            Ok(document) => document,
            Err(e) => {
                record(errors, path, ChestfigError::syntax(path, e.to_string()));
                return Self::default();
            }
        };

        let mut unknown_keys: Vec<String> = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let layer: SettingsLayer =
            match serde_ignored::deserialize(deserializer, |ignored| unknown_keys.push(ignored.to_string())) {
                Ok(layer) => layer,
                Err(e) => {
                    let cause = ChestfigError::parse(e.message().to_string());
                    record(errors, path, cause);
                    return Self::default();
                }
            };

        for key in unknown_keys {
            let mut message = vec![
                format!("the settings file \"{}\"", error::file_name(path)),
                format!("unknown setting \"{key}\""),
            ];
            if let Some(line) = unknown_setting_line(&document, &key) {
                message.push(format!("on line {line}"));
            }
            errors.add(message);
        }

        match Settings::builder().preloaded(layer).load() {
            Ok(settings) => settings,
            Err(e) => {
                record(errors, path, ChestfigError::from(e));
                Self::default()
            }
        }
    }
}

fn record(errors: &mut ErrorCollector, path: &Path, cause: ChestfigError) {
    errors.add_caused(
        cause,
        [format!(
            "error while loading the settings file \"{}\", the default values will be used",
            error::file_name(path)
        )],
    );
}

/// 1-indexed line where an unknown setting is written, found through the
/// spans of the parsed document. A whole unknown table resolves to its
/// header.
fn unknown_setting_line(document: &ImDocument<&str>, dotted_key: &str) -> Option<usize> {
    let mut table: &dyn TableLike = document.as_table();
    let mut segments = dotted_key.split('.').peekable();
    while let Some(segment) = segments.next() {
        let (key, item) = table.get_key_value(segment)?;
        if segments.peek().is_none() {
            let start = key.span().or_else(|| item.span())?.start;
            return Some(document.raw()[..start].matches('\n').count() + 1);
        }
        table = item.as_table_like()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn path() -> PathBuf {
        PathBuf::from("/data/config.toml")
    }

    #[test]
    fn default_impl_matches_declared_defaults() {
        let loaded = Settings::builder().load().unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn reads_values() {
        let mut errors = ErrorCollector::new();
        let settings = Settings::parse(
            "default_color_name = \"&b\"\nmultiple_commands_separator = \"|\"\n",
            &path(),
            &mut errors,
        );
        assert!(!errors.has_errors());
        assert_eq!(settings.default_color_name, "&b");
        assert_eq!(settings.multiple_commands_separator, "|");
        assert_eq!(settings.default_color_lore, "&7");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let mut errors = ErrorCollector::new();
        let settings = Settings::load(&dir.path().join("config.toml"), &mut errors);
        assert_eq!(settings, Settings::default());
        assert!(!errors.has_errors());
    }

    #[test]
    fn unknown_keys_are_reported_with_line() {
        let mut errors = ErrorCollector::new();
        let settings = Settings::parse(
            "update_notifications = false\ncolour = \"&f\"\n",
            &path(),
            &mut errors,
        );
        assert!(!settings.update_notifications);
        assert_eq!(errors.len(), 1);
        let message = &errors.errors()[0].message;
        assert_eq!(message[1], "unknown setting \"colour\"");
        assert_eq!(message[2], "on line 2");
    }

    #[test]
    fn unknown_table_found_by_header() {
        let content = "anti_click_spam_delay = 100\n\n[default-color]\nname = \"&f\"\n";
        let document = ImDocument::parse(content).unwrap();
        assert_eq!(unknown_setting_line(&document, "default-color"), Some(3));
        assert_eq!(unknown_setting_line(&document, "default-color.name"), Some(4));
        assert_eq!(unknown_setting_line(&document, "colour"), None);
    }

    #[test]
    fn wrong_type_falls_back_to_defaults() {
        let mut errors = ErrorCollector::new();
        let settings = Settings::parse("anti_click_spam_delay = \"fast\"\n", &path(), &mut errors);
        assert_eq!(settings, Settings::default());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn bad_syntax_is_a_syntax_error() {
        let mut errors = ErrorCollector::new();
        let settings = Settings::parse("update_notifications = \n", &path(), &mut errors);
        assert_eq!(settings, Settings::default());
        assert!(matches!(
            errors.errors()[0].cause,
            Some(ChestfigError::Syntax { .. })
        ));
    }
}
