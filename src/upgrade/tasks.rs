//! The concrete upgrades shipped with chestfig 4.0.

use std::fs;
use std::path::{Path, PathBuf};

use crate::attributes::trimmed_split_once;
use crate::document::{ConfigFile, SectionMut, string_item};
use crate::error::ChestfigError;
use crate::menu::MENU_SETTINGS;

use super::UpgradeTask;
use super::rewrite::{
    expand_inline_item_stack, expand_inline_list, expand_singleton_list, prune_empty,
    remove_node, rename_node,
};

/// Rewrites one menu file to the current attribute names and list forms.
pub struct MenuUpgrade {
    path: PathBuf,
    legacy_separator: String,
    config: Option<ConfigFile>,
}

impl MenuUpgrade {
    /// `legacy_separator` is the separator inline action lists were written
    /// with, as configured before the upgrade.
    pub fn new(path: impl Into<PathBuf>, legacy_separator: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            legacy_separator: legacy_separator.into(),
            config: None,
        }
    }

    fn upgrade_menu_settings(section: &mut SectionMut<'_>, legacy_separator: &str) -> bool {
        let mut modified = false;
        modified |= rename_node(section, "command", "commands");
        modified |= rename_node(section, "open-action", "open-actions");
        modified |= rename_node(section, "open-with-item.id", "open-with-item.material");
        modified |= expand_inline_list(section, "commands", ";");
        modified |= expand_inline_list(section, "open-actions", legacy_separator);
        modified
    }

    fn upgrade_icon(section: &mut SectionMut<'_>, legacy_separator: &str) -> bool {
        let mut modified = false;
        for (old, new) in [
            ("ID", "MATERIAL"),
            ("DATA-VALUE", "DURABILITY"),
            ("NBT", "NBT-DATA"),
            ("ENCHANTMENT", "ENCHANTMENTS"),
            ("COMMAND", "ACTIONS"),
            ("COMMANDS", "ACTIONS"),
            ("REQUIRED-ITEM", "REQUIRED-ITEMS"),
        ] {
            modified |= rename_node(section, old, new);
        }
        modified |= expand_inline_list(section, "ACTIONS", legacy_separator);
        modified |= expand_inline_list(section, "ENCHANTMENTS", ";");
        modified |= expand_singleton_list(section, "REQUIRED-ITEMS");
        modified |= expand_inline_item_stack(section);
        modified
    }
}

impl UpgradeTask for MenuUpgrade {
    fn original_file(&self) -> &Path {
        &self.path
    }

    fn upgraded_file(&self) -> &Path {
        &self.path
    }

    fn compute_changes(&mut self) -> Result<bool, ChestfigError> {
        let mut config = ConfigFile::load(&self.path)?;
        let mut modified = false;
        {
            let mut root = config.root_mut();
            for key in root.keys(false) {
                let Some(mut section) = root.child_mut(&key) else {
                    continue;
                };
                modified |= if key == MENU_SETTINGS {
                    Self::upgrade_menu_settings(&mut section, &self.legacy_separator)
                } else {
                    Self::upgrade_icon(&mut section, &self.legacy_separator)
                };
            }
        }
        self.config = Some(config);
        Ok(modified)
    }

    fn save_changes(&mut self) -> Result<(), ChestfigError> {
        match &self.config {
            Some(config) => config.save(),
            None => Ok(()),
        }
    }
}

/// Moves the settings file to the current key names.
pub struct SettingsUpgrade {
    path: PathBuf,
    config: Option<ConfigFile>,
}

impl SettingsUpgrade {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: None,
        }
    }
}

const RENAMED_SETTINGS: [(&str, &str); 5] = [
    ("multiple-commands-separator", "multiple_commands_separator"),
    ("update-notifications", "update_notifications"),
    ("anti-click-spam-delay", "anti_click_spam_delay"),
    ("default-color.name", "default_color_name"),
    ("default-color.lore", "default_color_lore"),
];

const REMOVED_SETTINGS: [&str; 2] = ["use-console-colors", "use-only-commands-without-args"];

impl UpgradeTask for SettingsUpgrade {
    fn original_file(&self) -> &Path {
        &self.path
    }

    fn upgraded_file(&self) -> &Path {
        &self.path
    }

    fn compute_changes(&mut self) -> Result<bool, ChestfigError> {
        if !self.path.is_file() {
            return Ok(false);
        }
        let mut config = ConfigFile::load(&self.path)?;
        let mut modified = false;
        {
            let mut root = config.root_mut();
            for (old, new) in RENAMED_SETTINGS {
                modified |= rename_node(&mut root, old, new);
            }
            for key in REMOVED_SETTINGS {
                modified |= remove_node(&mut root, key);
            }
            modified |= prune_empty(&mut root, "default-color");
        }
        self.config = Some(config);
        Ok(modified)
    }

    fn save_changes(&mut self) -> Result<(), ChestfigError> {
        match &self.config {
            Some(config) => config.save(),
            None => Ok(()),
        }
    }
}

/// Converts the legacy line-based `placeholders.yml` into the
/// `[placeholders]` table of the current placeholders file.
pub struct PlaceholdersUpgrade {
    legacy_file: PathBuf,
    new_file: PathBuf,
    converted: Option<ConfigFile>,
}

impl PlaceholdersUpgrade {
    pub fn new(legacy_file: impl Into<PathBuf>, new_file: impl Into<PathBuf>) -> Self {
        Self {
            legacy_file: legacy_file.into(),
            new_file: new_file.into(),
            converted: None,
        }
    }
}

impl UpgradeTask for PlaceholdersUpgrade {
    fn original_file(&self) -> &Path {
        &self.legacy_file
    }

    fn upgraded_file(&self) -> &Path {
        &self.new_file
    }

    fn compute_changes(&mut self) -> Result<bool, ChestfigError> {
        if !self.legacy_file.is_file() {
            return Ok(false);
        }
        let content = fs::read_to_string(&self.legacy_file)
            .map_err(|e| ChestfigError::read(&self.legacy_file, e))?;

        // Built from scratch: it only holds what the legacy file had.
        let mut converted = ConfigFile::new(&self.new_file);
        let mut modified = false;
        {
            let mut root = converted.root_mut();
            if let Some(mut placeholders) = root.child_or_create("placeholders") {
                for (placeholder, replacement) in content.lines().filter_map(parse_legacy_line) {
                    placeholders.insert_key(&placeholder, string_item(&replacement));
                    modified = true;
                }
            }
        }
        self.converted = Some(converted);
        Ok(modified)
    }

    fn save_changes(&mut self) -> Result<(), ChestfigError> {
        let Some(converted) = &self.converted else {
            return Ok(());
        };
        if let Err(e) = fs::remove_file(&self.legacy_file) {
            log::warn!("Couldn't delete {}: {e}", self.legacy_file.display());
        }
        converted.save()
    }
}

/// `placeholder: replacement`, both optionally quoted. Comments, blank
/// lines and lines without `:` yield nothing.
fn parse_legacy_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (placeholder, replacement) = trimmed_split_once(line, ':')?;
    Some((
        unquote(placeholder).to_string(),
        unescape(unquote(replacement)),
    ))
}

fn unquote(input: &str) -> &str {
    if input.len() < 2 {
        return input;
    }
    for quote in ['\'', '"'] {
        if let Some(inner) = input
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    input
}

/// Resolve backslash escapes: `\n`, `\t`, `\r`, `\b`, `\f`, `\\`, `\'`,
/// `\"` and `\uXXXX`. Unknown escapes are kept as written.
fn unescape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some('r') => output.push('\r'),
            Some('b') => output.push('\u{8}'),
            Some('f') => output.push('\u{c}'),
            Some(escaped @ ('\\' | '\'' | '"')) => output.push(escaped),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        output.push(decoded);
                        chars.nth(3);
                    }
                    _ => output.push_str("\\u"),
                }
            }
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{LEGACY_MENU, write_file};
    use crate::upgrade::{Upgrade, UpgradeOutcome};
    use tempfile::TempDir;

    #[test]
    fn legacy_menu_is_upgraded() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "menu/shop.toml", LEGACY_MENU);

        let outcome = Upgrade::new(MenuUpgrade::new(&path, ";")).run().unwrap();
        let UpgradeOutcome::Upgraded { backup, .. } = outcome else {
            panic!("Expected Upgraded");
        };
        assert_eq!(fs::read_to_string(backup).unwrap(), LEGACY_MENU);

        let upgraded = ConfigFile::load(&path).unwrap();
        let root = upgraded.root();
        let settings = root.section("menu-settings").unwrap();
        assert_eq!(
            settings.get_string_list("commands"),
            Some(vec!["shop".to_string(), "store".to_string()])
        );
        assert_eq!(
            settings.get_string_list("open-actions"),
            Some(vec!["tell: &aWelcome".to_string(), "sound: click".to_string()])
        );
        assert_eq!(
            settings.get_string("open-with-item.material").as_deref(),
            Some("compass")
        );

        let icon = root.section("wool-icon").unwrap();
        assert_eq!(icon.get_string("MATERIAL").as_deref(), Some("wool"));
        assert_eq!(icon.get_int("DURABILITY"), Some(5));
        assert_eq!(icon.get_int("AMOUNT"), Some(3));
        assert!(!icon.is_set("ID"));
        assert_eq!(
            icon.get_string_list("ACTIONS"),
            Some(vec!["spawn".to_string(), "tell: hi".to_string()])
        );
        assert_eq!(
            icon.get_string_list("REQUIRED-ITEMS"),
            Some(vec!["gold_ingot, 2".to_string()])
        );
    }

    #[test]
    fn menu_upgrade_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "shop.toml", LEGACY_MENU);
        assert!(Upgrade::new(MenuUpgrade::new(&path, ";")).compute().unwrap().is_modified());
        Upgrade::new(MenuUpgrade::new(&path, ";")).run().unwrap();

        let after_first = fs::read_to_string(&path).unwrap();
        let second = Upgrade::new(MenuUpgrade::new(&path, ";")).run().unwrap();
        assert_eq!(second, UpgradeOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn legacy_separator_is_used_for_actions() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "m.toml",
            "[icon]\nCOMMAND = \"spawn | tell: a;b\"\n",
        );
        Upgrade::new(MenuUpgrade::new(&path, "|")).run().unwrap();
        let upgraded = ConfigFile::load(&path).unwrap();
        assert_eq!(
            upgraded.root().get_string_list("icon.ACTIONS"),
            Some(vec!["spawn".to_string(), "tell: a;b".to_string()])
        );
    }

    #[test]
    fn broken_menu_fails_to_compute() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "bad.toml", "[icon\n");
        let err = Upgrade::new(MenuUpgrade::new(&path, ";")).run().unwrap_err();
        assert!(matches!(err, ChestfigError::Upgrade { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[icon\n");
    }

    #[test]
    fn settings_keys_are_renamed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "config.toml",
            "# mine\nmultiple-commands-separator = \"|\"\nuse-console-colors = true\n\n[default-color]\nname = \"&b\"\nlore = \"&8\"\n",
        );
        Upgrade::new(SettingsUpgrade::new(&path)).run().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# mine"));
        let upgraded = ConfigFile::load(&path).unwrap();
        let root = upgraded.root();
        assert_eq!(root.get_string("multiple_commands_separator").as_deref(), Some("|"));
        assert_eq!(root.get_string("default_color_name").as_deref(), Some("&b"));
        assert_eq!(root.get_string("default_color_lore").as_deref(), Some("&8"));
        assert!(!root.is_set("use-console-colors"));
        assert!(!root.is_set("default-color"));
    }

    #[test]
    fn missing_settings_file_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let outcome = Upgrade::new(SettingsUpgrade::new(dir.path().join("config.toml")))
            .run()
            .unwrap();
        assert_eq!(outcome, UpgradeOutcome::Unchanged);
    }

    #[test]
    fn legacy_placeholders_are_converted() {
        let dir = TempDir::new().unwrap();
        let legacy = write_file(
            dir.path(),
            "placeholders.yml",
            "# comment\n\n'<3': '\\u2764'\n\"{a.b}\": \"line\\nbreak\"\nbad line\n{x}: plain\n",
        );
        let new_file = dir.path().join("custom-placeholders.toml");

        let outcome = Upgrade::new(PlaceholdersUpgrade::new(&legacy, &new_file))
            .run()
            .unwrap();
        let UpgradeOutcome::Upgraded { backup, .. } = outcome else {
            panic!("Expected Upgraded");
        };
        assert!(backup.file_name().unwrap().to_string_lossy().starts_with("placeholders.yml_"));
        assert!(!legacy.exists());

        let converted = ConfigFile::load(&new_file).unwrap();
        let table = converted.root().section("placeholders").unwrap();
        assert_eq!(table.keys(false), vec!["<3", "{a.b}", "{x}"]);
        assert_eq!(
            table.get_key("<3").and_then(|i| i.as_str()),
            Some("\u{2764}")
        );
        assert_eq!(
            table.get_key("{a.b}").and_then(|i| i.as_str()),
            Some("line\nbreak")
        );
    }

    #[test]
    fn unescape_variants() {
        assert_eq!(unescape(r"a\tb"), "a\tb");
        assert_eq!(unescape(r#"\"q\""#), "\"q\"");
        assert_eq!(unescape(r"\u00e9"), "é");
        assert_eq!(unescape(r"\uZZ"), "\\uZZ");
        assert_eq!(unescape(r"\q"), "\\q");
        assert_eq!(unescape("end\\"), "end\\");
    }

    #[test]
    fn unquote_variants() {
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("'a\""), "'a\"");
        assert_eq!(unquote("'"), "'");
    }
}
