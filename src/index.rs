//! Registry of loaded menus, looked up by file name, command or open item.

use std::collections::BTreeMap;

use crate::collector::ErrorCollector;
use crate::menu::{ClickType, Menu, OpenTrigger};

/// An ordered map with case-insensitive keys. Each entry remembers its key as
/// it was first written, for messages.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    entries: BTreeMap<String, (String, V)>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, replacing any entry whose key differs only in case. The
    /// replaced entry (original key and value) is returned.
    pub fn insert(&mut self, key: &str, value: V) -> Option<(String, V)> {
        self.entries
            .insert(key.to_lowercase(), (key.to_string(), value))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&key.to_lowercase()).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    /// The key as written by whoever inserted it.
    pub fn original_key(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_lowercase())
            .map(|(original, _)| original.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct MenuIndex {
    menus_by_file: CaseInsensitiveMap<Menu>,
    /// Command → file name of the menu it opens.
    menus_by_command: CaseInsensitiveMap<String>,
    open_triggers: Vec<(OpenTrigger, String)>,
}

impl MenuIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `menu`. A file name already taken (ignoring case) is replaced; a
    /// command already taken by another menu stays with the one that
    /// registered it first. Both collisions are recorded.
    pub fn register(&mut self, menu: Menu, errors: &mut ErrorCollector) {
        let file_name = menu.file_name.clone();

        for command in &menu.settings.commands {
            if command.is_empty() {
                continue;
            }
            if let Some(existing) = self.menus_by_command.get(command) {
                // Repeated within the same menu, in any case.
                if existing.eq_ignore_ascii_case(&file_name) {
                    continue;
                }
                errors.add([format!(
                    "the menus \"{existing}\" and \"{file_name}\" have the same command \"{command}\""
                ), format!("only \"{existing}\" will be opened")]);
                continue;
            }
            self.menus_by_command.insert(command, file_name.clone());
        }

        if let Some(trigger) = &menu.settings.open_trigger {
            self.open_triggers.push((trigger.clone(), file_name.clone()));
        }

        if let Some((previous, _)) = self.menus_by_file.insert(&file_name, menu) {
            errors.add([
                format!("two menus have the same file name \"{previous}\" with different cases"),
                format!("only \"{file_name}\" will be used"),
            ]);
        }
    }

    pub fn menu_by_file(&self, file_name: &str) -> Option<&Menu> {
        self.menus_by_file.get(file_name)
    }

    pub fn menu_by_command(&self, command: &str) -> Option<&Menu> {
        self.menus_by_command
            .get(command)
            .and_then(|file_name| self.menus_by_file.get(file_name))
    }

    /// Menus opened by clicking `material:durability` with `click`.
    pub fn menus_for_item(
        &self,
        material: &str,
        durability: u16,
        click: ClickType,
    ) -> impl Iterator<Item = &Menu> {
        self.open_triggers
            .iter()
            .filter(move |(trigger, _)| trigger.matches(material, durability, click))
            .filter_map(|(_, file_name)| self.menus_by_file.get(file_name))
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.menus_by_file.iter().map(|(name, _)| name)
    }

    pub fn commands(&self) -> impl Iterator<Item = (&str, &str)> {
        self.menus_by_command
            .iter()
            .map(|(command, file_name)| (command, file_name.as_str()))
    }

    pub fn menus(&self) -> impl Iterator<Item = &Menu> {
        self.menus_by_file.iter().map(|(_, menu)| menu)
    }

    pub fn len(&self) -> usize {
        self.menus_by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus_by_file.is_empty()
    }
}
