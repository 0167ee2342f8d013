//! Custom placeholders: literal text substitutions declared by the user in
//! `custom-placeholders.toml`:
//!
//! ```toml
//! [placeholders]
//! "<3" = "❤"
//! "{server}" = "Survival"
//! ```

use std::path::Path;

use crate::collector::ErrorCollector;
use crate::document::ConfigFile;
use crate::error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placeholders {
    replacements: Vec<(String, String)>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacement. Empty placeholders are ignored.
    pub fn insert(&mut self, placeholder: impl Into<String>, replacement: impl Into<String>) {
        let placeholder = placeholder.into();
        if !placeholder.is_empty() {
            self.replacements.push((placeholder, replacement.into()));
        }
    }

    /// Apply every replacement, in declaration order.
    pub fn replace_all(&self, input: &str) -> String {
        let mut output = input.to_string();
        for (placeholder, replacement) in &self.replacements {
            if output.contains(placeholder.as_str()) {
                output = output.replace(placeholder.as_str(), replacement);
            }
        }
        output
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Read the `[placeholders]` table of `file`. Non-text replacements are
    /// recorded as errors and skipped.
    pub fn from_file(file: &ConfigFile, errors: &mut ErrorCollector) -> Self {
        let mut placeholders = Self::new();
        let Some(section) = file.root().section("placeholders") else {
            return placeholders;
        };
        for key in section.keys(false) {
            // Keys may contain dots.
            match section.get_key(&key).and_then(|item| item.as_str()) {
                Some(replacement) => placeholders.insert(key.clone(), replacement),
                None => errors.add([
                    format!("the placeholder \"{key}\" in the file \"{}\"", file.file_name()),
                    "the replacement must be a text value".to_string(),
                ]),
            }
        }
        placeholders
    }

    /// Load from disk. A missing file means no placeholders; other failures
    /// are recorded and also yield no placeholders.
    pub fn load(path: &Path, errors: &mut ErrorCollector) -> Self {
        if !path.exists() {
            return Self::new();
        }
        match ConfigFile::load(path) {
            Ok(file) => Self::from_file(&file, errors),
            Err(e) => {
                errors.add_caused(
                    e,
                    [format!(
                        "error while loading the placeholders file \"{}\"",
                        error::file_name(path)
                    )],
                );
                Self::new()
            }
        }
    }
}

/// Convenience for tests and hosts that build placeholders in code.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Placeholders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut placeholders = Self::new();
        for (k, v) in iter {
            placeholders.insert(k, v);
        }
        placeholders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn replaces_in_order() {
        let placeholders: Placeholders = [("<3", "❤"), ("{a}", "{b}"), ("{b}", "B")]
            .into_iter()
            .collect();
        assert_eq!(placeholders.replace_all("I <3 {a}"), "I ❤ B");
    }

    #[test]
    fn reads_table() {
        let file = ConfigFile::parse(
            "custom-placeholders.toml",
            "[placeholders]\n\"<3\" = \"❤\"\n\"{a.b}\" = \"x\"\nbad = 3\n",
        )
        .unwrap();
        let mut errors = ErrorCollector::new();
        let placeholders = Placeholders::from_file(&file, &mut errors);
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders.replace_all("<3"), "❤");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut errors = ErrorCollector::new();
        let placeholders = Placeholders::load(&dir.path().join("none.toml"), &mut errors);
        assert!(placeholders.is_empty());
        assert!(!errors.has_errors());
    }

    #[test]
    fn broken_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom-placeholders.toml");
        fs::write(&path, "[placeholders\n").unwrap();
        let mut errors = ErrorCollector::new();
        let placeholders = Placeholders::load(&path, &mut errors);
        assert!(placeholders.is_empty());
        assert_eq!(errors.len(), 1);
    }
}
