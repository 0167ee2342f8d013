//! Document tree adapter: typed, path-addressable access to a TOML document.
//!
//! A [`ConfigFile`] owns one parsed document plus the path it came from. Reads
//! go through [`Section`], writes through [`SectionMut`]; both accept dotted
//! paths (`open-with-item.material`) relative to the section they wrap. Key
//! lookup is case-sensitive.
//!
//! Edits use `toml_edit`, so comments and formatting the user wrote survive an
//! upgrade that rewrites a handful of keys.

use std::path::{Path, PathBuf};

use toml_edit::{Array, DocumentMut, Item, Table, TableLike, Value};

use crate::error::{self, ChestfigError};

/// One configuration unit: a path plus its in-memory document.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    doc: DocumentMut,
}

impl ConfigFile {
    /// An empty document that will be written to `path` on save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            doc: DocumentMut::new(),
        }
    }

    /// Parse `content` as if it had been read from `path`. No I/O.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ChestfigError> {
        let path = path.into();
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| ChestfigError::syntax(&path, e.to_string()))?;
        Ok(Self { path, doc })
    }

    /// Read and parse the file at `path`.
    ///
    /// Fails with [`ChestfigError::Io`] when the file can't be read and with
    /// [`ChestfigError::Syntax`] when it isn't valid TOML.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ChestfigError> {
        let path = path.into();
        let content =
            std::fs::read_to_string(&path).map_err(|e| ChestfigError::read(&path, e))?;
        Self::parse(path, &content)
    }

    /// Write the document back to its path, creating parent directories.
    pub fn save(&self) -> Result<(), ChestfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ChestfigError::write(parent, e))?;
        }
        std::fs::write(&self.path, self.doc.to_string())
            .map_err(|e| ChestfigError::write(&self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        error::file_name(&self.path)
    }

    pub fn root(&self) -> Section<'_> {
        Section {
            table: self.doc.as_table(),
        }
    }

    pub fn root_mut(&mut self) -> SectionMut<'_> {
        SectionMut {
            table: self.doc.as_table_mut(),
        }
    }

    /// Render the document as it would be saved.
    pub fn to_toml_string(&self) -> String {
        self.doc.to_string()
    }
}

/// Read-only view of a table (or inline table) inside a document.
#[derive(Clone, Copy)]
pub struct Section<'a> {
    table: &'a dyn TableLike,
}

impl<'a> Section<'a> {
    /// The item at a dotted path, if set.
    pub fn get(&self, path: &str) -> Option<&'a Item> {
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (self.section(parent)?, leaf),
            None => (*self, path),
        };
        parent.table.get(leaf).filter(|item| !item.is_none())
    }

    /// The item under a literal key, without splitting it on dots.
    pub fn get_key(&self, key: &str) -> Option<&'a Item> {
        self.table.get(key).filter(|item| !item.is_none())
    }

    pub fn is_set(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// The nested section at a dotted path, if that path holds a table.
    pub fn section(&self, path: &str) -> Option<Section<'a>> {
        let mut current: &'a dyn TableLike = self.table;
        for segment in path.split('.') {
            current = current.get(segment)?.as_table_like()?;
        }
        Some(Section { table: current })
    }

    /// The nested section under a literal key, without splitting it on dots.
    pub fn child(&self, key: &str) -> Option<Section<'a>> {
        let table = self.get_key(key)?.as_table_like()?;
        Some(Section { table })
    }

    pub fn is_section(&self, path: &str) -> bool {
        self.get(path).is_some_and(Item::is_table_like)
    }

    /// Keys of this section in document order. With `deep`, nested keys are
    /// included as dotted paths right after their parent.
    pub fn keys(&self, deep: bool) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(self.table, "", deep, &mut keys);
        keys
    }

    /// Text at `path`. Numbers and booleans are rendered to text; tables and
    /// arrays are not strings.
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path)?.as_value().and_then(scalar_to_string)
    }

    /// True only for a genuine TOML string.
    pub fn is_string(&self, path: &str) -> bool {
        self.get(path).is_some_and(Item::is_str)
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.get(path)?.as_integer()
    }

    pub fn is_int(&self, path: &str) -> bool {
        self.get_int(path).is_some()
    }

    /// Floats, with integers widened.
    pub fn get_double(&self, path: &str) -> Option<f64> {
        let item = self.get(path)?;
        item.as_float().or_else(|| item.as_integer().map(|i| i as f64))
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    /// Elements of an array at `path`, each scalar rendered to text. Nested
    /// arrays and tables inside the list are skipped.
    pub fn get_string_list(&self, path: &str) -> Option<Vec<String>> {
        let array = self.get(path)?.as_array()?;
        Some(array.iter().filter_map(scalar_to_string).collect())
    }

    pub fn is_list(&self, path: &str) -> bool {
        self.get(path).is_some_and(Item::is_array)
    }
}

/// Mutable view of a table inside a document.
pub struct SectionMut<'a> {
    table: &'a mut dyn TableLike,
}

impl<'a> SectionMut<'a> {
    pub fn as_section(&self) -> Section<'_> {
        Section { table: &*self.table }
    }

    pub fn get(&self, path: &str) -> Option<&Item> {
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (self.as_section().section(parent)?, leaf),
            None => (self.as_section(), path),
        };
        parent.table.get(leaf).filter(|item| !item.is_none())
    }

    pub fn is_set(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn is_string(&self, path: &str) -> bool {
        self.as_section().is_string(path)
    }

    pub fn get_string(&self, path: &str) -> Option<String> {
        self.as_section().get_string(path)
    }

    /// Set the item at a dotted path, creating intermediate tables. `None`
    /// removes the key.
    pub fn set(&mut self, path: &str, item: Option<Item>) {
        match item {
            Some(item) => {
                if let Some((parent, leaf)) = navigate_mut(&mut *self.table, path, true) {
                    parent.insert(leaf, item);
                }
            }
            None => {
                self.take(path);
            }
        }
    }

    /// Remove and return the item at a dotted path.
    pub fn take(&mut self, path: &str) -> Option<Item> {
        let (parent, leaf) = navigate_mut(&mut *self.table, path, false)?;
        parent.remove(leaf).filter(|item| !item.is_none())
    }

    /// Insert under a literal key, without splitting it on dots.
    pub fn insert_key(&mut self, key: &str, item: Item) {
        self.table.insert(key, item);
    }

    /// The nested table under a literal key, created when absent.
    pub fn child_or_create(&mut self, key: &str) -> Option<SectionMut<'_>> {
        if !self.table.contains_key(key) {
            self.table.insert(key, Item::Table(Table::new()));
        }
        let table = self.table.get_mut(key)?.as_table_like_mut()?;
        Some(SectionMut { table })
    }

    /// The nested table under a literal key, if present.
    pub fn child_mut(&mut self, key: &str) -> Option<SectionMut<'_>> {
        let table = self.table.get_mut(key)?.as_table_like_mut()?;
        Some(SectionMut { table })
    }

    /// The nested section at a dotted path, if that path holds a table.
    pub fn section_mut(&mut self, path: &str) -> Option<SectionMut<'_>> {
        let mut current: &mut dyn TableLike = &mut *self.table;
        for segment in path.split('.') {
            current = current.get_mut(segment)?.as_table_like_mut()?;
        }
        Some(SectionMut { table: current })
    }

    pub fn keys(&self, deep: bool) -> Vec<String> {
        self.as_section().keys(deep)
    }
}

/// A string item.
pub fn string_item(value: &str) -> Item {
    toml_edit::value(value)
}

/// An integer item.
pub fn int_item(value: i64) -> Item {
    toml_edit::value(value)
}

/// An array-of-strings item.
pub fn string_list_item<S: AsRef<str>>(values: &[S]) -> Item {
    let array: Array = values.iter().map(|v| v.as_ref()).collect();
    Item::Value(Value::Array(array))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.value().clone()),
        Value::Integer(i) => Some(i.value().to_string()),
        Value::Float(f) => Some(f.value().to_string()),
        Value::Boolean(b) => Some(b.value().to_string()),
        _ => None,
    }
}

fn collect_keys(table: &dyn TableLike, prefix: &str, deep: bool, out: &mut Vec<String>) {
    for (key, item) in table.iter() {
        if item.is_none() {
            continue;
        }
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        out.push(path.clone());
        if deep && let Some(child) = item.as_table_like() {
            collect_keys(child, &path, deep, out);
        }
    }
}

/// Walk to the parent table of the last path segment. With `create`, missing
/// intermediate tables are inserted as implicit tables.
fn navigate_mut<'t, 'p>(
    table: &'t mut dyn TableLike,
    path: &'p str,
    create: bool,
) -> Option<(&'t mut dyn TableLike, &'p str)> {
    match path.split_once('.') {
        None => Some((table, path)),
        Some((head, rest)) => {
            if create && table.get(head).is_none_or(|item| !item.is_table_like()) {
                let mut child = Table::new();
                child.set_implicit(true);
                table.insert(head, Item::Table(child));
            }
            let child = table.get_mut(head)?.as_table_like_mut()?;
            navigate_mut(child, rest, create)
        }
    }
}
