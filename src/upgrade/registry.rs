use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ChestfigError;

/// A known upgrade, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeId {
    V4Config,
    V4Placeholders,
    V4Menus,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 3] = [
        UpgradeId::V4Config,
        UpgradeId::V4Placeholders,
        UpgradeId::V4Menus,
    ];

    /// The key stored in the registry file. Never change it.
    pub fn as_str(self) -> &'static str {
        match self {
            UpgradeId::V4Config => "v4.0-config",
            UpgradeId::V4Placeholders => "v4.0-placeholders",
            UpgradeId::V4Menus => "v4.0-menus",
        }
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which upgrades were already applied, persisted as `"id" = true` lines.
///
/// Entries are never removed, and unknown ids written by newer versions are
/// kept as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradesDoneRegistry {
    path: PathBuf,
    done: BTreeMap<String, bool>,
}

impl UpgradesDoneRegistry {
    /// Read the registry. A missing file means nothing was done yet; a file
    /// that can't be read or parsed is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ChestfigError> {
        let path = path.into();
        let done = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| ChestfigError::syntax(&path, e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ChestfigError::read(&path, e)),
        };
        Ok(Self { path, done })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_done(&self, id: UpgradeId) -> bool {
        self.done.get(id.as_str()).copied().unwrap_or(false)
    }

    pub fn set_done(&mut self, id: UpgradeId) {
        self.done.insert(id.as_str().to_string(), true);
    }

    /// Mark every known upgrade as done. Used on fresh installs, whose
    /// files are already current.
    pub fn set_all_done(&mut self) {
        for id in UpgradeId::ALL {
            self.set_done(id);
        }
    }

    pub fn save(&self) -> Result<(), ChestfigError> {
        let content =
            toml::to_string(&self.done).map_err(|e| ChestfigError::parse(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ChestfigError::write(parent, e))?;
        }
        fs::write(&self.path, content).map_err(|e| ChestfigError::write(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = UpgradesDoneRegistry::load(dir.path().join(".upgrades-done")).unwrap();
        assert!(UpgradeId::ALL.iter().all(|id| !registry.is_done(*id)));
    }

    #[test]
    fn persists_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".upgrades-done");
        let mut registry = UpgradesDoneRegistry::load(&path).unwrap();
        registry.set_done(UpgradeId::V4Menus);
        registry.save().unwrap();

        let reloaded = UpgradesDoneRegistry::load(&path).unwrap();
        assert!(reloaded.is_done(UpgradeId::V4Menus));
        assert!(!reloaded.is_done(UpgradeId::V4Config));
    }

    #[test]
    fn set_all_done_marks_every_id() {
        let dir = TempDir::new().unwrap();
        let mut registry = UpgradesDoneRegistry::load(dir.path().join("r")).unwrap();
        registry.set_all_done();
        assert!(UpgradeId::ALL.iter().all(|id| registry.is_done(*id)));
    }

    #[test]
    fn unknown_ids_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".upgrades-done");
        fs::write(&path, "\"v9.9-future\" = true\n").unwrap();
        let mut registry = UpgradesDoneRegistry::load(&path).unwrap();
        registry.set_done(UpgradeId::V4Config);
        registry.save().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("v9.9-future"));
        assert!(content.contains("v4.0-config"));
    }

    #[test]
    fn unreadable_registry_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".upgrades-done");
        fs::write(&path, "v4.0-menus = maybe\n").unwrap();
        assert!(matches!(
            UpgradesDoneRegistry::load(&path),
            Err(ChestfigError::Syntax { .. })
        ));

        let as_dir = dir.path().join("dir");
        fs::create_dir(&as_dir).unwrap();
        assert!(matches!(
            UpgradesDoneRegistry::load(&as_dir),
            Err(ChestfigError::Io { .. })
        ));
    }
}
