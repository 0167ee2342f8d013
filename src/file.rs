//! Data folder layout and menu file discovery.
//!
//! Everything lives under one data folder, either given explicitly or derived
//! from the application name with the platform's data directory (e.g.
//! `~/.local/share/{app_name}/` on Linux):
//!
//! ```text
//! config.toml                 settings
//! custom-placeholders.toml    [placeholders] table
//! placeholders.yml            legacy placeholders, converted by an upgrade
//! menu/**/*.toml              one menu per file
//! .upgrades-done              upgrades already applied
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ChestfigError;
use crate::types::DataFolder;

pub const SETTINGS_FILE: &str = "config.toml";
pub const PLACEHOLDERS_FILE: &str = "custom-placeholders.toml";
pub const LEGACY_PLACEHOLDERS_FILE: &str = "placeholders.yml";
pub const MENUS_FOLDER: &str = "menu";
pub const UPGRADES_DONE_FILE: &str = ".upgrades-done";
pub const MENU_EXTENSION: &str = "toml";

/// Resolve a [`DataFolder`] to a concrete directory.
///
/// `DataFolder::Platform` needs the application name and a platform data
/// directory; without them the folder can't be resolved.
pub fn resolve_data_folder(
    folder: &DataFolder,
    app_name: Option<&str>,
) -> Result<PathBuf, ChestfigError> {
    match folder {
        DataFolder::Path(path) => Ok(path.clone()),
        DataFolder::Platform => {
            let app_name = app_name.ok_or(ChestfigError::AppNameRequired)?;
            let dirs = directories::ProjectDirs::from("", "", app_name)
                .ok_or(ChestfigError::AppNameRequired)?;
            Ok(dirs.data_dir().to_path_buf())
        }
    }
}

/// Paths of every file chestfig reads or writes for one installation.
#[derive(Debug, Clone, PartialEq)]
pub struct DataLayout {
    root: PathBuf,
    menus: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let menus = root.join(MENUS_FOLDER);
        Self { root, menus }
    }

    /// Use a menus folder other than `{root}/menu`.
    pub fn with_menus_folder(mut self, menus: impl Into<PathBuf>) -> Self {
        self.menus = menus.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn menus_folder(&self) -> &Path {
        &self.menus
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn placeholders_file(&self) -> PathBuf {
        self.root.join(PLACEHOLDERS_FILE)
    }

    pub fn legacy_placeholders_file(&self) -> PathBuf {
        self.root.join(LEGACY_PLACEHOLDERS_FILE)
    }

    pub fn upgrades_done_file(&self) -> PathBuf {
        self.root.join(UPGRADES_DONE_FILE)
    }

    /// A data folder that doesn't exist yet belongs to a fresh install.
    pub fn is_fresh_install(&self) -> bool {
        !self.root.is_dir()
    }

    /// Every menu file under the menus folder. A missing folder has none.
    pub fn menu_files(&self) -> Result<Vec<PathBuf>, ChestfigError> {
        if !self.menus.is_dir() {
            return Ok(Vec::new());
        }
        discover_files(&self.menus, MENU_EXTENSION)
    }
}

/// Files with `extension` under `dir`, recursively, sorted by path.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ChestfigError> {
    let mut files = Vec::new();
    collect_files(dir, extension, &mut files)?;
    files.sort();
    log::debug!("Found {} .{extension} files in {}", files.len(), dir.display());
    Ok(files)
}

fn collect_files(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) -> Result<(), ChestfigError> {
    let entries = fs::read_dir(dir).map_err(|e| ChestfigError::read(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| ChestfigError::read(dir, e))?.path();
        if path.is_dir() {
            collect_files(&path, extension, out)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            out.push(path);
        }
    }
    Ok(())
}
