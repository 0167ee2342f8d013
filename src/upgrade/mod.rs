//! Versioned, run-once upgrades of configuration files.
//!
//! An [`UpgradeTask`] rewrites one file (or, for global upgrades, converts one
//! file into another). Running it goes through two states:
//!
//! 1. [`Upgrade::compute`] computes the changes in memory. Nothing is written.
//! 2. [`ComputedUpgrade::commit`] does nothing if nothing changed. Otherwise it
//!    copies the original file to a timestamped backup and only then saves the
//!    upgraded document. A failed backup leaves the original untouched.
//!
//! Both steps consume their value, so a task can't run twice.

mod executor;
mod registry;
pub mod rewrite;
mod tasks;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::error::{self, ChestfigError};

pub use executor::{UpgradeSummary, UpgradesExecutor, read_legacy_separator};
pub use registry::{UpgradeId, UpgradesDoneRegistry};
pub use tasks::{MenuUpgrade, PlaceholdersUpgrade, SettingsUpgrade};

const BACKUP_DATE_FORMAT: &str = "%Y.%m.%d-%H.%M";

pub trait UpgradeTask {
    /// The file backed up before saving.
    fn original_file(&self) -> &Path;

    /// The file written on save. Usually the original file.
    fn upgraded_file(&self) -> &Path;

    /// Apply the rewrites in memory. Returns whether anything changed.
    fn compute_changes(&mut self) -> Result<bool, ChestfigError>;

    /// Persist what [`compute_changes`](Self::compute_changes) produced.
    fn save_changes(&mut self) -> Result<(), ChestfigError>;
}

impl<T: UpgradeTask + ?Sized> UpgradeTask for Box<T> {
    fn original_file(&self) -> &Path {
        (**self).original_file()
    }

    fn upgraded_file(&self) -> &Path {
        (**self).upgraded_file()
    }

    fn compute_changes(&mut self) -> Result<bool, ChestfigError> {
        (**self).compute_changes()
    }

    fn save_changes(&mut self) -> Result<(), ChestfigError> {
        (**self).save_changes()
    }
}

/// What a finished upgrade did.
#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeOutcome {
    Unchanged,
    Upgraded { file: PathBuf, backup: PathBuf },
}

/// An upgrade that hasn't run yet.
pub struct Upgrade<T: UpgradeTask> {
    task: T,
}

impl<T: UpgradeTask> Upgrade<T> {
    pub fn new(task: T) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn compute(mut self) -> Result<ComputedUpgrade<T>, ChestfigError> {
        let modified = self.task.compute_changes().map_err(|e| {
            ChestfigError::upgrade(
                format!(
                    "couldn't compute the changes for the file \"{}\"",
                    error::file_name(self.task.original_file())
                ),
                e,
            )
        })?;
        Ok(ComputedUpgrade {
            task: self.task,
            modified,
        })
    }

    /// Compute, then back up and save if needed.
    pub fn run(self) -> Result<UpgradeOutcome, ChestfigError> {
        self.compute()?.commit()
    }
}

/// An upgrade whose changes are computed but not yet written.
pub struct ComputedUpgrade<T: UpgradeTask> {
    task: T,
    modified: bool,
}

impl<T: UpgradeTask> ComputedUpgrade<T> {
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn commit(self) -> Result<UpgradeOutcome, ChestfigError> {
        self.commit_at(Local::now().naive_local())
    }

    /// Like [`commit`](Self::commit), naming the backup after `now`.
    pub fn commit_at(mut self, now: NaiveDateTime) -> Result<UpgradeOutcome, ChestfigError> {
        if !self.modified {
            return Ok(UpgradeOutcome::Unchanged);
        }

        let original = self.task.original_file().to_path_buf();
        let backup = backup_path(&original, now);
        fs::copy(&original, &backup).map_err(|e| {
            ChestfigError::upgrade(
                format!(
                    "couldn't create the backup of the file \"{}\"",
                    error::file_name(&original)
                ),
                ChestfigError::write(&backup, e),
            )
        })?;

        let file = self.task.upgraded_file().to_path_buf();
        self.task.save_changes().map_err(|e| {
            ChestfigError::upgrade(
                format!(
                    "couldn't save the upgraded file \"{}\"",
                    error::file_name(&file)
                ),
                e,
            )
        })?;

        log::info!(
            "Automatically upgraded the file {}, a backup of the old file was saved as {}",
            file.display(),
            backup.display()
        );
        Ok(UpgradeOutcome::Upgraded { file, backup })
    }
}

/// `{name}_{yyyy.MM.dd-HH.mm}.backup`, next to `original`.
pub fn backup_path(original: &Path, now: NaiveDateTime) -> PathBuf {
    let name = format!(
        "{}_{}.backup",
        error::file_name(original),
        now.format(BACKUP_DATE_FORMAT)
    );
    original.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    /// Appends a line on save when `change` is set.
    struct AppendTask {
        path: PathBuf,
        change: bool,
        computed: bool,
    }

    impl UpgradeTask for AppendTask {
        fn original_file(&self) -> &Path {
            &self.path
        }

        fn upgraded_file(&self) -> &Path {
            &self.path
        }

        fn compute_changes(&mut self) -> Result<bool, ChestfigError> {
            self.computed = true;
            Ok(self.change)
        }

        fn save_changes(&mut self) -> Result<(), ChestfigError> {
            let mut content = fs::read_to_string(&self.path).unwrap();
            content.push_str("upgraded = true\n");
            fs::write(&self.path, content).map_err(|e| ChestfigError::write(&self.path, e))
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap()
    }

    fn task(dir: &TempDir, change: bool) -> AppendTask {
        let path = dir.path().join("shop.toml");
        fs::write(&path, "a = 1\n").unwrap();
        AppendTask {
            path,
            change,
            computed: false,
        }
    }

    #[test]
    fn backup_name_has_minute_timestamp() {
        assert_eq!(
            backup_path(Path::new("/d/menu/shop.toml"), at()),
            PathBuf::from("/d/menu/shop.toml_2024.03.09-07.05.backup")
        );
    }

    #[test]
    fn unchanged_task_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let computed = Upgrade::new(task(&dir, false)).compute().unwrap();
        assert!(!computed.is_modified());
        assert_eq!(computed.commit_at(at()).unwrap(), UpgradeOutcome::Unchanged);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn changed_task_is_backed_up_then_saved() {
        let dir = TempDir::new().unwrap();
        let outcome = Upgrade::new(task(&dir, true))
            .compute()
            .unwrap()
            .commit_at(at())
            .unwrap();
        let UpgradeOutcome::Upgraded { file, backup } = outcome else {
            panic!("Expected Upgraded");
        };
        assert_eq!(fs::read_to_string(&backup).unwrap(), "a = 1\n");
        assert_eq!(fs::read_to_string(&file).unwrap(), "a = 1\nupgraded = true\n");
    }

    #[test]
    fn stale_backup_from_same_minute_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let t = task(&dir, true);
        let backup = backup_path(&t.path, at());
        fs::write(&backup, "old backup").unwrap();
        Upgrade::new(t).compute().unwrap().commit_at(at()).unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "a = 1\n");
    }

    #[test]
    fn failed_backup_leaves_original_untouched() {
        let dir = TempDir::new().unwrap();
        let t = task(&dir, true);
        // A directory where the backup file should go makes the copy fail.
        fs::create_dir(backup_path(&t.path, at())).unwrap();
        let path = t.path.clone();

        let err = Upgrade::new(t).compute().unwrap().commit_at(at()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "couldn't create the backup of the file \"shop.toml\""
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = 1\n");
    }

    #[test]
    fn compute_runs_the_task() {
        let dir = TempDir::new().unwrap();
        let upgrade = Upgrade::new(task(&dir, false));
        assert!(!upgrade.task().computed);
        let computed = upgrade.compute().unwrap();
        assert!(computed.task.computed);
    }
}
