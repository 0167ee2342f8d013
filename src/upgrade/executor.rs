use std::path::{Path, PathBuf};

use crate::collector::ErrorCollector;
use crate::document::ConfigFile;
use crate::error::{self, ChestfigError};
use crate::file::DataLayout;

use super::{
    MenuUpgrade, PlaceholdersUpgrade, SettingsUpgrade, Upgrade, UpgradeId, UpgradeOutcome,
    UpgradeTask, UpgradesDoneRegistry,
};

const DEFAULT_SEPARATOR: &str = ";";

/// Settings keys that held the inline list separator, current name first.
const SEPARATOR_KEYS: [&str; 2] = ["multiple_commands_separator", "multiple-commands-separator"];

/// What one executor run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpgradeSummary {
    /// The data folder was new: every upgrade was marked done without running.
    pub fresh_install: bool,
    /// Upgrades completed by this run, in execution order.
    pub completed: Vec<UpgradeId>,
    /// Files rewritten, each with the backup taken before.
    pub upgraded_files: Vec<(PathBuf, PathBuf)>,
    /// Files whose upgrade failed. Their upgrades stay pending.
    pub failed_files: Vec<String>,
}

impl UpgradeSummary {
    pub fn is_empty(&self) -> bool {
        !self.fresh_install && self.completed.is_empty() && self.upgraded_files.is_empty()
    }
}

/// Runs every pending upgrade of a data folder, at most once each.
pub struct UpgradesExecutor<'a> {
    layout: &'a DataLayout,
}

impl<'a> UpgradesExecutor<'a> {
    pub fn new(layout: &'a DataLayout) -> Self {
        Self { layout }
    }

    /// Run the pending upgrades in order.
    ///
    /// An upgrade is marked done only when all of its files were upgraded.
    /// Each failed file is recorded in `errors` and doesn't stop the other
    /// upgrades. The registry is saved once at the end, partial progress
    /// included; when any file failed the run still ends with an error naming
    /// them all. A registry that can't be read or saved aborts the run.
    pub fn run(
        &self,
        fresh_install: bool,
        errors: &mut ErrorCollector,
    ) -> Result<UpgradeSummary, ChestfigError> {
        let mut registry = UpgradesDoneRegistry::load(self.layout.upgrades_done_file())
            .map_err(|e| {
                ChestfigError::executor("couldn't read the list of upgrades already done", Some(e))
            })?;
        let mut summary = UpgradeSummary {
            fresh_install,
            ..UpgradeSummary::default()
        };

        if fresh_install {
            registry.set_all_done();
        } else {
            // Read before any upgrade renames the key.
            let legacy_separator = read_legacy_separator(&self.layout.settings_file());
            for id in UpgradeId::ALL {
                if registry.is_done(id) {
                    continue;
                }
                if self.run_upgrade(id, &legacy_separator, &mut summary, errors) {
                    registry.set_done(id);
                    summary.completed.push(id);
                }
            }
        }

        registry.save().map_err(|e| {
            ChestfigError::executor("couldn't save the list of upgrades already done", Some(e))
        })?;

        if summary.failed_files.is_empty() {
            Ok(summary)
        } else {
            let files: Vec<String> = summary
                .failed_files
                .iter()
                .map(|file| format!("\"{file}\""))
                .collect();
            Err(ChestfigError::executor(
                format!("failed to upgrade the files {}", files.join(", ")),
                None,
            ))
        }
    }

    /// Returns whether every task of the upgrade succeeded.
    fn run_upgrade(
        &self,
        id: UpgradeId,
        legacy_separator: &str,
        summary: &mut UpgradeSummary,
        errors: &mut ErrorCollector,
    ) -> bool {
        let tasks = match self.tasks(id, legacy_separator) {
            Ok(tasks) => tasks,
            Err(e) => {
                log::error!("Couldn't prepare the upgrade {id}: {e}");
                errors.add_caused(e, [format!("couldn't prepare the upgrade \"{id}\"")]);
                summary
                    .failed_files
                    .push(error::file_name(self.layout.menus_folder()));
                return false;
            }
        };

        let mut all_succeeded = true;
        for task in tasks {
            let file = error::file_name(task.original_file());
            match Upgrade::new(task).run() {
                Ok(UpgradeOutcome::Unchanged) => {}
                Ok(UpgradeOutcome::Upgraded { file, backup }) => {
                    summary.upgraded_files.push((file, backup));
                }
                Err(e) => {
                    log::error!("Upgrade {id} failed on {file}: {e}");
                    errors.add_caused(
                        e,
                        [format!("error while running the upgrade \"{id}\" on the file \"{file}\"")],
                    );
                    summary.failed_files.push(file);
                    all_succeeded = false;
                }
            }
        }
        all_succeeded
    }

    fn tasks(
        &self,
        id: UpgradeId,
        legacy_separator: &str,
    ) -> Result<Vec<Box<dyn UpgradeTask>>, ChestfigError> {
        let tasks: Vec<Box<dyn UpgradeTask>> = match id {
            UpgradeId::V4Config => {
                vec![Box::new(SettingsUpgrade::new(self.layout.settings_file())) as Box<dyn UpgradeTask>]
            }
            UpgradeId::V4Placeholders => vec![Box::new(PlaceholdersUpgrade::new(
                self.layout.legacy_placeholders_file(),
                self.layout.placeholders_file(),
            )) as Box<dyn UpgradeTask>],
            UpgradeId::V4Menus => self
                .layout
                .menu_files()?
                .into_iter()
                .map(|path| {
                    Box::new(MenuUpgrade::new(path, legacy_separator)) as Box<dyn UpgradeTask>
                })
                .collect(),
        };
        Ok(tasks)
    }
}

/// The separator inline action lists were written with, as configured in the
/// settings file under its current or legacy name. Falls back to `;`.
pub fn read_legacy_separator(settings_file: &Path) -> String {
    if !settings_file.is_file() {
        return DEFAULT_SEPARATOR.to_string();
    }
    let config = match ConfigFile::load(settings_file) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Couldn't read the commands separator, using \"{DEFAULT_SEPARATOR}\": {e}");
            return DEFAULT_SEPARATOR.to_string();
        }
    };
    SEPARATOR_KEYS
        .iter()
        .find_map(|key| config.root().get_string(key))
        .filter(|separator| !separator.is_empty())
        .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string())
}
