//! Operations behind the `check`, `upgrade` and `menus` actions, and the
//! `ChestfigResult` enum that callers use to display results.

use std::fmt;
use std::path::PathBuf;

use confique::Config;

use crate::index::MenuIndex;
use crate::upgrade::UpgradeSummary;

/// One line of the menus listing.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub file_name: String,
    pub title: String,
    pub rows: u32,
    pub icons: usize,
    pub commands: Vec<String>,
}

/// Result of a chestfig action. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ChestfigResult {
    /// How many menus loaded, and the error report (empty if none).
    Checked { menus: usize, report: String },
    /// What the upgrades did.
    Upgraded(UpgradeSummary),
    /// Some upgrades failed; the report says which and why.
    UpgradeFailed { report: String },
    /// There is nothing to upgrade in a folder that doesn't exist yet.
    NoDataFolder { path: PathBuf },
    /// Every loaded menu.
    Menus { entries: Vec<MenuEntry> },
}

impl fmt::Display for ChestfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChestfigResult::Checked { menus, report } => {
                if report.is_empty() {
                    writeln!(f, "Loaded {menus} menu(s) without errors.")
                } else {
                    writeln!(f, "Loaded {menus} menu(s).")?;
                    write!(f, "{report}")
                }
            }
            ChestfigResult::Upgraded(summary) => write_summary(f, summary),
            ChestfigResult::UpgradeFailed { report } => write!(f, "{report}"),
            ChestfigResult::NoDataFolder { path } => {
                writeln!(f, "Nothing to upgrade: {} doesn't exist yet.", path.display())
            }
            ChestfigResult::Menus { entries } => {
                if entries.is_empty() {
                    return writeln!(f, "No menus.");
                }
                for entry in entries {
                    write!(
                        f,
                        "{} ({} rows, {} icons): {}",
                        entry.file_name, entry.rows, entry.icons, entry.title
                    )?;
                    if !entry.commands.is_empty() {
                        write!(f, " [/{}]", entry.commands.join(", /"))?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &UpgradeSummary) -> fmt::Result {
    if summary.fresh_install {
        return writeln!(f, "New data folder: every upgrade was marked as done.");
    }
    if summary.is_empty() {
        return writeln!(f, "Everything is up to date.");
    }
    for (file, backup) in &summary.upgraded_files {
        writeln!(
            f,
            "Upgraded {} (backup: {})",
            file.display(),
            backup.display()
        )?;
    }
    let completed: Vec<&str> = summary.completed.iter().map(|id| id.as_str()).collect();
    if !completed.is_empty() {
        writeln!(f, "Completed: {}", completed.join(", "))?;
    }
    Ok(())
}

/// Generate a commented TOML template from the config struct's doc comments.
pub fn generate_template<C: Config>() -> String {
    confique::toml::template::<C>(confique::toml::FormatOptions::default())
}

/// The menus of `index`, sorted by file name.
pub fn menu_entries(index: &MenuIndex) -> Vec<MenuEntry> {
    index
        .menus()
        .map(|menu| MenuEntry {
            file_name: menu.file_name.clone(),
            title: menu.settings.title.clone(),
            rows: menu.settings.rows,
            icons: menu.icons.len(),
            commands: menu.settings.commands.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::upgrade::UpgradeId;

    #[test]
    fn template_documents_every_setting() {
        let template = generate_template::<Settings>();
        assert!(template.contains("Separator between actions written on a single line."));
        assert!(template.contains("multiple_commands_separator"));
        assert!(template.contains("anti_click_spam_delay"));
    }

    #[test]
    fn checked_without_errors() {
        let result = ChestfigResult::Checked {
            menus: 2,
            report: String::new(),
        };
        assert_eq!(result.to_string(), "Loaded 2 menu(s) without errors.\n");
    }

    #[test]
    fn upgraded_lists_files_and_ids() {
        let summary = UpgradeSummary {
            completed: vec![UpgradeId::V4Menus],
            upgraded_files: vec![(
                PathBuf::from("menu/shop.toml"),
                PathBuf::from("menu/shop.toml_2024.03.09-07.05.backup"),
            )],
            ..UpgradeSummary::default()
        };
        assert_eq!(
            ChestfigResult::Upgraded(summary).to_string(),
            "Upgraded menu/shop.toml (backup: menu/shop.toml_2024.03.09-07.05.backup)\nCompleted: v4.0-menus\n"
        );
    }

    #[test]
    fn up_to_date_summary() {
        assert_eq!(
            ChestfigResult::Upgraded(UpgradeSummary::default()).to_string(),
            "Everything is up to date.\n"
        );
    }

    #[test]
    fn menus_listing() {
        let result = ChestfigResult::Menus {
            entries: vec![
                MenuEntry {
                    file_name: "shop.toml".into(),
                    title: "§2Shop".into(),
                    rows: 3,
                    icons: 1,
                    commands: vec!["shop".into(), "store".into()],
                },
                MenuEntry {
                    file_name: "hidden.toml".into(),
                    title: "Hidden".into(),
                    rows: 1,
                    icons: 0,
                    commands: Vec::new(),
                },
            ],
        };
        assert_eq!(
            result.to_string(),
            "shop.toml (3 rows, 1 icons): §2Shop [/shop, /store]\nhidden.toml (1 rows, 0 icons): Hidden\n"
        );
    }
}
