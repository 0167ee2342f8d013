use std::fs;
use std::path::PathBuf;

use crate::catalog::Catalogs;
use crate::collector::ErrorCollector;
use crate::document::ConfigFile;
use crate::error::{self, ChestfigError};
use crate::file::{self, DataLayout};
use crate::icon::ParseContext;
use crate::index::MenuIndex;
use crate::menu::Menu;
use crate::ops::{self, ChestfigResult};
use crate::placeholders::Placeholders;
use crate::report;
use crate::settings::Settings;
use crate::types::{ChestfigAction, DataFolder};
use crate::upgrade::{UpgradeSummary, UpgradesExecutor};

const EXAMPLE_MENU_FILE: &str = "example.toml";

/// Written on first start so the menus folder isn't empty.
const EXAMPLE_MENU: &str = r#"# An example menu. Open it with /menu, or rename and edit it.

[menu-settings]
name = "&1Example menu"
rows = 3
commands = ["menu"]

[spawn]
MATERIAL = "bed"
NAME = "&aTeleport to spawn"
LORE = ["Takes you back to the spawn point."]
ACTIONS = ["spawn"]
POSITION-X = 1
POSITION-Y = 1

[diamonds]
MATERIAL = "diamond"
AMOUNT = 4
NAME = "&bFree diamonds"
ACTIONS = ["give: diamond, 4", "tell: &aEnjoy!"]
PERMISSION = "chestfig.example.diamonds"
POSITION-X = 5
POSITION-Y = 2

[close]
MATERIAL = "barrier"
NAME = "&cClose"
POSITION-X = 9
POSITION-Y = 3
"#;

/// Entry point for loading a chestfig data folder.
pub struct Chestfig;

impl Chestfig {
    pub fn builder() -> ChestfigBuilder {
        ChestfigBuilder::new()
    }
}

/// Everything read from a data folder, plus the errors found on the way.
#[derive(Debug)]
pub struct Loaded {
    pub data_folder: PathBuf,
    pub catalogs: Catalogs,
    pub settings: Settings,
    pub placeholders: Placeholders,
    pub menus: MenuIndex,
    pub errors: ErrorCollector,
    /// `None` when upgrades were skipped or the run failed.
    pub upgrades: Option<UpgradeSummary>,
}

impl Loaded {
    /// The numbered error report, empty when nothing went wrong.
    pub fn report(&self) -> String {
        report::render(&self.errors)
    }
}

/// Builder for loading a data folder: settings, placeholders and menus,
/// after running any pending upgrade.
pub struct ChestfigBuilder {
    app_name: Option<String>,
    data_folder: DataFolder,
    menus_folder: Option<PathBuf>,
    catalogs: Option<Catalogs>,
    skip_upgrades: bool,
}

impl ChestfigBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            data_folder: DataFolder::Platform,
            menus_folder: None,
            catalogs: None,
            skip_upgrades: false,
        }
    }

    /// Set the application name, used to find the platform data directory
    /// when no explicit data folder is set.
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Use an explicit data folder instead of the platform one.
    pub fn data_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_folder = DataFolder::Path(path.into());
        self
    }

    /// Read menus from another folder (default: `menu/` in the data folder).
    pub fn menus_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.menus_folder = Some(path.into());
        self
    }

    /// Replace the built-in material, enchantment and color names.
    pub fn catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = Some(catalogs);
        self
    }

    /// Don't run pending upgrades on load.
    pub fn skip_upgrades(mut self, skip: bool) -> Self {
        self.skip_upgrades = skip;
        self
    }

    fn layout(&self) -> Result<DataLayout, ChestfigError> {
        let root = file::resolve_data_folder(&self.data_folder, self.app_name.as_deref())?;
        let layout = DataLayout::new(root);
        Ok(match &self.menus_folder {
            Some(menus) => layout.with_menus_folder(menus),
            None => layout,
        })
    }

    /// Load the data folder.
    ///
    /// Only an unresolvable data folder is an error; every other problem is
    /// recorded in [`Loaded::errors`] and loading goes on with what's usable.
    pub fn load(self) -> Result<Loaded, ChestfigError> {
        let layout = self.layout()?;
        let mut errors = ErrorCollector::new();

        let fresh_install = layout.is_fresh_install();
        if fresh_install {
            seed(&layout, &mut errors);
        }

        let upgrades = if self.skip_upgrades {
            None
        } else {
            run_upgrades(&layout, fresh_install, &mut errors)
        };

        let settings = Settings::load(&layout.settings_file(), &mut errors);
        let placeholders = Placeholders::load(&layout.placeholders_file(), &mut errors);
        let catalogs = self.catalogs.unwrap_or_default();
        let menus = load_menus(
            &layout,
            &ParseContext {
                catalogs: &catalogs,
                settings: &settings,
                placeholders: &placeholders,
            },
            &mut errors,
        );

        Ok(Loaded {
            data_folder: layout.root().to_path_buf(),
            catalogs,
            settings,
            placeholders,
            menus,
            errors,
            upgrades,
        })
    }

    /// Handle a `ChestfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ChestfigAction) -> Result<(), ChestfigError> {
        let result = self.handle(action)?;
        print!("{result}");
        Ok(())
    }

    /// Handle a `ChestfigAction` (check / upgrade / menus).
    pub fn handle(self, action: &ChestfigAction) -> Result<ChestfigResult, ChestfigError> {
        match action {
            ChestfigAction::Check => {
                let loaded = self.load()?;
                Ok(ChestfigResult::Checked {
                    menus: loaded.menus.len(),
                    report: loaded.report(),
                })
            }
            ChestfigAction::Upgrade => {
                let layout = self.layout()?;
                if layout.is_fresh_install() {
                    return Ok(ChestfigResult::NoDataFolder {
                        path: layout.root().to_path_buf(),
                    });
                }
                let mut errors = ErrorCollector::new();
                match run_upgrades(&layout, false, &mut errors) {
                    Some(summary) => Ok(ChestfigResult::Upgraded(summary)),
                    None => Ok(ChestfigResult::UpgradeFailed {
                        report: report::render(&errors),
                    }),
                }
            }
            ChestfigAction::Menus => {
                let loaded = self.load()?;
                Ok(ChestfigResult::Menus {
                    entries: ops::menu_entries(&loaded.menus),
                })
            }
        }
    }
}

/// Create the data folder with a settings template and an example menu.
fn seed(layout: &DataLayout, errors: &mut ErrorCollector) {
    let example = layout.menus_folder().join(EXAMPLE_MENU_FILE);
    let files = [
        (layout.settings_file(), ops::generate_template::<Settings>()),
        (example, EXAMPLE_MENU.to_string()),
    ];
    for (path, content) in files {
        let written = match path.parent() {
            Some(parent) => fs::create_dir_all(parent).map_err(|e| ChestfigError::write(parent, e)),
            None => Ok(()),
        }
        .and_then(|()| fs::write(&path, content).map_err(|e| ChestfigError::write(&path, e)));
        if let Err(e) = written {
            errors.add_caused(
                e,
                [format!(
                    "couldn't create the default file \"{}\"",
                    error::file_name(&path)
                )],
            );
        }
    }
}

/// Run the executor, recording its failure. `None` when it failed.
fn run_upgrades(
    layout: &DataLayout,
    fresh_install: bool,
    errors: &mut ErrorCollector,
) -> Option<UpgradeSummary> {
    match UpgradesExecutor::new(layout).run(fresh_install, errors) {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::error!("{e}");
            errors.add_caused(e, ["error while running the automatic configuration upgrades"]);
            None
        }
    }
}

fn load_menus(
    layout: &DataLayout,
    context: &ParseContext<'_>,
    errors: &mut ErrorCollector,
) -> MenuIndex {
    let mut menus = MenuIndex::new();
    let files = match layout.menu_files() {
        Ok(files) => files,
        Err(e) => {
            errors.add_caused(e, ["couldn't list the menu files"]);
            return menus;
        }
    };
    for path in files {
        match ConfigFile::load(&path) {
            Ok(file) => {
                let menu = Menu::parse(&file, context, errors);
                menus.register(menu, errors);
            }
            Err(e) => errors.add_caused(
                e,
                [format!(
                    "error while loading the menu file \"{}\"",
                    error::file_name(&path)
                )],
            ),
        }
    }
    menus
}
