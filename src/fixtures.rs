#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::catalog::Catalogs;
    use crate::icon::ParseContext;
    use crate::placeholders::Placeholders;
    use crate::settings::Settings;

    /// Owns what a [`ParseContext`] borrows.
    #[derive(Default)]
    pub struct Env {
        pub catalogs: Catalogs,
        pub settings: Settings,
        pub placeholders: Placeholders,
    }

    impl Env {
        pub fn context(&self) -> ParseContext<'_> {
            ParseContext {
                catalogs: &self.catalogs,
                settings: &self.settings,
                placeholders: &self.placeholders,
            }
        }
    }

    /// Write `content` to `relative` under `dir`, creating parent folders.
    pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    // -- Menus as written before the 4.0 attribute names ----------------------

    pub const LEGACY_MENU: &str = r#"# The shop
[menu-settings]
name = "&2Shop"
rows = 3
command = "shop; store"
open-action = "tell: &aWelcome; sound: click"

[menu-settings.open-with-item]
id = "compass"
right-click = true

[wool-icon]
ID = "wool:5,3"
NAME = "&aGreen wool"
COMMAND = "spawn; tell: hi"
REQUIRED-ITEM = "gold_ingot, 2"
POSITION-X = 1
POSITION-Y = 1
"#;

    pub const MODERN_MENU: &str = r#"[menu-settings]
name = "&2Shop"
rows = 3
commands = ["shop", "store"]
open-actions = ["tell: &aWelcome", "sound: click"]

[menu-settings.open-with-item]
material = "compass"
right-click = true

[wool-icon]
MATERIAL = "wool"
DURABILITY = 5
AMOUNT = 3
NAME = "&aGreen wool"
ACTIONS = ["spawn", "tell: hi"]
REQUIRED-ITEMS = ["gold_ingot, 2"]
POSITION-X = 1
POSITION-Y = 1
"#;

    #[test]
    fn env_context_borrows_defaults() {
        let env = Env::default();
        let context = env.context();
        assert_eq!(context.settings.multiple_commands_separator, ";");
        assert!(context.placeholders.is_empty());
        assert!(context.catalogs.materials.find("stone").is_some());
    }
}
