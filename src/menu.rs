//! Menu parsing: the `menu-settings` table plus one icon per other table.

use std::collections::BTreeMap;

use crate::action::Action;
use crate::attributes::{find_alias, get_any_string, read_double, read_int, read_list_or_inline};
use crate::collector::{ErrorCollector, ErrorContext};
use crate::document::{ConfigFile, Section};
use crate::error::ChestfigError;
use crate::icon::{Icon, POSITION_X, POSITION_Y, ParseContext};
use crate::item::ItemReference;
use crate::text;

pub const MENU_SETTINGS: &str = "menu-settings";

const MAX_TITLE_LENGTH: usize = 32;
const DEFAULT_ROWS: u32 = 6;
const MISSING_TITLE: &str = "§4No title set";

/// Which clicks with the bound item open the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickType {
    Left,
    Right,
    Both,
}

impl ClickType {
    pub fn from_options(left_click: bool, right_click: bool) -> Option<Self> {
        match (left_click, right_click) {
            (true, true) => Some(ClickType::Both),
            (true, false) => Some(ClickType::Left),
            (false, true) => Some(ClickType::Right),
            (false, false) => None,
        }
    }
}

/// An item that opens a menu when clicked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenTrigger {
    pub material: String,
    /// `None` matches any durability.
    pub durability: Option<u16>,
    pub click_type: ClickType,
}

impl OpenTrigger {
    /// Whether clicking `material:durability` with `click` (never `Both`)
    /// fires this trigger.
    pub fn matches(&self, material: &str, durability: u16, click: ClickType) -> bool {
        self.material == material
            && self.durability.is_none_or(|d| d == durability)
            && (self.click_type == ClickType::Both || self.click_type == click)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSettings {
    pub title: String,
    pub rows: u32,
    pub commands: Vec<String>,
    pub open_actions: Vec<Action>,
    pub open_trigger: Option<OpenTrigger>,
    /// Refresh period in tenths of a second.
    pub refresh_tenths: Option<u32>,
}

impl MenuSettings {
    /// Read the settings of `file`. The title and row count always get a
    /// value, even when missing.
    pub fn parse(file: &ConfigFile, context: &ParseContext<'_>, errors: &mut ErrorCollector) -> Self {
        let error_context = ErrorContext::menu(&file.file_name());
        let section = file.root().section(MENU_SETTINGS);

        let title = match section.and_then(|s| s.get_string("name")) {
            Some(name) => text::add_colors(&name),
            None => {
                errors.add([error_context.entity(), "it doesn't have a name set"]);
                MISSING_TITLE.to_string()
            }
        };
        let title = title.chars().take(MAX_TITLE_LENGTH).collect();

        let rows = match section.filter(|s| s.is_set("rows")) {
            Some(s) => match read_int(s, "rows") {
                Ok(rows) if rows <= 0 => {
                    log::warn!("Menu {} has {rows} rows, using 1", file.file_name());
                    1
                }
                Ok(rows) => u32::try_from(rows).unwrap_or(u32::MAX),
                Err(e) => {
                    errors.attribute(&error_context, "rows").add_error(e);
                    DEFAULT_ROWS
                }
            },
            None => {
                errors.add([
                    error_context.entity(),
                    "it doesn't have the number of rows set, it will have 6 rows by default",
                ]);
                DEFAULT_ROWS
            }
        };

        let mut settings = MenuSettings {
            title,
            rows,
            commands: Vec::new(),
            open_actions: Vec::new(),
            open_trigger: None,
            refresh_tenths: None,
        };
        if let Some(section) = section {
            settings.read_optional(section, context, &error_context, errors);
        }
        settings
    }

    fn read_optional(
        &mut self,
        section: Section<'_>,
        context: &ParseContext<'_>,
        error_context: &ErrorContext,
        errors: &mut ErrorCollector,
    ) {
        if let Some(key) = find_alias(section, &["commands", "command"]) {
            match read_list_or_inline(section, key, ";") {
                Ok(commands) => self.commands = commands,
                Err(e) => errors.attribute(error_context, key).add_error(e),
            }
        }

        if let Some(key) = find_alias(section, &["open-actions", "open-action"]) {
            let separator = &context.settings.multiple_commands_separator;
            match read_list_or_inline(section, key, separator) {
                Ok(inputs) => {
                    let mut attribute_errors = errors.attribute(error_context, key);
                    self.open_actions = Action::parse_all(
                        inputs,
                        context.placeholders,
                        &context.catalogs.materials,
                        |element, e| attribute_errors.add_list_element_error(element, e),
                    );
                }
                Err(e) => errors.attribute(error_context, key).add_error(e),
            }
        }

        if let Some(item_section) = section.section("open-with-item") {
            match open_trigger(item_section, context) {
                Ok(trigger) => self.open_trigger = trigger,
                Err(e) => errors
                    .attribute(error_context, "open-with-item")
                    .add_error(e),
            }
        }

        if section.is_set("auto-refresh") {
            match read_double(section, "auto-refresh") {
                Ok(seconds) => {
                    let tenths = (seconds * 10.0) as i64;
                    if tenths < 1 {
                        log::warn!("Auto refresh of {seconds}s is too short, using 0.1s");
                    }
                    self.refresh_tenths = Some(u32::try_from(tenths.max(1)).unwrap_or(u32::MAX));
                }
                Err(e) => errors.attribute(error_context, "auto-refresh").add_error(e),
            }
        }
    }
}

fn open_trigger(
    section: Section<'_>,
    context: &ParseContext<'_>,
) -> Result<Option<OpenTrigger>, ChestfigError> {
    let Some(material) = get_any_string(section, &["material", "id"]) else {
        return Ok(None);
    };
    let item = ItemReference::parse(&material, false, &context.catalogs.materials)?;
    let left_click = section.get_bool("left-click").unwrap_or(false);
    let right_click = section.get_bool("right-click").unwrap_or(false);
    Ok(ClickType::from_options(left_click, right_click).map(|click_type| OpenTrigger {
        material: item.material,
        durability: item.durability,
        click_type,
    }))
}

/// Grid coordinates of an icon, as written in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

/// An icon together with the name of the table it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedIcon {
    pub name: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub file_name: String,
    pub settings: MenuSettings,
    pub icons: BTreeMap<Position, PlacedIcon>,
}

impl Menu {
    pub fn parse(file: &ConfigFile, context: &ParseContext<'_>, errors: &mut ErrorCollector) -> Self {
        let file_name = file.file_name();
        let settings = MenuSettings::parse(file, context, errors);
        let mut icons = BTreeMap::new();

        let root = file.root();
        for name in root.keys(false) {
            if name == MENU_SETTINGS {
                continue;
            }
            let error_context = ErrorContext::icon(&name, &file_name);
            let Some(section) = root.child(&name) else {
                errors.add([error_context.entity(), "it must be a table"]);
                continue;
            };

            let icon = Icon::parse(section, context, &error_context, errors);
            let (Some(x), Some(y)) = (section.get_int(POSITION_X), section.get_int(POSITION_Y)) else {
                errors.add([
                    error_context.entity(),
                    "it is missing POSITION-X and/or POSITION-Y",
                ]);
                continue;
            };

            let placed = PlacedIcon { name, icon };
            if icons.insert(Position { x, y }, placed).is_some() {
                errors.add([
                    error_context.entity(),
                    "it is overriding another icon with the same position",
                ]);
            }
        }

        Menu {
            file_name,
            settings,
            icons,
        }
    }

    pub fn icon_at(&self, x: i64, y: i64) -> Option<&Icon> {
        self.icons.get(&Position { x, y }).map(|placed| &placed.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Env;

    fn parse(content: &str) -> (Menu, ErrorCollector) {
        let env = Env::default();
        let file = ConfigFile::parse("shop.toml", content).unwrap();
        let mut errors = ErrorCollector::new();
        let menu = Menu::parse(&file, &env.context(), &mut errors);
        (menu, errors)
    }

    #[test]
    fn settings_are_read() {
        let (menu, errors) = parse(
            r#"
[menu-settings]
name = "&aShop"
rows = 3
commands = "shop; store"
open-actions = ["tell: Welcome"]
auto-refresh = 2.5

[menu-settings.open-with-item]
material = "compass"
right-click = true
"#,
        );
        assert!(!errors.has_errors(), "{:?}", errors.errors());
        let settings = &menu.settings;
        assert_eq!(settings.title, "§aShop");
        assert_eq!(settings.rows, 3);
        assert_eq!(settings.commands, vec!["shop", "store"]);
        assert_eq!(settings.open_actions.len(), 1);
        assert_eq!(settings.refresh_tenths, Some(25));
        let trigger = settings.open_trigger.as_ref().unwrap();
        assert_eq!(trigger.material, "COMPASS");
        assert_eq!(trigger.click_type, ClickType::Right);
    }

    #[test]
    fn missing_rows_defaults_to_six_with_one_error() {
        let (menu, errors) = parse("[menu-settings]\nname = \"x\"\n");
        assert_eq!(menu.settings.rows, 6);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.errors()[0].message[1],
            "it doesn't have the number of rows set, it will have 6 rows by default"
        );
    }

    #[test]
    fn non_positive_rows_clamp_without_error() {
        let (menu, errors) = parse("[menu-settings]\nname = \"x\"\nrows = -3\n");
        assert_eq!(menu.settings.rows, 1);
        assert!(!errors.has_errors());
    }

    #[test]
    fn wrong_type_rows_is_an_attribute_error() {
        let (menu, errors) = parse("[menu-settings]\nname = \"x\"\nrows = \"three\"\n");
        assert_eq!(menu.settings.rows, 6);
        assert_eq!(errors.len(), 1);
        let message = &errors.errors()[0].message;
        assert_eq!(message[0], "the menu \"shop.toml\"");
        assert_eq!(message[1], "invalid attribute \"rows\"");
    }

    #[test]
    fn missing_title_is_flagged_and_long_title_truncated() {
        let (menu, errors) = parse("[menu-settings]\nrows = 1\n");
        assert_eq!(menu.settings.title, "§4No title set");
        assert_eq!(errors.len(), 1);

        let long = "a".repeat(40);
        let (menu, errors) = parse(&format!("[menu-settings]\nname = \"{long}\"\nrows = 1\n"));
        assert_eq!(menu.settings.title.chars().count(), 32);
        assert!(!errors.has_errors());
    }

    #[test]
    fn tiny_refresh_clamps_to_one_tenth() {
        let (menu, errors) =
            parse("[menu-settings]\nname = \"x\"\nrows = 1\nauto-refresh = 0.01\n");
        assert_eq!(menu.settings.refresh_tenths, Some(1));
        assert!(!errors.has_errors());
    }

    #[test]
    fn trigger_needs_a_click() {
        let (menu, _) = parse(
            "[menu-settings]\nname = \"x\"\nrows = 1\n[menu-settings.open-with-item]\nid = \"compass\"\n",
        );
        assert_eq!(menu.settings.open_trigger, None);
    }

    #[test]
    fn icon_without_position_is_dropped() {
        let (menu, errors) = parse(
            "[menu-settings]\nname = \"x\"\nrows = 1\n\n[lost]\nMATERIAL = \"stone\"\nPOSITION-X = 1\n",
        );
        assert!(menu.icons.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.errors()[0].message[0],
            "the icon \"lost\" in the menu \"shop.toml\""
        );
    }

    #[test]
    fn same_position_keeps_the_later_icon() {
        let (menu, errors) = parse(
            r#"
[menu-settings]
name = "x"
rows = 1

[first]
MATERIAL = "stone"
POSITION-X = 0
POSITION-Y = 0

[second]
MATERIAL = "dirt"
POSITION-X = 0
POSITION-Y = 0
"#,
        );
        assert_eq!(menu.icons.len(), 1);
        assert_eq!(menu.icon_at(0, 0).unwrap().material.as_deref(), Some("DIRT"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn bad_open_action_is_a_list_element_error() {
        let (menu, errors) = parse(
            "[menu-settings]\nname = \"x\"\nrows = 1\nopen-actions = \"give-money: free; spawn\"\n",
        );
        assert_eq!(menu.settings.open_actions.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.errors()[0].message[1],
            "invalid attribute \"open-actions\""
        );
    }
}
