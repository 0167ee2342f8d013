//! Icon parsing.
//!
//! An icon is one table of a menu file. Every attribute is read through the
//! alias table below, in order; a missing attribute leaves its field `None`
//! and an invalid one is recorded and also leaves it `None`. An icon with no
//! attributes at all is still a valid (blank) icon.

use crate::action::Action;
use crate::attributes::{
    find_alias, positive_double, positive_integer, positive_short, read_bool, read_double,
    read_int, read_list_or_inline, read_list_or_single, read_string, strictly_positive_integer,
};
use crate::catalog::Catalogs;
use crate::collector::{AttributeErrors, ErrorCollector, ErrorContext};
use crate::document::Section;
use crate::error::ChestfigError;
use crate::item::ItemReference;
use crate::meta::{self, BannerPattern, Enchantment, Rgb};
use crate::placeholders::Placeholders;
use crate::settings::Settings;
use crate::text;

/// Everything an icon or menu parser needs besides the document itself.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub catalogs: &'a Catalogs,
    pub settings: &'a Settings,
    pub placeholders: &'a Placeholders,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Icon {
    pub material: Option<String>,
    pub amount: Option<u32>,
    pub durability: Option<u16>,
    pub nbt_data: Option<String>,
    pub name: Option<String>,
    pub lore: Option<Vec<String>>,
    pub enchantments: Option<Vec<Enchantment>>,
    pub color: Option<Rgb>,
    pub skull_owner: Option<String>,
    pub banner_color: Option<String>,
    pub banner_patterns: Option<Vec<BannerPattern>>,
    pub actions: Option<Vec<Action>>,
    pub price: Option<f64>,
    pub levels: Option<u32>,
    /// Items taken from the player on click. An item without an explicit
    /// durability matches any durability.
    pub required_items: Option<Vec<ItemReference>>,
    pub permission: Option<String>,
    pub permission_message: Option<String>,
    pub view_permission: Option<String>,
    pub keep_open: Option<bool>,
}

type ApplyAttribute = fn(
    &mut Icon,
    Section<'_>,
    &str,
    &ParseContext<'_>,
    &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError>;

/// Attribute aliases (current name first) and how to apply each one.
const ATTRIBUTES: &[(&[&str], ApplyAttribute)] = &[
    (&["MATERIAL", "ID"], apply_material),
    (&["AMOUNT"], apply_amount),
    (&["DURABILITY", "DATA-VALUE"], apply_durability),
    (&["NBT-DATA", "NBT"], apply_nbt_data),
    (&["NAME"], apply_name),
    (&["LORE"], apply_lore),
    (&["ENCHANTMENTS", "ENCHANTMENT"], apply_enchantments),
    (&["COLOR"], apply_color),
    (&["SKULL-OWNER"], apply_skull_owner),
    (&["BANNER-COLOR"], apply_banner_color),
    (&["BANNER-PATTERNS"], apply_banner_patterns),
    (&["ACTIONS", "COMMAND", "COMMANDS"], apply_actions),
    (&["PRICE"], apply_price),
    (&["LEVELS"], apply_levels),
    (&["REQUIRED-ITEMS", "REQUIRED-ITEM"], apply_required_items),
    (&["PERMISSION"], apply_permission),
    (&["PERMISSION-MESSAGE"], apply_permission_message),
    (&["VIEW-PERMISSION"], apply_view_permission),
    (&["KEEP-OPEN"], apply_keep_open),
];

/// Keys read by the menu rather than by the icon.
pub const POSITION_X: &str = "POSITION-X";
pub const POSITION_Y: &str = "POSITION-Y";

impl Icon {
    pub fn parse(
        section: Section<'_>,
        context: &ParseContext<'_>,
        error_context: &ErrorContext,
        errors: &mut ErrorCollector,
    ) -> Self {
        let mut icon = Icon::default();
        for (aliases, apply) in ATTRIBUTES {
            let Some(key) = find_alias(section, aliases) else {
                continue;
            };
            let mut attribute_errors = errors.attribute(error_context, key);
            if let Err(e) = apply(&mut icon, section, key, context, &mut attribute_errors) {
                attribute_errors.add_error(e);
            }
        }
        icon
    }

    /// True when no attribute was applied.
    pub fn is_blank(&self) -> bool {
        *self == Icon::default()
    }
}

fn apply_material(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let text = read_string(section, key)?;
    let item = ItemReference::parse(&text, true, &context.catalogs.materials)?;
    icon.material = Some(item.material);
    // Embedded values; AMOUNT and DURABILITY are applied later and win.
    if text.contains(',') {
        icon.amount = Some(item.amount);
    }
    if item.durability.is_some() {
        icon.durability = item.durability;
    }
    Ok(())
}

fn apply_amount(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.amount = Some(strictly_positive_integer(read_int(section, key)?)?);
    Ok(())
}

fn apply_durability(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.durability = Some(positive_short(read_int(section, key)?)?);
    Ok(())
}

fn apply_nbt_data(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let nbt = read_string(section, key)?;
    meta::validate_nbt(&nbt)?;
    icon.nbt_data = Some(nbt);
    Ok(())
}

fn apply_name(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let name = context.placeholders.replace_all(&read_string(section, key)?);
    icon.name = Some(text::colorize_with_default(
        &name,
        &context.settings.default_color_name,
    ));
    Ok(())
}

fn apply_lore(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let lore = read_list_or_single(section, key)?
        .iter()
        .map(|line| {
            let line = context.placeholders.replace_all(line);
            text::colorize_with_default(&line, &context.settings.default_color_lore)
        })
        .collect();
    icon.lore = Some(lore);
    Ok(())
}

fn apply_enchantments(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    errors: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let mut enchantments = Vec::new();
    for element in read_list_or_inline(section, key, ";")? {
        match meta::parse_enchantment(&element, &context.catalogs.enchantments) {
            Ok(enchantment) => enchantments.push(enchantment),
            Err(e) => errors.add_list_element_error(&element, e),
        }
    }
    icon.enchantments = Some(enchantments);
    Ok(())
}

fn apply_color(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.color = Some(meta::parse_rgb_color(&read_string(section, key)?)?);
    Ok(())
}

fn apply_skull_owner(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.skull_owner = Some(read_string(section, key)?);
    Ok(())
}

fn apply_banner_color(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let color = meta::parse_dye_color(&read_string(section, key)?, &context.catalogs.dye_colors)?;
    icon.banner_color = Some(color);
    Ok(())
}

fn apply_banner_patterns(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    errors: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let mut patterns = Vec::new();
    for element in read_list_or_single(section, key)? {
        match meta::parse_banner_pattern(
            &element,
            &context.catalogs.pattern_types,
            &context.catalogs.dye_colors,
        ) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => errors.add_list_element_error(&element, e),
        }
    }
    icon.banner_patterns = Some(patterns);
    Ok(())
}

fn apply_actions(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    errors: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let inputs = read_list_or_inline(section, key, &context.settings.multiple_commands_separator)?;
    let actions = Action::parse_all(
        inputs,
        context.placeholders,
        &context.catalogs.materials,
        |element, e| errors.add_list_element_error(element, e),
    );
    icon.actions = Some(actions);
    Ok(())
}

fn apply_price(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.price = Some(positive_double(read_double(section, key)?)?);
    Ok(())
}

fn apply_levels(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.levels = Some(positive_integer(read_int(section, key)?)?);
    Ok(())
}

fn apply_required_items(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    context: &ParseContext<'_>,
    errors: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    let mut required = Vec::new();
    for element in read_list_or_single(section, key)? {
        match ItemReference::parse(&element, true, &context.catalogs.materials) {
            Ok(item) => required.push(item),
            Err(e) => errors.add_list_element_error(&element, e),
        }
    }
    icon.required_items = Some(required);
    Ok(())
}

fn apply_permission(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.permission = Some(read_string(section, key)?);
    Ok(())
}

fn apply_permission_message(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.permission_message = Some(text::add_colors(&read_string(section, key)?));
    Ok(())
}

fn apply_view_permission(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.view_permission = Some(read_string(section, key)?);
    Ok(())
}

fn apply_keep_open(
    icon: &mut Icon,
    section: Section<'_>,
    key: &str,
    _: &ParseContext<'_>,
    _: &mut AttributeErrors<'_>,
) -> Result<(), ChestfigError> {
    icon.keep_open = Some(read_bool(section, key)?);
    Ok(())
}
