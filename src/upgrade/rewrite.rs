//! Structural rewrites used by upgrade tasks.
//!
//! Each rewrite returns whether it changed the document, and applying it a
//! second time is a no-op.

use toml_edit::{Array, Item, Value};

use crate::attributes::{split_separated_values, trimmed_split_once};
use crate::document::{SectionMut, int_item, string_item, string_list_item};

/// Move `old` to `new` when only `old` is set. When both are set nothing
/// changes, so no value is ever dropped.
pub fn rename_node(section: &mut SectionMut<'_>, old: &str, new: &str) -> bool {
    if !section.is_set(old) || section.is_set(new) {
        return false;
    }
    match section.take(old) {
        Some(item) => {
            section.set(new, Some(item));
            true
        }
        None => false,
    }
}

/// Replace a string holding `separator`-joined values with a list.
pub fn expand_inline_list(section: &mut SectionMut<'_>, key: &str, separator: &str) -> bool {
    if !section.is_string(key) {
        return false;
    }
    let Some(text) = section.get_string(key) else {
        return false;
    };
    let values = split_separated_values(&text, separator);
    section.set(key, Some(string_list_item(&values)));
    true
}

/// Wrap a scalar in a one-element list.
pub fn expand_singleton_list(section: &mut SectionMut<'_>, key: &str) -> bool {
    let Some(value) = section.get(key).and_then(Item::as_value) else {
        return false;
    };
    if value.is_array() {
        return false;
    }
    let mut array = Array::new();
    array.push(value.clone());
    section.set(key, Some(Item::Value(Value::Array(array))));
    true
}

/// Split `MATERIAL = "wool:5, 3"` into `MATERIAL`, `DURABILITY` and `AMOUNT`.
/// Fields already set are kept; numbers that don't parse are kept as text.
pub fn expand_inline_item_stack(section: &mut SectionMut<'_>) -> bool {
    let Some(mut material) = section.get_string("MATERIAL") else {
        return false;
    };
    let mut modified = false;

    if let Some((item, amount)) = trimmed_split_once(&material, ',') {
        if !section.is_set("AMOUNT") {
            section.set("AMOUNT", Some(number_or_text(amount)));
        }
        material = item.to_string();
        section.set("MATERIAL", Some(string_item(&material)));
        modified = true;
    }

    if let Some((item, durability)) = trimmed_split_once(&material, ':') {
        if !section.is_set("DURABILITY") {
            section.set("DURABILITY", Some(number_or_text(durability)));
        }
        let item = item.to_string();
        section.set("MATERIAL", Some(string_item(&item)));
        modified = true;
    }

    modified
}

fn number_or_text(text: &str) -> Item {
    match text.parse::<i64>() {
        Ok(number) => int_item(number),
        Err(_) => string_item(text),
    }
}

pub fn remove_node(section: &mut SectionMut<'_>, key: &str) -> bool {
    section.take(key).is_some()
}

/// Remove `key` if it holds an empty table.
pub fn prune_empty(section: &mut SectionMut<'_>, key: &str) -> bool {
    let empty = section
        .get(key)
        .and_then(Item::as_table_like)
        .is_some_and(|table| table.is_empty());
    empty && remove_node(section, key)
}
