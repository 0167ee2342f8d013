//! Attribute readers: typed extraction of one field from a section.
//!
//! A field may be spelled several ways across versions, so readers take an
//! ordered alias list and use the first key that is set. Readers never modify
//! the document; a value that is set but invalid becomes an `Err` that the
//! caller records, and the field is treated as absent.

use crate::document::Section;
use crate::error::ChestfigError;

/// The first alias that is set in `section`.
pub fn find_alias<'k>(section: Section<'_>, aliases: &[&'k str]) -> Option<&'k str> {
    aliases.iter().copied().find(|key| section.is_set(key))
}

/// Text of the first alias that is set.
pub fn get_any_string(section: Section<'_>, aliases: &[&str]) -> Option<String> {
    find_alias(section, aliases).and_then(|key| section.get_string(key))
}

pub fn read_string(section: Section<'_>, key: &str) -> Result<String, ChestfigError> {
    section
        .get_string(key)
        .ok_or_else(|| ChestfigError::parse("it must be a text value"))
}

pub fn read_int(section: Section<'_>, key: &str) -> Result<i64, ChestfigError> {
    if let Some(value) = section.get_int(key) {
        return Ok(value);
    }
    // Upgrades keep malformed embedded numbers as text.
    match section.get_string(key) {
        Some(text) => parse_integer(&text),
        None => Err(ChestfigError::parse("it must be a whole number")),
    }
}

pub fn read_double(section: Section<'_>, key: &str) -> Result<f64, ChestfigError> {
    if let Some(value) = section.get_double(key) {
        return Ok(value);
    }
    match section.get_string(key) {
        Some(text) => parse_double(&text),
        None => Err(ChestfigError::parse("it must be a number")),
    }
}

pub fn read_bool(section: Section<'_>, key: &str) -> Result<bool, ChestfigError> {
    section
        .get_bool(key)
        .ok_or_else(|| ChestfigError::parse("it must be true or false"))
}

/// A genuine list, or a single string split on `separator`. Empty elements
/// are dropped, so `""` and `";;"` both read as no values.
pub fn read_list_or_inline(
    section: Section<'_>,
    key: &str,
    separator: &str,
) -> Result<Vec<String>, ChestfigError> {
    let values = if section.is_list(key) {
        section.get_string_list(key).unwrap_or_default()
    } else if let Some(text) = section.get_string(key) {
        split_separated_values(&text, separator)
    } else {
        return Err(ChestfigError::parse("it must be a list or a text value"));
    };
    Ok(values.into_iter().filter(|v| !v.is_empty()).collect())
}

/// A genuine list, or a single value read as a one-element list.
pub fn read_list_or_single(section: Section<'_>, key: &str) -> Result<Vec<String>, ChestfigError> {
    if section.is_list(key) {
        return Ok(section.get_string_list(key).unwrap_or_default());
    }
    match section.get_string(key) {
        Some(text) => Ok(vec![text]),
        None => Err(ChestfigError::parse("it must be a list or a text value")),
    }
}

/// Split an inline list into trimmed, non-empty values.
///
/// A result with no values becomes `[""]`: written back to a file, that keeps
/// "set but empty" distinct from "absent". An empty separator means `;`.
pub fn split_separated_values(input: &str, separator: &str) -> Vec<String> {
    let separator = if separator.is_empty() { ";" } else { separator };
    let mut values: Vec<String> = input
        .split(separator)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    if values.is_empty() {
        values.push(String::new());
    }
    values
}

/// Split on the first occurrence of `separator`, trimming both halves.
pub fn trimmed_split_once<'a>(input: &'a str, separator: char) -> Option<(&'a str, &'a str)> {
    input
        .split_once(separator)
        .map(|(left, right)| (left.trim(), right.trim()))
}

pub fn parse_integer(text: &str) -> Result<i64, ChestfigError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| ChestfigError::parse(format!("\"{text}\" is not a valid whole number")))
}

pub fn parse_double(text: &str) -> Result<f64, ChestfigError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ChestfigError::parse(format!("\"{text}\" is not a valid number")))
}

pub fn strictly_positive_integer(value: i64) -> Result<u32, ChestfigError> {
    if value <= 0 {
        return Err(ChestfigError::parse("it must be greater than zero"));
    }
    u32::try_from(value).map_err(|_| ChestfigError::parse("it is too large"))
}

pub fn positive_integer(value: i64) -> Result<u32, ChestfigError> {
    if value < 0 {
        return Err(ChestfigError::parse("it must be zero or positive"));
    }
    u32::try_from(value).map_err(|_| ChestfigError::parse("it is too large"))
}

/// A durability: `0..=32767`.
pub fn positive_short(value: i64) -> Result<u16, ChestfigError> {
    if value < 0 {
        return Err(ChestfigError::parse("it must be zero or positive"));
    }
    if value > i64::from(i16::MAX) {
        return Err(ChestfigError::parse("it must not be greater than 32767"));
    }
    Ok(value as u16)
}

pub fn positive_double(value: f64) -> Result<f64, ChestfigError> {
    if value < 0.0 {
        return Err(ChestfigError::parse("it must be zero or positive"));
    }
    Ok(value)
}

pub fn strictly_positive_double(value: f64) -> Result<f64, ChestfigError> {
    if value <= 0.0 {
        return Err(ChestfigError::parse("it must be greater than zero"));
    }
    Ok(value)
}
