//! Parsers for item decorations: colors, banner patterns, enchantments, NBT.

use crate::attributes::{parse_integer, strictly_positive_integer, trimmed_split_once};
use crate::catalog::Catalog;
use crate::error::ChestfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerPattern {
    pub pattern: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enchantment {
    pub enchantment: String,
    pub level: u32,
}

/// `red, green, blue`, each between 0 and 255.
pub fn parse_rgb_color(input: &str) -> Result<Rgb, ChestfigError> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let [red, green, blue] = parts.as_slice() else {
        return Err(ChestfigError::parse(
            "it must be in the format \"red, green, blue\"",
        ));
    };

    let component = |text: &str, name: &str| -> Result<u8, ChestfigError> {
        let value = parse_integer(text)
            .map_err(|_| ChestfigError::parse(format!("{name} is not a number")))?;
        u8::try_from(value).map_err(|_| {
            ChestfigError::parse("it should only contain numbers between 0 and 255")
        })
    };

    Ok(Rgb {
        red: component(red, "red")?,
        green: component(green, "green")?,
        blue: component(blue, "blue")?,
    })
}

pub fn parse_dye_color(input: &str, dye_colors: &Catalog) -> Result<String, ChestfigError> {
    dye_colors
        .find(input.trim())
        .map(String::from)
        .ok_or_else(|| ChestfigError::parse("it must be a valid color"))
}

/// `pattern:color`.
pub fn parse_banner_pattern(
    input: &str,
    pattern_types: &Catalog,
    dye_colors: &Catalog,
) -> Result<BannerPattern, ChestfigError> {
    let Some((pattern, color)) = trimmed_split_once(input, ':') else {
        return Err(ChestfigError::parse(
            "it must be in the format \"pattern:color\"",
        ));
    };
    let pattern = pattern_types
        .find(pattern)
        .ok_or_else(|| ChestfigError::parse("it must be a valid pattern type"))?;
    let color = parse_dye_color(color, dye_colors)?;
    Ok(BannerPattern {
        pattern: pattern.to_string(),
        color,
    })
}

/// `name` or `name, level`; the level defaults to 1.
pub fn parse_enchantment(input: &str, enchantments: &Catalog) -> Result<Enchantment, ChestfigError> {
    let (name, level) = match trimmed_split_once(input, ',') {
        Some((name, raw_level)) => {
            let level = parse_integer(raw_level)
                .and_then(strictly_positive_integer)
                .map_err(|_| {
                    ChestfigError::parse(format!("invalid enchantment level \"{raw_level}\""))
                })?;
            (name, level)
        }
        None => (input.trim(), 1),
    };

    let enchantment = enchantments
        .find(name)
        .ok_or_else(|| ChestfigError::parse(format!("unsupported enchantment \"{name}\"")))?;
    Ok(Enchantment {
        enchantment: enchantment.to_string(),
        level,
    })
}

/// Structural check of an NBT compound: it must be wrapped in braces, with
/// balanced brackets and closed quotes.
pub fn validate_nbt(input: &str) -> Result<(), ChestfigError> {
    let trimmed = input.trim();
    if !trimmed.starts_with('{') {
        return Err(ChestfigError::parse("NBT data must start with \"{\""));
    }

    let mut stack = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in trimmed.char_indices() {
        if let Some(q) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' | '[' => stack.push(c),
            '}' | ']' => {
                let expected = if c == '}' { '{' } else { '[' };
                if stack.pop() != Some(expected) {
                    return Err(ChestfigError::parse(format!(
                        "unexpected \"{c}\" at position {}",
                        i + 1
                    )));
                }
                if stack.is_empty() && i + c.len_utf8() != trimmed.len() {
                    return Err(ChestfigError::parse(
                        "unexpected text after the closing \"}\"",
                    ));
                }
            }
            _ => {}
        }
    }

    if quote.is_some() {
        return Err(ChestfigError::parse("unclosed quote"));
    }
    if !stack.is_empty() {
        return Err(ChestfigError::parse("unclosed bracket"));
    }
    Ok(())
}
