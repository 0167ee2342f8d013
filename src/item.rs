//! Compact item references: `material[:durability][,amount]`, e.g. `wool:5, 3`.

use crate::attributes::{parse_integer, positive_short, strictly_positive_integer};
use crate::catalog::{self, Catalog};
use crate::error::ChestfigError;

/// A parsed item reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReference {
    pub material: String,
    pub amount: u32,
    /// `Some` only when the text spelled out a durability. `Some(0)` means
    /// "exactly 0", `None` means "any durability".
    pub durability: Option<u16>,
}

impl ItemReference {
    /// Parse `input`. Spaces are ignored. With `parse_amount`, a trailing
    /// `,N` sets the amount (default 1); otherwise a comma is part of the
    /// material text and fails the lookup.
    pub fn parse(input: &str, parse_amount: bool, materials: &Catalog) -> Result<Self, ChestfigError> {
        let compact: String = input.chars().filter(|c| *c != ' ').collect();
        let mut rest = compact.as_str();
        let mut amount = 1;

        if parse_amount && let Some((item, raw_amount)) = rest.split_once(',') {
            amount = parse_integer(raw_amount)
                .and_then(strictly_positive_integer)
                .map_err(|_| ChestfigError::parse(format!("invalid amount \"{raw_amount}\"")))?;
            rest = item;
        }

        let mut durability = None;
        if let Some((item, raw_durability)) = rest.split_once(':') {
            durability = Some(
                parse_integer(raw_durability)
                    .and_then(positive_short)
                    .map_err(|_| {
                        ChestfigError::parse(format!("invalid durability \"{raw_durability}\""))
                    })?,
            );
            rest = item;
        }

        let material = parse_material(rest, materials)?;
        Ok(Self {
            material,
            amount,
            durability,
        })
    }

    /// The durability to give a created item: the explicit one, or 0.
    pub fn durability_or_default(&self) -> u16 {
        self.durability.unwrap_or(0)
    }

    pub fn has_explicit_durability(&self) -> bool {
        self.durability.is_some()
    }
}

/// Resolve a material name. Unknown names, empty text and air are rejected.
pub fn parse_material(input: &str, materials: &Catalog) -> Result<String, ChestfigError> {
    match materials.find(input) {
        Some(material) if !catalog::is_air(material) => Ok(material.to_string()),
        _ => Err(ChestfigError::parse(format!("invalid material \"{input}\""))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalogs;

    fn parse(input: &str) -> Result<ItemReference, ChestfigError> {
        ItemReference::parse(input, true, &Catalogs::default().materials)
    }

    #[test]
    fn material_durability_and_amount() {
        let item = parse("wool:5, 3").unwrap();
        assert_eq!(item.material, "WOOL");
        assert_eq!(item.durability, Some(5));
        assert!(item.has_explicit_durability());
        assert_eq!(item.amount, 3);
    }

    #[test]
    fn material_only_uses_defaults() {
        let item = parse("stone").unwrap();
        assert_eq!(item.material, "STONE");
        assert_eq!(item.durability, None);
        assert_eq!(item.durability_or_default(), 0);
        assert_eq!(item.amount, 1);
    }

    #[test]
    fn explicit_zero_durability_is_tracked() {
        let item = parse("wool:0").unwrap();
        assert_eq!(item.durability, Some(0));
    }

    #[test]
    fn air_and_empty_are_rejected() {
        assert!(parse("air").is_err());
        assert!(parse("").is_err());
        assert!(parse(":3").is_err());
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = parse("stone, 0").unwrap_err();
        assert_eq!(err.to_string(), "invalid amount \"0\"");
        let err = parse("stone:-1").unwrap_err();
        assert_eq!(err.to_string(), "invalid durability \"-1\"");
        assert!(parse("stone:x").is_err());
    }

    #[test]
    fn amount_not_parsed_when_disabled() {
        let materials = Catalogs::default().materials;
        assert!(ItemReference::parse("stone, 2", false, &materials).is_err());
        let item = ItemReference::parse("compass:2", false, &materials).unwrap();
        assert_eq!(item.durability, Some(2));
    }

    #[test]
    fn unknown_material_message() {
        let err = parse("unobtainium").unwrap_err();
        assert_eq!(err.to_string(), "invalid material \"unobtainium\"");
    }
}
