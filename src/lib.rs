//! Tolerant parsing and backup-safe migration of hand-edited menu
//! configuration.
//!
//! Chestfig reads a data folder of TOML files describing chest menus (one
//! menu per file, each icon a table), plus global settings and custom text
//! placeholders. Before anything is parsed, pending upgrades rewrite files
//! written for older versions into the current format.
//!
//! ```ignore
//! let loaded = Chestfig::builder()
//!     .data_folder("plugins/menus")
//!     .load()?;
//! print!("{}", loaded.report());
//! let shop = loaded.menus.menu_by_command("shop");
//! ```
//!
//! # Never refuse to start
//!
//! Users edit these files by hand, so they contain mistakes. A single bad
//! attribute must not take the whole menu (or the whole folder) down with it.
//! Loading only fails when the data folder itself can't be resolved; every
//! other problem is recorded in an [`ErrorCollector`] and loading continues
//! with whatever is usable:
//!
//! - an invalid attribute leaves that field unset, the rest of the icon loads;
//! - an icon without a position is dropped, the rest of the menu loads;
//! - a file that isn't valid TOML is skipped, the other menus load;
//! - broken settings fall back to their defaults.
//!
//! At the end, [`Loaded::report()`] renders every recorded error as one
//! numbered list, each entry a sentence going from the file to the detail:
//!
//! ```text
//! 1) The icon "diamonds" in the menu "shop.toml": invalid attribute "AMOUNT", it must be greater than zero.
//! ```
//!
//! # Aliases
//!
//! Attributes renamed over time are still read under their old names (`ID`
//! for `MATERIAL`, `COMMAND` for `ACTIONS`, ...). List attributes accept a
//! real TOML list or a single string split on a separator. The upgrades
//! below rewrite files to the current names, but the parser never depends on
//! them having run.
//!
//! # Upgrades
//!
//! Each upgrade has a stable identifier and runs at most once per data
//! folder; the ones already applied are recorded in `.upgrades-done`. An
//! upgrade rewrites a file in two steps: changes are computed in memory, then,
//! only if something changed, the original is copied to a timestamped backup
//! (`shop.toml_2024.03.09-07.05.backup`) before the new content is saved. A
//! failed backup leaves the original untouched. Rewrites go through
//! `toml_edit`, so the user's comments survive.
//!
//! An upgrade that fails on one file stays pending and is retried on the next
//! load; the others still run. A new data folder gets current files, so every
//! upgrade is marked done without running.
//!
//! # Core library, optional CLI
//!
//! [`ChestfigBuilder::handle()`] runs a [`ChestfigAction`] (`check`,
//! `upgrade`, `menus`) and returns a displayable [`ChestfigResult`]. The
//! `cli` module (behind the `clap` feature, on by default) provides
//! [`ChestfigArgs`] to embed those as subcommands.
//!
//! # Logging
//!
//! Chestfig logs through the [`log`](https://docs.rs/log) facade: rewritten
//! files at `info`, silent clamps and fallbacks at `warn`, failed upgrades at
//! `error`. Install any logger to see them.

pub mod error;
pub mod types;

mod action;
mod attributes;
mod builder;
mod catalog;
#[cfg(feature = "clap")]
mod cli;
mod collector;
mod document;
mod file;
mod icon;
mod index;
mod item;
mod joiner;
mod menu;
mod meta;
mod ops;
mod placeholders;
mod report;
mod settings;
mod text;
pub mod upgrade;

#[cfg(test)]
mod fixtures;

pub use action::Action;
pub use builder::{Chestfig, ChestfigBuilder, Loaded};
pub use catalog::{Catalog, Catalogs};
#[cfg(feature = "clap")]
pub use cli::{ChestfigArgs, ChestfigSubcommand};
pub use collector::{ErrorCollector, ErrorContext, ErrorRecord};
pub use document::{ConfigFile, Section, SectionMut};
pub use error::ChestfigError;
pub use file::DataLayout;
pub use icon::{Icon, ParseContext};
pub use index::MenuIndex;
pub use item::ItemReference;
pub use menu::{ClickType, Menu, MenuSettings, OpenTrigger, PlacedIcon, Position};
pub use meta::{BannerPattern, Enchantment, Rgb};
pub use ops::{ChestfigResult, MenuEntry};
pub use placeholders::Placeholders;
pub use settings::Settings;
pub use types::{ChestfigAction, DataFolder};
