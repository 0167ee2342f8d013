//! Clap adapter for chestfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It provides
//! [`ChestfigArgs`], a clap derive type to embed in your own `#[derive(Parser)]`
//! struct for `check|upgrade|menus` subcommands and a `--data-folder` flag.
//!
//! The bridge to the core is [`ChestfigArgs::into_action()`] plus
//! [`ChestfigArgs::apply()`]; from there everything goes through
//! [`ChestfigBuilder::handle()`](crate::ChestfigBuilder::handle). Without clap,
//! build [`ChestfigAction`](crate::ChestfigAction) values directly.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::builder::ChestfigBuilder;
use crate::types::ChestfigAction;

/// Clap-derived args for the menus subcommand group.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     menus: ChestfigArgs,
/// }
/// ```
#[derive(Debug, Args)]
pub struct ChestfigArgs {
    /// Data folder to use instead of the platform one.
    #[arg(long, global = true)]
    pub data_folder: Option<PathBuf>,

    #[command(subcommand)]
    pub action: Option<ChestfigSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum ChestfigSubcommand {
    /// Load everything and report the errors found.
    Check,
    /// Run pending upgrades of the configuration files.
    Upgrade,
    /// List the loaded menus with their commands.
    Menus,
}

impl ChestfigArgs {
    /// Bare invocation (no subcommand) and explicit `check` both map to
    /// `ChestfigAction::Check`.
    pub fn into_action(self) -> ChestfigAction {
        match self.action {
            None | Some(ChestfigSubcommand::Check) => ChestfigAction::Check,
            Some(ChestfigSubcommand::Upgrade) => ChestfigAction::Upgrade,
            Some(ChestfigSubcommand::Menus) => ChestfigAction::Menus,
        }
    }

    /// Pass `--data-folder`, when given, on to `builder`.
    pub fn apply(&self, builder: ChestfigBuilder) -> ChestfigBuilder {
        match &self.data_folder {
            Some(folder) => builder.data_folder(folder),
            None => builder,
        }
    }
}
