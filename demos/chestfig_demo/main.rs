//! # chestfig demo application
//!
//! A sample CLI tool that shows how to integrate chestfig into a real
//! application. It loads a data folder and draws menus in the terminal.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example chestfig_demo -- menus --data-folder /tmp/menus check
//! cargo run --example chestfig_demo -- show menu --data-folder /tmp/menus
//! RUST_LOG=info cargo run --example chestfig_demo -- menus --data-folder /tmp/menus upgrade
//! ```
//!
//! The first run on a missing folder creates it with a settings template and
//! an example menu opened by the `menu` command.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chestfig::{Chestfig, ChestfigArgs, ChestfigBuilder, Menu};

/// chestfig demo: load a menus data folder and draw its menus.
#[derive(Parser, Debug)]
#[command(name = "chestfig-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw the menu opened by a command.
    Show {
        /// The command, without the leading slash.
        command: String,

        /// Data folder (default: the platform data directory of `chestfig-demo`).
        #[arg(long)]
        data_folder: Option<PathBuf>,
    },
    /// Check, upgrade or list the menus.
    Menus(ChestfigArgs),
}

fn make_builder(data_folder: Option<PathBuf>) -> ChestfigBuilder {
    let builder = Chestfig::builder().app_name("chestfig-demo");
    match data_folder {
        Some(folder) => builder.data_folder(folder),
        None => builder,
    }
}

// ---------------------------------------------------------------------------
// Color codes
// ---------------------------------------------------------------------------

/// Replace `§x` codes with the closest ANSI escape.
fn to_ansi(text: &str) -> String {
    let mut output = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '§' {
            output.push(c);
            continue;
        }
        let code = match chars.next() {
            Some('0') => "30",
            Some('1' | '9') => "34",
            Some('2' | 'a') => "32",
            Some('3' | 'b') => "36",
            Some('4' | 'c') => "31",
            Some('5' | 'd') => "35",
            Some('6' | 'e') => "33",
            Some('7' | '8' | 'f') => "37",
            Some('l') => "1",
            Some('o') => "3",
            Some('n') => "4",
            _ => "0",
        };
        output.push_str(&format!("\x1b[{code}m"));
    }
    output.push_str(RESET);
    output
}

const RESET: &str = "\x1b[0m";
const COLUMNS: i64 = 9;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn draw(menu: &Menu) {
    println!("{}  ({})", to_ansi(&menu.settings.title), menu.file_name);
    for y in 1..=i64::from(menu.settings.rows) {
        let row: Vec<String> = (1..=COLUMNS)
            .map(|x| match menu.icon_at(x, y).and_then(|icon| icon.material.as_deref()) {
                Some(material) => material.chars().take(3).collect(),
                None => " . ".to_string(),
            })
            .collect();
        println!("[{}]", row.join("|"));
    }
    println!();
    for placed in menu.icons.values() {
        let name = placed.icon.name.as_deref().unwrap_or(&placed.name);
        println!("  {}", to_ansi(name));
        for line in placed.icon.lore.iter().flatten() {
            println!("    {}", to_ansi(line));
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            command,
            data_folder,
        } => {
            let loaded = make_builder(data_folder).load().unwrap_or_else(|e| {
                eprintln!("Failed to load menus:\n{e}");
                std::process::exit(1);
            });
            eprint!("{}", loaded.report());
            match loaded.menus.menu_by_command(&command) {
                Some(menu) => draw(menu),
                None => {
                    eprintln!("No menu is opened by /{command}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Menus(args) => {
            let builder = args.apply(make_builder(None));
            let action = args.into_action();
            builder.handle_and_print(&action).unwrap_or_else(|e| {
                eprintln!("Menus error:\n{e}");
                std::process::exit(1);
            });
        }
    }
}
