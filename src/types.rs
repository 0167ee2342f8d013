use std::path::PathBuf;

/// Where the data folder is.
#[derive(Debug, Clone, PartialEq)]
pub enum DataFolder {
    /// Platform data directory for the app name (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// An explicit path.
    Path(PathBuf),
}

/// An operation on a data folder, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ChestfigAction {
    /// Load everything and report the errors found.
    Check,
    /// Run pending upgrades only.
    Upgrade,
    /// List the menus with their commands.
    Menus,
}
