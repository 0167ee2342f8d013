use std::path::{Path, PathBuf};

use thiserror::Error;

/// Every failure chestfig can report.
///
/// The wrapper variants (`Parse`, `Upgrade`, `UpgradeExecutor`) form a chain
/// through their optional boxed cause. The error report walks that chain to
/// build one sentence per error (see [`report`](crate::report)).
#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum ChestfigError {
    #[error("{message}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(chestfig::io)))]
    Io {
        message: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{message}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(chestfig::syntax)))]
    Syntax {
        message: String,
        path: PathBuf,
        details: String,
    },

    #[error("{message}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(chestfig::parse)))]
    Parse {
        message: String,
        #[source]
        cause: Option<Box<ChestfigError>>,
    },

    #[error("{message}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(chestfig::upgrade)))]
    Upgrade {
        message: String,
        #[source]
        cause: Option<Box<ChestfigError>>,
    },

    #[error("{message}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(chestfig::upgrade_executor)))]
    UpgradeExecutor {
        message: String,
        #[source]
        cause: Option<Box<ChestfigError>>,
    },

    #[error("Settings error: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(chestfig::settings)))]
    Settings(#[from] confique::Error),

    #[error("App name is required when no data folder is set: call .app_name() or .data_folder() on the builder")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(chestfig::app_name_required)))]
    AppNameRequired,
}

impl ChestfigError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        ChestfigError::Io {
            message: format!("couldn't read the file \"{}\"", file_name(path)),
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        ChestfigError::Io {
            message: format!("couldn't write the file \"{}\"", file_name(path)),
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn syntax(path: &Path, details: impl Into<String>) -> Self {
        ChestfigError::Syntax {
            message: format!("invalid TOML syntax in the file \"{}\"", file_name(path)),
            path: path.to_path_buf(),
            details: details.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ChestfigError::Parse {
            message: message.into(),
            cause: None,
        }
    }

    pub fn parse_caused(message: impl Into<String>, cause: ChestfigError) -> Self {
        ChestfigError::Parse {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn upgrade(message: impl Into<String>, cause: ChestfigError) -> Self {
        ChestfigError::Upgrade {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn executor(message: impl Into<String>, cause: Option<ChestfigError>) -> Self {
        ChestfigError::UpgradeExecutor {
            message: message.into(),
            cause: cause.map(Box::new),
        }
    }
}

/// The final path component as text, or the whole path when there is none.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn read_error_names_file() {
        let err = ChestfigError::read(
            Path::new("/data/menu/shop.toml"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "couldn't read the file \"shop.toml\"");
        assert!(err.source().is_some());
    }

    #[test]
    fn syntax_error_keeps_details() {
        let err = ChestfigError::syntax(Path::new("shop.toml"), "line 3, column 1");
        match err {
            ChestfigError::Syntax { message, details, .. } => {
                assert!(message.contains("shop.toml"));
                assert_eq!(details, "line 3, column 1");
            }
            other => panic!("Expected Syntax, got: {other:?}"),
        }
    }

    #[test]
    fn wrapper_exposes_cause_as_source() {
        let err = ChestfigError::upgrade(
            "couldn't create a backup",
            ChestfigError::parse("inner detail"),
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "inner detail");
    }

    #[test]
    fn app_name_required_formats() {
        let err = ChestfigError::AppNameRequired;
        assert!(err.to_string().contains("app_name"));
    }
}
