//! Renders an [`ErrorCollector`] as one numbered, human-readable report.

use std::error::Error;
use std::fmt::Write as _;

use crate::collector::{ErrorCollector, ErrorRecord};
use crate::error::ChestfigError;
use crate::joiner;

/// An error record normalized for printing.
#[derive(Debug)]
pub struct PrintableError<'a> {
    pub message: Vec<String>,
    /// Pinpoint diagnostic, e.g. the location of a syntax error.
    pub details: Option<String>,
    /// The first cause that isn't one of chestfig's own wrapper errors.
    pub cause: Option<&'a (dyn Error + 'static)>,
}

/// Unwrap the known error kinds in a record's cause chain, appending their
/// messages, until an opaque cause (or the end of the chain) is reached.
pub fn classify(record: &ErrorRecord) -> PrintableError<'_> {
    let mut message = record.message.clone();
    let (details, cause) = match &record.cause {
        Some(cause) => unwrap_known(cause, &mut message),
        None => (None, None),
    };
    PrintableError {
        message,
        details,
        cause,
    }
}

fn unwrap_known<'a>(
    error: &'a ChestfigError,
    message: &mut Vec<String>,
) -> (Option<String>, Option<&'a (dyn Error + 'static)>) {
    match error {
        ChestfigError::Syntax {
            message: m, details, ..
        } => {
            // The detail string replaces any further cause output.
            message.push(m.clone());
            (Some(details.clone()), None)
        }
        ChestfigError::Parse { message: m, cause }
        | ChestfigError::Upgrade { message: m, cause }
        | ChestfigError::UpgradeExecutor { message: m, cause } => {
            message.push(m.clone());
            match cause {
                Some(inner) => unwrap_known(inner, message),
                None => (None, None),
            }
        }
        ChestfigError::Io {
            message: m, source, ..
        } => {
            message.push(m.clone());
            (None, Some(source))
        }
        other => (None, Some(other)),
    }
}

/// The full report, or an empty string when nothing was collected.
pub fn render(errors: &ErrorCollector) -> String {
    let mut output = String::new();
    if errors.is_empty() {
        return output;
    }

    let _ = writeln!(output, "Encountered {} error(s) on load:", errors.len());
    output.push_str(" \n");

    for (i, record) in errors.errors().iter().enumerate() {
        render_one(&mut output, i + 1, &classify(record));
    }
    output
}

fn render_one(output: &mut String, index: usize, error: &PrintableError<'_>) {
    let _ = write!(output, "{index}) {}", joiner::join(&error.message));

    match &error.details {
        Some(details) => {
            output.push_str(". Details:\n");
            let _ = writeln!(output, "{details}");
        }
        None => output.push_str(".\n"),
    }

    if let Some(cause) = error.cause {
        output.push_str("--------[ Error details ]--------\n");
        let _ = writeln!(output, "{cause}");
        let mut source = cause.source();
        while let Some(inner) = source {
            let _ = writeln!(output, "caused by: {inner}");
            source = inner.source();
        }
        output.push_str("---------------------------------\n");
    }
    output.push_str(" \n");
}
