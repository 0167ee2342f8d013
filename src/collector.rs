//! Error collection for one load or upgrade run.
//!
//! Nothing here returns a `Result`: recording an error can't fail, so callers
//! keep going after every defect and the full list is reported once at the end.

use crate::error::ChestfigError;

/// One recorded error: message fragments from general context to specific
/// detail, plus the error that caused it (if any).
#[derive(Debug)]
pub struct ErrorRecord {
    pub message: Vec<String>,
    pub cause: Option<ChestfigError>,
}

/// Accumulates [`ErrorRecord`]s in the order they are found.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<ErrorRecord>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<I, S>(&mut self, message: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(message, None);
    }

    pub fn add_caused<I, S>(&mut self, cause: ChestfigError, message: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(message, Some(cause));
    }

    fn push<I, S>(&mut self, message: I, cause: Option<ChestfigError>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors.push(ErrorRecord {
            message: message.into_iter().map(Into::into).collect(),
            cause,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Bind this collector to one attribute of one entity.
    pub fn attribute<'c>(&'c mut self, context: &'c ErrorContext, attribute: &'c str) -> AttributeErrors<'c> {
        AttributeErrors {
            collector: self,
            context,
            attribute,
        }
    }
}

/// Which entity an error belongs to and where it was found, e.g. the icon
/// `"shop-item"` in the menu `"shop.toml"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    entity: String,
}

impl ErrorContext {
    pub fn icon(icon_name: &str, menu_file: &str) -> Self {
        Self {
            entity: format!("the icon \"{icon_name}\" in the menu \"{menu_file}\""),
        }
    }

    pub fn menu(menu_file: &str) -> Self {
        Self {
            entity: format!("the menu \"{menu_file}\""),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

/// An [`ErrorCollector`] scoped to one attribute, producing messages shaped
/// entity/container → attribute → detail.
pub struct AttributeErrors<'c> {
    collector: &'c mut ErrorCollector,
    context: &'c ErrorContext,
    attribute: &'c str,
}

impl AttributeErrors<'_> {
    /// The whole attribute is invalid and was ignored.
    pub fn add_error(&mut self, cause: ChestfigError) {
        let message = [
            self.context.entity().to_string(),
            format!("invalid attribute \"{}\"", self.attribute),
        ];
        self.collector.add_caused(cause, message);
    }

    /// One element of a list attribute is invalid; its siblings are kept.
    pub fn add_list_element_error(&mut self, element: &str, cause: ChestfigError) {
        let message = [
            self.context.entity().to_string(),
            format!("invalid attribute \"{}\"", self.attribute),
            format!("the list element \"{element}\" is not valid"),
        ];
        self.collector.add_caused(cause, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let collector = ErrorCollector::new();
        assert!(!collector.has_errors());
        assert!(collector.is_empty());
    }

    #[test]
    fn records_in_order() {
        let mut collector = ErrorCollector::new();
        collector.add(["first"]);
        collector.add_caused(ChestfigError::parse("boom"), ["second", "detail"]);
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.errors()[0].message, vec!["first"]);
        assert_eq!(collector.errors()[1].message, vec!["second", "detail"]);
        assert!(collector.errors()[1].cause.is_some());
    }

    #[test]
    fn attribute_error_shape() {
        let mut collector = ErrorCollector::new();
        let context = ErrorContext::icon("diamond", "shop.toml");
        collector
            .attribute(&context, "PRICE")
            .add_error(ChestfigError::parse("it must be zero or positive"));

        let record = &collector.errors()[0];
        assert_eq!(
            record.message,
            vec![
                "the icon \"diamond\" in the menu \"shop.toml\"",
                "invalid attribute \"PRICE\""
            ]
        );
        assert_eq!(
            record.cause.as_ref().unwrap().to_string(),
            "it must be zero or positive"
        );
    }

    #[test]
    fn list_element_error_names_element() {
        let mut collector = ErrorCollector::new();
        let context = ErrorContext::menu("shop.toml");
        collector
            .attribute(&context, "open-actions")
            .add_list_element_error("give: nothing", ChestfigError::parse("bad item"));
        let record = &collector.errors()[0];
        assert_eq!(record.message.len(), 3);
        assert!(record.message[2].contains("give: nothing"));
    }
}
