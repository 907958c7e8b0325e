//! Parsing error types for catalog and detail pages

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Selector '{selector}' for field '{field}' matched nothing on {url}")]
    SelectorMismatch {
        field: &'static str,
        selector: String,
        url: String,
    },

    #[error("Catalog has no court_type control for type code {type_code}")]
    CatalogControlMissing { type_code: u8 },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl ParsingError {
    pub fn selector_mismatch(field: &'static str, selector: &str, url: &str) -> Self {
        Self::SelectorMismatch {
            field,
            selector: selector.to_string(),
            url: url.to_string(),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ParsingError::selector_mismatch("email", "table.menur1 td.b2 a", "http://x/sud1");
        assert_eq!(
            err.to_string(),
            "Selector 'table.menur1 td.b2 a' for field 'email' matched nothing on http://x/sud1"
        );
        assert_eq!(
            ParsingError::CatalogControlMissing { type_code: 5 }.to_string(),
            "Catalog has no court_type control for type code 5"
        );
    }
}
