//! HTML parsing for court.gov.ua pages
//!
//! Parsers work on decoded `&str` documents and build `scraper::Html`
//! synchronously, so nothing `!Send` is ever held across an `.await`.

pub mod catalog;
pub mod court_links;
pub mod court_page;

pub use catalog::{CatalogDocument, RegionOption, ScriptEntry, ScriptVariables};
pub use court_links::{court_id, parse_court_names};
pub use court_page::CourtPageParser;

pub use super::parsing_error::{ParsingError, ParsingResult};

use scraper::{ElementRef, Selector};

/// Compile one CSS selector, mapping failures into [`ParsingError`]
pub fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}

/// All text below `element`, trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
