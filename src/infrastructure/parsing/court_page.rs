//! Court detail page parser
//!
//! Detail pages share one loose layout: contact cells in `table.menur1`,
//! the schedule in `table.menur2`. Older pages drop parts of it, so fields
//! are read in a fixed order and reading stops at the first one missing.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{compile_selector, element_text, ParsingError, ParsingResult};
use crate::domain::constants::site::NAME_PLACEHOLDER;
use crate::domain::CourtDetails;

pub const MAIN_SELECTOR: &str = "div#main";
pub const HEADING_SELECTOR: &str = "h1";
pub const ADDRESS_SELECTOR: &str = "table.menur1 td.b2";
pub const EMAIL_SELECTOR: &str = r#"table.menur1 td.b2 a[href*="@"]"#;
pub const SITE_SELECTOR: &str = r#"table.menur1 td.b2 a[href^="http"]"#;
pub const SCHEDULE_SELECTOR: &str = "table.menur2";
pub const PHONES_SELECTOR: &str = "table.menur1 td.b3";

struct Field {
    name: &'static str,
    css: &'static str,
    selector: Selector,
}

impl Field {
    fn new(name: &'static str, css: &'static str) -> ParsingResult<Self> {
        Ok(Self {
            name,
            css,
            selector: compile_selector(css)?,
        })
    }

    fn text(&self, document: &Html, url: &str) -> ParsingResult<String> {
        document
            .select(&self.selector)
            .next()
            .map(element_text)
            .ok_or_else(|| ParsingError::selector_mismatch(self.name, self.css, url))
    }
}

/// Parser for court detail pages with selectors compiled once
pub struct CourtPageParser {
    main: Field,
    heading: Selector,
    address: Field,
    email: Field,
    site: Field,
    schedule: Field,
    phones: Field,
}

impl CourtPageParser {
    pub fn new() -> ParsingResult<Self> {
        Ok(Self {
            main: Field::new("name", MAIN_SELECTOR)?,
            heading: compile_selector(HEADING_SELECTOR)?,
            address: Field::new("address", ADDRESS_SELECTOR)?,
            email: Field::new("email", EMAIL_SELECTOR)?,
            site: Field::new("site", SITE_SELECTOR)?,
            schedule: Field::new("schedule", SCHEDULE_SELECTOR)?,
            phones: Field::new("phones", PHONES_SELECTOR)?,
        })
    }

    /// Fill `details` from the page in the order name, address, email, site,
    /// schedule, phones.
    ///
    /// `known_name` comes from the name directory and wins over the page.
    /// On the first field whose selector matches nothing the error is
    /// returned and every field read before it stays in `details`.
    pub fn fill(
        &self,
        source: &str,
        url: &str,
        known_name: Option<String>,
        details: &mut CourtDetails,
    ) -> ParsingResult<()> {
        let document = Html::parse_document(source);

        details.name = match known_name {
            Some(name) => Some(name),
            None => self.page_name(&document, url)?,
        };
        details.address = Some(self.address.text(&document, url)?);
        details.email = Some(self.email.text(&document, url)?);
        details.site = Some(self.site.text(&document, url)?);
        details.schedule = Some(self.schedule.text(&document, url)?);
        details.phones = Some(self.phones.text(&document, url)?);

        debug!("All detail fields found on {}", url);
        Ok(())
    }

    /// Sole text of `div#main`, or of the first `h1` when the block only
    /// holds the portal placeholder.
    fn page_name(&self, document: &Html, url: &str) -> ParsingResult<Option<String>> {
        let main = document
            .select(&self.main.selector)
            .next()
            .ok_or_else(|| ParsingError::selector_mismatch(self.main.name, self.main.css, url))?;

        let name = sole_text(main);
        if name.as_deref().is_some_and(|name| name.contains(NAME_PLACEHOLDER)) {
            debug!("Placeholder name on {}, falling back to heading", url);
            return Ok(document.select(&self.heading).next().and_then(sole_text));
        }

        if name.is_none() {
            debug!("No single text in {} on {}", self.main.css, url);
        }
        Ok(name)
    }
}

/// Text at the end of a chain of single children, trimmed.
///
/// `<div><b>Name</b></div>` gives `Name`; an element with several child
/// nodes (mixed text and markup) gives nothing.
fn sole_text(element: ElementRef<'_>) -> Option<String> {
    let mut node = *element;
    loop {
        let mut children = node.children();
        let (Some(child), None) = (children.next(), children.next()) else {
            return None;
        };

        if let Some(text) = child.value().as_text() {
            return Some(text.trim().to_string()).filter(|text| !text.is_empty());
        }
        if !child.value().is_element() {
            return None;
        }
        node = child;
    }
}
