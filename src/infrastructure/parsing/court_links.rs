//! Court search listing: numeric court id to display name

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::{compile_selector, element_text};

static COURT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/sud(\d+)(?:[/?#]|$)").expect("court id pattern is valid"));

/// Numeric id of the `/sud<digits>` path segment of a court page URL
pub fn court_id(url: &str) -> Option<u32> {
    COURT_ID
        .captures(url)
        .and_then(|captures| captures[1].parse().ok())
}

/// Map every `/sud<digits>` anchor of the listing to its text.
///
/// Anchors without a court id or with blank text are ignored; when an id
/// appears twice the later anchor wins.
pub fn parse_court_names(source: &str) -> HashMap<u32, String> {
    let document = Html::parse_document(source);
    let Ok(anchors) = compile_selector("a[href]") else {
        return HashMap::new();
    };

    let mut names = HashMap::new();
    for anchor in document.select(&anchors) {
        let Some(id) = anchor.value().attr("href").and_then(court_id) else {
            continue;
        };
        let name = element_text(anchor);
        if name.is_empty() {
            debug!("Court {} has no name in the search listing", id);
            continue;
        }
        names.insert(id, name);
    }

    names
}
