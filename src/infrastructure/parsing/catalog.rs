//! Shared catalog document
//!
//! The catalog page encodes its enumeration data two ways: per type code a
//! form holding `<input type="hidden" name="court_type" value="N">` next to a
//! `<select>` of region options, and an inline script filling variable tables
//! such as `obl1_12[0] = "1201:Дергачівський район";`.

use std::collections::HashMap;
use std::sync::OnceLock;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{element_text, ParsingError, ParsingResult};

static TABLE_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(?P<table>[A-Za-z]+\d+)_(?P<key>\d+)\s*\[[^\]]*\]\s*=\s*(?:"(?P<double>[^"]*)"|'(?P<single>[^']*)')"#,
    )
    .expect("table assignment pattern is valid")
});

static SCRIPT: Lazy<Selector> = Lazy::new(|| Selector::parse("script").expect("valid selector"));
static COURT_TYPE_CONTROL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[name="court_type"]"#).expect("valid selector"));
static OPTION: Lazy<Selector> = Lazy::new(|| Selector::parse("option").expect("valid selector"));

/// One `<option>` of a region select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOption {
    pub id: String,
    pub name: String,
}

/// One `table_key[..] = "id:name"` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    /// Table name without the key suffix, e.g. `obl1`
    pub table: String,
    /// Region or city id the entry belongs to
    pub key: String,
    pub id: String,
    pub name: String,
}

/// Every variable-table assignment found in the inline scripts, in source order
#[derive(Debug, Clone, Default)]
pub struct ScriptVariables {
    entries: Vec<ScriptEntry>,
}

impl ScriptVariables {
    /// Collect assignments from every inline `<script>` of the document
    pub fn from_document(document: &Html) -> Self {
        let scripts = document
            .select(&SCRIPT)
            .filter(|script| script.value().attr("src").is_none())
            .map(|script| script.text().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        let variables = Self::parse_script(&scripts);
        debug!("Parsed {} script table entries", variables.len());
        variables
    }

    /// Assignments of one script body. Statements end at a newline or `;`.
    pub fn parse_script(text: &str) -> Self {
        let entries = text
            .split(['\n', ';'])
            .filter_map(Self::parse_statement)
            .collect();
        Self { entries }
    }

    fn parse_statement(statement: &str) -> Option<ScriptEntry> {
        let Some(captures) = TABLE_ASSIGNMENT.captures(statement) else {
            if statement.contains('[') && statement.contains('=') {
                debug!("Skipping malformed script line: {}", statement.trim());
            }
            return None;
        };

        let value = captures
            .name("double")
            .or_else(|| captures.name("single"))
            .map_or("", |value| value.as_str());
        let Some((id, name)) = value.split_once(':') else {
            debug!("Skipping script entry without id: {}", statement.trim());
            return None;
        };

        let id = id.trim();
        if id.is_empty() {
            debug!("Skipping script entry without id: {}", statement.trim());
            return None;
        }

        Some(ScriptEntry {
            table: captures["table"].to_string(),
            key: captures["key"].to_string(),
            id: id.to_string(),
            name: name.trim().to_string(),
        })
    }

    /// Entries of one table across all keys, in source order
    pub fn table<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a ScriptEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.table == table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything enumeration reads from the catalog, taken from one parse
#[derive(Debug, Default)]
struct ParsedCatalog {
    /// Region options per `court_type` code
    controls: HashMap<u8, Vec<RegionOption>>,
    script_variables: ScriptVariables,
}

impl ParsedCatalog {
    fn parse(source: &str) -> Self {
        let document = Html::parse_document(source);

        let mut controls = HashMap::new();
        for input in document.select(&COURT_TYPE_CONTROL) {
            let value = input.value().attr("value").unwrap_or_default();
            let Ok(type_code) = value.trim().parse::<u8>() else {
                debug!("Skipping court_type control with value {:?}", value);
                continue;
            };
            let Some(container) = input.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            controls.entry(type_code).or_insert_with(|| {
                container
                    .select(&OPTION)
                    .filter_map(region_option)
                    .collect::<Vec<_>>()
            });
        }

        let script_variables = ScriptVariables::from_document(&document);
        debug!(
            "Catalog parsed: {} court_type controls, {} script entries",
            controls.len(),
            script_variables.len()
        );

        Self {
            controls,
            script_variables,
        }
    }
}

/// Options without a value (the "choose a region" prompt) yield nothing
fn region_option(option: ElementRef<'_>) -> Option<RegionOption> {
    let id = option.value().attr("value").map(str::trim).unwrap_or_default();
    if id.is_empty() {
        return None;
    }

    let name = option
        .children()
        .find_map(|node| node.value().as_text().map(|text| text.trim().to_string()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| element_text(option));

    Some(RegionOption {
        id: id.to_string(),
        name,
    })
}

/// Decoded catalog page, parsed once on first use
#[derive(Debug)]
pub struct CatalogDocument {
    source: String,
    parsed: OnceLock<ParsedCatalog>,
}

impl CatalogDocument {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            parsed: OnceLock::new(),
        }
    }

    fn parsed(&self) -> &ParsedCatalog {
        self.parsed.get_or_init(|| ParsedCatalog::parse(&self.source))
    }

    /// Options of the select sharing a parent with the `court_type=N` control
    pub fn region_options(&self, type_code: u8) -> ParsingResult<&[RegionOption]> {
        self.parsed()
            .controls
            .get(&type_code)
            .map(Vec::as_slice)
            .ok_or(ParsingError::CatalogControlMissing { type_code })
    }

    /// Script tables, shared by every type code
    pub fn script_variables(&self) -> &ScriptVariables {
        &self.parsed().script_variables
    }
}
