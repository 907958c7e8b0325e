//! Court Catalog - export of the court.gov.ua court registry
//!
//! Enumerates regional, district and city-district courts from the registry
//! catalog page, resolves each court's own page, scrapes its contact details
//! and appends one CSV row per court.

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

pub use application::{CourtPipeline, RunSummary};
pub use domain::{Court, CourtFamily};
pub use infrastructure::{AppConfig, HttpClient, PageFetcher};
