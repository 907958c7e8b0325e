//! Application layer
//!
//! Enumeration strategies, URL resolution, detail scraping and the pipeline
//! that drives them for one run.

pub mod court_factory;
pub mod detail_scraper;
pub mod enumeration;
pub mod name_directory;
pub mod pipeline;
pub mod url_resolver;

pub use court_factory::{CourtFactory, FactoryError};
pub use detail_scraper::{DetailScraper, ScrapeOutcome};
pub use enumeration::EnumerationStrategy;
pub use name_directory::CourtNameDirectory;
pub use pipeline::{CourtPipeline, FamilySummary, RunSummary};
pub use url_resolver::{ResolveOutcome, UrlResolver};
