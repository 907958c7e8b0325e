//! Detail page scraping
//!
//! Fetches a resolved court page and fills the descriptive fields. Pages
//! that are unreachable or stop matching the expected layout leave the
//! court partly filled; it is still written out.

use std::sync::Arc;

use tracing::{info, warn};

use super::name_directory::CourtNameDirectory;
use crate::domain::{Court, CourtDetails};
use crate::infrastructure::http_client::PageFetcher;
use crate::infrastructure::parsing::{CourtPageParser, ParsingResult};
use crate::infrastructure::retry_policy::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Complete,
    /// The page stopped matching part way through
    Partial,
    /// No URL to scrape
    Skipped,
    /// Status or transport error after the retry budget
    Unreachable,
}

pub struct DetailScraper {
    fetcher: Arc<dyn PageFetcher>,
    directory: CourtNameDirectory,
    parser: CourtPageParser,
    retry: RetryPolicy,
}

impl DetailScraper {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        directory: CourtNameDirectory,
        retry: RetryPolicy,
    ) -> ParsingResult<Self> {
        Ok(Self {
            fetcher,
            directory,
            parser: CourtPageParser::new()?,
            retry,
        })
    }

    pub async fn scrape(&self, court: &mut Court) -> ScrapeOutcome {
        let Some(url) = court.url().map(str::to_string) else {
            return ScrapeOutcome::Skipped;
        };

        let page = match self
            .retry
            .run("court page", || self.fetcher.get_page(&url))
            .await
        {
            Ok(page) => page,
            Err(e) if e.is_not_found() => {
                warn!("No such page {}: {}", url, e);
                return ScrapeOutcome::Unreachable;
            }
            Err(e) => {
                warn!("Giving up on {}: {}", url, e);
                return ScrapeOutcome::Unreachable;
            }
        };

        let known_name = self.directory.name_for(&url).await;
        let mut details = CourtDetails::default();
        let filled = self.parser.fill(&page, &url, known_name, &mut details);
        court.apply_details(details);
        info!("Getting data for {}", court.display_label());

        match filled {
            Ok(()) => ScrapeOutcome::Complete,
            Err(e) => {
                info!("Incomplete data for `{}` at {}: {}", court.display_label(), url, e);
                ScrapeOutcome::Partial
            }
        }
    }
}
