//! Court pipeline
//!
//! Runs the families in order; for each court: resolve its URL, scrape the
//! detail page, append the row, drop the court. Failures past startup are
//! logged and counted, never propagated.

use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use super::court_factory::CourtFactory;
use super::detail_scraper::{DetailScraper, ScrapeOutcome};
use super::name_directory::CourtNameDirectory;
use super::url_resolver::{ResolveOutcome, UrlResolver};
use crate::domain::{Court, CourtFamily};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv_sink::CsvSink;
use crate::infrastructure::http_client::PageFetcher;
use crate::infrastructure::parsing::ParsingResult;

/// Per-family counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySummary {
    pub family: CourtFamily,
    /// Courts enumerated from the catalog
    pub courts: usize,
    /// Rows appended to the sink
    pub written: usize,
    /// The family produced no courts because the catalog could not be fetched
    pub abandoned: bool,
}

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub courts_written: usize,
    pub unresolved_urls: usize,
    pub degraded_pages: usize,
    pub sink_failures: usize,
    pub families: Vec<FamilySummary>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} courts written, {} without URL, {} incomplete pages, {} write failures",
            self.courts_written, self.unresolved_urls, self.degraded_pages, self.sink_failures
        )?;
        for family in &self.families {
            write!(f, "; {}: {}/{}", family.family, family.written, family.courts)?;
            if family.abandoned {
                write!(f, " (abandoned)")?;
            }
        }
        Ok(())
    }
}

pub struct CourtPipeline {
    factory: CourtFactory,
    resolver: UrlResolver,
    scraper: DetailScraper,
    sink: CsvSink,
    families: Vec<CourtFamily>,
}

impl CourtPipeline {
    /// Wire every component to one fetcher, following `config`
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &AppConfig) -> ParsingResult<Self> {
        let retry = config.retry.policy();
        let directory =
            CourtNameDirectory::new(Arc::clone(&fetcher), &config.site.search_courts_url, retry);

        Ok(Self {
            factory: CourtFactory::new(Arc::clone(&fetcher), &config.site.catalog_url, retry),
            resolver: UrlResolver::new(Arc::clone(&fetcher), &config.site.catalog_url, retry),
            scraper: DetailScraper::new(fetcher, directory, retry)?,
            sink: CsvSink::new(&config.output.csv_path),
            families: CourtFamily::RUN_ORDER.to_vec(),
        })
    }

    /// Restrict the run to `families`, keeping the canonical order
    #[must_use]
    pub fn with_families(mut self, families: &[CourtFamily]) -> Self {
        if !families.is_empty() {
            self.families = CourtFamily::RUN_ORDER
                .into_iter()
                .filter(|family| families.contains(family))
                .collect();
        }
        self
    }

    pub fn families(&self) -> &[CourtFamily] {
        &self.families
    }

    pub async fn run(&mut self) -> RunSummary {
        let mut summary = RunSummary::default();

        for family in self.families.clone() {
            let family_summary = self.run_family(family, &mut summary).await;
            summary.families.push(family_summary);
        }

        self.factory.close();
        info!(
            "Run finished: {} ({} rows in {:?})",
            summary,
            self.sink.rows_written(),
            self.sink.path()
        );
        summary
    }

    async fn run_family(&mut self, family: CourtFamily, summary: &mut RunSummary) -> FamilySummary {
        let mut family_summary = FamilySummary {
            family,
            courts: 0,
            written: 0,
            abandoned: false,
        };

        let courts = match self.factory.courts_for(family).await {
            Ok(courts) => courts,
            Err(e) => {
                error!("Abandoning {} courts: {}", family, e);
                family_summary.abandoned = true;
                return family_summary;
            }
        };

        info!("Processing {} {} courts", courts.len(), family);
        family_summary.courts = courts.len();

        for court in courts {
            if self.process_court(court, summary).await {
                family_summary.written += 1;
            }
        }

        family_summary
    }

    /// Resolve, scrape and persist one court; `true` when its row was written
    async fn process_court(&mut self, mut court: Court, summary: &mut RunSummary) -> bool {
        if self.resolver.resolve(&mut court).await != ResolveOutcome::Resolved {
            summary.unresolved_urls += 1;
        }

        match self.scraper.scrape(&mut court).await {
            ScrapeOutcome::Complete | ScrapeOutcome::Skipped => {}
            ScrapeOutcome::Partial | ScrapeOutcome::Unreachable => summary.degraded_pages += 1,
        }

        match self.sink.append(&court) {
            Ok(()) => {
                summary.courts_written += 1;
                true
            }
            Err(e) => {
                warn!("Failed to write {}: {}", court.display_label(), e);
                summary.sink_failures += 1;
                false
            }
        }
    }
}
