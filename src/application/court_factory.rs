//! Court factory
//!
//! Fetches the catalog document once per run and expands it into the
//! courts of one family at a time.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::enumeration::EnumerationStrategy;
use crate::domain::{Court, CourtFamily, CourtParams};
use crate::infrastructure::fetch_error::FetchError;
use crate::infrastructure::http_client::PageFetcher;
use crate::infrastructure::parsing::CatalogDocument;
use crate::infrastructure::retry_policy::RetryPolicy;

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] FetchError),
}

pub struct CourtFactory {
    fetcher: Arc<dyn PageFetcher>,
    catalog_url: String,
    retry: RetryPolicy,
    catalog: Option<Arc<CatalogDocument>>,
}

impl CourtFactory {
    pub fn new(fetcher: Arc<dyn PageFetcher>, catalog_url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            catalog_url: catalog_url.into(),
            retry,
            catalog: None,
        }
    }

    /// Catalog document, fetched on first use and cached until [`close`](Self::close)
    pub async fn catalog(&mut self) -> Result<Arc<CatalogDocument>, FetchError> {
        if let Some(catalog) = &self.catalog {
            return Ok(Arc::clone(catalog));
        }

        let source = self
            .retry
            .run("catalog", || self.fetcher.get_page(&self.catalog_url))
            .await?;
        info!("Catalog fetched from {} ({} bytes)", self.catalog_url, source.len());

        let catalog = Arc::new(CatalogDocument::new(source));
        self.catalog = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// All courts of `family`, type code by type code.
    ///
    /// A type code whose catalog control is missing is logged and skipped,
    /// so is a parameter set that does not build a court.
    pub async fn courts_for(&mut self, family: CourtFamily) -> Result<Vec<Court>, FactoryError> {
        let catalog = self.catalog().await?;
        let strategy = EnumerationStrategy::for_family(family);

        let mut courts = Vec::new();
        for type_code in family.type_codes() {
            let params = match strategy.enumerate(type_code, &catalog) {
                Ok(params) => params,
                Err(e) => {
                    warn!("Skipping {} type {}: {}", family, type_code, e);
                    continue;
                }
            };

            courts.extend(build_courts(params));
        }

        debug!("{} family: {} courts", family, courts.len());
        Ok(courts)
    }

    pub fn is_catalog_cached(&self) -> bool {
        self.catalog.is_some()
    }

    /// Release the cached catalog document
    pub fn close(&mut self) {
        self.catalog = None;
    }
}

/// Courts for every parameter set that passes construction; the rest are logged
fn build_courts(params: Vec<CourtParams>) -> impl Iterator<Item = Court> {
    params
        .into_iter()
        .filter_map(|params| {
            Court::new(params)
                .inspect_err(|e| error!("Skipping court: {}", e))
                .ok()
        })
}
