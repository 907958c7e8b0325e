//! Court name directory
//!
//! Built from the site-wide court search listing on first lookup and kept
//! for the rest of the run. A listing that cannot be fetched leaves the
//! directory empty: names then come from the detail pages themselves.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::infrastructure::http_client::PageFetcher;
use crate::infrastructure::parsing::{court_id, parse_court_names};
use crate::infrastructure::retry_policy::RetryPolicy;

pub struct CourtNameDirectory {
    fetcher: Arc<dyn PageFetcher>,
    listing_url: String,
    retry: RetryPolicy,
    names: OnceCell<HashMap<u32, String>>,
}

impl CourtNameDirectory {
    pub fn new(fetcher: Arc<dyn PageFetcher>, listing_url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            listing_url: listing_url.into(),
            retry,
            names: OnceCell::new(),
        }
    }

    /// Canonical name of the court whose page is `court_url`
    pub async fn name_for(&self, court_url: &str) -> Option<String> {
        let id = court_id(court_url)?;
        self.names().await.get(&id).cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.names.initialized()
    }

    pub async fn names(&self) -> &HashMap<u32, String> {
        self.names.get_or_init(|| self.load()).await
    }

    async fn load(&self) -> HashMap<u32, String> {
        let listing = self
            .retry
            .run("court listing", || self.fetcher.get_page(&self.listing_url))
            .await;

        match listing {
            Ok(source) => {
                let names = parse_court_names(&source);
                info!("Court name directory loaded: {} courts", names.len());
                names
            }
            Err(e) => {
                warn!("Court name directory unavailable, using page names: {}", e);
                HashMap::new()
            }
        }
    }
}
