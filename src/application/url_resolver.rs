//! Court page URL resolution
//!
//! The catalog endpoint answers `court_type=<type>&reg_id=<id>` with a
//! redirect to the court's own page; the location reached after following
//! redirects is the court URL.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::domain::Court;
use crate::infrastructure::http_client::PageFetcher;
use crate::infrastructure::retry_policy::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved,
    /// No lookup id for this court, nothing was sent
    MissingIdentity,
    /// The endpoint answered without redirecting anywhere
    NoRedirect,
    /// Status or transport error after the retry budget
    Failed,
}

pub struct UrlResolver {
    fetcher: Arc<dyn PageFetcher>,
    endpoint: String,
    retry: RetryPolicy,
}

impl UrlResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, endpoint: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            retry,
        }
    }

    /// Look up the court page and store it on `court`
    pub async fn resolve(&self, court: &mut Court) -> ResolveOutcome {
        let Some(lookup_id) = court.lookup_id() else {
            debug!("No lookup id for {}", court.display_label());
            return ResolveOutcome::MissingIdentity;
        };

        let form = [
            ("court_type", court.type_id().to_string()),
            ("reg_id", lookup_id.to_string()),
        ];
        let label = format!("URL lookup court_type={}&reg_id={}", form[0].1, form[1].1);

        let location = self
            .retry
            .run(&label, || self.fetcher.submit_form(&self.endpoint, &form))
            .await;

        match location {
            Ok(location) if same_location(&location, &self.endpoint) => {
                warn!("{} was not redirected, URL left unset", label);
                ResolveOutcome::NoRedirect
            }
            Ok(location) => {
                debug!("Acquired URL for {}: {}", label, location);
                court.set_url(location);
                ResolveOutcome::Resolved
            }
            Err(e) => {
                warn!("{} failed: {}", label, e);
                ResolveOutcome::Failed
            }
        }
    }
}

/// Same host, port and path, ignoring a trailing slash and the query
fn same_location(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => {
            a.host_str() == b.host_str()
                && a.port_or_known_default() == b.port_or_known_default()
                && a.path().trim_end_matches('/') == b.path().trim_end_matches('/')
        }
        _ => a.trim_end_matches('/') == b.trim_end_matches('/'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CityDistrictCourtParams, RegionalCourtParams};
    use crate::test_utils::ScriptedFetcher;
    use std::time::Duration;

    const ENDPOINT: &str = "http://court.gov.ua/sudy/";

    fn resolver(fetcher: &Arc<ScriptedFetcher>) -> UrlResolver {
        UrlResolver::new(
            fetcher.clone(),
            ENDPOINT,
            RetryPolicy::new(3, Duration::from_millis(1)),
        )
    }

    fn regional() -> Court {
        Court::regional(RegionalCourtParams {
            type_id: 1,
            region_id: "12".to_string(),
            region_name: "Харківська область".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_regional_court_resolved_by_region() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with_redirect("court_type=1&reg_id=12", "http://court.gov.ua/sud4810/"),
        );
        let mut court = regional();

        let outcome = resolver(&fetcher).resolve(&mut court).await;

        assert_eq!(outcome, ResolveOutcome::Resolved);
        assert_eq!(court.url(), Some("http://court.gov.ua/sud4810/"));
        assert_eq!(
            fetcher.calls(),
            vec!["POST http://court.gov.ua/sudy/ court_type=1&reg_id=12".to_string()]
        );
    }

    #[tokio::test]
    async fn test_city_district_court_resolved_by_district() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with_redirect("court_type=8&reg_id=2011", "http://court.gov.ua/sud2011/"),
        );
        let mut court = Court::city_district(CityDistrictCourtParams {
            type_id: 8,
            region_name: "Харківська область".to_string(),
            district_id: "2011".to_string(),
            district_name: "Київський район".to_string(),
            city_name: "Харків".to_string(),
        })
        .unwrap();

        assert_eq!(
            resolver(&fetcher).resolve(&mut court).await,
            ResolveOutcome::Resolved
        );
        assert_eq!(court.url(), Some("http://court.gov.ua/sud2011/"));
    }

    #[tokio::test]
    async fn test_server_errors_exhaust_budget_and_leave_url_unset() {
        let fetcher = Arc::new(ScriptedFetcher::new().with_form_status("court_type=1&reg_id=12", 500));
        let mut court = regional();

        let outcome = resolver(&fetcher).resolve(&mut court).await;

        assert_eq!(outcome, ResolveOutcome::Failed);
        assert!(court.url().is_none());
        assert_eq!(fetcher.count_calls("POST"), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let fetcher = Arc::new(ScriptedFetcher::new().with_form_status("court_type=1&reg_id=12", 404));
        let mut court = regional();

        assert_eq!(
            resolver(&fetcher).resolve(&mut court).await,
            ResolveOutcome::Failed
        );
        assert_eq!(fetcher.count_calls("POST"), 1);
    }

    #[tokio::test]
    async fn test_transient_error_then_redirect() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .with_form_status("court_type=1&reg_id=12", 502)
                .with_redirect("court_type=1&reg_id=12", "http://court.gov.ua/sud4810/"),
        );
        let mut court = regional();

        assert_eq!(
            resolver(&fetcher).resolve(&mut court).await,
            ResolveOutcome::Resolved
        );
        assert_eq!(fetcher.count_calls("POST"), 2);
    }

    #[tokio::test]
    async fn test_landing_on_endpoint_is_not_a_court_url() {
        let fetcher = Arc::new(
            ScriptedFetcher::new().with_redirect("court_type=1&reg_id=12", "http://court.gov.ua/sudy"),
        );
        let mut court = regional();

        assert_eq!(
            resolver(&fetcher).resolve(&mut court).await,
            ResolveOutcome::NoRedirect
        );
        assert!(court.url().is_none());
    }

    #[test]
    fn test_same_location() {
        assert!(same_location("http://court.gov.ua/sudy", "http://court.gov.ua/sudy/"));
        assert!(same_location("http://court.gov.ua:80/sudy/?a=1", "http://court.gov.ua/sudy/"));
        assert!(!same_location("http://court.gov.ua/sud4810/", "http://court.gov.ua/sudy/"));
    }
}
