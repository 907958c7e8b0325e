//! HTTP client for the court registry with rate limiting and charset decoding
//!
//! court.gov.ua serves every page in a legacy single-byte charset, so bodies
//! are read as bytes and decoded with `encoding_rs` before anything parses
//! them. Documents leave this module as `String` so callers can hold them
//! across `.await` points and build `scraper::Html` synchronously.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use encoding_rs::Encoding;
use governor::{
    clock::DefaultClock,
    state::{direct::NotKeyed, InMemoryState},
    Quota, RateLimiter,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Client, Response,
};
use tracing::{debug, warn};

use super::config::AppConfig;
use super::fetch_error::{FetchError, FetchResult};
use crate::domain::constants::{crawling, site};

/// Source of decoded pages.
///
/// Every component that talks to the registry goes through this trait, so
/// tests can swap the network for scripted responses.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the decoded document
    async fn get_page(&self, url: &str) -> FetchResult<String>;

    /// POST `form` to `url`, follow redirects and return the final location
    async fn submit_form(&self, url: &str, form: &[(&str, String)]) -> FetchResult<String>;
}

/// HTTP client configuration for crawling
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub max_redirects: usize,
    /// Charset label every page is decoded with
    pub page_encoding: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: crawling::DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: crawling::DEFAULT_REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: crawling::DEFAULT_MAX_REQUESTS_PER_SECOND,
            max_redirects: crawling::DEFAULT_MAX_REDIRECTS,
            page_encoding: site::PAGE_ENCODING.to_string(),
        }
    }
}

impl From<&AppConfig> for HttpClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.http.user_agent.clone(),
            timeout_seconds: config.http.timeout_seconds,
            max_requests_per_second: config.http.max_requests_per_second,
            max_redirects: config.http.max_redirects,
            page_encoding: config.site.page_encoding.clone(),
        }
    }
}

/// reqwest client paced by a governor rate limiter
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    encoding: &'static Encoding,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> FetchResult<Self> {
        let encoding = Encoding::for_label(config.page_encoding.as_bytes()).ok_or_else(|| {
            FetchError::ClientBuild(format!("unknown page encoding '{}'", config.page_encoding))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| FetchError::ClientBuild(format!("invalid user agent: {e}")))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        let per_second = NonZeroU32::new(config.max_requests_per_second).ok_or_else(|| {
            FetchError::ClientBuild("rate limit must be greater than 0".to_string())
        })?;
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        debug!(
            "HTTP client ready: {} req/s, {}s timeout, {} pages",
            config.max_requests_per_second,
            config.timeout_seconds,
            encoding.name()
        );

        Ok(Self {
            client,
            rate_limiter,
            encoding,
        })
    }

    fn check_status(response: Response, url: &str) -> FetchResult<Response> {
        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for {}", status, url);
            return Err(FetchError::status(status, url));
        }
        Ok(response)
    }

    /// Decode a body in the configured page charset
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, actual, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            debug!("Malformed {} sequences replaced while decoding", actual.name());
        }
        text.into_owned()
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn get_page(&self, url: &str) -> FetchResult<String> {
        self.rate_limiter.until_ready().await;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        let response = Self::check_status(response, url)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        let text = self.decode(&bytes);

        debug!("Fetched {} ({} bytes)", url, bytes.len());
        Ok(text)
    }

    async fn submit_form(&self, url: &str, form: &[(&str, String)]) -> FetchResult<String> {
        self.rate_limiter.until_ready().await;
        debug!("POST {} {:?}", url, form);

        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        let response = Self::check_status(response, url)?;

        let location = response.url().to_string();
        debug!("POST {} landed on {}", url, location);
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_rejects_unknown_encoding_and_zero_rate() {
        let config = HttpClientConfig {
            page_encoding: "no-such-charset".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::new(config),
            Err(FetchError::ClientBuild(_))
        ));

        let config = HttpClientConfig {
            max_requests_per_second: 0,
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::new(config),
            Err(FetchError::ClientBuild(_))
        ));
    }

    #[test]
    fn test_decodes_windows_1251() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode("Київ");
        assert_eq!(client.decode(&bytes), "Київ");
    }

    #[test]
    fn test_config_from_app_config() {
        let mut app = AppConfig::default();
        app.http.max_requests_per_second = 2;
        app.site.page_encoding = "utf-8".to_string();

        let config = HttpClientConfig::from(&app);
        assert_eq!(config.max_requests_per_second, 2);
        assert_eq!(config.page_encoding, "utf-8");
    }
}
