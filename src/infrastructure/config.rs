//! Configuration infrastructure
//!
//! Settings are layered, later sources win:
//! 1. Compiled defaults
//! 2. Optional config file (TOML/JSON/YAML, chosen by extension)
//! 3. Environment variables: `COURTS_<SECTION>__<KEY>`, e.g. `COURTS_RETRY__DELAY_MS=0`
//! 4. Command line overrides applied by the binary

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::constants::{crawling as defaults, site};
use crate::infrastructure::retry_policy::RetryPolicy;

pub const ENV_PREFIX: &str = "COURTS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub retry: RetryConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Endpoints and page charset of the court registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Catalog page, also the URL lookup endpoint
    pub catalog_url: String,
    /// Court search listing used to build the name directory
    pub search_courts_url: String,
    /// Charset label understood by `encoding_rs`
    pub page_encoding: String,
}

/// HTTP client behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub max_redirects: usize,
}

/// Retry budget shared by URL lookup and detail scraping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    /// Fixed pause between attempts in milliseconds
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,
    /// Enable JSON formatted file logs
    pub json_format: bool,
    pub console_output: bool,
    pub file_output: bool,
    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,
    pub file_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            catalog_url: site::CATALOG_URL.to_string(),
            search_courts_url: site::SEARCH_COURTS_URL.to_string(),
            page_encoding: site::PAGE_ENCODING.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: defaults::DEFAULT_REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::DEFAULT_MAX_REQUESTS_PER_SECOND,
            max_redirects: defaults::DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            delay_ms: defaults::DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(defaults::DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            file_name: "court-catalog.log".to_string(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.delay_ms))
    }
}

impl AppConfig {
    /// Load defaults, then the optional file, then `COURTS_*` environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layers(config_file, Self::environment())
    }

    /// `COURTS_<SECTION>__<KEY>` variables
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_layers(
        config_file: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = config_file {
            info!("Loading configuration file: {:?}", path);
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder.add_source(environment).build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("site.catalog_url", &self.site.catalog_url),
            ("site.search_courts_url", &self.site.search_courts_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ConfigError::validation(format!("{} '{}' is not a URL: {}", name, value, e)))?;
        }

        if encoding_rs::Encoding::for_label(self.site.page_encoding.as_bytes()).is_none() {
            return Err(ConfigError::validation(format!(
                "unknown page encoding '{}'",
                self.site.page_encoding
            )));
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::validation("retry.max_attempts must be greater than 0"));
        }

        if self.http.max_requests_per_second == 0 {
            return Err(ConfigError::validation(
                "http.max_requests_per_second must be greater than 0",
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::validation("http.timeout_seconds must be greater than 0"));
        }

        if self.output.csv_path.as_os_str().is_empty() {
            return Err(ConfigError::validation("output.csv_path must not be empty"));
        }

        Ok(())
    }
}
