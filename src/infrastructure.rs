//! Infrastructure layer: HTTP transport, HTML parsing, CSV output,
//! configuration and logging.

pub mod config;
pub mod csv_sink;
pub mod fetch_error;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod retry_policy;

pub use config::{AppConfig, ConfigError};
pub use csv_sink::{CsvSink, SinkError};
pub use fetch_error::{FetchError, FetchResult};
pub use http_client::{HttpClient, HttpClientConfig, PageFetcher};
pub use logging::{init_logging_with_config, log_system_info};
pub use parsing::{CatalogDocument, CourtPageParser, ParsingError, ParsingResult};
pub use retry_policy::{RetryPolicy, Retryable};
