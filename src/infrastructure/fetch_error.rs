//! HTTP fetch error types
//!
//! Distinguishes "the server answered with an error status" from "the
//! request never completed" so the retry policy can decide what is worth
//! another attempt.

use reqwest::StatusCode;
use thiserror::Error;

use super::retry_policy::Retryable;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

impl FetchError {
    pub fn status(status: StatusCode, url: &str) -> Self {
        Self::Status {
            status: status.as_u16(),
            url: url.to_string(),
        }
    }

    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Page does not exist (or is gone) rather than temporarily failing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404 | 410, .. })
    }
}

impl Retryable for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500 || matches!(*status, 408 | 429),
            Self::Transport { .. } => true,
            Self::ClientBuild(_) => false,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
