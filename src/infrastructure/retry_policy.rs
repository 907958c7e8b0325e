//! Fixed-delay retry policy
//!
//! Wraps a fallible async operation: retryable failures are attempted again
//! after a fixed pause until the attempt budget runs out, then the last error
//! is handed back to the caller, which decides how to degrade.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

/// Classifies whether an error is worth another attempt
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Retry budget and pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    /// Fixed pause between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is exhausted.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}/{}", label, attempt, max_attempts);
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        "Attempt {}/{} of {} failed: {}; retrying in {:?}",
                        attempt, max_attempts, label, e, self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
