//! Test utilities for court-catalog
//!
//! `ScriptedFetcher` stands in for the registry: pages and form lookups are
//! answered from per-key queues, and every call is recorded so tests can
//! assert on retries and caching.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::infrastructure::fetch_error::{FetchError, FetchResult};
use crate::infrastructure::http_client::PageFetcher;

pub const CATALOG_FIXTURE: &str = include_str!("../tests/fixtures/catalog.html");
pub const COURT_PAGE_FIXTURE: &str = include_str!("../tests/fixtures/court_page.html");
pub const PLACEHOLDER_PAGE_FIXTURE: &str = include_str!("../tests/fixtures/placeholder_page.html");
pub const SEARCH_COURT_FIXTURE: &str = include_str!("../tests/fixtures/search_court.html");

#[derive(Debug, Clone)]
enum Scripted {
    Body(String),
    Status(u16),
}

impl Scripted {
    fn into_result(self, url: &str) -> FetchResult<String> {
        match self {
            Scripted::Body(body) => Ok(body),
            Scripted::Status(status) => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
        }
    }
}

/// In-memory [`PageFetcher`].
///
/// Each key holds a queue of answers; the last answer repeats once the queue
/// is down to one. Unknown keys answer 404. Form lookups are keyed by their
/// urlencoded body, e.g. `court_type=1&reg_id=12`.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: Mutex<HashMap<String, VecDeque<Scripted>>>,
    forms: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.push_page(url, Scripted::Body(body.to_string()));
        self
    }

    pub fn with_page_status(self, url: &str, status: u16) -> Self {
        self.push_page(url, Scripted::Status(status));
        self
    }

    /// Lookup answered by landing on `location`
    pub fn with_redirect(self, form_key: &str, location: &str) -> Self {
        self.push_form(form_key, Scripted::Body(location.to_string()));
        self
    }

    pub fn with_form_status(self, form_key: &str, status: u16) -> Self {
        self.push_form(form_key, Scripted::Status(status));
        self
    }

    fn push_page(&self, url: &str, answer: Scripted) {
        self.pages
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(answer);
    }

    fn push_form(&self, key: &str, answer: Scripted) {
        self.forms
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(answer);
    }

    fn next_answer(queues: &Mutex<HashMap<String, VecDeque<Scripted>>>, key: &str) -> Scripted {
        let mut queues = queues.lock().unwrap();
        match queues.get_mut(key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or(Scripted::Status(StatusCode::NOT_FOUND.as_u16())),
            None => Scripted::Status(StatusCode::NOT_FOUND.as_u16()),
        }
    }

    pub fn form_key(form: &[(&str, String)]) -> String {
        form.iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Every call so far: `GET <url>` or `POST <url> <form>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn get_page(&self, url: &str) -> FetchResult<String> {
        self.calls.lock().unwrap().push(format!("GET {url}"));
        Self::next_answer(&self.pages, url).into_result(url)
    }

    async fn submit_form(&self, url: &str, form: &[(&str, String)]) -> FetchResult<String> {
        let key = Self::form_key(form);
        self.calls.lock().unwrap().push(format!("POST {url} {key}"));
        Self::next_answer(&self.forms, &key).into_result(url)
    }
}
