//! Application state for a search screen.
//!
//! Data flows one way: input -> [`SearchController::search`] -> service ->
//! [`SearchState`] -> render. Each request gets a sequence number; only the
//! latest request may write its results, so a slow search can never
//! overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};

use crate::error::Result;
use crate::model::{MatchResult, Rgb};
use crate::parser;

use super::service::SearchService;

/// What the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text of the most recent accepted query.
    pub query: String,
    /// Parsed query color, shown as a swatch next to the input.
    pub swatch: Option<Rgb>,
    pub results: Vec<MatchResult>,
    /// User-facing message for the last failure, until dismissed.
    pub error: Option<String>,
    /// Sequence number of the request that last wrote this state.
    pub generation: u64,
}

/// How a request ended relative to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The request was the latest and its outcome is in the state.
    Applied,
    /// A newer request started before this one finished.
    Superseded,
    /// Blank input; nothing was searched.
    Ignored,
}

#[derive(Debug)]
struct Inner {
    service: Arc<SearchService>,
    state: Mutex<SearchState>,
    latest: AtomicU64,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, text: &str) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn run(&self, seq: u64, text: &str) -> SearchOutcome {
        let query = text.trim();
        let rgb = match parser::parse(query) {
            Ok(rgb) => rgb,
            Err(err) => return self.apply(seq, query, None, Err(err.into())),
        };

        // Paint the swatch as soon as the input parses.
        {
            let mut state = self.state();
            if self.latest.load(Ordering::SeqCst) == seq {
                state.query = query.to_string();
                state.swatch = Some(rgb);
                state.error = None;
            }
        }

        let result = self.service.search_rgb(rgb).await;
        self.apply(seq, query, Some(rgb), result)
    }

    fn apply(
        &self,
        seq: u64,
        query: &str,
        swatch: Option<Rgb>,
        result: Result<Vec<MatchResult>>,
    ) -> SearchOutcome {
        let mut state = self.state();
        let latest = self.latest.load(Ordering::SeqCst);
        if latest != seq {
            tracing::debug!(seq, latest, query, "discarding superseded search");
            return SearchOutcome::Superseded;
        }

        state.query = query.to_string();
        if swatch.is_some() {
            state.swatch = swatch;
        }
        match result {
            Ok(results) => {
                state.results = results;
                state.error = None;
            }
            // Previous results stay visible behind the error.
            Err(err) => {
                tracing::debug!(seq, query, error = %err, "search failed");
                state.error = Some(err.to_string());
            }
        }
        state.generation = seq;
        SearchOutcome::Applied
    }
}

/// Owns [`SearchState`] and runs searches against a [`SearchService`].
#[derive(Debug)]
pub struct SearchController {
    inner: Arc<Inner>,
    inflight: Mutex<Option<AbortHandle>>,
}

impl SearchController {
    pub fn new(service: impl Into<Arc<SearchService>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                service: service.into(),
                state: Mutex::new(SearchState::default()),
                latest: AtomicU64::new(0),
            }),
            inflight: Mutex::new(None),
        }
    }

    pub fn service(&self) -> &SearchService {
        &self.inner.service
    }

    /// Load the catalog, recording a failure in the state.
    pub async fn start(&self) -> Result<()> {
        let result = self.inner.service.initialize().await;
        if let Err(err) = &result {
            self.inner.state().error = Some(err.to_string());
        }
        result
    }

    /// Run a search to completion on the current task.
    pub async fn search(&self, text: &str) -> SearchOutcome {
        match self.inner.begin(text) {
            Some(seq) => self.inner.run(seq, text).await,
            None => SearchOutcome::Ignored,
        }
    }

    /// Spawn a search, aborting the previous spawned one if still running.
    ///
    /// Returns `None` for blank input. Must be called within a tokio runtime.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<SearchOutcome>> {
        let seq = self.inner.begin(text)?;
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        let handle = tokio::spawn(async move { inner.run(seq, &text).await });

        let previous = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }
        Some(handle)
    }

    pub fn snapshot(&self) -> SearchState {
        self.inner.state().clone()
    }

    /// Clear the error message once the user has seen it.
    pub fn dismiss_error(&self) {
        self.inner.state().error = None;
    }
}
