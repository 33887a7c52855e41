//! Search orchestration: catalog readiness, parsing, ranking.

use std::sync::Arc;

use crate::catalog::{ColorCatalog, Readiness};
use crate::error::{Error, Result};
use crate::model::{ColorEntry, MatchResult, Rgb};
use crate::parser;
use crate::rank::DistanceRanker;

/// Default number of matches returned per search.
pub const DEFAULT_LIMIT: usize = 20;

/// Options for a [`SearchService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of matches per search.
    pub limit: usize,

    /// Suspend searches until the catalog has loaded. When false, a search
    /// against a catalog that is still loading fails with
    /// [`Error::NotReady`] (starting the load in the background if needed),
    /// and one against a failed catalog returns the load error while a new
    /// attempt starts in the background.
    pub wait_for_catalog: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            wait_for_catalog: true,
        }
    }
}

/// Nearest named color search over a [`ColorCatalog`].
#[derive(Debug, Clone)]
pub struct SearchService {
    catalog: Arc<ColorCatalog>,
    options: SearchOptions,
}

impl SearchService {
    pub fn new(catalog: Arc<ColorCatalog>, options: SearchOptions) -> Self {
        Self { catalog, options }
    }

    /// Service over the bundled catalog with default options.
    pub fn builtin() -> Self {
        Self::new(Arc::new(ColorCatalog::builtin()), SearchOptions::default())
    }

    pub fn catalog(&self) -> &Arc<ColorCatalog> {
        &self.catalog
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn ranker(&self) -> DistanceRanker {
        DistanceRanker::new(self.options.limit)
    }

    /// Load the catalog. Safe to call repeatedly and concurrently.
    pub async fn initialize(&self) -> Result<()> {
        self.catalog.initialize().await?;
        Ok(())
    }

    /// Parse `text` and return the nearest catalog colors.
    ///
    /// The catalog is made ready before the text is parsed, so the first
    /// search also starts the load even when the input is malformed.
    pub async fn search(&self, text: &str) -> Result<Vec<MatchResult>> {
        let entries = self.entries().await?;
        let query = parser::parse(text)?;
        Ok(self.rank_logged(query, &entries))
    }

    /// Return the catalog colors nearest to `query`.
    pub async fn search_rgb(&self, query: Rgb) -> Result<Vec<MatchResult>> {
        let entries = self.entries().await?;
        Ok(self.rank_logged(query, &entries))
    }

    fn rank_logged(&self, query: Rgb, entries: &[ColorEntry]) -> Vec<MatchResult> {
        let matches = self.ranker().rank(query, entries);
        tracing::debug!(
            query = %query,
            candidates = entries.len(),
            matches = matches.len(),
            nearest = matches.first().map_or("-", |m| m.id.as_str()),
            "color search"
        );
        matches
    }

    async fn entries(&self) -> Result<Arc<[ColorEntry]>> {
        if self.options.wait_for_catalog {
            return Ok(self.catalog.ready_entries().await?);
        }

        if let Some(entries) = self.catalog.entries() {
            return Ok(entries);
        }
        // A failed load is reported as is; the retry runs in the background
        // so a later search can succeed.
        if let Some(err) = self.catalog.last_error() {
            self.spawn_initialize();
            return Err(err.into());
        }
        if self.catalog.state() != Readiness::Loading {
            self.spawn_initialize();
        }
        Err(Error::NotReady)
    }

    fn spawn_initialize(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime available to load the color catalog");
            return;
        };
        let catalog = Arc::clone(&self.catalog);
        handle.spawn(async move {
            // The failure stays in the catalog state for the next search.
            if let Err(err) = catalog.initialize().await {
                tracing::debug!(error = %err, "background catalog load failed");
            }
        });
    }
}
