//! Builder pattern for search services.
//!
//! # Example
//! ```ignore
//! use huefind_core::api::SearchServiceBuilder;
//!
//! let service = SearchServiceBuilder::new()
//!     .catalog_path("colors.json")
//!     .limit(10)
//!     .build();
//! let matches = service.search("FF0000").await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::catalog::{CatalogSource, ColorCatalog, EmbeddedSource, JsonFileSource};

use super::service::{SearchOptions, SearchService};

/// A builder for configuring a [`SearchService`].
///
/// Without an explicit source the bundled catalog is used.
#[derive(Debug, Clone, Default)]
pub struct SearchServiceBuilder {
    source: Option<Arc<dyn CatalogSource>>,
    catalog: Option<Arc<ColorCatalog>>,
    options: SearchOptions,
}

impl SearchServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from a JSON file.
    ///
    /// Replaces any previously set source or catalog.
    pub fn catalog_path(self, path: impl AsRef<Path>) -> Self {
        self.source(JsonFileSource::new(path))
    }

    /// Load the catalog from a custom source.
    ///
    /// Replaces any previously set source or catalog.
    pub fn source(mut self, source: impl CatalogSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self.catalog = None;
        self
    }

    /// Share an existing catalog, e.g. between several services.
    ///
    /// Replaces any previously set source.
    pub fn catalog(mut self, catalog: Arc<ColorCatalog>) -> Self {
        self.catalog = Some(catalog);
        self.source = None;
        self
    }

    /// Sets the maximum number of matches per search.
    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = limit;
        self
    }

    /// Sets whether searches wait for the catalog to load.
    pub fn wait_for_catalog(mut self, wait: bool) -> Self {
        self.options.wait_for_catalog = wait;
        self
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> SearchService {
        let catalog = match (self.catalog, self.source) {
            (Some(catalog), _) => catalog,
            (None, Some(source)) => Arc::new(ColorCatalog::from_source(source)),
            (None, None) => Arc::new(ColorCatalog::new(EmbeddedSource)),
        };
        SearchService::new(catalog, self.options)
    }
}
