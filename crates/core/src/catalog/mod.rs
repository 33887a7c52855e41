//! The reference color catalog.
//!
//! A catalog moves through `Uninitialized -> Loading -> Ready`, or
//! `Loading -> Failed` when its source cannot be read. Every caller that
//! arrives while a load is in flight awaits the same shared future, so a
//! source is loaded at most once per attempt. A failed catalog can be
//! loaded again by calling [`ColorCatalog::initialize`].

pub mod source;

pub use source::{
    BUILTIN_CATALOG_JSON, CatalogSource, EmbeddedSource, JsonFileSource, StaticSource,
    parse_catalog,
};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::error::CatalogLoadError;
use crate::model::ColorEntry;

type LoadOutcome = Result<Arc<[ColorEntry]>, CatalogLoadError>;
type LoadFuture = Shared<BoxFuture<'static, LoadOutcome>>;

/// Observable phase of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

enum Phase {
    Uninitialized,
    Loading { attempt: u64, future: LoadFuture },
    Ready(Arc<[ColorEntry]>),
    Failed(CatalogLoadError),
}

impl Phase {
    const fn readiness(&self) -> Readiness {
        match self {
            Self::Uninitialized => Readiness::Uninitialized,
            Self::Loading { .. } => Readiness::Loading,
            Self::Ready(_) => Readiness::Ready,
            Self::Failed(_) => Readiness::Failed,
        }
    }
}

async fn load_entries(
    load: BoxFuture<'static, source::LoadResult>,
    description: String,
    attempt: u64,
) -> LoadOutcome {
    let started = Instant::now();
    let entries: Arc<[ColorEntry]> = load.await?.into();
    tracing::info!(
        source = %description,
        attempt,
        colors = entries.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "color catalog ready"
    );
    Ok(entries)
}

enum Acquired {
    Ready(Arc<[ColorEntry]>),
    Wait { attempt: u64, future: LoadFuture },
}

/// A lazily loaded, immutable set of named colors.
pub struct ColorCatalog {
    source: Arc<dyn CatalogSource>,
    phase: Mutex<Phase>,
    attempts: AtomicU64,
}

impl fmt::Debug for ColorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorCatalog")
            .field("source", &self.source)
            .field("state", &self.state())
            .field("attempts", &self.load_attempts())
            .finish()
    }
}

impl Default for ColorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColorCatalog {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self::from_source(Arc::new(source))
    }

    pub fn from_source(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            phase: Mutex::new(Phase::Uninitialized),
            attempts: AtomicU64::new(0),
        }
    }

    /// Catalog backed by the bundled CSS color names.
    pub fn builtin() -> Self {
        Self::new(EmbeddedSource)
    }

    fn phase(&self) -> MutexGuard<'_, Phase> {
        // The lock is never held across an await or a panic-prone call.
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }

    pub fn state(&self) -> Readiness {
        self.phase().readiness()
    }

    /// Number of times the source has been asked to load.
    pub fn load_attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// The entries, if loading has finished successfully.
    pub fn entries(&self) -> Option<Arc<[ColorEntry]>> {
        match &*self.phase() {
            Phase::Ready(entries) => Some(Arc::clone(entries)),
            _ => None,
        }
    }

    /// The error from the most recent attempt, if it failed.
    pub fn last_error(&self) -> Option<CatalogLoadError> {
        match &*self.phase() {
            Phase::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    /// Return a failed catalog to `Uninitialized`.
    ///
    /// Returns `false` (and changes nothing) in any other state.
    pub fn reset(&self) -> bool {
        let mut phase = self.phase();
        if matches!(*phase, Phase::Failed(_)) {
            *phase = Phase::Uninitialized;
            tracing::debug!(source = %self.source.describe(), "color catalog reset");
            true
        } else {
            false
        }
    }

    /// Load the catalog if it is not loaded yet.
    ///
    /// Returns immediately once ready. Concurrent callers share one load and
    /// all observe its outcome. Calling this on a failed catalog starts a
    /// new attempt.
    pub async fn initialize(&self) -> Result<(), CatalogLoadError> {
        self.ready_entries().await.map(|_| ())
    }

    /// Wait until the catalog is ready and return its entries.
    pub async fn ready_entries(&self) -> LoadOutcome {
        let (attempt, future) = match self.acquire() {
            Acquired::Ready(entries) => return Ok(entries),
            Acquired::Wait { attempt, future } => (attempt, future),
        };
        let outcome = future.await;
        self.settle(attempt, &outcome);
        outcome
    }

    fn acquire(&self) -> Acquired {
        let mut phase = self.phase();
        match &*phase {
            Phase::Ready(entries) => Acquired::Ready(Arc::clone(entries)),
            Phase::Loading { attempt, future } => Acquired::Wait {
                attempt: *attempt,
                future: future.clone(),
            },
            Phase::Uninitialized | Phase::Failed(_) => {
                let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                let future = self.start_load(attempt);
                *phase = Phase::Loading {
                    attempt,
                    future: future.clone(),
                };
                Acquired::Wait { attempt, future }
            }
        }
    }

    fn start_load(&self, attempt: u64) -> LoadFuture {
        let description = self.source.describe();
        tracing::debug!(source = %description, attempt, "loading color catalog");
        load_entries(self.source.load(), description, attempt)
            .boxed()
            .shared()
    }

    fn settle(&self, attempt: u64, outcome: &LoadOutcome) {
        let mut phase = self.phase();
        // Only the attempt that is still current may move the state on; a
        // late waiter from an older attempt must not clobber a newer one.
        let current = matches!(*phase, Phase::Loading { attempt: a, .. } if a == attempt);
        if !current {
            return;
        }
        *phase = match outcome {
            Ok(entries) => Phase::Ready(Arc::clone(entries)),
            Err(err) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    attempt,
                    error = %err,
                    "color catalog failed to load"
                );
                Phase::Failed(err.clone())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rgb;

    fn red_pink() -> Vec<ColorEntry> {
        vec![
            ColorEntry::new("#FF0000", "Red", Rgb::new(255, 0, 0)),
            ColorEntry::new("#FFC0CB", "Pink", Rgb::new(255, 192, 203)),
        ]
    }

    #[tokio::test]
    async fn initialize_loads_once() {
        let catalog = ColorCatalog::new(StaticSource::new(red_pink()));
        assert_eq!(catalog.state(), Readiness::Uninitialized);
        assert!(catalog.entries().is_none());

        catalog.initialize().await.unwrap();
        catalog.initialize().await.unwrap();

        assert_eq!(catalog.state(), Readiness::Ready);
        assert_eq!(catalog.load_attempts(), 1);
        let entries = catalog.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Pink");
    }

    #[tokio::test]
    async fn missing_file_fails_and_reset_clears() {
        let catalog = ColorCatalog::new(JsonFileSource::new("/nonexistent/huefind/colors.json"));
        let err = catalog.initialize().await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
        assert_eq!(catalog.state(), Readiness::Failed);
        assert!(catalog.last_error().is_some());
        assert!(catalog.entries().is_none());

        assert!(catalog.reset());
        assert_eq!(catalog.state(), Readiness::Uninitialized);
        assert!(!catalog.reset());
    }

    #[tokio::test]
    async fn builtin_catalog_is_default() {
        let catalog = ColorCatalog::default();
        catalog.initialize().await.unwrap();
        assert!(catalog.entries().unwrap().len() > 100);
        assert_eq!(catalog.source().describe(), "builtin");
    }
}
