//! Shared catalog sources for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use huefind_core::catalog::CatalogSource;
use huefind_core::catalog::source::LoadResult;
use huefind_core::{CatalogLoadError, ColorEntry, Rgb};
use tokio::sync::Semaphore;

pub fn red_pink() -> Vec<ColorEntry> {
    vec![
        ColorEntry::new("#FF0000", "Red", Rgb::new(255, 0, 0)),
        ColorEntry::new("#FFC0CB", "Pink", Rgb::new(255, 192, 203)),
    ]
}

pub fn primaries() -> Vec<ColorEntry> {
    vec![
        ColorEntry::new("#FF0000", "Red", Rgb::new(255, 0, 0)),
        ColorEntry::new("#00FF00", "Lime", Rgb::new(0, 255, 0)),
        ColorEntry::new("#0000FF", "Blue", Rgb::new(0, 0, 255)),
    ]
}

/// A source whose loads block until [`GatedSource::open`] is called.
///
/// Can be told to fail its first N loads.
#[derive(Debug, Clone)]
pub struct GatedSource {
    entries: Vec<ColorEntry>,
    gate: Arc<Semaphore>,
    loads: Arc<AtomicUsize>,
    failures_left: Arc<AtomicUsize>,
}

impl GatedSource {
    pub fn new(entries: Vec<ColorEntry>) -> Self {
        Self {
            entries,
            gate: Arc::new(Semaphore::new(0)),
            loads: Arc::new(AtomicUsize::new(0)),
            failures_left: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source that is open from the start.
    pub fn open_with(entries: Vec<ColorEntry>) -> Self {
        let source = Self::new(entries);
        source.open();
        source
    }

    pub fn failing_first(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    pub fn open(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl CatalogSource for GatedSource {
    fn describe(&self) -> String {
        "gated".to_string()
    }

    fn load(&self) -> BoxFuture<'static, LoadResult> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        let gate = Arc::clone(&self.gate);
        let entries = self.entries.clone();
        async move {
            if gate.acquire().await.is_err() {
                return Err(CatalogLoadError::Format("gate closed".to_string()));
            }
            if fail {
                return Err(CatalogLoadError::Format("simulated failure".to_string()));
            }
            Ok(entries)
        }
        .boxed()
    }
}
