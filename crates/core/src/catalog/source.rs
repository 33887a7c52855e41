//! Where catalog entries come from.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;

use crate::error::CatalogLoadError;
use crate::model::{ColorEntry, Rgb};

/// CSS named colors shipped with the library.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/colors.json");

/// Label used in logs for the builtin catalog.
pub const BUILTIN_SOURCE_NAME: &str = "builtin";

pub type LoadResult = Result<Vec<ColorEntry>, CatalogLoadError>;

/// A provider of catalog entries.
///
/// `load` is called once per load attempt; the returned future must not
/// borrow from `self`.
pub trait CatalogSource: Send + Sync + fmt::Debug {
    /// Short human-readable description (a path, `builtin`, ...).
    fn describe(&self) -> String;

    fn load(&self) -> BoxFuture<'static, LoadResult>;
}

#[derive(Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    rgb: Rgb,
}

/// Parse a JSON catalog: an array of `{ "id"?, "name", "rgb": [r, g, b] }`.
///
/// Records without an id are identified by their hex code. Ids must be
/// unique and names non-empty.
pub fn parse_catalog(bytes: &[u8]) -> LoadResult {
    let records: Vec<CatalogRecord> = serde_json::from_slice(bytes)?;
    let entries = records
        .into_iter()
        .map(|record| match record.id {
            Some(id) => ColorEntry::new(id, record.name, record.rgb),
            None => ColorEntry::from_rgb(record.name, record.rgb),
        })
        .collect();
    validate(entries)
}

fn validate(entries: Vec<ColorEntry>) -> LoadResult {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if entry.id.is_empty() {
            return Err(CatalogLoadError::Format(format!(
                "color {:?} has an empty id",
                entry.name
            )));
        }
        if entry.name.trim().is_empty() {
            return Err(CatalogLoadError::Format(format!(
                "color {} has an empty name",
                entry.id
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(CatalogLoadError::Format(format!(
                "duplicate color id {}",
                entry.id
            )));
        }
    }
    Ok(entries)
}

/// The catalog compiled into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl CatalogSource for EmbeddedSource {
    fn describe(&self) -> String {
        BUILTIN_SOURCE_NAME.to_string()
    }

    fn load(&self) -> BoxFuture<'static, LoadResult> {
        async { parse_catalog(BUILTIN_CATALOG_JSON.as_bytes()) }.boxed()
    }
}

/// A JSON catalog file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> BoxFuture<'static, LoadResult> {
        read_catalog_file(self.path.clone()).boxed()
    }
}

async fn read_catalog_file(path: PathBuf) -> LoadResult {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|err| CatalogLoadError::Io {
            path: path.clone(),
            source: Arc::new(err),
        })?;
    // Large catalogs should not stall the async workers while parsing.
    tokio::task::spawn_blocking(move || parse_catalog(&bytes))
        .await
        .map_err(|err| CatalogLoadError::Format(format!("catalog parser task failed: {err}")))?
}

/// An in-memory list of entries.
#[derive(Debug, Clone)]
pub struct StaticSource {
    entries: Arc<[ColorEntry]>,
}

impl StaticSource {
    pub fn new(entries: impl Into<Arc<[ColorEntry]>>) -> Self {
        Self {
            entries: entries.into(),
        }
    }
}

impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        format!("static ({} colors)", self.entries.len())
    }

    fn load(&self) -> BoxFuture<'static, LoadResult> {
        let entries = self.entries.to_vec();
        async move { validate(entries) }.boxed()
    }
}
