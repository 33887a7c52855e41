//! Error types for huefind color search.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Reasons a color code could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty color code")]
    Empty,

    #[error("expected exactly 6 hexadecimal digits, found {found}")]
    HexLength { found: usize },

    #[error("invalid hexadecimal digit at byte index {index}")]
    HexDigit { index: usize },

    #[error("expected 3 color components, found {found}")]
    ComponentCount { found: usize },

    #[error("color component {component:?} is not a number")]
    NotANumber { component: String },

    /// `value` saturates at the `i64` bounds for longer digit runs.
    #[error("color component {component} is out of range (0-255): {value}")]
    OutOfRange { component: usize, value: i64 },
}

/// Failure while loading the color catalog.
///
/// Cloneable so a single failed load can be reported to every caller that
/// was waiting on it.
#[derive(Error, Debug, Clone)]
pub enum CatalogLoadError {
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("catalog format error: {0}")]
    Format(String),
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

/// Primary error type for search operations.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid color code: {0}")]
    Parse(#[from] ParseError),

    #[error("color catalog unavailable: {0}")]
    CatalogLoad(#[from] CatalogLoadError),

    #[error("color catalog is still loading")]
    NotReady,
}

impl Error {
    /// Whether the same request could succeed later without the user
    /// changing their input.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::CatalogLoad(_) | Self::NotReady)
    }
}

/// Convenience Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
