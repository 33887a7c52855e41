//! Catalog records and ranked matches.

use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// A named reference color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColorEntry {
    /// Unique identifier, usually the `#RRGGBB` code.
    pub id: String,
    /// Display name
    pub name: String,
    pub rgb: Rgb,
}

impl ColorEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rgb,
        }
    }

    /// Entry identified by the hex form of its color.
    pub fn from_rgb(name: impl Into<String>, rgb: Rgb) -> Self {
        Self::new(rgb.to_hex(), name, rgb)
    }
}

/// A catalog entry scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub name: String,
    pub rgb: Rgb,
    /// Euclidean RGB distance to the query; lower is closer.
    pub distance: f64,
}

impl MatchResult {
    pub(crate) fn scored(entry: &ColorEntry, distance: f64) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            rgb: entry.rgb,
            distance,
        }
    }

    /// Whether the match is the query color itself.
    pub fn is_exact(&self) -> bool {
        self.distance == 0.0
    }
}
