//! huefind - nearest named color search.
//!
//! Parse a color code, rank a catalog of named colors by RGB distance, and
//! keep a search screen's state consistent under concurrent requests.

pub mod api;
pub mod catalog;
pub mod error;
pub mod model;
pub mod parser;
pub mod rank;

pub use api::{SearchController, SearchOptions, SearchService, SearchServiceBuilder};
pub use catalog::{ColorCatalog, Readiness};
pub use error::{CatalogLoadError, Error, ParseError, Result};
pub use model::{ColorEntry, MatchResult, Rgb};
pub use parser::parse;
pub use rank::{DistanceRanker, rank};
