//! High-level search API.
//!
//! # Example
//!
//! ```ignore
//! use huefind_core::api::SearchService;
//!
//! let service = SearchService::builtin();
//! service.initialize().await?;
//! let matches = service.search("#FF7F50").await?;
//! ```

pub mod builder;
pub mod controller;
pub mod service;

// Re-export for convenience
pub use builder::SearchServiceBuilder;
pub use controller::{SearchController, SearchOutcome, SearchState};
pub use service::{DEFAULT_LIMIT, SearchOptions, SearchService};
