//! Color search data model.
//!
//! - `color` - the `Rgb` vector every query and catalog record is expressed in
//! - `entry` - catalog records (`ColorEntry`) and ranked hits (`MatchResult`)

pub mod color;
pub mod entry;

// Re-export main types for convenience
pub use color::Rgb;
pub use entry::{ColorEntry, MatchResult};
