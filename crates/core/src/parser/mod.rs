//! Color code parsing.
//!
//! Accepts the two forms a user can type into the search field:
//! a hex code (`FF0000`, `#ff0000`, `0xFF0000`) or a decimal triplet
//! (`255 0 0`, `255, 0, 0`).

pub mod code;

pub use code::{ColorCode, parse};
