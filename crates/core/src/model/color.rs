//! RGB color vector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A color as three 8-bit channels.
///
/// Serialized as a `[r, g, b]` array, which is also the catalog file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from 8-bit channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from wider integers, rejecting anything outside 0-255.
    ///
    /// The error names the zero-based component that failed.
    pub fn try_from_components(components: [i64; 3]) -> Result<Self, ParseError> {
        let mut channels = [0u8; 3];
        for (component, (&value, channel)) in components.iter().zip(&mut channels).enumerate() {
            *channel =
                u8::try_from(value).map_err(|_| ParseError::OutOfRange { component, value })?;
        }
        Ok(channels.into())
    }

    /// Channels as an array, in red/green/blue order.
    pub const fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Channels as a float vector, the form vector indexes store colors in.
    pub fn vector(self) -> [f32; 3] {
        self.to_array().map(f32::from)
    }

    /// Uppercase `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Sum of squared per-channel differences.
    ///
    /// Exact, so it is used for ordering; the reported distance is its
    /// square root.
    pub fn distance_squared(self, other: Self) -> u32 {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .map(|(&a, b)| {
                let d = i32::from(a) - i32::from(b);
                d.unsigned_abs() * d.unsigned_abs()
            })
            .sum()
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.distance_squared(other)).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from(value: (u8, u8, u8)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        value.to_array()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for Rgb {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}
