//! Direction of a residence-time lookup.
//!
//! - [`Direction::Extraction`] looks backward: how long ago did the water
//!   extracted now infiltrate.
//! - [`Direction::Infiltration`] looks forward: how long until the water
//!   infiltrating now is extracted.
//!
//! The two are mirror images: the pore-volume offset on the cumulative-flow
//! axis flips sign, and so does the day difference.

use crate::residence::errors::ResidenceError;
use std::{fmt, str::FromStr};

/// Lookup direction along the cumulative-flow curve.
///
/// Parsing
/// -------
/// Implements `FromStr` for `"extraction"` and `"infiltration"`
/// (case-insensitive); anything else returns `ResidenceError::InvalidDirection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Extraction,
    Infiltration,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Extraction => "extraction",
            Direction::Infiltration => "infiltration",
        }
    }

    /// Sign of the pore-volume offset on the cumulative-flow axis.
    pub(crate) fn volume_sign(self) -> f64 {
        match self {
            Direction::Extraction => -1.0,
            Direction::Infiltration => 1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ResidenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extraction" => Ok(Direction::Extraction),
            "infiltration" => Ok(Direction::Infiltration),
            _ => Err(ResidenceError::InvalidDirection { name: s.to_string() }),
        }
    }
}
