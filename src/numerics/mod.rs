//! numerics — piecewise-linear primitives shared by the transport engine.
//!
//! Purpose
//! -------
//! Collect the generic numerical building blocks the residence-time engine
//! depends on: monotone piecewise-linear interpolation, exact interval
//! averaging of a piecewise-linear curve, and small grid utilities. None of
//! these know about flow or pore volume; they operate on plain `f64` arrays.
//!
//! Key behaviors
//! -------------
//! - [`interpolate`] evaluates a curve at arbitrary query points with an
//!   explicit [`Boundary`] policy on each side.
//! - [`average_over_bins`] integrates a curve exactly over arbitrary bins,
//!   with an [`Extrapolation`] policy for edges outside the data.
//! - [`cell_widths`], [`interp_series`], and [`elapsed_days`] handle grid
//!   bookkeeping.
//! - [`NumericsError`] / [`NumericsResult`] are the shared error surface;
//!   [`validation`] holds the guards every entry point runs first.
//!
//! Invariants & assumptions
//! ------------------------
//! - Reference abscissas and edges are non-decreasing and NaN-free;
//!   violations are errors.
//! - Queries outside the data under a fill policy, and curves with fewer
//!   than 2 valid points, produce NaN rather than errors.
//!
//! Conventions
//! -----------
//! - Stateless, allocation-only functions; safe to call from any thread.
//! - Arrays are `ndarray` views on input and owned arrays on output.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own contract; the
//!   residence-time tests exercise these primitives end to end.

pub mod average;
pub mod errors;
pub mod grid;
pub mod interpolate;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::average::{Extrapolation, average_over_bins};
pub use self::errors::{NumericsError, NumericsResult};
pub use self::grid::{Alignment, cell_widths, elapsed_days, interp_series};
pub use self::interpolate::{Boundary, interpolate, interpolate_scalar};

pub mod prelude {
    pub use super::{
        Alignment, Boundary, Extrapolation, NumericsError, NumericsResult, average_over_bins,
        cell_widths, interp_series, interpolate,
    };
}
