//! numerics::validation — shared input guards for the piecewise-linear primitives.
//!
//! Purpose
//! -------
//! Centralize the shape and ordering checks that interpolation, interval
//! averaging, and grid helpers perform before touching any data, so each
//! primitive reports malformed input through the same [`NumericsError`]
//! variants.
//!
//! Key behaviors
//! -------------
//! - [`validate_same_length`] checks abscissa/ordinate pairing.
//! - [`validate_ascending`] checks non-decreasing order and rejects NaN.
//! - [`validate_reference`] bundles the three checks a reference curve needs.
//! - [`validate_edges`] checks a bin-edge sequence.
//!
//! Invariants & assumptions
//! ------------------------
//! - "Ascending" means non-decreasing: ties are allowed. Cumulative-flow
//!   curves plateau whenever the flow is zero, and zero-width bins are a
//!   defined case of interval averaging.
//! - A NaN anywhere in a sequence that must be ordered is reported as an
//!   ordering violation at its index.
//!
//! Conventions
//! -----------
//! - Pure validation: no allocation beyond error construction, no I/O.
//! - Callers layer domain checks (e.g. the raise extrapolation policy) on top.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise each error branch and a success path.

use crate::numerics::errors::{NumericsError, NumericsResult};
use ndarray::ArrayView1;

/// Minimum number of points a piecewise-linear reference curve needs.
pub const MIN_REFERENCE_POINTS: usize = 2;

/// Check that two paired arrays have equal length.
///
/// Errors
/// ------
/// - `NumericsError::MismatchedLengths` when `x_len != y_len`.
pub fn validate_same_length(x_len: usize, y_len: usize) -> NumericsResult<()> {
    if x_len != y_len {
        return Err(NumericsError::MismatchedLengths { x_len, y_len });
    }
    Ok(())
}

/// Check that `values` is non-decreasing and NaN-free.
///
/// Parameters
/// ----------
/// - `name`: `&'static str`
///   Argument name used in the error message.
/// - `values`: `ArrayView1<f64>`
///   Sequence to check.
///
/// Errors
/// ------
/// - `NumericsError::NotAscending { name, index }` for the first `index`
///   where `values[index]` is NaN or smaller than `values[index - 1]`.
pub fn validate_ascending(name: &'static str, values: ArrayView1<f64>) -> NumericsResult<()> {
    for index in 0..values.len() {
        let current = values[index];
        let descends = index > 0 && current < values[index - 1];
        if current.is_nan() || descends {
            return Err(NumericsError::NotAscending { name, index });
        }
    }
    Ok(())
}

/// Check a reference curve `(x_ref, y_ref)` for interpolation.
///
/// Errors
/// ------
/// - `NumericsError::MismatchedLengths` when lengths differ.
/// - `NumericsError::TooFewPoints` when fewer than 2 points are given.
/// - `NumericsError::NotAscending` when `x_ref` is not non-decreasing.
pub fn validate_reference(x_ref: ArrayView1<f64>, y_ref: ArrayView1<f64>) -> NumericsResult<()> {
    validate_same_length(x_ref.len(), y_ref.len())?;
    if x_ref.len() < MIN_REFERENCE_POINTS {
        return Err(NumericsError::TooFewPoints { got: x_ref.len(), min: MIN_REFERENCE_POINTS });
    }
    validate_ascending("x_ref", x_ref)
}

/// Check a bin-edge sequence.
///
/// Errors
/// ------
/// - `NumericsError::TooFewEdges` when fewer than 2 edges are given.
/// - `NumericsError::NotAscending` when the edges are not non-decreasing.
pub fn validate_edges(x_edges: ArrayView1<f64>) -> NumericsResult<()> {
    if x_edges.len() < 2 {
        return Err(NumericsError::TooFewEdges { got: x_edges.len() });
    }
    validate_ascending("x_edges", x_edges)
}
