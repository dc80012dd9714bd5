//! numerics::interpolate — piecewise-linear interpolation on a monotone grid.
//!
//! Purpose
//! -------
//! Evaluate the piecewise-linear curve through `(x_ref, y_ref)` at arbitrary
//! query abscissas, with an explicit policy for queries below and above the
//! reference range. This is the lookup kernel behind cumulative-flow
//! evaluation, its inversion, and interval averaging.
//!
//! Key behaviors
//! -------------
//! - Binary search for the left insertion position of each query, clamped
//!   into `[1, len - 1]` so every query maps onto a valid segment.
//! - Linear blend `y = y0 + (x - x0) / (x1 - x0) * (y1 - y0)` on that segment.
//! - [`Boundary`] chosen independently for the left and right side:
//!   `Clamp` repeats the edge ordinate, `Fill(v)` substitutes `v` (usually NaN).
//! - Queries of any dimension: the output has the shape of `x_query`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x_ref` has at least 2 points, is non-decreasing and NaN-free; checked
//!   by [`validate_reference`] before any evaluation.
//! - A query equal to a reference abscissa returns the matching ordinate
//!   exactly (no rounding through the blend formula).
//! - A NaN query yields NaN regardless of the boundary policy.
//!
//! Conventions
//! -----------
//! - Pure functions; no allocation other than the output array.
//!
//! Testing notes
//! -------------
//! - Unit tests cover node reproduction, interior blending, both boundary
//!   policies on both sides, plateaus in `x_ref`, NaN queries, and shape
//!   preservation for 2-D queries.

use crate::numerics::{errors::NumericsResult, validation::validate_reference};
use ndarray::{Array, ArrayView, ArrayView1, Dimension};

/// Behavior for queries outside `[x_ref[0], x_ref[len - 1]]`.
///
/// Variants
/// --------
/// - `Clamp`: return the first (left side) or last (right side) ordinate.
/// - `Fill(value)`: return `value` for every out-of-range query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Boundary {
    #[default]
    Clamp,
    Fill(f64),
}

impl Boundary {
    /// Substitute NaN outside the reference range.
    pub const NAN: Boundary = Boundary::Fill(f64::NAN);

    fn resolve(self, edge_value: f64) -> f64 {
        match self {
            Boundary::Clamp => edge_value,
            Boundary::Fill(value) => value,
        }
    }
}

/// Interpolate the curve `(x_ref, y_ref)` at every element of `x_query`.
///
/// Parameters
/// ----------
/// - `x_ref`: `ArrayView1<f64>`
///   Reference abscissas; non-decreasing, NaN-free, length ≥ 2.
/// - `y_ref`: `ArrayView1<f64>`
///   Reference ordinates; same length as `x_ref`.
/// - `x_query`: `ArrayView<f64, D>`
///   Query abscissas of any shape.
/// - `left`, `right`: [`Boundary`]
///   Policies for queries below / above the reference range.
///
/// Returns
/// -------
/// `NumericsResult<Array<f64, D>>`
///   Interpolated values with the shape of `x_query`.
///
/// Errors
/// ------
/// - `NumericsError::MismatchedLengths`, `NumericsError::TooFewPoints`, or
///   `NumericsError::NotAscending` from [`validate_reference`].
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_gwtransport::numerics::interpolate::{interpolate, Boundary};
/// let x = array![0.0, 1.0, 2.0];
/// let y = array![0.0, 10.0, 30.0];
/// let q = array![0.5, 1.5, 3.0];
/// let out = interpolate(x.view(), y.view(), q.view(), Boundary::Clamp, Boundary::NAN).unwrap();
/// assert_eq!(out[0], 5.0);
/// assert_eq!(out[1], 20.0);
/// assert!(out[2].is_nan());
/// ```
pub fn interpolate<D: Dimension>(
    x_ref: ArrayView1<f64>, y_ref: ArrayView1<f64>, x_query: ArrayView<f64, D>, left: Boundary,
    right: Boundary,
) -> NumericsResult<Array<f64, D>> {
    validate_reference(x_ref, y_ref)?;
    Ok(x_query.mapv(|x| interpolate_unchecked(x_ref, y_ref, x, left, right)))
}

/// Interpolate the curve `(x_ref, y_ref)` at a single abscissa.
///
/// Same contract and errors as [`interpolate`].
pub fn interpolate_scalar(
    x_ref: ArrayView1<f64>, y_ref: ArrayView1<f64>, x: f64, left: Boundary, right: Boundary,
) -> NumericsResult<f64> {
    validate_reference(x_ref, y_ref)?;
    Ok(interpolate_unchecked(x_ref, y_ref, x, left, right))
}

/// Evaluate one query without re-validating the reference curve.
///
/// Callers must have run [`validate_reference`] on `(x_ref, y_ref)`.
pub(crate) fn interpolate_unchecked(
    x_ref: ArrayView1<f64>, y_ref: ArrayView1<f64>, x: f64, left: Boundary, right: Boundary,
) -> f64 {
    let last = x_ref.len() - 1;
    if x < x_ref[0] {
        return left.resolve(y_ref[0]);
    }
    if x > x_ref[last] {
        return right.resolve(y_ref[last]);
    }

    // Exact hits resolve to the first of any tied abscissas.
    let hit = insertion_index(x_ref, x);
    if hit <= last && x_ref[hit] == x {
        return y_ref[hit];
    }

    let idx = hit.clamp(1, last);
    let (x0, x1) = (x_ref[idx - 1], x_ref[idx]);
    let (y0, y1) = (y_ref[idx - 1], y_ref[idx]);
    // x0 < x < x1 here, so the width is non-zero.
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

/// First index `i` with `x_ref[i] >= x` (left insertion point).
fn insertion_index(x_ref: ArrayView1<f64>, x: f64) -> usize {
    let (mut lo, mut hi) = (0, x_ref.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if x_ref[mid] < x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
