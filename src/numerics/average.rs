//! numerics::average — exact bin averages of a piecewise-linear curve.
//!
//! Purpose
//! -------
//! Average the piecewise-linear curve through `(x_data, y_data)` over
//! arbitrary, possibly misaligned bins `[x_edges[i], x_edges[i + 1])`. The
//! average is the exact trapezoidal integral over the bin divided by its
//! width, so bin averages are additive: splitting a bin and width-weighting
//! the parts recovers the average of the whole.
//!
//! Key behaviors
//! -------------
//! - Pairs with NaN in either coordinate are dropped before processing.
//! - With fewer than 2 valid pairs the result is all-NaN (no information),
//!   not an error.
//! - [`Extrapolation`] governs edges outside the data range: clip them
//!   (`Outer`), report the affected bins as NaN (`Nan`), or fail (`Raise`).
//! - Data abscissas and edges are merged into one sorted, de-duplicated grid;
//!   trapezoid integrals over that grid are prefix-summed so every bin
//!   integral is a difference of two prefix sums.
//! - Zero-width bins return the curve value at the coincident point.
//!
//! Invariants & assumptions
//! ------------------------
//! - After NaN filtering, `x_data` is non-decreasing; `x_edges` is
//!   non-decreasing with at least 2 entries. Violations fail before any
//!   computation.
//! - Output length is always `x_edges.len() - 1`, with bin positions
//!   preserved under every policy.
//!
//! Conventions
//! -----------
//! - Under `Outer`, a bin whose edges both clip to the same data boundary
//!   collapses to zero width and returns the boundary value.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the reference triangle example, additivity across an
//!   interior split, NaN robustness, the under-determined case, all three
//!   policies, zero-width bins, and validation failures.

use crate::numerics::{
    errors::{NumericsError, NumericsResult},
    interpolate::{Boundary, interpolate_unchecked},
    validation::{validate_ascending, validate_edges, validate_same_length},
};
use ndarray::{Array1, ArrayView1};
use std::str::FromStr;

/// Policy for bin edges outside the data range.
///
/// Variants
/// --------
/// - `Outer`: clip each edge into `[min(x_data), max(x_data)]`.
/// - `Nan`: bins whose edges are not both inside the range are NaN.
/// - `Raise`: any edge outside the range is an error.
///
/// Parsing
/// -------
/// Implements `FromStr` for the case-insensitive names `"outer"`, `"nan"`,
/// and `"raise"`; anything else returns `NumericsError::InvalidExtrapolation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    Outer,
    #[default]
    Nan,
    Raise,
}

impl FromStr for Extrapolation {
    type Err = NumericsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outer" => Ok(Extrapolation::Outer),
            "nan" => Ok(Extrapolation::Nan),
            "raise" => Ok(Extrapolation::Raise),
            _ => Err(NumericsError::InvalidExtrapolation { name: s.to_string() }),
        }
    }
}

/// Average the piecewise-linear curve `(x_data, y_data)` over each bin.
///
/// Parameters
/// ----------
/// - `x_data`: `ArrayView1<f64>`
///   Curve abscissas; non-decreasing once NaN pairs are removed.
/// - `y_data`: `ArrayView1<f64>`
///   Curve ordinates; same length as `x_data`.
/// - `x_edges`: `ArrayView1<f64>`
///   Bin edges; non-decreasing, at least 2.
/// - `extrapolation`: [`Extrapolation`]
///   Treatment of edges outside the data range.
///
/// Returns
/// -------
/// `NumericsResult<Array1<f64>>`
///   One average per bin, length `x_edges.len() - 1`.
///
/// Errors
/// ------
/// - `NumericsError::MismatchedLengths` when `x_data` and `y_data` differ.
/// - `NumericsError::TooFewEdges` when fewer than 2 edges are given.
/// - `NumericsError::NotAscending` for unordered edges or (filtered) data.
/// - `NumericsError::OutOfDomain` under `Extrapolation::Raise`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_gwtransport::numerics::average::{average_over_bins, Extrapolation};
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let y = array![0.0, 1.0, 1.0, 0.0];
/// let edges = array![0.0, 1.5, 3.0];
/// let avg = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan).unwrap();
/// assert!((avg[0] - 2.0 / 3.0).abs() < 1e-12);
/// assert!((avg[1] - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn average_over_bins(
    x_data: ArrayView1<f64>, y_data: ArrayView1<f64>, x_edges: ArrayView1<f64>,
    extrapolation: Extrapolation,
) -> NumericsResult<Array1<f64>> {
    validate_same_length(x_data.len(), y_data.len())?;
    validate_edges(x_edges)?;
    let n_bins = x_edges.len() - 1;

    let (xs, ys): (Vec<f64>, Vec<f64>) = x_data
        .iter()
        .zip(y_data.iter())
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(&x, &y)| (x, y))
        .unzip();
    if xs.len() < 2 {
        return Ok(Array1::from_elem(n_bins, f64::NAN));
    }
    let xs = Array1::from(xs);
    let ys = Array1::from(ys);
    validate_ascending("x_data", xs.view())?;

    let (lo, hi) = (xs[0], xs[xs.len() - 1]);
    let in_range = |edge: f64| edge >= lo && edge <= hi;

    let working: Vec<f64> = match extrapolation {
        Extrapolation::Outer => x_edges.iter().map(|&e| e.clamp(lo, hi)).collect(),
        Extrapolation::Nan => x_edges.iter().copied().filter(|&e| in_range(e)).collect(),
        Extrapolation::Raise => {
            if let Some(&value) = x_edges.iter().find(|&&e| !in_range(e)) {
                return Err(NumericsError::OutOfDomain { value, min: lo, max: hi });
            }
            x_edges.to_vec()
        }
    };

    let averages = integrate_bins(xs.view(), ys.view(), &working);

    if extrapolation != Extrapolation::Nan || working.len() == x_edges.len() {
        return Ok(Array1::from(averages));
    }

    // In-range edges form one contiguous run of the sorted edges, so the k-th
    // fully-covered bin maps onto the k-th working bin.
    let mut out = Array1::from_elem(n_bins, f64::NAN);
    let mut computed = averages.into_iter();
    for i in 0..n_bins {
        if in_range(x_edges[i]) && in_range(x_edges[i + 1]) {
            if let Some(value) = computed.next() {
                out[i] = value;
            }
        }
    }
    Ok(out)
}

/// Bin averages over `edges`, all of which lie inside the data range.
///
/// `xs` is NaN-free and non-decreasing with at least 2 points.
fn integrate_bins(xs: ArrayView1<f64>, ys: ArrayView1<f64>, edges: &[f64]) -> Vec<f64> {
    if edges.len() < 2 {
        return Vec::new();
    }

    let mut grid: Vec<f64> = xs.iter().copied().chain(edges.iter().copied()).collect();
    grid.sort_by(f64::total_cmp);
    grid.dedup();

    let values: Vec<f64> = grid
        .iter()
        .map(|&x| interpolate_unchecked(xs, ys, x, Boundary::NAN, Boundary::NAN))
        .collect();

    let mut prefix = Vec::with_capacity(grid.len());
    prefix.push(0.0);
    for k in 1..grid.len() {
        let segment = (grid[k] - grid[k - 1]) * (values[k] + values[k - 1]) / 2.0;
        prefix.push(prefix[k - 1] + segment);
    }

    let positions: Vec<usize> = edges.iter().map(|&e| grid.partition_point(|&g| g < e)).collect();

    edges
        .windows(2)
        .zip(positions.windows(2))
        .map(|(edge, pos)| {
            let width = edge[1] - edge[0];
            if width == 0.0 { values[pos[0]] } else { (prefix[pos[1]] - prefix[pos[0]]) / width }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The triangle reference example and additivity across a split.
    // - NaN filtering and the all-NaN under-determined result.
    // - `Outer`, `Nan`, and `Raise` extrapolation, including collapsed bins.
    // - Zero-width bins and validation failures.
    // - Parsing of `Extrapolation` names.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the reference triangle example.
    //
    // Given
    // -----
    // - Curve (0,0) (1,1) (2,1) (3,0); edges [0, 1.5, 3].
    //
    // Expect
    // ------
    // - Both bins average 2/3.
    fn average_over_bins_matches_triangle_example() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![0.0, 1.0, 1.0, 0.0];
        let edges = array![0.0, 1.5, 3.0];

        let avg = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan).unwrap();

        assert_abs_diff_eq!(avg[0], 0.667, epsilon = 1e-3);
        assert_abs_diff_eq!(avg[1], 0.667, epsilon = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Bin integrals are additive across an interior split point.
    //
    // Given
    // -----
    // - An irregular curve and edges [a, b, c] vs [a, c] with b not on a
    //   data abscissa.
    //
    // Expect
    // ------
    // - avg[a,b]·(b−a) + avg[b,c]·(c−b) == avg[a,c]·(c−a).
    fn average_over_bins_is_additive_across_split() {
        let x = array![0.0, 0.4, 1.3, 2.2, 3.9, 5.0];
        let y = array![1.0, -2.0, 0.5, 4.0, 3.5, -1.0];
        let (a, b, c) = (0.2, 2.7, 4.6);

        let split =
            average_over_bins(x.view(), y.view(), array![a, b, c].view(), Extrapolation::Nan)
                .unwrap();
        let whole =
            average_over_bins(x.view(), y.view(), array![a, c].view(), Extrapolation::Nan).unwrap();

        assert_relative_eq!(
            split[0] * (b - a) + split[1] * (c - b),
            whole[0] * (c - a),
            epsilon = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // A NaN ordinate at an interior data point is filtered, not propagated.
    //
    // Given
    // -----
    // - A straight line y = 2x with an extra point (1.5, NaN) inserted.
    //
    // Expect
    // ------
    // - Averages equal those of the clean curve.
    fn average_over_bins_ignores_nan_pairs() {
        let x_clean = array![0.0, 1.0, 2.0, 3.0];
        let y_clean = array![0.0, 2.0, 4.0, 6.0];
        let x_dirty = array![0.0, 1.0, 1.5, 2.0, 3.0];
        let y_dirty = array![0.0, 2.0, f64::NAN, 4.0, 6.0];
        let edges = array![0.0, 1.0, 2.5, 3.0];

        let clean =
            average_over_bins(x_clean.view(), y_clean.view(), edges.view(), Extrapolation::Nan)
                .unwrap();
        let dirty =
            average_over_bins(x_dirty.view(), y_dirty.view(), edges.view(), Extrapolation::Nan)
                .unwrap();

        for i in 0..clean.len() {
            assert_relative_eq!(clean[i], dirty[i], epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Fewer than 2 valid points yields an all-NaN result of the right length.
    //
    // Given
    // -----
    // - Three data points, two of which carry NaN; four edges.
    //
    // Expect
    // ------
    // - Three NaN bins.
    fn average_over_bins_returns_nan_when_underdetermined() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![f64::NAN, 1.0, f64::NAN];
        let edges = array![0.0, 0.5, 1.0, 2.0];

        let avg =
            average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Raise).unwrap();

        assert_eq!(avg.len(), 3);
        assert!(avg.iter().all(|v| v.is_nan()));
    }

    #[test]
    // Purpose
    // -------
    // `Raise` computes every bin when all edges lie inside the data range.
    //
    // Given
    // -----
    // - Triangle-like curve x = [0, 1, 2, 3], y = [0, 1, 1, 0].
    // - Edges [0.5, 1.5, 3], all in range.
    //
    // Expect
    // ------
    // - [0.875, 2/3] with no error.
    fn average_over_bins_raise_succeeds_when_edges_in_range() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![0.0, 1.0, 1.0, 0.0];
        let edges = array![0.5, 1.5, 3.0];

        let avg =
            average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Raise).unwrap();

        assert_relative_eq!(avg[0], 0.875, epsilon = 1e-12);
        assert_relative_eq!(avg[1], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Under `Nan`, only bins with both edges in range are computed, and
    // positions are preserved.
    //
    // Given
    // -----
    // - Constant curve y = 3 on [1, 4]; edges [0, 2, 3, 5].
    //
    // Expect
    // ------
    // - [NaN, 3, NaN].
    fn average_over_bins_nan_policy_marks_partial_bins() {
        let x = array![1.0, 4.0];
        let y = array![3.0, 3.0];
        let edges = array![0.0, 2.0, 3.0, 5.0];

        let avg = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan).unwrap();

        assert!(avg[0].is_nan());
        assert_relative_eq!(avg[1], 3.0);
        assert!(avg[2].is_nan());
    }

    #[test]
    fn average_over_bins_nan_policy_all_edges_outside() {
        let x = array![1.0, 2.0];
        let y = array![3.0, 3.0];
        let edges = array![5.0, 6.0, 7.0];

        let avg = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan).unwrap();

        assert_eq!(avg.len(), 2);
        assert!(avg.iter().all(|v| v.is_nan()));
    }

    #[test]
    // Purpose
    // -------
    // Under `Outer`, edges are clipped into the data range; a bin lying
    // fully beyond the range collapses to the boundary value.
    //
    // Given
    // -----
    // - Line y = x on [0, 2]; edges [-1, 1, 3, 4].
    //
    // Expect
    // ------
    // - Bin 0 covers [0, 1] → 0.5; bin 1 covers [1, 2] → 1.5;
    //   bin 2 collapses to x = 2 → 2.
    fn average_over_bins_outer_policy_clips_edges() {
        let x = array![0.0, 2.0];
        let y = array![0.0, 2.0];
        let edges = array![-1.0, 1.0, 3.0, 4.0];

        let avg =
            average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Outer).unwrap();

        assert_relative_eq!(avg[0], 0.5);
        assert_relative_eq!(avg[1], 1.5);
        assert_relative_eq!(avg[2], 2.0);
    }

    #[test]
    fn average_over_bins_raise_policy_rejects_outside_edge() {
        let x = array![0.0, 2.0];
        let y = array![0.0, 2.0];
        let edges = array![0.0, 1.0, 2.5];

        let result = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Raise);

        assert_eq!(
            result.unwrap_err(),
            NumericsError::OutOfDomain { value: 2.5, min: 0.0, max: 2.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // A zero-width bin returns the curve value at that point.
    //
    // Given
    // -----
    // - Line y = 10x on [0, 1]; edges [0, 0.25, 0.25, 1].
    //
    // Expect
    // ------
    // - The middle bin equals 2.5.
    fn average_over_bins_zero_width_bin_returns_point_value() {
        let x = array![0.0, 1.0];
        let y = array![0.0, 10.0];
        let edges = array![0.0, 0.25, 0.25, 1.0];

        let avg = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan).unwrap();

        assert_relative_eq!(avg[0], 1.25);
        assert_relative_eq!(avg[1], 2.5);
        assert_relative_eq!(avg[2], 6.25);
    }

    #[test]
    fn average_over_bins_rejects_mismatched_lengths() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0];
        let edges = array![0.0, 1.0];

        let result = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan);

        assert_eq!(result.unwrap_err(), NumericsError::MismatchedLengths { x_len: 3, y_len: 2 });
    }

    #[test]
    fn average_over_bins_rejects_descending_edges() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0, 2.0];
        let edges = array![0.0, 1.5, 1.0];

        let result = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan);

        assert_eq!(result.unwrap_err(), NumericsError::NotAscending { name: "x_edges", index: 2 });
    }

    #[test]
    fn average_over_bins_rejects_single_edge() {
        let x = array![0.0, 1.0];
        let y = array![0.0, 1.0];
        let edges = array![0.5];

        let result = average_over_bins(x.view(), y.view(), edges.view(), Extrapolation::Nan);

        assert_eq!(result.unwrap_err(), NumericsError::TooFewEdges { got: 1 });
    }

    #[test]
    fn extrapolation_parses_case_insensitively() {
        assert_eq!("OUTER".parse::<Extrapolation>(), Ok(Extrapolation::Outer));
        assert_eq!("nan".parse::<Extrapolation>(), Ok(Extrapolation::Nan));
        assert_eq!("Raise".parse::<Extrapolation>(), Ok(Extrapolation::Raise));
        assert!(matches!(
            "linear".parse::<Extrapolation>(),
            Err(NumericsError::InvalidExtrapolation { .. })
        ));
    }
}
