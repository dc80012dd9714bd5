//! numerics::grid — time coordinates, cell widths, and series re-sampling.
//!
//! Purpose
//! -------
//! Small grid utilities shared by the residence-time engine and its callers:
//! converting timestamps to an elapsed-day axis, deriving cell widths from
//! cell coordinates, and re-sampling a timestamped series onto a new index.
//!
//! Key behaviors
//! -------------
//! - [`elapsed_days`] maps `NaiveDateTime` values to `f64` days since an
//!   origin at millisecond resolution; earlier timestamps map to negative days.
//! - [`cell_widths`] returns one width per coordinate for coordinates that sit
//!   at cell centers, left edges, or right edges ([`Alignment`]).
//! - [`interp_series`] drops NaN samples and linearly interpolates the rest
//!   onto a new index, with NaN outside the retained range.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coordinates passed to [`cell_widths`] are ordered; the function does not
//!   sort them.
//! - [`interp_series`] requires an ascending source index.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each alignment on uniform and non-uniform grids, NaN
//!   filtering and out-of-range behavior of [`interp_series`], and sub-day
//!   resolution of [`elapsed_days`].

use crate::numerics::{
    errors::{NumericsError, NumericsResult},
    interpolate::{Boundary, interpolate},
    validation::{validate_ascending, validate_same_length},
};
use chrono::NaiveDateTime;
use ndarray::{Array1, ArrayView1, s};
use std::str::FromStr;

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Position of a coordinate within its cell.
///
/// Parsing
/// -------
/// Implements `FromStr` for `"centered"`, `"left"`, and `"right"`
/// (case-insensitive); anything else returns `NumericsError::InvalidAlignment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Centered,
    Left,
    Right,
}

impl FromStr for Alignment {
    type Err = NumericsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "centered" => Ok(Alignment::Centered),
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            _ => Err(NumericsError::InvalidAlignment { name: s.to_string() }),
        }
    }
}

/// Days elapsed from `origin` to each of `times`.
pub fn elapsed_days(origin: NaiveDateTime, times: &[NaiveDateTime]) -> Array1<f64> {
    times.iter().map(|&t| elapsed_day(origin, t)).collect()
}

/// Days elapsed from `origin` to `time`; negative when `time` precedes it.
pub fn elapsed_day(origin: NaiveDateTime, time: NaiveDateTime) -> f64 {
    (time - origin).num_milliseconds() as f64 / MS_PER_DAY
}

/// Widths of the cells described by the coordinates `a`.
///
/// Parameters
/// ----------
/// - `a`: `ArrayView1<f64>`
///   Ordered cell coordinates, at least 2.
/// - `alignment`: [`Alignment`]
///   - `Centered`: coordinates are cell centers; interior widths are the
///     distances between consecutive midpoints, the outer cells reuse the
///     first / last spacing.
///   - `Left`: coordinates are left edges; the last cell reuses the last spacing.
///   - `Right`: coordinates are right edges; the first cell reuses the first
///     spacing.
///
/// Returns
/// -------
/// `NumericsResult<Array1<f64>>` with `a.len()` widths.
///
/// Errors
/// ------
/// - `NumericsError::TooFewPoints` when `a.len() < 2`.
pub fn cell_widths(a: ArrayView1<f64>, alignment: Alignment) -> NumericsResult<Array1<f64>> {
    let n = a.len();
    if n < 2 {
        return Err(NumericsError::TooFewPoints { got: n, min: 2 });
    }
    let spacing = &a.slice(s![1..]) - &a.slice(s![..-1]);
    let first = spacing[0];
    let last = spacing[n - 2];

    let widths = match alignment {
        Alignment::Centered => {
            let mid = &a.slice(s![..-1]) + &(&spacing / 2.0);
            let inner = &mid.slice(s![1..]) - &mid.slice(s![..-1]);
            std::iter::once(first)
                .chain(inner.iter().copied())
                .chain(std::iter::once(last))
                .collect()
        }
        Alignment::Left => spacing.iter().copied().chain(std::iter::once(last)).collect(),
        Alignment::Right => std::iter::once(first).chain(spacing.iter().copied()).collect(),
    };
    Ok(widths)
}

/// Re-sample a timestamped series onto `new_index`.
///
/// Parameters
/// ----------
/// - `index`: `&[NaiveDateTime]`
///   Ascending timestamps of the source samples.
/// - `values`: `ArrayView1<f64>`
///   Source samples; NaN entries are dropped together with their timestamps.
/// - `new_index`: `&[NaiveDateTime]`
///   Target timestamps, any order.
///
/// Returns
/// -------
/// `NumericsResult<Array1<f64>>`
///   One value per target timestamp; NaN outside the span of retained
///   samples, and all-NaN when fewer than 2 samples are retained.
///
/// Errors
/// ------
/// - `NumericsError::MismatchedLengths` when `index` and `values` differ.
/// - `NumericsError::NotAscending` when the retained index is not ascending.
pub fn interp_series(
    index: &[NaiveDateTime], values: ArrayView1<f64>, new_index: &[NaiveDateTime],
) -> NumericsResult<Array1<f64>> {
    validate_same_length(index.len(), values.len())?;
    let (times, kept): (Vec<NaiveDateTime>, Vec<f64>) =
        index.iter().zip(values.iter()).filter(|(_, v)| !v.is_nan()).map(|(&t, &v)| (t, v)).unzip();
    if kept.len() < 2 {
        return Ok(Array1::from_elem(new_index.len(), f64::NAN));
    }

    let origin = times[0];
    let days = elapsed_days(origin, &times);
    validate_ascending("index", days.view())?;
    let query = elapsed_days(origin, new_index);
    let kept = Array1::from(kept);
    interpolate(days.view(), kept.view(), query.view(), Boundary::NAN, Boundary::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, TimeDelta};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `cell_widths` for every alignment on uniform and non-uniform grids.
    // - `interp_series` NaN filtering, out-of-range NaN, and the
    //   under-determined case.
    // - Sub-day resolution of `elapsed_day`.
    // -------------------------------------------------------------------------

    fn day(d: i64) -> NaiveDateTime {
        let origin = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        origin + TimeDelta::days(d)
    }

    #[test]
    // Purpose
    // -------
    // Uniform coordinates give uniform widths for every alignment.
    //
    // Given
    // -----
    // - a = [0, 2, 4, 6].
    //
    // Expect
    // ------
    // - Four widths of 2 for centered, left, and right alignment.
    fn cell_widths_uniform_grid_is_uniform() {
        let a = array![0.0, 2.0, 4.0, 6.0];

        for alignment in [Alignment::Centered, Alignment::Left, Alignment::Right] {
            let widths = cell_widths(a.view(), alignment).unwrap();
            assert_eq!(widths.len(), 4);
            for w in widths.iter() {
                assert_relative_eq!(*w, 2.0);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Non-uniform grids follow the documented construction.
    //
    // Given
    // -----
    // - a = [0, 1, 3, 7] (spacings 1, 2, 4; midpoints 0.5, 2, 5).
    //
    // Expect
    // ------
    // - centered = [1, 1.5, 3, 4], left = [1, 2, 4, 4], right = [1, 1, 2, 4].
    fn cell_widths_non_uniform_grid() {
        let a = array![0.0, 1.0, 3.0, 7.0];

        let centered = cell_widths(a.view(), Alignment::Centered).unwrap();
        let left = cell_widths(a.view(), Alignment::Left).unwrap();
        let right = cell_widths(a.view(), Alignment::Right).unwrap();

        assert_eq!(centered, array![1.0, 1.5, 3.0, 4.0]);
        assert_eq!(left, array![1.0, 2.0, 4.0, 4.0]);
        assert_eq!(right, array![1.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn cell_widths_rejects_single_coordinate() {
        let a = array![1.0];

        let result = cell_widths(a.view(), Alignment::Left);

        assert_eq!(result.unwrap_err(), NumericsError::TooFewPoints { got: 1, min: 2 });
    }

    #[test]
    fn alignment_rejects_unknown_name() {
        assert!(matches!(
            "middle".parse::<Alignment>(),
            Err(NumericsError::InvalidAlignment { .. })
        ));
        assert_eq!("LEFT".parse::<Alignment>(), Ok(Alignment::Left));
    }

    #[test]
    // Purpose
    // -------
    // NaN samples are skipped and queries outside the retained span are NaN.
    //
    // Given
    // -----
    // - Values [NaN, 10, NaN, 30, 40] on days 0..4.
    // - New index on days 0, 2, 3.5, 5.
    //
    // Expect
    // ------
    // - [NaN, 20, 35, NaN].
    fn interp_series_skips_nan_and_fills_outside() {
        let index: Vec<NaiveDateTime> = (0..5).map(day).collect();
        let values = array![f64::NAN, 10.0, f64::NAN, 30.0, 40.0];
        let new_index = vec![day(0), day(2), day(3) + TimeDelta::hours(12), day(5)];

        let out = interp_series(&index, values.view(), &new_index).unwrap();

        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 20.0);
        assert_relative_eq!(out[2], 35.0);
        assert!(out[3].is_nan());
    }

    #[test]
    fn interp_series_underdetermined_is_all_nan() {
        let index = vec![day(0), day(1)];
        let values = array![1.0, f64::NAN];
        let new_index = vec![day(0), day(1)];

        let out = interp_series(&index, values.view(), &new_index).unwrap();

        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn elapsed_day_resolves_sub_day_offsets() {
        let origin = day(0);

        assert_relative_eq!(elapsed_day(origin, origin + TimeDelta::hours(6)), 0.25);
        assert_relative_eq!(elapsed_day(origin, day(-2)), -2.0);
    }
}
