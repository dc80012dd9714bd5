//! Cumulative flow profile: running time-integral of the flow rate.
//!
//! Purpose
//! -------
//! Represent the curve `(elapsed day, cumulative discharged volume)` that
//! every residence-time lookup inverts. Two constructors match the two ways
//! flow arrives: point samples ([`CumulativeFlowProfile::from_series`]) and
//! edge-delimited bins ([`CumulativeFlowProfile::from_edges`]).
//!
//! Key behaviors
//! -------------
//! - Point samples: `cum[0] = 0`, `cum[i] = cum[i-1] + q[i] · (d[i] - d[i-1])`
//!   (each rate covers the interval ending at its timestamp).
//! - Edge bins: `cum[0] = 0`, `cum[i] = cum[i-1] + q[i-1] · (d[i] - d[i-1])`
//!   (each rate covers the bin starting at edge `i-1`).
//! - [`volume_at`](CumulativeFlowProfile::volume_at) and
//!   [`days_at_volume`](CumulativeFlowProfile::days_at_volume) are the forward
//!   and inverse lookups; both return NaN outside the recorded range.
//!
//! Invariants & assumptions
//! ------------------------
//! - `days` strictly increasing, starting at 0.
//! - `volume` non-decreasing for non-negative flow. Negative flow is not
//!   checked here; a decreasing curve makes the inverse lookup fail with
//!   `NumericsError::NotAscending`.
//! - Zero flow produces plateaus (tied volumes); the inverse lookup accepts
//!   ties and resolves a query on a plateau to its left end (the first day
//!   the volume is reached).
//!
//! Testing notes
//! -------------
//! - Unit tests check both accumulation rules, the edge/flow length check,
//!   the plateau behavior and NaN fill of both lookups.

use crate::{
    numerics::{
        errors::NumericsResult,
        interpolate::{Boundary, interpolate},
    },
    residence::{
        core::series::{FlowSeries, TimeEdges},
        errors::{ResidenceError, ResidenceResult},
    },
};
use ndarray::{Array, Array1, ArrayView, ArrayView1, Dimension};

/// Cumulative discharged volume as a function of elapsed days.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeFlowProfile {
    days: Array1<f64>,
    volume: Array1<f64>,
}

impl CumulativeFlowProfile {
    /// Build the profile of a point-sampled flow series.
    ///
    /// Days are measured from the first timestamp. Infallible: a validated
    /// [`FlowSeries`] always has ≥ 2 ordered, finite samples.
    pub fn from_series(flow: &FlowSeries) -> Self {
        let days = flow.elapsed_days();
        let rates = flow.flow();
        let mut volume = Array1::<f64>::zeros(days.len());
        for i in 1..days.len() {
            volume[i] = volume[i - 1] + rates[i] * (days[i] - days[i - 1]);
        }
        CumulativeFlowProfile { days, volume }
    }

    /// Build the profile of edge-delimited flow.
    ///
    /// Parameters
    /// ----------
    /// - `flow`: `ArrayView1<f64>`
    ///   One finite rate per bin.
    /// - `edges`: `&TimeEdges`
    ///   Bin boundaries; days are measured from the first edge.
    ///
    /// Errors
    /// ------
    /// - `ResidenceError::FlowEdgeMismatch` if `flow.len() != edges.len() - 1`.
    /// - `ResidenceError::NonFiniteFlow` for the first non-finite rate.
    pub fn from_edges(flow: ArrayView1<f64>, edges: &TimeEdges) -> ResidenceResult<Self> {
        if flow.len() != edges.n_bins() {
            return Err(ResidenceError::FlowEdgeMismatch {
                flow_len: flow.len(),
                edges_len: edges.len(),
            });
        }
        if let Some((index, &value)) = flow.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ResidenceError::NonFiniteFlow { index, value });
        }

        let days = edges.elapsed_days(edges.origin());
        let mut volume = Array1::<f64>::zeros(days.len());
        for i in 1..days.len() {
            volume[i] = volume[i - 1] + flow[i - 1] * (days[i] - days[i - 1]);
        }
        Ok(CumulativeFlowProfile { days, volume })
    }

    /// Elapsed-day coordinate of the profile.
    pub fn days(&self) -> ArrayView1<'_, f64> {
        self.days.view()
    }

    /// Cumulative volume at each entry of [`days`](Self::days).
    pub fn volume(&self) -> ArrayView1<'_, f64> {
        self.volume.view()
    }

    /// Cumulative volume at arbitrary elapsed days; NaN outside the record.
    pub fn volume_at<D: Dimension>(
        &self, days: ArrayView<f64, D>,
    ) -> NumericsResult<Array<f64, D>> {
        interpolate(self.days.view(), self.volume.view(), days, Boundary::NAN, Boundary::NAN)
    }

    /// Elapsed day at which the cumulative volume reaches each target.
    ///
    /// Targets below zero (not enough history) or above the total volume
    /// (not enough future) return NaN.
    ///
    /// Errors
    /// ------
    /// - `NumericsError::NotAscending` if the volume decreases anywhere
    ///   (negative flow).
    pub fn days_at_volume<D: Dimension>(
        &self, volumes: ArrayView<f64, D>,
    ) -> NumericsResult<Array<f64, D>> {
        interpolate(self.volume.view(), self.days.view(), volumes, Boundary::NAN, Boundary::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::errors::NumericsError;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The point-sample and edge-bin accumulation rules.
    // - Flow/edge length validation.
    // - Forward and inverse lookups, including NaN fill and zero-flow plateaus.
    // - Rejection of a decreasing curve on inversion.
    // -------------------------------------------------------------------------

    fn day(d: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
            + TimeDelta::days(d)
    }

    #[test]
    // Purpose
    // -------
    // Point samples weight each rate by the interval ending at its timestamp.
    //
    // Given
    // -----
    // - Days 0, 1, 3 with rates [5, 10, 20].
    //
    // Expect
    // ------
    // - Volume [0, 10, 50]; the first rate never contributes.
    fn from_series_uses_rate_at_interval_end() {
        let series =
            FlowSeries::new(vec![day(0), day(1), day(3)], array![5.0, 10.0, 20.0]).unwrap();

        let profile = CumulativeFlowProfile::from_series(&series);

        assert_eq!(profile.days(), array![0.0, 1.0, 3.0]);
        assert_eq!(profile.volume(), array![0.0, 10.0, 50.0]);
    }

    #[test]
    // Purpose
    // -------
    // Edge bins weight each rate by the bin it opens.
    //
    // Given
    // -----
    // - Edges on days 0, 1, 3 with rates [5, 10].
    //
    // Expect
    // ------
    // - Volume [0, 5, 25].
    fn from_edges_uses_rate_of_each_bin() {
        let edges = TimeEdges::new(vec![day(0), day(1), day(3)]).unwrap();

        let profile = CumulativeFlowProfile::from_edges(array![5.0, 10.0].view(), &edges).unwrap();

        assert_eq!(profile.volume(), array![0.0, 5.0, 25.0]);
    }

    #[test]
    fn from_edges_rejects_length_mismatch() {
        let edges = TimeEdges::new(vec![day(0), day(1), day(3)]).unwrap();

        let result = CumulativeFlowProfile::from_edges(array![5.0, 10.0, 1.0].view(), &edges);

        assert_eq!(
            result.unwrap_err(),
            ResidenceError::FlowEdgeMismatch { flow_len: 3, edges_len: 3 }
        );
    }

    #[test]
    fn from_edges_rejects_non_finite_rate() {
        let edges = TimeEdges::new(vec![day(0), day(1), day(3)]).unwrap();

        let result = CumulativeFlowProfile::from_edges(array![5.0, f64::INFINITY].view(), &edges);

        assert!(matches!(result, Err(ResidenceError::NonFiniteFlow { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Forward and inverse lookups agree inside the record and fill NaN
    // outside it.
    //
    // Given
    // -----
    // - Constant rate 10 over days 0..4.
    //
    // Expect
    // ------
    // - volume_at(2.5) = 25, days_at_volume(25) = 2.5.
    // - Both lookups give NaN beyond either end.
    fn lookups_invert_each_other_and_fill_nan() {
        let edges = TimeEdges::new((0..5).map(day).collect()).unwrap();
        let flow = array![10.0, 10.0, 10.0, 10.0];
        let profile = CumulativeFlowProfile::from_edges(flow.view(), &edges).unwrap();

        let volumes = profile.volume_at(array![2.5, -1.0, 5.0].view()).unwrap();
        let days = profile.days_at_volume(array![25.0, -1.0, 41.0].view()).unwrap();

        assert_relative_eq!(volumes[0], 25.0);
        assert_relative_eq!(days[0], 2.5);
        assert!(volumes[1].is_nan() && volumes[2].is_nan());
        assert!(days[1].is_nan() && days[2].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // A zero-flow plateau does not break the inverse lookup.
    //
    // Given
    // -----
    // - Rates [10, 0, 10] on daily bins, so volume [0, 10, 10, 20].
    //
    // Expect
    // ------
    // - Volume 10 resolves to day 1 (first day the volume is reached).
    // - Volume 15 resolves to day 2.5.
    fn days_at_volume_handles_zero_flow_plateau() {
        let edges = TimeEdges::new((0..4).map(day).collect()).unwrap();
        let profile =
            CumulativeFlowProfile::from_edges(array![10.0, 0.0, 10.0].view(), &edges).unwrap();

        let days = profile.days_at_volume(array![10.0, 15.0].view()).unwrap();

        assert_relative_eq!(days[0], 1.0);
        assert_relative_eq!(days[1], 2.5);
    }

    #[test]
    // Purpose
    // -------
    // A zero-flow period at the start of the record resolves to its left end,
    // matching the interior plateau rule.
    //
    // Given
    // -----
    // - Rates [0, 0, 10, 10] on daily bins, so volume [0, 0, 0, 10, 20].
    //
    // Expect
    // ------
    // - Volume 0 resolves to day 0; volume 5 resolves to day 2.5.
    fn days_at_volume_resolves_leading_plateau_to_start() {
        let edges = TimeEdges::new((0..5).map(day).collect()).unwrap();
        let profile =
            CumulativeFlowProfile::from_edges(array![0.0, 0.0, 10.0, 10.0].view(), &edges).unwrap();

        let days = profile.days_at_volume(array![0.0, 5.0].view()).unwrap();

        assert_eq!(profile.volume(), array![0.0, 0.0, 0.0, 10.0, 20.0]);
        assert_eq!(days[0], 0.0);
        assert_relative_eq!(days[1], 2.5);
    }

    #[test]
    fn days_at_volume_rejects_decreasing_curve() {
        let edges = TimeEdges::new((0..3).map(day).collect()).unwrap();
        let profile = CumulativeFlowProfile::from_edges(array![10.0, -5.0].view(), &edges).unwrap();

        let result = profile.days_at_volume(array![1.0].view());

        assert!(matches!(result, Err(NumericsError::NotAscending { .. })));
    }
}
