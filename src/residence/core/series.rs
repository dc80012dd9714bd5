//! Flow series and time-edge containers for the residence-time engine.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the two time-indexed inputs of
//! the engine: a point-sampled [`FlowSeries`] and an edge sequence
//! [`TimeEdges`] delimiting bins. Validation happens once at construction so
//! downstream code can rely on ordering and finiteness.
//!
//! Key behaviors
//! -------------
//! - [`FlowSeries::new`] enforces matching lengths, at least 2 samples,
//!   strictly increasing timestamps, and finite flow rates.
//! - [`TimeEdges::new`] enforces at least 2 strictly increasing edges.
//! - Both map their timestamps onto an elapsed-day axis through
//!   [`elapsed_days`](crate::numerics::grid::elapsed_days).
//!
//! Invariants & assumptions
//! ------------------------
//! - A flow rate is attributed to the interval ending at its timestamp.
//! - Flow rates may be negative; the physical model assumes they are not,
//!   and a decreasing cumulative curve is rejected later by the interpolator.
//! - Containers are immutable after construction; accessors hand out views.
//!
//! Conventions
//! -----------
//! - Timestamps are timezone-naive `chrono::NaiveDateTime` values.
//! - Elapsed days are measured from the first timestamp unless an explicit
//!   origin is passed.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and every rejection branch of both
//!   constructors, plus elapsed-day conversion against a foreign origin.

use crate::{
    numerics::grid::elapsed_days,
    residence::errors::{ResidenceError, ResidenceResult},
};
use chrono::NaiveDateTime;
use ndarray::{Array1, ArrayView1};

/// `FlowSeries` — validated point samples of a volumetric flow rate.
///
/// Fields
/// ------
/// - `times`: `Vec<NaiveDateTime>`
///   Strictly increasing sample timestamps.
/// - `flow`: `Array1<f64>`
///   Finite flow rate per timestamp [volume / day].
///
/// Invariants
/// ----------
/// - `times.len() == flow.len() >= 2`.
/// - `times` strictly increasing; `flow` finite.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSeries {
    times: Vec<NaiveDateTime>,
    flow: Array1<f64>,
}

impl FlowSeries {
    /// Construct a validated [`FlowSeries`].
    ///
    /// Errors
    /// ------
    /// - `ResidenceError::MismatchedSeries` when lengths differ.
    /// - `ResidenceError::InsufficientData` for fewer than 2 samples.
    /// - `ResidenceError::NonIncreasingTimes` for a repeated or earlier timestamp.
    /// - `ResidenceError::NonFiniteFlow` for NaN/±inf flow, reporting the
    ///   first offending index.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use chrono::{NaiveDate, TimeDelta};
    /// # use ndarray::array;
    /// # use rust_gwtransport::residence::core::series::FlowSeries;
    /// let t0 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let times = (0..3).map(|d| t0 + TimeDelta::days(d)).collect();
    /// let flow = FlowSeries::new(times, array![100.0, 120.0, 80.0]).unwrap();
    /// assert_eq!(flow.len(), 3);
    /// ```
    pub fn new(times: Vec<NaiveDateTime>, flow: Array1<f64>) -> ResidenceResult<Self> {
        if times.len() != flow.len() {
            return Err(ResidenceError::MismatchedSeries { times: times.len(), values: flow.len() });
        }
        if times.len() < 2 {
            return Err(ResidenceError::InsufficientData { got: times.len() });
        }
        validate_strictly_increasing("flow index", &times)?;
        for (index, &value) in flow.iter().enumerate() {
            if !value.is_finite() {
                return Err(ResidenceError::NonFiniteFlow { index, value });
            }
        }
        Ok(FlowSeries { times, flow })
    }

    /// Sample timestamps.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Flow rates, one per timestamp.
    pub fn flow(&self) -> ArrayView1<'_, f64> {
        self.flow.view()
    }

    /// First timestamp; the origin of the elapsed-day axis.
    pub fn origin(&self) -> NaiveDateTime {
        self.times[0]
    }

    /// Number of samples (always ≥ 2).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false` for a validated series.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Elapsed days of every sample since [`origin`](Self::origin).
    pub fn elapsed_days(&self) -> Array1<f64> {
        elapsed_days(self.origin(), &self.times)
    }
}

/// `TimeEdges` — strictly increasing bin boundaries.
///
/// Used both for edge-delimited flow (`flow_tedges`) and for output
/// averaging bins (`tedges_out`). `n` edges delimit `n - 1` bins.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEdges {
    edges: Vec<NaiveDateTime>,
}

impl TimeEdges {
    /// Construct validated [`TimeEdges`].
    ///
    /// Errors
    /// ------
    /// - `ResidenceError::TooFewEdges` for fewer than 2 edges.
    /// - `ResidenceError::NonIncreasingTimes` for a repeated or earlier edge.
    pub fn new(edges: Vec<NaiveDateTime>) -> ResidenceResult<Self> {
        if edges.len() < 2 {
            return Err(ResidenceError::TooFewEdges { got: edges.len() });
        }
        validate_strictly_increasing("time edges", &edges)?;
        Ok(TimeEdges { edges })
    }

    pub fn edges(&self) -> &[NaiveDateTime] {
        &self.edges
    }

    pub fn origin(&self) -> NaiveDateTime {
        self.edges[0]
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of bins, `len() - 1`.
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Elapsed days of every edge since `origin` (which may lie anywhere).
    pub fn elapsed_days(&self, origin: NaiveDateTime) -> Array1<f64> {
        elapsed_days(origin, &self.edges)
    }
}

fn validate_strictly_increasing(
    name: &'static str, times: &[NaiveDateTime],
) -> ResidenceResult<()> {
    match times.windows(2).position(|pair| pair[1] <= pair[0]) {
        Some(pos) => Err(ResidenceError::NonIncreasingTimes { name, index: pos + 1 }),
        None => Ok(()),
    }
}
