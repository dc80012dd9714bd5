//! residence::inverter — point-wise residence times from a flow series.
//!
//! Purpose
//! -------
//! Answer, for each query time and each pore-volume hypothesis, how long
//! water takes to pass through the aquifer. Extraction looks backward (when
//! did the water extracted now infiltrate); infiltration looks forward (when
//! will the water infiltrating now be extracted).
//!
//! Key behaviors
//! -------------
//! - Build the [`CumulativeFlowProfile`] of the flow series.
//! - Evaluate the cumulative volume at the query days (the native flow
//!   timestamps, or a caller-supplied index interpolated with NaN fill).
//! - Shift each cumulative volume by `∓ R · V` and invert it back to a day.
//! - Return the day difference, oriented so residence times are positive.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output shape is `(n_pore_volumes, n_query_times)`, pore volume outermost.
//! - Targets that fall before the start or beyond the end of the record give
//!   NaN; this is not an error.
//! - Query times need not be sorted and may lie outside the flow record.
//! - Packaging as a series is only defined for a single pore volume and is
//!   rejected before any computation.
//!
//! Conventions
//! -----------
//! - Days are measured from the first flow timestamp.
//! - Series output is named `residence_time_<direction>`.
//!
//! Downstream usage
//! ----------------
//! - [`residence_time_mean`](crate::residence::mean::residence_time_mean)
//!   reuses [`invert_profile`] on an edge-built profile.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constant-flow closed forms, the direction symmetry,
//!   retardation scaling, custom indices and the packaging rules.

use crate::{
    numerics::grid::elapsed_days,
    residence::{
        core::{
            cumulative::CumulativeFlowProfile, direction::Direction, options::ResidenceOptions,
            params::PoreVolume, series::FlowSeries,
        },
        errors::{ResidenceError, ResidenceResult},
    },
};
use chrono::NaiveDateTime;
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Single-pore-volume residence times paired with their timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidenceTimeSeries {
    pub index: Vec<NaiveDateTime>,
    pub values: Array1<f64>,
    pub name: String,
}

/// Result of [`residence_time`]: a matrix, or a named series when requested.
#[derive(Debug, Clone, PartialEq)]
pub enum ResidenceTimeOutput {
    /// Shape `(n_pore_volumes, n_query_times)`.
    Matrix(Array2<f64>),
    Series(ResidenceTimeSeries),
}

impl ResidenceTimeOutput {
    /// Matrix view of the result; a series becomes a single row.
    pub fn into_matrix(self) -> Array2<f64> {
        match self {
            ResidenceTimeOutput::Matrix(matrix) => matrix,
            ResidenceTimeOutput::Series(series) => series.values.insert_axis(Axis(0)),
        }
    }

    /// The series, if the result was packaged as one.
    pub fn into_series(self) -> Option<ResidenceTimeSeries> {
        match self {
            ResidenceTimeOutput::Series(series) => Some(series),
            ResidenceTimeOutput::Matrix(_) => None,
        }
    }
}

/// Compute residence times of a flow series at its own timestamps or at a
/// custom index.
///
/// Parameters
/// ----------
/// - `flow`: `&FlowSeries`
///   Validated flow samples; each rate covers the interval ending at its
///   timestamp.
/// - `pore_volume`: `&PoreVolume`
///   One or more pore-volume hypotheses.
/// - `options`: `&ResidenceOptions`
///   Retardation factor, direction and verbosity.
/// - `index`: `Option<&[NaiveDateTime]>`
///   Query times; `None` uses the flow timestamps.
/// - `as_series`: `bool`
///   Package the single row as a [`ResidenceTimeSeries`].
///
/// Returns
/// -------
/// `ResidenceResult<ResidenceTimeOutput>`
///   Residence times in days; NaN where the record is too short.
///
/// Errors
/// ------
/// - `ResidenceError::SeriesRequiresSinglePoreVolume` if `as_series` is set
///   with more than one pore volume.
/// - `ResidenceError::Numerics(NotAscending)` if negative flow makes the
///   cumulative curve decrease.
///
/// Examples
/// --------
/// ```rust
/// # use chrono::{NaiveDate, TimeDelta};
/// # use ndarray::Array1;
/// # use rust_gwtransport::residence::prelude::*;
/// let t0 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let times = (0..10).map(|d| t0 + TimeDelta::days(d)).collect();
/// let flow = FlowSeries::new(times, Array1::from_elem(10, 100.0)).unwrap();
/// let pv = PoreVolume::scalar(300.0).unwrap();
///
/// let rt = residence_time(&flow, &pv, &ResidenceOptions::default(), None, false)
///     .unwrap()
///     .into_matrix();
/// assert!(rt[[0, 2]].is_nan());
/// assert!((rt[[0, 5]] - 3.0).abs() < 1e-12);
/// ```
pub fn residence_time(
    flow: &FlowSeries, pore_volume: &PoreVolume, options: &ResidenceOptions,
    index: Option<&[NaiveDateTime]>, as_series: bool,
) -> ResidenceResult<ResidenceTimeOutput> {
    if as_series && pore_volume.len() != 1 {
        return Err(ResidenceError::SeriesRequiresSinglePoreVolume { got: pore_volume.len() });
    }

    let profile = CumulativeFlowProfile::from_series(flow);
    let (query_days, query_volume) = match index {
        Some(times) => {
            let days = elapsed_days(flow.origin(), times);
            let volume = profile.volume_at(days.view())?;
            (days, volume)
        }
        None => (profile.days().to_owned(), profile.volume().to_owned()),
    };

    let result = invert_profile(
        &profile,
        query_days.view(),
        query_volume.view(),
        pore_volume,
        options,
    )?;

    #[cfg(feature = "obs_slog")]
    if options.verbose {
        crate::residence::observe::log_summary("residence_time", options.direction, &result);
    }

    if !as_series {
        return Ok(ResidenceTimeOutput::Matrix(result));
    }
    let index = index.map_or_else(|| flow.times().to_vec(), <[NaiveDateTime]>::to_vec);
    let values = result.index_axis_move(Axis(0), 0);
    Ok(ResidenceTimeOutput::Series(ResidenceTimeSeries {
        index,
        values,
        name: format!("residence_time_{}", options.direction.as_str()),
    }))
}

/// Invert a cumulative profile at the given query points.
///
/// For every pore volume `V` and query `(day, volume)`, shift the volume by
/// `R · V` (backward for extraction, forward for infiltration), find the day
/// the profile reaches the shifted volume, and return the positive day
/// difference. Rows follow `pore_volume`, columns follow the queries.
pub(crate) fn invert_profile(
    profile: &CumulativeFlowProfile, query_days: ArrayView1<f64>, query_volume: ArrayView1<f64>,
    pore_volume: &PoreVolume, options: &ResidenceOptions,
) -> ResidenceResult<Array2<f64>> {
    let retardation = options.retardation_factor.value();
    let sign = options.direction.volume_sign();
    let pv = pore_volume.values();

    let targets = Array2::from_shape_fn((pv.len(), query_volume.len()), |(p, t)| {
        query_volume[t] + sign * retardation * pv[p]
    });
    let reached = profile.days_at_volume(targets.view())?;

    let residence = Array2::from_shape_fn(reached.raw_dim(), |(p, t)| match options.direction {
        Direction::Extraction => query_days[t] - reached[[p, t]],
        Direction::Infiltration => reached[[p, t]] - query_days[t],
    });
    Ok(residence)
}
