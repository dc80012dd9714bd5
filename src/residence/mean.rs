//! residence::mean — bin-averaged residence times from edge-delimited flow.
//!
//! Purpose
//! -------
//! Compute the time-average residence time over each output bin, for flow
//! given as one rate per bin between `flow_tedges`. This is the form used
//! when concentrations are averaged over sampling intervals.
//!
//! Key behaviors
//! -------------
//! - Build the cumulative profile from edges (each rate covers the bin it
//!   opens) and invert it at every flow edge.
//! - Average each pore volume's edge-wise residence-time curve over the
//!   output bins with `Extrapolation::Nan`, so bins not fully covered by
//!   resolved residence times are NaN.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output shape is `(n_pore_volumes, len(tedges_out) - 1)`.
//! - Output edges are converted to days relative to `flow_tedges[0]`; they
//!   may extend past the flow record on either side.

use crate::{
    numerics::average::{Extrapolation, average_over_bins},
    residence::{
        core::{
            cumulative::CumulativeFlowProfile, options::ResidenceOptions, params::PoreVolume,
            series::TimeEdges,
        },
        errors::ResidenceResult,
        inverter::invert_profile,
    },
};
use ndarray::{Array2, ArrayView1};

/// Time-averaged residence time over each output bin.
///
/// Parameters
/// ----------
/// - `flow`: `ArrayView1<f64>`
///   One finite flow rate per flow bin.
/// - `flow_tedges`: `&TimeEdges`
///   Flow bin boundaries; `flow.len() == flow_tedges.len() - 1`.
/// - `tedges_out`: `&TimeEdges`
///   Output bin boundaries.
/// - `pore_volume`: `&PoreVolume`
/// - `options`: `&ResidenceOptions`
///
/// Returns
/// -------
/// `ResidenceResult<Array2<f64>>`
///   Shape `(n_pore_volumes, n_output_bins)`; NaN where a bin is not fully
///   resolved.
///
/// Errors
/// ------
/// - `ResidenceError::FlowEdgeMismatch` / `NonFiniteFlow` from the profile.
/// - `ResidenceError::Numerics(NotAscending)` when negative flow makes the
///   cumulative curve decrease.
pub fn residence_time_mean(
    flow: ArrayView1<f64>, flow_tedges: &TimeEdges, tedges_out: &TimeEdges,
    pore_volume: &PoreVolume, options: &ResidenceOptions,
) -> ResidenceResult<Array2<f64>> {
    let profile = CumulativeFlowProfile::from_edges(flow, flow_tedges)?;
    let at_edges =
        invert_profile(&profile, profile.days(), profile.volume(), pore_volume, options)?;
    let out_days = tedges_out.elapsed_days(flow_tedges.origin());

    let mut result = Array2::<f64>::zeros((pore_volume.len(), tedges_out.n_bins()));
    for (mut row, curve) in result.rows_mut().into_iter().zip(at_edges.rows()) {
        let averaged =
            average_over_bins(profile.days(), curve, out_days.view(), Extrapolation::Nan)?;
        row.assign(&averaged);
    }

    #[cfg(feature = "obs_slog")]
    if options.verbose {
        crate::residence::observe::log_summary("residence_time_mean", options.direction, &result);
    }

    Ok(result)
}
