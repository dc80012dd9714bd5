//! residence — residence times of water and solutes in a 1-D aquifer.
//!
//! Purpose
//! -------
//! Provide the residence-time engine: given a flow-rate history and one or
//! more aquifer pore volumes, compute how long water (or a retarded
//! compound) spends between infiltration and extraction.
//!
//! Key behaviors
//! -------------
//! - [`residence_time`] evaluates point-wise residence times for a
//!   point-sampled [`FlowSeries`], at its own timestamps or a custom index.
//! - [`residence_time_mean`] averages residence times over output bins for
//!   edge-delimited flow.
//! - Both invert the [`CumulativeFlowProfile`] at the threshold `R · V`, in
//!   the [`Direction`] chosen through [`ResidenceOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Flow rates are non-negative (a precondition, surfaced as an ordering
//!   error when violated).
//! - Result matrices have pore volume as the outer axis and time as the
//!   inner axis.
//! - Insufficient history or future yields NaN, never an error.
//!
//! Conventions
//! -----------
//! - Flow is in volume per day; residence times are in days.
//! - Timestamps are `chrono::NaiveDateTime`; computations run on elapsed
//!   days from the first flow timestamp or edge.
//!
//! Downstream usage
//! ----------------
//! - Rust callers import from [`prelude`]; Python callers reach the same
//!   functions through the `_rust_gwtransport.residence` submodule.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; `tests/residence_pipeline.rs`
//!   runs the full pipeline from raw timestamps to averaged results.

pub mod core;
pub mod errors;
pub mod inverter;
pub mod mean;
#[cfg(feature = "obs_slog")]
pub mod observe;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    cumulative::CumulativeFlowProfile,
    direction::Direction,
    options::ResidenceOptions,
    params::{PoreVolume, RetardationFactor},
    series::{FlowSeries, TimeEdges},
};
pub use self::errors::{ResidenceError, ResidenceResult};
pub use self::inverter::{ResidenceTimeOutput, ResidenceTimeSeries, residence_time};
pub use self::mean::residence_time_mean;

pub mod prelude {
    pub use super::{
        CumulativeFlowProfile, Direction, FlowSeries, PoreVolume, ResidenceError,
        ResidenceOptions, ResidenceResult, ResidenceTimeOutput, ResidenceTimeSeries,
        RetardationFactor, TimeEdges, residence_time, residence_time_mean,
    };
}
