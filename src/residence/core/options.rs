//! Configuration shared by the residence-time entry points.
//!
//! [`ResidenceOptions`] bundles the scalar knobs that every residence-time
//! computation takes: retardation factor, lookup direction, and whether a
//! verbose run should emit a log summary (only effective with the `obs_slog`
//! feature).

use crate::residence::{
    core::{direction::Direction, params::RetardationFactor},
    errors::ResidenceResult,
};

/// Options for [`residence_time`](crate::residence::residence_time) and
/// [`residence_time_mean`](crate::residence::residence_time_mean).
///
/// Fields:
/// - `retardation_factor: RetardationFactor` — scales the pore volume.
/// - `direction: Direction` — backward (extraction) or forward (infiltration).
/// - `verbose: bool` — if `true`, log a per-call summary (behind the
///   `obs_slog` feature).
///
/// Default:
/// - `retardation_factor`: `1.0`
/// - `direction`: `Extraction`
/// - `verbose`: `false`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResidenceOptions {
    pub retardation_factor: RetardationFactor,
    pub direction: Direction,
    pub verbose: bool,
}

impl ResidenceOptions {
    /// Build options, validating the retardation factor.
    ///
    /// # Errors
    /// - `ResidenceError::InvalidRetardation` if `retardation_factor` is
    ///   non-finite or ≤ 0.
    pub fn new(
        retardation_factor: f64, direction: Direction, verbose: bool,
    ) -> ResidenceResult<Self> {
        let retardation_factor = RetardationFactor::new(retardation_factor)?;
        Ok(Self { retardation_factor, direction, verbose })
    }

    /// Same options, looking the other way.
    pub fn with_direction(self, direction: Direction) -> Self {
        Self { direction, ..self }
    }
}
