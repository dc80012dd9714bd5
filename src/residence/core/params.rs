//! Pore-volume and retardation parameters.
//!
//! Purpose
//! -------
//! Validate the two physical scalars that set the inversion threshold
//! `R · V`: one or more aquifer pore volumes `V` (competing storage
//! hypotheses) and the retardation factor `R` of the tracked compound.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`PoreVolume`] holds at least one value; every value is finite and > 0.
//! - [`RetardationFactor`] is finite and > 0. Values below 1 are accepted
//!   (compounds faster than water are unusual but not malformed).
//! - Pore volumes form the leading axis of every residence-time result.
//!
//! Testing notes
//! -------------
//! - Unit tests cover scalar and vector construction plus each rejection.

use crate::residence::errors::{ResidenceError, ResidenceResult};
use ndarray::{Array1, ArrayView1, array};

/// `PoreVolume` — one or more aquifer pore volumes [volume units].
///
/// Each entry is an independent hypothesis; results carry one row per entry
/// in the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct PoreVolume {
    values: Array1<f64>,
}

impl PoreVolume {
    /// Construct from one or more pore volumes.
    ///
    /// Errors
    /// ------
    /// - `ResidenceError::EmptyPoreVolume` when `values` is empty.
    /// - `ResidenceError::InvalidPoreVolume { index, value }` for the first
    ///   entry that is non-finite or ≤ 0.
    pub fn new(values: Array1<f64>) -> ResidenceResult<Self> {
        if values.is_empty() {
            return Err(ResidenceError::EmptyPoreVolume);
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ResidenceError::InvalidPoreVolume { index, value });
            }
        }
        Ok(PoreVolume { values })
    }

    /// Construct a single pore-volume hypothesis.
    pub fn scalar(value: f64) -> ResidenceResult<Self> {
        Self::new(array![value])
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Number of hypotheses (always ≥ 1).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `RetardationFactor` — slowdown of a compound relative to water.
///
/// Defaults to `1.0` (moves with the water).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetardationFactor(f64);

impl RetardationFactor {
    /// Errors
    /// ------
    /// - `ResidenceError::InvalidRetardation` when `value` is non-finite or ≤ 0.
    pub fn new(value: f64) -> ResidenceResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ResidenceError::InvalidRetardation { value });
        }
        Ok(RetardationFactor(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for RetardationFactor {
    fn default() -> Self {
        RetardationFactor(1.0)
    }
}
