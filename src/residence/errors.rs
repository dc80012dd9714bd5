//! residence::errors — error types for the residence-time engine.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`ResidenceError`], and result alias,
//! [`ResidenceResult`], for flow-series construction, parameter validation,
//! and the residence-time entry points. Failures from the numerical
//! primitives are wrapped rather than re-described.
//!
//! Key behaviors
//! -------------
//! - Group variants by concern: flow data, time edges, parameters,
//!   enumerations, and packaging.
//! - `From<NumericsError>` lets the engine use `?` on interpolation and
//!   averaging calls.
//! - `From<ResidenceError> for PyErr` (feature `python-bindings`) maps every
//!   variant to a `ValueError` carrying the `Display` message.
//!
//! Invariants & assumptions
//! ------------------------
//! - Insufficient flow history or future is not an error: those residence
//!   times are NaN. Errors are reserved for malformed input.
//! - Validation happens before computation, so an error never accompanies a
//!   partial result.
//!
//! Testing notes
//! -------------
//! - Unit tests verify payload embedding in `Display` messages and the
//!   wrapping of [`NumericsError`].

use crate::numerics::errors::NumericsError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for residence-time operations.
pub type ResidenceResult<T> = Result<T, ResidenceError>;

/// Unified error type for the residence-time engine.
///
/// Covers flow-series and time-edge validation, pore-volume and retardation
/// checks, enumeration parsing, result packaging, and wrapped numerical
/// failures.
#[derive(Debug, Clone, PartialEq)]
pub enum ResidenceError {
    // ---- Flow data ----
    /// A flow series needs at least 2 samples.
    InsufficientData { got: usize },

    /// Timestamps and flow values differ in length.
    MismatchedSeries { times: usize, values: usize },

    /// A flow value is NaN/±inf.
    NonFiniteFlow { index: usize, value: f64 },

    /// Timestamps must be strictly increasing.
    NonIncreasingTimes { name: &'static str, index: usize },

    // ---- Time edges ----
    /// A time-edge sequence needs at least 2 edges.
    TooFewEdges { got: usize },

    /// Edge-delimited flow needs exactly one value per bin.
    FlowEdgeMismatch { flow_len: usize, edges_len: usize },

    // ---- Parameters ----
    /// No pore volume was supplied.
    EmptyPoreVolume,

    /// Pore volumes must be finite and > 0.
    InvalidPoreVolume { index: usize, value: f64 },

    /// Retardation factor must be finite and > 0.
    InvalidRetardation { value: f64 },

    // ---- Enumerations ----
    /// Unrecognized direction name.
    InvalidDirection { name: String },

    // ---- Packaging ----
    /// Series packaging is only defined for a single pore volume.
    SeriesRequiresSinglePoreVolume { got: usize },

    // ---- Numerics ----
    /// Failure reported by an interpolation or averaging primitive.
    Numerics(NumericsError),
}

impl std::error::Error for ResidenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResidenceError::Numerics(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResidenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Flow data ----
            ResidenceError::InsufficientData { got } => {
                write!(f, "Flow series needs at least 2 samples; got {got}.")
            }
            ResidenceError::MismatchedSeries { times, values } => {
                write!(f, "Flow series has {times} timestamps but {values} values.")
            }
            ResidenceError::NonFiniteFlow { index, value } => {
                write!(f, "Flow value at index {index} is non-finite: {value}")
            }
            ResidenceError::NonIncreasingTimes { name, index } => {
                write!(f, "{name} must be strictly increasing; violated at index {index}.")
            }
            // ---- Time edges ----
            ResidenceError::TooFewEdges { got } => {
                write!(f, "Time edges need at least 2 entries; got {got}.")
            }
            ResidenceError::FlowEdgeMismatch { flow_len, edges_len } => {
                write!(
                    f,
                    "Edge-delimited flow needs len(flow) == len(edges) - 1; \
                     got {flow_len} values for {edges_len} edges."
                )
            }
            // ---- Parameters ----
            ResidenceError::EmptyPoreVolume => write!(f, "At least one pore volume is required."),
            ResidenceError::InvalidPoreVolume { index, value } => {
                write!(f, "Pore volume at index {index} must be finite and > 0; got {value}.")
            }
            ResidenceError::InvalidRetardation { value } => {
                write!(f, "Retardation factor must be finite and > 0; got {value}.")
            }
            // ---- Enumerations ----
            ResidenceError::InvalidDirection { name } => {
                write!(f, "Invalid direction {name:?}; expected 'extraction' or 'infiltration'.")
            }
            // ---- Packaging ----
            ResidenceError::SeriesRequiresSinglePoreVolume { got } => {
                write!(
                    f,
                    "Returning a series is only supported for a single pore volume; got {got}."
                )
            }
            // ---- Numerics ----
            ResidenceError::Numerics(err) => write!(f, "{err}"),
        }
    }
}

impl From<NumericsError> for ResidenceError {
    fn from(err: NumericsError) -> Self {
        ResidenceError::Numerics(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ResidenceError> for PyErr {
    fn from(err: ResidenceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
