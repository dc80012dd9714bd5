//! numerics::errors — error types for the piecewise-linear primitives.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by interpolation, interval
//! averaging, and grid helpers, together with a conversion layer to Python
//! exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`NumericsResult`] and [`NumericsError`] as the canonical result
//!   and error types for everything under [`crate::numerics`].
//! - Attach human-readable `Display` messages to each variant that embed the
//!   offending value, index, or length.
//! - Implement `From<NumericsError> for PyErr` (feature `python-bindings`) so
//!   Python callers receive a `ValueError` with the Rust message verbatim.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every variant describes malformed input. Numerically under-determined
//!   outcomes (too few valid points after NaN filtering, lookups outside the
//!   data range under a fill policy) are reported as NaN values, never as
//!   errors.
//! - Values are small and cheap to clone.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - `name` fields carry the argument name as the caller knows it
//!   (`"x_ref"`, `"x_edges"`, ...).
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for the numerical primitives.
pub type NumericsResult<T> = Result<T, NumericsError>;

/// NumericsError — invalid input to a numerical primitive.
///
/// Variants
/// --------
/// - `MismatchedLengths { x_len, y_len }`
///   Abscissa and ordinate arrays differ in length.
/// - `TooFewPoints { got, min }`
///   A reference curve or coordinate array is shorter than required.
/// - `TooFewEdges { got }`
///   Fewer than 2 bin edges were supplied.
/// - `NotAscending { name, index }`
///   `name[index]` is smaller than its predecessor (or is NaN).
/// - `OutOfDomain { value, min, max }`
///   An edge lies outside `[min, max]` under the raise policy.
/// - `InvalidExtrapolation { name }` / `InvalidAlignment { name }`
///   An unrecognized policy name was parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericsError {
    // ---- Shape / length ----
    MismatchedLengths { x_len: usize, y_len: usize },
    TooFewPoints { got: usize, min: usize },
    TooFewEdges { got: usize },

    // ---- Ordering / domain ----
    NotAscending { name: &'static str, index: usize },
    OutOfDomain { value: f64, min: f64, max: f64 },

    // ---- Enumerations ----
    InvalidExtrapolation { name: String },
    InvalidAlignment { name: String },
}

impl std::error::Error for NumericsError {}

impl std::fmt::Display for NumericsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericsError::MismatchedLengths { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}.")
            }
            NumericsError::TooFewPoints { got, min } => {
                write!(f, "Need at least {min} points; got {got}.")
            }
            NumericsError::TooFewEdges { got } => {
                write!(f, "Need at least 2 bin edges; got {got}.")
            }
            NumericsError::NotAscending { name, index } => {
                write!(f, "{name} must be in ascending order; violated at index {index}.")
            }
            NumericsError::OutOfDomain { value, min, max } => {
                write!(f, "Edge {value} lies outside the data range [{min}, {max}].")
            }
            NumericsError::InvalidExtrapolation { name } => {
                write!(
                    f,
                    "Invalid extrapolation method {name:?}; expected 'outer', 'nan', or 'raise'."
                )
            }
            NumericsError::InvalidAlignment { name } => {
                write!(f, "Invalid alignment {name:?}; expected 'centered', 'left', or 'right'.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<NumericsError> for PyErr {
    fn from(err: NumericsError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
