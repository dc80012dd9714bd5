//! Python input conversion helpers for the PyO3 bindings.
//!
//! Every helper accepts the loose array-likes Python callers pass around
//! (numpy arrays, pandas objects, plain sequences) and converts them into the
//! validated Rust types the engine consumes.

#[cfg(feature = "python-bindings")]
use chrono::NaiveDateTime;

#[cfg(feature = "python-bindings")]
use ndarray::array;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::residence::core::params::PoreVolume;

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Borrow or copy a Python array-like as a 1-D `float64` numpy array.
///
/// Tries, in order: a contiguous numpy array, an object with `to_numpy()`
/// (pandas `Series` / `Index`), and finally any sequence of floats.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method0("to_numpy") {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Convert a pandas `DatetimeIndex` or a sequence of naive
/// `datetime.datetime` objects into timestamps.
#[cfg(feature = "python-bindings")]
pub fn extract_datetimes(raw: &Bound<'_, PyAny>) -> PyResult<Vec<NaiveDateTime>> {
    if let Ok(obj) = raw.call_method0("to_pydatetime") {
        if let Ok(times) = obj.extract::<Vec<NaiveDateTime>>() {
            return Ok(times);
        }
    }

    raw.extract::<Vec<NaiveDateTime>>().map_err(|_| {
        PyTypeError::new_err(
            "expected a pandas.DatetimeIndex or a sequence of timezone-naive datetime.datetime",
        )
    })
}

/// Accept a single float or an array-like of floats as pore volume(s).
#[cfg(feature = "python-bindings")]
pub fn extract_pore_volume<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PoreVolume> {
    let values = match raw.extract::<f64>() {
        Ok(value) => array![value],
        Err(_) => extract_f64_array(py, raw)?.as_array().to_owned(),
    };
    Ok(PoreVolume::new(values)?)
}
