//! rust_gwtransport — residence-time engine for 1-D groundwater transport.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the residence-time engine to Python via the `_rust_gwtransport`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing functions and submodules used by the
//! `rust_gwtransport` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`numerics` and `residence`) as the
//!   public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for
//!   the `_rust_gwtransport` Python extension.
//! - Create and register Python submodules (`numerics`, `residence`) under
//!   `rust_gwtransport` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Python callers pass timestamps as naive `datetime.datetime` sequences
//!   or pandas `DatetimeIndex` objects; conversion lives in [`utils`].
//!
//! Conventions
//! -----------
//! - Python-exposed functions live under `_rust_gwtransport.<submodule>` and
//!   keep the keyword names and defaults of the pure-Python API they replace.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`numerics`] and
//!   [`residence`] and can ignore the items guarded by `python-bindings`.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by `tests/residence_pipeline.rs`.

pub mod numerics;
pub mod residence;
pub mod utils;

pub mod prelude {
    pub use crate::numerics::prelude::*;
    pub use crate::residence::prelude::*;
}

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArrayDyn, PyReadonlyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{IntoPyObjectExt, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    numerics::{
        average::{Extrapolation, average_over_bins},
        interpolate::{Boundary, interpolate},
    },
    residence::{
        core::{
            direction::Direction,
            options::ResidenceOptions,
            series::{FlowSeries, TimeEdges},
        },
        inverter::{ResidenceTimeOutput, residence_time},
        mean::residence_time_mean,
    },
    utils::{extract_datetimes, extract_f64_array, extract_pore_volume},
};

/// Piecewise-linear interpolation of `(x_ref, y_ref)` at `x_query`.
///
/// `x_query` may be a numpy array of any shape (the result has the same
/// shape) or a 1-D array-like. `left` / `right` give the fill value below /
/// above the reference range; `None` clamps to the first / last ordinate.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "interpolate")]
#[pyo3(
    signature = (x_ref, y_ref, x_query, left = None, right = None),
    text_signature = "(x_ref, y_ref, x_query, /, left=None, right=None)"
)]
fn py_interpolate<'py>(
    py: Python<'py>, x_ref: &Bound<'py, PyAny>, y_ref: &Bound<'py, PyAny>,
    x_query: &Bound<'py, PyAny>, left: Option<f64>, right: Option<f64>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let x_ref = extract_f64_array(py, x_ref)?;
    let y_ref = extract_f64_array(py, y_ref)?;
    let (left, right) = (boundary(left), boundary(right));

    let out = match x_query.extract::<PyReadonlyArrayDyn<f64>>() {
        Ok(query) => {
            interpolate(x_ref.as_array(), y_ref.as_array(), query.as_array(), left, right)?
        }
        Err(_) => {
            let query = extract_f64_array(py, x_query)?;
            let query = query.as_array().into_dyn();
            interpolate(x_ref.as_array(), y_ref.as_array(), query, left, right)?
        }
    };
    Ok(out.into_pyarray(py))
}

#[cfg(feature = "python-bindings")]
fn boundary(fill: Option<f64>) -> Boundary {
    fill.map_or(Boundary::Clamp, Boundary::Fill)
}

/// Exact average of a piecewise-linear curve over each bin of `x_edges`.
///
/// `extrapolate_method` is one of `"outer"`, `"nan"` (default), `"raise"`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "average_over_bins")]
#[pyo3(
    signature = (x_data, y_data, x_edges, extrapolate_method = "nan"),
    text_signature = "(x_data, y_data, x_edges, /, extrapolate_method='nan')"
)]
fn py_average_over_bins<'py>(
    py: Python<'py>, x_data: &Bound<'py, PyAny>, y_data: &Bound<'py, PyAny>,
    x_edges: &Bound<'py, PyAny>, extrapolate_method: &str,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let extrapolation: Extrapolation = extrapolate_method.parse()?;
    let x_data = extract_f64_array(py, x_data)?;
    let y_data = extract_f64_array(py, y_data)?;
    let x_edges = extract_f64_array(py, x_edges)?;

    let out =
        average_over_bins(x_data.as_array(), y_data.as_array(), x_edges.as_array(), extrapolation)?;
    Ok(out.into_pyarray(py))
}

/// Point-wise residence times of a flow series.
///
/// Returns a `(n_pore_volumes, n_times)` array, or with
/// `return_as_series=True` a `(name, index, values)` tuple for a single pore
/// volume.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "residence_time")]
#[pyo3(
    signature = (
        flow_index,
        flow,
        pore_volume,
        index = None,
        retardation_factor = 1.0,
        direction = "extraction",
        return_as_series = false,
        verbose = false,
    ),
    text_signature = "(flow_index, flow, pore_volume, /, index=None, retardation_factor=1.0, \
                      direction='extraction', return_as_series=False, verbose=False)"
)]
fn py_residence_time<'py>(
    py: Python<'py>, flow_index: &Bound<'py, PyAny>, flow: &Bound<'py, PyAny>,
    pore_volume: &Bound<'py, PyAny>, index: Option<&Bound<'py, PyAny>>, retardation_factor: f64,
    direction: &str, return_as_series: bool, verbose: bool,
) -> PyResult<PyObject> {
    let direction: Direction = direction.parse()?;
    let options = ResidenceOptions::new(retardation_factor, direction, verbose)?;
    let times = extract_datetimes(flow_index)?;
    let rates = extract_f64_array(py, flow)?.as_array().to_owned();
    let series = FlowSeries::new(times, rates)?;
    let pore_volume = extract_pore_volume(py, pore_volume)?;
    let index = index.map(extract_datetimes).transpose()?;

    let output =
        residence_time(&series, &pore_volume, &options, index.as_deref(), return_as_series)?;
    match output {
        ResidenceTimeOutput::Matrix(matrix) => Ok(matrix.into_pyarray(py).into_any().unbind()),
        ResidenceTimeOutput::Series(series) => {
            (series.name, series.index, series.values.into_pyarray(py)).into_py_any(py)
        }
    }
}

/// Bin-averaged residence times for edge-delimited flow.
///
/// Returns a `(n_pore_volumes, len(tedges_out) - 1)` array.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "residence_time_mean")]
#[pyo3(
    signature = (
        flow,
        flow_tedges,
        tedges_out,
        pore_volume,
        direction = "extraction",
        retardation_factor = 1.0,
        verbose = false,
    ),
    text_signature = "(flow, flow_tedges, tedges_out, pore_volume, /, direction='extraction', \
                      retardation_factor=1.0, verbose=False)"
)]
fn py_residence_time_mean<'py>(
    py: Python<'py>, flow: &Bound<'py, PyAny>, flow_tedges: &Bound<'py, PyAny>,
    tedges_out: &Bound<'py, PyAny>, pore_volume: &Bound<'py, PyAny>, direction: &str,
    retardation_factor: f64, verbose: bool,
) -> PyResult<PyObject> {
    let direction: Direction = direction.parse()?;
    let options = ResidenceOptions::new(retardation_factor, direction, verbose)?;
    let flow = extract_f64_array(py, flow)?;
    let flow_tedges = TimeEdges::new(extract_datetimes(flow_tedges)?)?;
    let tedges_out = TimeEdges::new(extract_datetimes(tedges_out)?)?;
    let pore_volume = extract_pore_volume(py, pore_volume)?;

    let out =
        residence_time_mean(flow.as_array(), &flow_tedges, &tedges_out, &pore_volume, &options)?;
    Ok(out.into_pyarray(py).into_any().unbind())
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_gwtransport<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let numerics_mod = PyModule::new(_py, "numerics")?;
    let residence_mod = PyModule::new(_py, "residence")?;
    numerics(_py, m, &numerics_mod)?;
    residence(_py, m, &residence_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_gwtransport.numerics", numerics_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("rust_gwtransport.residence", residence_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn numerics<'py>(
    _py: Python, rust_gwtransport: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_interpolate, m)?)?;
    m.add_function(wrap_pyfunction!(py_average_over_bins, m)?)?;
    rust_gwtransport.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn residence<'py>(
    _py: Python, rust_gwtransport: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_residence_time, m)?)?;
    m.add_function(wrap_pyfunction!(py_residence_time_mean, m)?)?;
    rust_gwtransport.add_submodule(m)?;
    Ok(())
}
