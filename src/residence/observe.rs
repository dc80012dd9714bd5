//! Structured log summaries for verbose residence-time runs (`obs_slog`).
//!
//! The numerical code performs no I/O. When the `obs_slog` feature is on and
//! `ResidenceOptions::verbose` is set, each entry point reports one record
//! after computing: operation, direction, result shape, and how many entries
//! could not be resolved (NaN). Records go to stderr through a non-blocking
//! terminal drain.

use crate::residence::core::direction::Direction;
use ndarray::Array2;
use slog::{Drain, Logger, info, o};

/// Terminal logger writing to stderr through an async drain.
pub fn terminal_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => "rust_gwtransport"))
}

/// Number of entries that the flow record could not resolve.
pub fn unresolved_count(result: &Array2<f64>) -> usize {
    result.iter().filter(|v| v.is_nan()).count()
}

pub(crate) fn log_summary(operation: &'static str, direction: Direction, result: &Array2<f64>) {
    let logger = terminal_logger();
    info!(logger, "residence times computed";
        "operation" => operation,
        "direction" => direction.as_str(),
        "pore_volumes" => result.nrows(),
        "columns" => result.ncols(),
        "unresolved" => unresolved_count(result)
    );
}
