//! residence::core — validated inputs and the cumulative flow profile.
//!
//! Purpose
//! -------
//! Hold the data types every residence-time entry point consumes: flow
//! series and time edges ([`series`]), physical parameters ([`params`]), the
//! lookup [`direction`], bundled [`options`], and the
//! [`cumulative`] flow profile that the inverter works on.
//!
//! Conventions
//! -----------
//! - All constructors validate and return `ResidenceResult`; once built, a
//!   value upholds its documented invariants.
//! - Time is expressed as elapsed days (`f64`) from an explicit origin.

pub mod cumulative;
pub mod direction;
pub mod options;
pub mod params;
pub mod series;
