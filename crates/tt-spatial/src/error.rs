//! Spatial-subsystem error type.

use thiserror::Error;

use tt_core::StopId;

/// Errors produced by `tt-spatial`.
///
/// `NoPath` is an expected outcome during a tick: the stepper consumes it
/// and falls back to walking.  The rest come from loading stop data.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no path from {from} to {to}")]
    NoPath { from: StopId, to: StopId },

    #[error("{0} is not in the current transit graph")]
    UnknownStop(StopId),

    #[error("stop parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
