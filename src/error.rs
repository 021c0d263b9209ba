//! Error types for power iteration runs.

use std::collections::TryReserveError;

use thiserror::Error;

/// Every failure is fatal to the run; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("allocation failed for {what} ({elements} elements): {source}")]
    AllocationFailure {
        what: &'static str,
        elements: usize,
        source: TryReserveError,
    },

    #[error("failed to spawn worker {worker}: {source}")]
    ThreadCreationFailure {
        worker: usize,
        source: std::io::Error,
    },

    #[error("failed to join worker {worker}: {message}")]
    ThreadJoinFailure { worker: usize, message: String },

    #[error("timing failure: {0}")]
    TimingFailure(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("worker {worker} aborted after another worker failed")]
    WorkerAborted { worker: usize },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Allocates a zeroed `Vec<f64>`, reporting failure instead of aborting.
pub(crate) fn try_zeroed(what: &'static str, elements: usize) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    data.try_reserve_exact(elements)
        .map_err(|source| Error::AllocationFailure {
            what,
            elements,
            source,
        })?;
    data.resize(elements, 0.0);
    Ok(data)
}
