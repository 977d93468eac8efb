//! random-numeric: write a file of random big integers, read it back, and
//! report how many are prime, how many are narcissistic, and which values
//! occur most often.

pub mod cli;
pub mod pipeline;
pub mod report;

use std::path::PathBuf;

use numeric_core::NumericError;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to write corpus to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: NumericError,
    },

    #[error("failed to read corpus from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: NumericError,
    },

    #[error("analysis failed: {0}")]
    Analysis(#[from] NumericError),

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
