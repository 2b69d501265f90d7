//! Error types for trawl.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-probe and
//! per-fetch failures are not errors here: they are absorbed into
//! [`Outcome`](crate::scanner::Outcome) and
//! [`TitleOutcome`](crate::titles::TitleOutcome) values. Only top-level
//! conditions that abort a run surface through these types.

use crate::types::TargetError;
use thiserror::Error;

/// Fatal errors for CLI runs.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Target(#[from] TargetError),

    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
