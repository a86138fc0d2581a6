//! Error types for ats-output.

use thiserror::Error;

/// Errors that can occur when writing diary output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

impl<W> From<csv::IntoInnerError<W>> for OutputError {
    fn from(e: csv::IntoInnerError<W>) -> Self {
        OutputError::Io(e.into_error())
    }
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
