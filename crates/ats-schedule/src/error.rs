use ats_core::{ActivityId, Interval};
use thiserror::Error;

/// Errors raised while building or loading an activity catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate activity name '{0}'")]
    DuplicateName(String),

    #[error("catalog must define exactly one travel activity, found {0}")]
    TravelCount(usize),

    #[error("joint activity '{name}' has invalid fallback {fallback}: {reason}")]
    BadFallback {
        name: String,
        fallback: ActivityId,
        reason: &'static str,
    },

    #[error("no always-available idle activity for location kind '{0}'")]
    MissingIdle(&'static str),

    #[error("catalog parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by agenda mutation.
#[derive(Debug, Error)]
pub enum AgendaError {
    #[error("interval {interval} overlaps an existing agenda entry")]
    Overlap { interval: Interval },

    #[error("cannot insert an empty interval at minute {0}")]
    EmptyInterval(u32),
}

pub type AgendaResult<T> = Result<T, AgendaError>;
