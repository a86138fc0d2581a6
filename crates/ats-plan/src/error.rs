use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("planning configuration error: {0}")]
    Config(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
