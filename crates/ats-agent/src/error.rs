use ats_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("link references unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("agent {0} cannot be its own network peer")]
    SelfLink(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
