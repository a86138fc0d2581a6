use ats_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("agent {0} has not been placed on the network")]
    NotPlaced(AgentId),

    #[error("agent {0} is already in transit")]
    AlreadyInTransit(AgentId),

    #[error("agent {0} has no active path to step along")]
    NotInTransit(AgentId),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
