//! Spatial-subsystem error type.

use thiserror::Error;

use ats_core::NodeId;

/// Errors produced by `ats-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// No path exists between two distinct nodes — a network configuration
    /// defect, never silently treated as "arrived".
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
