//! Per-agent movement state.

use std::collections::VecDeque;

use ats_core::{EdgeId, NodeId, Point};

// ── Progress ──────────────────────────────────────────────────────────────────

/// Outcome of one movement tick.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Progress {
    /// Still travelling; the interpolated position after this tick.
    EnRoute(Point),
    /// The agent reached its target node this tick and now stands on its
    /// exact coordinate.
    Arrived(NodeId),
}

// ── EdgeTraversal ─────────────────────────────────────────────────────────────

/// Position on the edge currently being traversed.
///
/// `index` is an arc-length offset into the edge's shared polyline;
/// `direction` is `+1.0` when the traversal runs from the polyline's first
/// vertex towards its last, `-1.0` for the reverse.  Direction is chosen at
/// edge entry by comparing the agent's position against both endpoint
/// vertices (the nearer one is where we enter, so we head away from it).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct EdgeTraversal {
    pub edge: EdgeId,
    /// `+1.0` or `-1.0`.
    pub direction: f64,
    /// Arc-length offset into the edge geometry, in `[0, length]`.
    pub index: f64,
}

// ── TravelState ───────────────────────────────────────────────────────────────

/// The movement state for a single agent.
///
/// An agent is either **at a node** (`node != NodeId::INVALID`, no active
/// traversal) or **in transit** (`node == NodeId::INVALID`, `traversal` set,
/// remaining edges queued in `pending`).
#[derive(Clone, Debug)]
pub struct TravelState {
    /// Node the agent stands on; `NodeId::INVALID` while in transit.
    pub node: NodeId,

    /// Exact current position.  Equals the node coordinate when at a node.
    pub position: Point,

    /// Node the agent is heading to; equals `node` when not in transit.
    pub target: NodeId,

    /// Edges still ahead of the current one, in traversal order.
    pub pending: VecDeque<EdgeId>,

    /// The edge currently being walked, if any.
    pub traversal: Option<EdgeTraversal>,
}

impl TravelState {
    /// Construct a stationary state at `node` / `position`.
    pub fn at_node(node: NodeId, position: Point) -> Self {
        Self {
            node,
            position,
            target: node,
            pending: VecDeque::new(),
            traversal: None,
        }
    }

    /// A not-yet-placed agent.
    pub fn unplaced() -> Self {
        Self::at_node(NodeId::INVALID, Point::new(0.0, 0.0))
    }

    /// `true` while the agent is walking a path.
    #[inline]
    pub fn in_transit(&self) -> bool {
        self.traversal.is_some()
    }
}
