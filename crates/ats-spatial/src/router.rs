//! Routing trait and the default A* implementation.
//!
//! # Pluggability
//!
//! The execution layer calls routing via the [`Router`] trait, so
//! applications can swap in custom implementations (contraction hierarchies,
//! congestion-aware costs) without touching the framework core.  The default
//! [`AStarRouter`] uses edge arc length as cost and the straight-line
//! distance to the goal as heuristic — admissible because no path between
//! two points is shorter than the straight line.
//!
//! # Failure semantics
//!
//! `from == to` yields an empty route ("already there").  An unreachable
//! goal yields [`SpatialError::NoRoute`]; callers must surface it rather
//! than treat it as arrival — a missing path between used nodes is a network
//! configuration defect.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ats_core::{EdgeId, NodeId};

use crate::network::PathNetwork;
use crate::SpatialError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: an ordered list of directed `EdgeId`s and
/// the total arc length.
#[derive(Debug, Clone)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Cumulative arc length in metres.
    pub total_length: f64,
}

impl Route {
    /// Travel duration in whole minutes at `speed` metres per minute
    /// (ceiling — an agent never arrives earlier than the distance allows).
    pub fn travel_minutes(&self, speed_m_per_min: f64) -> u32 {
        (self.total_length / speed_m_per_min).ceil() as u32
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync`; the engine shares one router
/// across all agents.
pub trait Router: Send + Sync {
    /// Compute a shortest path from `from` to `to`.
    ///
    /// `from == to` is an empty route, not an error.
    fn route(&self, network: &PathNetwork, from: NodeId, to: NodeId)
        -> Result<Route, SpatialError>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the CSR path graph with a Euclidean heuristic.
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(
        &self,
        network: &PathNetwork,
        from: NodeId,
        to: NodeId,
    ) -> Result<Route, SpatialError> {
        astar(network, from, to)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// `f64` cost wrapper with a total order, so costs can key the binary heap.
/// Non-finite costs never occur (lengths and distances are finite).
#[derive(Copy, Clone, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn astar(network: &PathNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
    if from == to {
        return Ok(Route { edges: vec![], total_length: 0.0 });
    }
    if from.index() >= network.node_count() || to.index() >= network.node_count() {
        return Err(SpatialError::NodeNotFound(if from.index() >= network.node_count() {
            from
        } else {
            to
        }));
    }

    let goal_pos = network.position(to);
    let n = network.node_count();

    // g[v] = best known path length to v.
    let mut g = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    g[from.index()] = 0.0;

    // Min-heap on f = g + h. Reverse makes BinaryHeap (max) behave as
    // min-heap; secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(network.position(from).distance(goal_pos)), from)));

    while let Some(Reverse((_, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, prev_edge, to, g[to.index()]));
        }

        let node_g = g[node.index()];
        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let tentative = node_g + network.edge_length[edge.index()];

            if tentative < g[neighbor.index()] {
                g[neighbor.index()] = tentative;
                prev_edge[neighbor.index()] = edge;
                let f = tentative + network.position(neighbor).distance(goal_pos);
                heap.push(Reverse((Cost(f), neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    network: &PathNetwork,
    prev_edge: Vec<EdgeId>,
    to: NodeId,
    total_length: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();
    Route { edges, total_length }
}
