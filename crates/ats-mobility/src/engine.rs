//! The movement engine: edge setup, per-tick advancement, overshoot carry.

use ats_core::{AgentId, NodeId, Point};
use ats_spatial::{LengthIndexedLine, PathNetwork, Route};

use crate::error::{MobilityError, MobilityResult};
use crate::state::{EdgeTraversal, Progress, TravelState};

/// Advances agents along precomputed edge paths at a fixed speed.
///
/// Holds one [`TravelState`] per agent, indexed by `AgentId`.
pub struct MovementEngine {
    /// Distance covered per tick, in metres per simulated minute.
    speed: f64,
    /// Per-agent movement state.
    pub states: Vec<TravelState>,
}

impl MovementEngine {
    /// Create an engine with all agents unplaced.
    pub fn new(speed_m_per_min: f64, agent_count: usize) -> Self {
        Self {
            speed: speed_m_per_min,
            states: (0..agent_count).map(|_| TravelState::unplaced()).collect(),
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    // ── Placement & queries ───────────────────────────────────────────────

    /// Put `agent` on `node` without travelling (initial placement).
    pub fn place(&mut self, agent: AgentId, node: NodeId, network: &PathNetwork) {
        self.states[agent.index()] = TravelState::at_node(node, network.position(node));
    }

    /// Node the agent stands on; `NodeId::INVALID` while in transit.
    #[inline]
    pub fn node(&self, agent: AgentId) -> NodeId {
        self.states[agent.index()].node
    }

    /// Exact current position.
    #[inline]
    pub fn position(&self, agent: AgentId) -> Point {
        self.states[agent.index()].position
    }

    #[inline]
    pub fn in_transit(&self, agent: AgentId) -> bool {
        self.states[agent.index()].in_transit()
    }

    // ── Travel ────────────────────────────────────────────────────────────

    /// Start `agent` walking `route` towards `target`.
    ///
    /// A trivial route (already at the target) is a no-op.  The first edge
    /// is set up immediately: its polyline endpoint nearer the agent's
    /// current position determines the traversal direction, so the walk
    /// heads away from where the agent stands instead of backtracking.
    pub fn begin(
        &mut self,
        agent: AgentId,
        route: &Route,
        target: NodeId,
        network: &PathNetwork,
    ) -> MobilityResult<()> {
        let state = &mut self.states[agent.index()];
        if state.node == NodeId::INVALID && state.traversal.is_none() {
            return Err(MobilityError::NotPlaced(agent));
        }
        if state.in_transit() {
            return Err(MobilityError::AlreadyInTransit(agent));
        }
        let mut edges: std::collections::VecDeque<_> = route.edges.iter().copied().collect();
        let Some(first) = edges.pop_front() else {
            return Ok(()); // trivial route: already at the target
        };

        state.pending = edges;
        state.target = target;
        state.node = NodeId::INVALID;
        state.traversal = Some(enter_edge(state.position, first, network));
        Ok(())
    }

    /// Advance `agent` by one tick's worth of distance.
    ///
    /// Overshoot past an edge's bound carries into the next edge, re-running
    /// edge setup there (which may flip direction), so several short edges
    /// can be crossed within one tick.  Exhausting the last edge snaps the
    /// agent onto the target node's exact coordinate and reports
    /// [`Progress::Arrived`].
    pub fn step(&mut self, agent: AgentId, network: &PathNetwork) -> MobilityResult<Progress> {
        let state = &mut self.states[agent.index()];
        let Some(mut traversal) = state.traversal else {
            return Err(MobilityError::NotInTransit(agent));
        };

        // Signed advance along the current edge's length index.
        let mut index = traversal.index + traversal.direction * self.speed;

        loop {
            let line = network.geometry(traversal.edge);
            let overshoot = overshoot_past_bound(index, traversal.direction, line);

            if overshoot < 0.0 {
                // Still inside this edge: commit the index and interpolate.
                traversal.index = index;
                state.position = line.point_at(index);
                state.traversal = Some(traversal);
                return Ok(Progress::EnRoute(state.position));
            }

            // Edge exhausted: stand on its terminal vertex (exact), then
            // either carry the remainder into the next edge or finish.
            state.position = terminal_vertex(line, traversal.direction);

            match state.pending.pop_front() {
                Some(next) => {
                    traversal = enter_edge(state.position, next, network);
                    index = traversal.index + traversal.direction * overshoot;
                }
                None => {
                    let target = state.target;
                    debug_assert_eq!(
                        state.position,
                        network.position(target),
                        "path terminal vertex must coincide with the target node"
                    );
                    state.position = network.position(target);
                    state.node = target;
                    state.traversal = None;
                    state.pending.clear();
                    return Ok(Progress::Arrived(target));
                }
            }
        }
    }
}

// ── Edge-entry helpers ────────────────────────────────────────────────────────

/// Set up a traversal of `edge` starting from `position`.
///
/// The polyline endpoint nearer `position` is the entry point: entering at
/// the first vertex walks forward (`direction = +1`, index 0), entering at
/// the last vertex walks backward (`direction = -1`, index = length).
fn enter_edge(position: Point, edge: ats_core::EdgeId, network: &PathNetwork) -> EdgeTraversal {
    let line = network.geometry(edge);
    let from_start = position.distance(line.start_point());
    let from_end = position.distance(line.end_point());
    if from_start <= from_end {
        EdgeTraversal { edge, direction: 1.0, index: 0.0 }
    } else {
        EdgeTraversal { edge, direction: -1.0, index: line.length() }
    }
}

/// Distance by which `index` lies at or beyond the edge bound in the
/// direction of travel; negative while strictly inside the edge.  Landing
/// exactly on the bound counts as exhausting the edge, so a tick that ends
/// precisely on the target node reports arrival immediately.
#[inline]
fn overshoot_past_bound(index: f64, direction: f64, line: &LengthIndexedLine) -> f64 {
    if direction > 0.0 {
        index - line.length()
    } else {
        -index
    }
}

/// The vertex an edge traversal terminates at.
#[inline]
fn terminal_vertex(line: &LengthIndexedLine, direction: f64) -> Point {
    if direction > 0.0 {
        line.end_point()
    } else {
        line.start_point()
    }
}
