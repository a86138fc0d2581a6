//! Per-agent social-network membership and static geography.

use ats_core::{AgentId, AgentRng, NodeId};
use ats_schedule::LocationKind;

// ── Membership ────────────────────────────────────────────────────────────────

/// One agent's membership in one social network: its peer set, the number of
/// joint activities already agreed today, and the daily cap.
#[derive(Clone, Debug, Default)]
pub struct Membership {
    /// Fellow members (never contains the owning agent).
    pub peers: Vec<AgentId>,
    /// Joint activities committed through this network today.
    pub joint_today: u32,
    /// Maximum joint activities per day through this network.
    pub daily_cap: u32,
}

impl Membership {
    pub fn new(daily_cap: u32) -> Self {
        Self { peers: Vec::new(), joint_today: 0, daily_cap }
    }

    /// `true` once today's cap is exhausted.
    #[inline]
    pub fn cap_reached(&self) -> bool {
        self.joint_today >= self.daily_cap
    }

    /// Reset the daily counter (start of a new simulated day).
    #[inline]
    pub fn reset_day(&mut self) {
        self.joint_today = 0;
    }
}

// ── PlaceSet ──────────────────────────────────────────────────────────────────

/// An agent's fixed geography: one anchor node plus a bounded alternate list
/// per location kind, assigned once at bootstrap.
///
/// Location resolution draws uniformly from the anchor and its alternates —
/// there is no dynamic re-selection of preferred places beyond these lists.
#[derive(Clone, Debug)]
pub struct PlaceSet {
    anchors: [NodeId; LocationKind::COUNT],
    alternates: [Vec<NodeId>; LocationKind::COUNT],
}

impl PlaceSet {
    /// A place set with the given anchors and no alternates.
    pub fn new(household: NodeId, work: NodeId, leisure: NodeId) -> Self {
        Self {
            anchors: [household, work, leisure],
            alternates: Default::default(),
        }
    }

    /// Add alternate nodes for one location kind.
    pub fn with_alternates(mut self, kind: LocationKind, nodes: Vec<NodeId>) -> Self {
        self.alternates[kind.idx()] = nodes;
        self
    }

    /// The anchor node for `kind`.
    #[inline]
    pub fn anchor(&self, kind: LocationKind) -> NodeId {
        self.anchors[kind.idx()]
    }

    /// Alternate nodes for `kind` (may be empty).
    pub fn alternates(&self, kind: LocationKind) -> &[NodeId] {
        &self.alternates[kind.idx()]
    }

    /// Resolve a concrete node for an activity at `kind`: a uniform draw
    /// over the anchor and its alternates.  With no alternates this is
    /// deterministic.
    pub fn resolve(&self, kind: LocationKind, rng: &mut AgentRng) -> NodeId {
        let alts = &self.alternates[kind.idx()];
        if alts.is_empty() {
            return self.anchor(kind);
        }
        let pick = rng.gen_range(0..=alts.len());
        if pick == 0 {
            self.anchor(kind)
        } else {
            alts[pick - 1]
        }
    }
}
