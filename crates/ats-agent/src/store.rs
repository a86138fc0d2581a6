//! Core population storage: `PopulationStore` (SoA data) and `AgentRngs`
//! (per-agent RNG).
//!
//! # Why two structs?
//!
//! The planning phases need `&mut AgentRngs` (each agent's RNG advances as
//! it draws) alongside varied borrows of the arena itself.  Keeping RNGs in
//! a separate struct lets a phase hold `&mut AgentRngs` and
//! `&mut PopulationStore` (or a shared borrow) without fighting the borrow
//! checker over one combined struct.

use ats_core::{AgentId, AgentRng, NeedTimeSplit, NetworkKind};
use ats_schedule::Agenda;

use crate::membership::{Membership, PlaceSet};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`PopulationStore`] for
/// clean simultaneous borrows.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── PopulationStore ───────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is
/// the index into all of them.  Construct via
/// [`PopulationBuilder`][crate::PopulationBuilder].
pub struct PopulationStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Immutable bootstrap state ─────────────────────────────────────────
    /// Target fractional need distribution per agent.
    pub target: Vec<NeedTimeSplit>,

    /// Anchor + alternate nodes per location kind, per agent.
    pub places: Vec<PlaceSet>,

    /// Network memberships per agent, indexed by `NetworkKind::idx()`.
    pub networks: Vec<[Membership; NetworkKind::COUNT]>,

    // ── Per-day mutable state ─────────────────────────────────────────────
    /// The agenda being executed.  Replaced by plan selection each day; its
    /// ledger accumulates *actual* minutes during execution.
    pub committed: Vec<Agenda>,

    /// Network-committed joint activities only.  Rebuilt before each day by
    /// the negotiation phase; peers write into it through the arena.
    pub joint: Vec<Agenda>,

    /// Joint commitments carried over as the seed for candidate generation;
    /// its ledger holds the *planned* minutes of the carried entries.
    pub working: Vec<Agenda>,
}

impl PopulationStore {
    pub(crate) fn new(
        target: Vec<NeedTimeSplit>,
        places: Vec<PlaceSet>,
        networks: Vec<[Membership; NetworkKind::COUNT]>,
    ) -> Self {
        let count = target.len();
        Self {
            count,
            target,
            places,
            networks,
            committed: vec![Agenda::new(); count],
            joint: vec![Agenda::new(); count],
            working: vec![Agenda::new(); count],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// One agent's membership in one network.
    #[inline]
    pub fn membership(&self, agent: AgentId, kind: NetworkKind) -> &Membership {
        &self.networks[agent.index()][kind.idx()]
    }

    #[inline]
    pub fn membership_mut(&mut self, agent: AgentId, kind: NetworkKind) -> &mut Membership {
        &mut self.networks[agent.index()][kind.idx()]
    }

    /// Reset all per-day state: joint and working agendas are cleared, joint
    /// counters zeroed, and each committed agenda's ledger zeroed so it can
    /// accumulate the new day's executed minutes.
    pub fn begin_day(&mut self) {
        for i in 0..self.count {
            self.joint[i].clear();
            self.working[i].clear();
            self.committed[i].reset_ledger();
            for membership in &mut self.networks[i] {
                membership.reset_day();
            }
        }
    }
}
