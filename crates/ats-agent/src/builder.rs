//! Validated construction of `PopulationStore` + `AgentRngs`.

use ats_core::{AgentId, NeedTimeSplit, NetworkKind};

use crate::error::{AgentError, AgentResult};
use crate::membership::{Membership, PlaceSet};
use crate::store::{AgentRngs, PopulationStore};

/// Fully-specified parameters for one agent.
pub struct AgentSpec {
    /// Target fractional need distribution, fixed for the whole run.
    pub target: NeedTimeSplit,
    /// Anchor + alternate nodes per location kind.
    pub places: PlaceSet,
    /// Daily joint-activity cap per network kind, in `NetworkKind::ALL` order.
    pub daily_caps: [u32; NetworkKind::COUNT],
}

/// Builder for the population arena.
///
/// Agents are added first; network links afterwards, referencing the ids
/// `add_agent` returned.  `build()` validates the link structure.
pub struct PopulationBuilder {
    seed: u64,
    specs: Vec<AgentSpec>,
    links: Vec<(AgentId, AgentId, NetworkKind)>,
}

impl PopulationBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, specs: Vec::new(), links: Vec::new() }
    }

    /// Add an agent and return its id (sequential from 0).
    pub fn add_agent(&mut self, spec: AgentSpec) -> AgentId {
        let id = AgentId(self.specs.len() as u32);
        self.specs.push(spec);
        id
    }

    /// Link `a` and `b` as peers in `kind` (symmetric).
    pub fn link(&mut self, a: AgentId, b: AgentId, kind: NetworkKind) {
        self.links.push((a, b, kind));
    }

    /// Link every pair in `members` as peers in `kind` (a full clique — the
    /// usual shape for households and friend groups).
    pub fn link_all(&mut self, members: &[AgentId], kind: NetworkKind) {
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                self.link(a, b, kind);
            }
        }
    }

    /// Validate and construct the arena plus per-agent RNGs.
    pub fn build(self) -> AgentResult<(PopulationStore, AgentRngs)> {
        let count = self.specs.len();

        let mut networks: Vec<[Membership; NetworkKind::COUNT]> = self
            .specs
            .iter()
            .map(|s| {
                [
                    Membership::new(s.daily_caps[0]),
                    Membership::new(s.daily_caps[1]),
                    Membership::new(s.daily_caps[2]),
                ]
            })
            .collect();

        for (a, b, kind) in self.links {
            if a.index() >= count || b.index() >= count {
                return Err(AgentError::UnknownAgent(if a.index() >= count { a } else { b }));
            }
            if a == b {
                return Err(AgentError::SelfLink(a));
            }
            let peers_a = &mut networks[a.index()][kind.idx()].peers;
            if !peers_a.contains(&b) {
                peers_a.push(b);
            }
            let peers_b = &mut networks[b.index()][kind.idx()].peers;
            if !peers_b.contains(&a) {
                peers_b.push(a);
            }
        }

        let mut target = Vec::with_capacity(count);
        let mut places = Vec::with_capacity(count);
        for spec in self.specs {
            target.push(spec.target);
            places.push(spec.places);
        }

        let store = PopulationStore::new(target, places, networks);
        let rngs = AgentRngs::new(count, self.seed);
        Ok((store, rngs))
    }
}
