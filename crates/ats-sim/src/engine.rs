//! The `Engine` struct, its day phases, and the per-tick executor.

use ats_core::{ActivityId, AgentId, NeedTimeSplit, NetworkKind, NodeId, Point, SimClock, SimConfig, MINUTES_PER_DAY};
use ats_agent::{AgentRngs, PopulationStore};
use ats_mobility::MovementEngine;
use ats_plan::{DayPlanGenerator, NegotiationCoordinator, PlanConfig, PlanContext, PlanSelector, TravelAugmenter};
use ats_schedule::{ActivityCatalog, Agenda, AgendaEntry, LocationKind, Sociality};
use ats_spatial::{PathNetwork, Router};
use tracing::error;

use crate::observer::EngineObserver;
use crate::SimResult;

// ── Occupancy ─────────────────────────────────────────────────────────────────

/// What an agent's tick amounted to, resolved once per tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Occupancy {
    /// Performing an individual activity at its target node.
    Individual,
    /// Performing a joint activity with at least one co-arrived peer.
    JointPresent,
    /// Scheduled jointly, but no peer has arrived — the fallback alone
    /// activity is credited instead.
    JointFallback,
    /// En route to the scheduled node (implicit travel occupancy).
    Traveling,
    /// No agenda entry covers the current minute — a planning defect.
    Unscheduled,
}

impl Occupancy {
    pub fn as_str(self) -> &'static str {
        match self {
            Occupancy::Individual    => "individual",
            Occupancy::JointPresent  => "joint",
            Occupancy::JointFallback => "fallback",
            Occupancy::Traveling     => "traveling",
            Occupancy::Unscheduled   => "unscheduled",
        }
    }
}

impl std::fmt::Display for Occupancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AgentStatus ───────────────────────────────────────────────────────────────

/// One agent's observable state after a tick, for recorders and debuggers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AgentStatus {
    /// The activity credited this tick (the fallback id when occupancy is
    /// `JointFallback`, the travel id while traveling).
    pub activity: ActivityId,
    pub occupancy: Occupancy,
    /// Node the agent stands on; `NodeId::INVALID` while in transit.
    pub node: NodeId,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The main simulation driver.
///
/// Owns all shared state (catalog, network, population arena, movement) and
/// exposes the ordered per-day entry points plus read accessors for
/// recording/visualization collaborators.  Construct via
/// [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<R: Router> {
    pub config: SimConfig,
    pub plan_config: PlanConfig,
    pub catalog: ActivityCatalog,
    pub network: PathNetwork,
    pub pop: PopulationStore,
    pub rngs: AgentRngs,
    pub movement: MovementEngine,
    pub router: R,
    pub clock: SimClock,

    /// Candidate plans per agent, alive only between generation and
    /// selection.
    candidates: Vec<Vec<Agenda>>,
}

impl<R: Router> Engine<R> {
    pub(crate) fn new(
        config: SimConfig,
        plan_config: PlanConfig,
        catalog: ActivityCatalog,
        network: PathNetwork,
        pop: PopulationStore,
        rngs: AgentRngs,
        movement: MovementEngine,
        router: R,
    ) -> Self {
        let clock = config.make_clock();
        let count = pop.count;
        Self {
            config,
            plan_config,
            catalog,
            network,
            pop,
            rngs,
            movement,
            router,
            clock,
            candidates: vec![Vec::new(); count],
        }
    }

    // ── Public run loops ──────────────────────────────────────────────────

    /// Run all configured days.
    pub fn run<O: EngineObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        for _ in 0..self.config.days {
            self.run_day(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run one full day: planning phases, then 1,440 execution ticks.
    pub fn run_day<O: EngineObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        debug_assert!(self.clock.is_day_start(), "run_day must start at minute 0");
        let day = self.clock.day_index();

        self.pop.begin_day();
        observer.on_day_start(day, self.clock.weekday());

        self.plan_joint_activities();
        self.carry_over_joint_activities();
        self.plan_individual_activities();
        self.choose_best_agenda();
        for agent in 0..self.pop.count {
            observer.on_agenda_committed(AgentId(agent as u32), &self.pop.committed[agent]);
        }

        for _ in 0..MINUTES_PER_DAY {
            let tick = self.clock.current_tick;
            let statuses = self.execute_tick();
            observer.on_tick(tick, &statuses);
            self.clock.advance();
        }

        observer.on_day_end(day, &self.pop);
        Ok(())
    }

    // ── Phase 1: joint-activity negotiation ───────────────────────────────

    /// For each network kind in fixed order, every agent takes one turn as
    /// initiator.  Commits land directly in the participants' joint agendas
    /// through the arena.
    pub fn plan_joint_activities(&mut self) {
        let ctx = PlanContext::new(&self.catalog, &self.plan_config, self.clock.weekday());
        for kind in NetworkKind::ALL {
            for agent in 0..self.pop.count {
                NegotiationCoordinator::negotiate(
                    &ctx,
                    &mut self.pop,
                    &mut self.rngs,
                    AgentId(agent as u32),
                    kind,
                );
            }
        }
    }

    // ── Phase 2: carry-over ───────────────────────────────────────────────

    /// Seed each agent's working agenda from its joint agenda, crediting the
    /// planned minutes of the carried entries into the working ledger.
    ///
    /// Runs only after *all* agents finished negotiating — peers may have
    /// written into this agent's joint agenda at any point of phase 1.
    pub fn carry_over_joint_activities(&mut self) {
        for agent in 0..self.pop.count {
            let mut working = self.pop.joint[agent].working_copy();
            working.reset_ledger();
            let credits: Vec<(NeedTimeSplit, f64)> = working
                .iter()
                .map(|e| (self.catalog.get(e.activity).split, e.interval.duration() as f64))
                .collect();
            for (split, minutes) in credits {
                working.ledger_mut().credit_split(&split, minutes);
            }
            self.pop.working[agent] = working;
        }
    }

    // ── Phase 3: individual-plan generation ───────────────────────────────

    /// Generate K candidate plans per agent from its working agenda.
    pub fn plan_individual_activities(&mut self) {
        let ctx = PlanContext::new(&self.catalog, &self.plan_config, self.clock.weekday());
        for agent in 0..self.pop.count {
            self.candidates[agent] = DayPlanGenerator::generate_candidates(
                &ctx,
                &self.pop.working[agent],
                &self.pop.places[agent],
                self.rngs.get_mut(AgentId(agent as u32)),
            );
        }
    }

    // ── Phase 4: selection ────────────────────────────────────────────────

    /// Augment candidates with travel, score them against the agent's
    /// target split, and commit the winner's *pre-augmentation* agenda
    /// (travel is re-derived lazily during execution).  All other
    /// candidates are discarded.
    pub fn choose_best_agenda(&mut self) {
        let ctx = PlanContext::new(&self.catalog, &self.plan_config, self.clock.weekday());
        for agent in 0..self.pop.count {
            let raw = std::mem::take(&mut self.candidates[agent]);
            if raw.is_empty() {
                continue;
            }
            let augmented: Vec<Option<Agenda>> = raw
                .iter()
                .map(|c| TravelAugmenter::augment(&ctx, c, &self.router, &self.network))
                .collect();

            let winner = match PlanSelector::select(&augmented, &self.pop.target[agent]) {
                Some(i) => i,
                None => {
                    // Every candidate was discarded — an extreme
                    // configuration (cap too low, network broken).  Fall
                    // back to the first raw candidate so the day stays
                    // executable.
                    error!(agent, "all candidate plans discarded; committing unaugmented fallback");
                    0
                }
            };

            let mut committed = raw.into_iter().nth(winner).unwrap_or_default();
            committed.reset_ledger();
            self.pop.committed[agent] = committed;
        }
    }

    // ── Phase 5: execution ────────────────────────────────────────────────

    /// Execute one tick for every agent.  The caller (or [`run_day`]) is
    /// responsible for advancing the clock afterwards — all agents see the
    /// same minute.
    pub fn execute_tick(&mut self) -> Vec<AgentStatus> {
        (0..self.pop.count)
            .map(|agent| self.execute_activity(AgentId(agent as u32)))
            .collect()
    }

    /// Execute one tick for one agent: resolve the scheduled episode, move
    /// towards its node if necessary, and credit the appropriate need split.
    pub fn execute_activity(&mut self, agent: AgentId) -> AgentStatus {
        let minute = self.clock.minute_of_day();
        let Some(entry) = self.pop.committed[agent.index()].entry_at(minute).copied() else {
            error!(agent = %agent, minute, "no agenda entry covers the current minute");
            return AgentStatus {
                activity: ActivityId::INVALID,
                occupancy: Occupancy::Unscheduled,
                node: self.movement.node(agent),
            };
        };

        if self.movement.node(agent) != entry.node {
            return self.travel_towards(agent, &entry);
        }

        // At the target node: resolve the tick's occupancy once, then credit.
        let activity = self.catalog.get(entry.activity);
        let (credited, split, occupancy) = match activity.sociality {
            Sociality::Individual => (entry.activity, activity.split, Occupancy::Individual),
            Sociality::Joint { network, fallback } => {
                if self.any_peer_arrived(agent, network, &entry, minute) {
                    (entry.activity, activity.split, Occupancy::JointPresent)
                } else {
                    let alone = self.catalog.get(fallback);
                    (fallback, alone.split, Occupancy::JointFallback)
                }
            }
        };

        self.pop.committed[agent.index()]
            .ledger_mut()
            .credit_split(&split, 1.0);

        AgentStatus { activity: credited, occupancy, node: entry.node }
    }

    /// One tick of travel towards the scheduled node: lazily initialize a
    /// path, advance, and credit the tick as travel time.
    fn travel_towards(&mut self, agent: AgentId, entry: &AgendaEntry) -> AgentStatus {
        if !self.movement.in_transit(agent) {
            let from = self.movement.node(agent);
            match self.router.route(&self.network, from, entry.node) {
                Ok(route) => {
                    if let Err(e) = self.movement.begin(agent, &route, entry.node, &self.network) {
                        error!(agent = %agent, error = %e, "could not start travel");
                    }
                }
                Err(e) => {
                    // Configuration defect: scheduled nodes are not
                    // connected.  The agent stays put and the tick still
                    // counts as (stalled) travel time.
                    error!(agent = %agent, error = %e, "no path to scheduled location");
                }
            }
        }
        if self.movement.in_transit(agent) {
            if let Err(e) = self.movement.step(agent, &self.network) {
                error!(agent = %agent, error = %e, "movement step failed");
            }
        }

        let travel = self.catalog.travel_id();
        let split = self.catalog.get(travel).split;
        self.pop.committed[agent.index()]
            .ledger_mut()
            .credit_split(&split, 1.0);

        AgentStatus {
            activity: travel,
            occupancy: Occupancy::Traveling,
            node: self.movement.node(agent),
        }
    }

    /// `true` if any peer of `agent` in `network` is scheduled for the same
    /// activity instance (same activity, same interval) and has arrived at
    /// its own resolved node.
    ///
    /// Only the activity's configured network is examined; co-presence
    /// through other networks does not count.
    fn any_peer_arrived(
        &self,
        agent: AgentId,
        network: NetworkKind,
        entry: &AgendaEntry,
        minute: u32,
    ) -> bool {
        self.pop
            .membership(agent, network)
            .peers
            .iter()
            .any(|&peer| {
                self.pop.committed[peer.index()]
                    .entry_at(minute)
                    .is_some_and(|pe| {
                        pe.activity == entry.activity
                            && pe.interval == entry.interval
                            && self.movement.node(peer) == pe.node
                    })
            })
    }

    // ── Read accessors for collaborators ──────────────────────────────────

    /// The activity scheduled for `agent` right now, if any.
    pub fn current_activity(&self, agent: AgentId) -> Option<ActivityId> {
        self.pop.committed[agent.index()]
            .entry_at(self.clock.minute_of_day())
            .map(|e| e.activity)
    }

    /// The agent's exact current position.
    pub fn current_position(&self, agent: AgentId) -> Point {
        self.movement.position(agent)
    }

    /// The node the agent stands on; `NodeId::INVALID` while in transit.
    pub fn current_node(&self, agent: AgentId) -> NodeId {
        self.movement.node(agent)
    }

    /// The committed agenda being executed today.
    pub fn committed_agenda(&self, agent: AgentId) -> &Agenda {
        &self.pop.committed[agent.index()]
    }

    /// The agent's home anchor node.
    pub fn home_node(&self, agent: AgentId) -> NodeId {
        self.pop.places[agent.index()].anchor(LocationKind::Household)
    }
}
