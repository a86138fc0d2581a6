//! Joint-activity negotiation.
//!
//! For one network of one initiating agent, [`NegotiationCoordinator`]
//! decides whether a joint activity happens today, finds a conflict-free
//! interval for all participants, picks a matching activity, and commits it
//! into every participant's joint agenda through the population arena.
//!
//! All cross-agent effects are writes through `&mut PopulationStore`; no
//! agent ever holds a handle into another agent's state.  The engine calls
//! this for every agent and every network kind in a fixed order, completing
//! the whole phase before any carry-over happens — the correctness of the
//! shared joint agendas depends on that phase barrier.

use ats_core::{AgentId, Interval, NetworkKind};
use ats_agent::{AgentRngs, PopulationStore};
use tracing::error;

use crate::PlanContext;

/// Stateless negotiation logic; all state lives in the arena and RNGs.
pub struct NegotiationCoordinator;

impl NegotiationCoordinator {
    /// Run one negotiation round for `initiator` over `kind`.
    ///
    /// A round that fails eligibility, finds no co-eligible peer, or
    /// exhausts the bounded interval search is a silent no-op — expected
    /// control flow, not an error.  A category/day with zero matching joint
    /// activities is a catalog configuration defect: logged severe and
    /// abandoned.
    pub fn negotiate(
        ctx: &PlanContext<'_>,
        pop: &mut PopulationStore,
        rngs: &mut AgentRngs,
        initiator: AgentId,
        kind: NetworkKind,
    ) {
        if !Self::eligible(ctx, pop, rngs, initiator, kind) {
            return;
        }

        // Every peer applies the identical eligibility test, with its own
        // RNG, independently of the initiator's draw.
        let peers = pop.membership(initiator, kind).peers.clone();
        let mut participants: Vec<AgentId> = vec![initiator];
        participants.extend(
            peers
                .iter()
                .copied()
                .filter(|&peer| Self::eligible(ctx, pop, rngs, peer, kind)),
        );
        if participants.len() < 2 {
            return; // nobody to be joint with
        }

        let category = ctx.config.joint_category(kind);

        // Bounded search for an interval free in every participant's joint
        // agenda.  Exhausting the trial bound abandons the attempt for this
        // network this round.
        let Some(interval) = Self::find_interval(ctx, pop, rngs, &participants, kind) else {
            return;
        };

        let options =
            ctx.catalog
                .joint_available(kind, category, ctx.weekday, interval.start);
        let Some(activity) = rngs.get_mut(initiator).choose(&options).copied() else {
            // Documented precondition: the catalog always provides at least
            // one joint activity per negotiated category and start window.
            error!(
                network = %kind,
                category = %category,
                weekday = %ctx.weekday,
                start = interval.start,
                "no joint activity matches; check the activity catalog"
            );
            return;
        };

        // Commit: the same activity for everyone, each participant's own
        // node resolved exactly once, counters incremented together.
        for &agent in &participants {
            let node = pop.places[agent.index()].resolve(activity.location, rngs.get_mut(agent));
            let entry = ats_schedule::AgendaEntry { interval, activity: activity.id, node };
            if let Err(e) = pop.joint[agent.index()].insert(entry) {
                // The interval was checked conflict-free above; reaching
                // this means the joint agendas changed mid-commit.
                error!(agent = %agent, error = %e, "joint commit failed after conflict check");
                continue;
            }
            pop.membership_mut(agent, kind).joint_today += 1;
        }
    }

    /// The shared eligibility test: daily cap not reached, joint agenda not
    /// yet fully planned, and a participation Bernoulli draw passes.
    fn eligible(
        ctx: &PlanContext<'_>,
        pop: &PopulationStore,
        rngs: &mut AgentRngs,
        agent: AgentId,
        kind: NetworkKind,
    ) -> bool {
        let membership = pop.membership(agent, kind);
        !membership.cap_reached()
            && !pop.joint[agent.index()].is_fully_planned()
            && rngs.get_mut(agent).gen_bool(ctx.config.participation(kind))
    }

    /// Sample (duration, start) pairs until one produces an interval that
    /// overlaps no participant's joint agenda, up to the configured trial
    /// bound.  The initiator's RNG drives all draws.
    fn find_interval(
        ctx: &PlanContext<'_>,
        pop: &PopulationStore,
        rngs: &mut AgentRngs,
        participants: &[AgentId],
        kind: NetworkKind,
    ) -> Option<Interval> {
        let category = ctx.config.joint_category(kind);
        let rng = rngs.get_mut(participants[0]);

        for _ in 0..ctx.config.max_trials {
            let duration = ctx.config.duration(category).sample(rng);
            let &start = rng.choose(&ctx.config.joint_start_minutes)?;
            let interval = Interval::clipped(start, duration);
            if interval.is_empty() {
                continue;
            }
            let free = participants
                .iter()
                .all(|&agent| !pop.joint[agent.index()].overlaps(interval));
            if free {
                return Some(interval);
            }
        }
        None
    }
}
