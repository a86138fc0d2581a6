//! Stochastic day-plan generation.
//!
//! Starting from the carried-over working agenda (joint commitments only),
//! the generator repeatedly locates the first uncovered interval of the day
//! and fills it with a randomly drawn individual activity, until the agenda
//! tiles `[0, 1440)`.  Termination is guaranteed by the catalog's
//! always-available idle activities: every iteration covers at least one
//! minute.

use ats_core::{AgentRng, Interval};
use ats_agent::PlaceSet;
use ats_schedule::{Activity, ActivityCategory, Agenda, AgendaEntry, LocationKind};
use tracing::error;

use crate::PlanContext;

/// Stateless generation logic.
pub struct DayPlanGenerator;

impl DayPlanGenerator {
    /// Generate `K` independent candidate plans from the same seed agenda.
    pub fn generate_candidates(
        ctx: &PlanContext<'_>,
        seed: &Agenda,
        places: &PlaceSet,
        rng: &mut AgentRng,
    ) -> Vec<Agenda> {
        (0..ctx.config.candidates)
            .map(|_| Self::generate(ctx, seed, places, rng))
            .collect()
    }

    /// Fill one candidate agenda until it tiles the whole day.
    ///
    /// Each gap is attacked in two stages: first, one duration is sampled
    /// per category and every available activity whose sampled sub-interval
    /// fits the gap becomes an option; if nothing fits, the *entire* gap is
    /// filled with an exact-duration activity, restricted to the preceding
    /// entry's location when the gap is too short to be worth traveling for.
    pub fn generate(
        ctx: &PlanContext<'_>,
        seed: &Agenda,
        places: &PlaceSet,
        rng: &mut AgentRng,
    ) -> Agenda {
        let mut agenda = seed.working_copy();

        while let Some(gap) = agenda.first_gap() {
            let Some((activity, interval, forced_node)) =
                Self::fill_option(ctx, &agenda, gap, rng)
            else {
                // Unreachable for a validated catalog (idle covers every
                // location at every minute); logged severe rather than
                // spinning forever on a defective configuration.
                error!(%gap, weekday = %ctx.weekday, "no activity can fill gap; check the activity catalog");
                break;
            };

            let node = forced_node
                .unwrap_or_else(|| places.resolve(activity.location, rng));
            let minutes = interval.duration() as f64;
            let split = activity.split;
            if let Err(e) = agenda.insert(AgendaEntry { interval, activity: activity.id, node }) {
                error!(%gap, error = %e, "candidate fill produced an overlap");
                break;
            }
            agenda.ledger_mut().credit_split(&split, minutes);
        }

        agenda
    }

    /// Choose how to fill `gap`: the picked activity, its sub-interval, and
    /// (for the constrained fallback) a node forced to the preceding
    /// entry's.
    fn fill_option<'c>(
        ctx: &'c PlanContext<'c>,
        agenda: &Agenda,
        gap: Interval,
        rng: &mut AgentRng,
    ) -> Option<(&'c Activity, Interval, Option<ats_core::NodeId>)> {
        // Stage 1: per-category sampled durations, keeping every available
        // individual activity whose sub-interval fits inside the gap.
        let mut options: Vec<(&Activity, Interval)> = Vec::new();
        for category in ActivityCategory::ALL {
            if category == ActivityCategory::Travel {
                continue;
            }
            let duration = ctx.config.duration(category).sample(rng);
            let interval = Interval::clipped(gap.start, duration);
            if interval.end > gap.end || interval.is_empty() {
                continue;
            }
            for activity in ctx
                .catalog
                .individual_available(category, ctx.weekday, gap.start)
            {
                options.push((activity, interval));
            }
        }
        if let Some(&(activity, interval)) = rng.choose(&options) {
            return Some((activity, interval, None));
        }

        // Stage 2: nothing fit — fill the entire gap with an activity of
        // exactly the gap's duration.  Short gaps additionally pin the
        // location to wherever the agent already is.
        let previous = agenda.entry_before(gap.start);
        let constrain = gap.duration() < ctx.config.min_travel_worth;
        let (location, forced_node): (Option<LocationKind>, Option<ats_core::NodeId>) =
            match previous {
                Some(entry) if constrain => {
                    (Some(ctx.catalog.get(entry.activity).location), Some(entry.node))
                }
                _ => (None, None),
            };

        let fillers = ctx.catalog.gap_fillers(ctx.weekday, gap.start, location);
        rng.choose(&fillers)
            .map(|&activity| (activity, gap, forced_node))
    }
}
