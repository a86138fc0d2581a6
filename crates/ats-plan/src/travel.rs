//! Travel augmentation of candidate plans.
//!
//! Walks a tiled candidate in chronological order; whenever consecutive
//! episodes target different nodes the router supplies a shortest path,
//! whose length becomes a whole-minute travel duration carved out of the
//! *destination* episode.  Candidates needing more location changes than
//! the configured bound are discarded outright — they would score poorly
//! anyway, and skipping them bounds pathfinding cost.

use ats_spatial::{PathNetwork, Router};
use ats_schedule::{Agenda, AgendaEntry};
use ats_core::Interval;
use tracing::error;

use crate::PlanContext;

/// Stateless augmentation logic.
pub struct TravelAugmenter;

impl TravelAugmenter {
    /// Augment `candidate` with travel episodes.
    ///
    /// Returns `None` when the candidate is discarded: too many location
    /// changes, or a missing path between scheduled nodes (a network
    /// configuration defect, logged severe).
    pub fn augment<R: Router>(
        ctx: &PlanContext<'_>,
        candidate: &Agenda,
        router: &R,
        network: &PathNetwork,
    ) -> Option<Agenda> {
        if Self::location_changes(candidate) > ctx.config.max_location_changes {
            return None;
        }

        let travel_id = ctx.catalog.travel_id();
        let travel_split = ctx.catalog.get(travel_id).split;
        let speed = ctx.config.speed_m_per_min;

        let mut augmented = Agenda::new();
        let mut previous_node = None;

        for entry in candidate.iter() {
            let split = ctx.catalog.get(entry.activity).split;

            let travel_minutes = match previous_node {
                Some(from) if from != entry.node => {
                    match router.route(network, from, entry.node) {
                        Ok(route) => route.travel_minutes(speed),
                        Err(e) => {
                            error!(error = %e, "no path between scheduled locations; check the path network");
                            return None;
                        }
                    }
                }
                _ => 0,
            };

            if travel_minutes >= entry.interval.duration() {
                // Travel consumes the whole episode.
                Self::push(
                    &mut augmented,
                    AgendaEntry { interval: entry.interval, activity: travel_id, node: entry.node },
                    &travel_split,
                )?;
            } else if travel_minutes > 0 {
                let split_at = entry.interval.start + travel_minutes;
                Self::push(
                    &mut augmented,
                    AgendaEntry {
                        interval: Interval::new(entry.interval.start, split_at),
                        activity: travel_id,
                        node: entry.node,
                    },
                    &travel_split,
                )?;
                Self::push(
                    &mut augmented,
                    AgendaEntry {
                        interval: Interval::new(split_at, entry.interval.end),
                        activity: entry.activity,
                        node: entry.node,
                    },
                    &split,
                )?;
            } else {
                Self::push(&mut augmented, *entry, &split)?;
            }

            previous_node = Some(entry.node);
        }

        Some(augmented)
    }

    /// Number of consecutive-episode node changes across the candidate.
    pub fn location_changes(candidate: &Agenda) -> usize {
        let mut changes = 0;
        let mut previous = None;
        for entry in candidate.iter() {
            if let Some(prev) = previous {
                if prev != entry.node {
                    changes += 1;
                }
            }
            previous = Some(entry.node);
        }
        changes
    }

    /// Insert and credit one augmented entry.  The candidate tiles the day
    /// and splits preserve interval bounds, so insertion cannot overlap; a
    /// failure here means the augmenter itself is broken.
    fn push(agenda: &mut Agenda, entry: AgendaEntry, split: &ats_core::NeedTimeSplit) -> Option<()> {
        let minutes = entry.interval.duration() as f64;
        if let Err(e) = agenda.insert(entry) {
            error!(error = %e, "travel augmentation produced an overlap");
            return None;
        }
        agenda.ledger_mut().credit_split(split, minutes);
        Some(())
    }
}
