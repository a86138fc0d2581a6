//! Candidate scoring and selection.
//!
//! A candidate's quality is the mean squared error between its ledger's
//! relative need shares and the agent's target split — lower is better.
//! Selection is argmin over the *augmented* candidates (travel time counts
//! against the score); the committed plan, however, is the winner's
//! pre-augmentation agenda, with travel re-derived lazily during execution.

use ats_core::{Need, NeedLedger, NeedTimeSplit};
use ats_schedule::Agenda;

/// Stateless selection logic.
pub struct PlanSelector;

impl PlanSelector {
    /// Mean squared error between `ledger`'s relative shares and `target`.
    pub fn score(ledger: &NeedLedger, target: &NeedTimeSplit) -> f64 {
        let shares = ledger.relative();
        let sum: f64 = Need::ALL
            .iter()
            .map(|&need| {
                let diff = shares[need.idx()] - target.fraction(need);
                diff * diff
            })
            .sum();
        sum / Need::COUNT as f64
    }

    /// Index of the best-scoring augmented candidate; discarded candidates
    /// (`None`) are never selected, and ties keep the first seen.
    ///
    /// Returns `None` only when every candidate was discarded.
    pub fn select(augmented: &[Option<Agenda>], target: &NeedTimeSplit) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in augmented.iter().enumerate() {
            let Some(agenda) = candidate else { continue };
            let score = Self::score(agenda.ledger(), target);
            let better = match best {
                None => true,
                Some((_, best_score)) => score < best_score,
            };
            if better {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i)
    }
}
