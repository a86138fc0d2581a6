//! Planning configuration.

use ats_core::{AgentRng, NetworkKind, MINUTES_PER_DAY};
use ats_schedule::ActivityCategory;
use rand_distr::LogNormal;

use crate::error::{PlanError, PlanResult};

// ── DurationParams ────────────────────────────────────────────────────────────

/// Log-normal duration distribution for one activity category.
///
/// Parameters are in ln-minutes; samples are rounded to whole minutes and
/// clamped to `[1, MINUTES_PER_DAY]`.  `sigma = 0` yields a point mass at
/// `exp(mu)`, which deterministic scenarios rely on.
#[derive(Copy, Clone, Debug)]
pub struct DurationParams {
    dist: LogNormal<f64>,
}

impl DurationParams {
    /// Build from the underlying normal's mean and standard deviation
    /// (ln-minutes).  Fails on a negative or non-finite `sigma`.
    pub fn new(mu: f64, sigma: f64) -> PlanResult<Self> {
        let dist = LogNormal::new(mu, sigma)
            .map_err(|e| PlanError::Config(format!("log-normal({mu}, {sigma}): {e}")))?;
        Ok(Self { dist })
    }

    /// Distribution whose median is `minutes`, with spread `sigma`.
    pub fn with_median(minutes: u32, sigma: f64) -> PlanResult<Self> {
        Self::new((minutes.max(1) as f64).ln(), sigma)
    }

    /// Draw a whole-minute duration.
    pub fn sample(&self, rng: &mut AgentRng) -> u32 {
        let minutes = rng.sample(&self.dist).round();
        minutes.clamp(1.0, MINUTES_PER_DAY as f64) as u32
    }
}

// ── PlanConfig ────────────────────────────────────────────────────────────────

/// Knobs of the daily planning pipeline.
///
/// The retry bound and candidate count are global constants, not
/// per-category — deliberately kept as single open configuration knobs.
#[derive(Clone, Debug)]
pub struct PlanConfig {
    /// Number of independent candidate plans generated per agent per day (K).
    pub candidates: usize,

    /// Bounded-search limit for a conflict-free joint interval; exceeding it
    /// abandons the negotiation attempt.
    pub max_trials: u32,

    /// Candidate start minutes a joint activity may be drawn from.
    pub joint_start_minutes: Vec<u32>,

    /// Per-network participation probability for the negotiation Bernoulli
    /// draw, in `NetworkKind::ALL` order.
    pub participation: [f64; NetworkKind::COUNT],

    /// The activity category negotiated per network kind, in
    /// `NetworkKind::ALL` order.
    pub joint_categories: [ActivityCategory; NetworkKind::COUNT],

    /// Duration distribution per activity category, in
    /// `ActivityCategory::ALL` order (the travel entry is unused).
    pub durations: [DurationParams; ActivityCategory::COUNT],

    /// Gaps shorter than this are not worth traveling for: the exact-fit
    /// fallback then restricts candidates to the preceding entry's location.
    pub min_travel_worth: u32,

    /// Candidates with more location changes than this are discarded before
    /// travel augmentation (bounds pathfinding cost on plans that would
    /// score poorly anyway).
    pub max_location_changes: usize,

    /// Constant travel speed in metres per simulated minute.
    pub speed_m_per_min: f64,
}

impl PlanConfig {
    /// Defaults tuned for a walking-scale urban day: median durations of
    /// 7 h home blocks, 8 h work, 45 min errands, 2 h leisure, 1 h idle.
    pub fn new() -> PlanResult<Self> {
        Ok(Self {
            candidates: 8,
            max_trials: 10,
            joint_start_minutes: vec![8 * 60, 12 * 60, 17 * 60, 18 * 60, 19 * 60],
            participation: [0.4, 0.2, 0.15],
            joint_categories: [
                ActivityCategory::Home,
                ActivityCategory::Work,
                ActivityCategory::Leisure,
            ],
            durations: [
                DurationParams::with_median(420, 0.3)?, // home
                DurationParams::with_median(480, 0.2)?, // work
                DurationParams::with_median(45, 0.5)?,  // errand
                DurationParams::with_median(120, 0.5)?, // leisure
                DurationParams::with_median(60, 0.6)?,  // idle
                DurationParams::with_median(30, 0.0)?,  // travel (unused)
            ],
            min_travel_worth: 30,
            max_location_changes: 8,
            speed_m_per_min: 80.0, // brisk walking pace
        })
    }

    /// Duration distribution for `category`.
    #[inline]
    pub fn duration(&self, category: ActivityCategory) -> &DurationParams {
        &self.durations[category.idx()]
    }

    /// Participation probability for `kind`.
    #[inline]
    pub fn participation(&self, kind: NetworkKind) -> f64 {
        self.participation[kind.idx()]
    }

    /// Category negotiated over `kind`.
    #[inline]
    pub fn joint_category(&self, kind: NetworkKind) -> ActivityCategory {
        self.joint_categories[kind.idx()]
    }
}
