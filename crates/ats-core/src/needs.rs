//! Need accounting: the closed [`Need`] set, target [`NeedTimeSplit`]s, and
//! the per-day [`NeedLedger`].
//!
//! # Model
//!
//! Every activity divides each minute of its duration across fundamental
//! needs according to an immutable `NeedTimeSplit` (fractions summing to 1;
//! the [`Need::None`] bucket absorbs the residual so unmodeled time — idle,
//! sleep, travel — is still accounted for).  During planning and execution,
//! minutes are credited into a `NeedLedger`, which can be read back as a
//! relative distribution for comparison against an agent's target split.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Need ─────────────────────────────────────────────────────────────────────

/// A fundamental human-need category an activity can satisfy.
///
/// The set is closed; [`Need::None`] is the sentinel for unmodeled time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Need {
    /// Sentinel for time that satisfies no modeled need (idle, sleep, travel).
    None,
    Subsistence,
    Protection,
    Affection,
    Understanding,
    Participation,
    Leisure,
    Creation,
    Identity,
    Freedom,
}

impl Need {
    /// Number of need categories, including the `None` sentinel.
    pub const COUNT: usize = 10;

    /// All needs in declaration order, `None` first.
    pub const ALL: [Need; Need::COUNT] = [
        Need::None,
        Need::Subsistence,
        Need::Protection,
        Need::Affection,
        Need::Understanding,
        Need::Participation,
        Need::Leisure,
        Need::Creation,
        Need::Identity,
        Need::Freedom,
    ];

    /// Position in [`Need::ALL`]; used to index fixed-size need tables.
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    /// Lower-case label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Need::None          => "none",
            Need::Subsistence   => "subsistence",
            Need::Protection    => "protection",
            Need::Affection     => "affection",
            Need::Understanding => "understanding",
            Need::Participation => "participation",
            Need::Leisure       => "leisure",
            Need::Creation      => "creation",
            Need::Identity      => "identity",
            Need::Freedom       => "freedom",
        }
    }
}

impl fmt::Display for Need {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── NeedTimeSplit ─────────────────────────────────────────────────────────────

/// An immutable fractional allocation of one unit of activity-time across
/// needs.  Fractions always sum to exactly 1; [`Need::None`] holds whatever
/// the explicitly assigned needs leave over.
///
/// Construct via [`NeedTimeSplit::builder`], which validates the fractions
/// and returns a `Result` — a malformed split is rejected at construction
/// rather than discovered mid-simulation.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeedTimeSplit {
    fractions: [f64; Need::COUNT],
}

impl NeedTimeSplit {
    /// Start building a split from (need, fraction) assignments.
    pub fn builder() -> NeedTimeSplitBuilder {
        NeedTimeSplitBuilder { fractions: [0.0; Need::COUNT] }
    }

    /// The split that assigns all time to [`Need::None`] — used by idle,
    /// sleep, and travel activities.
    pub fn unmodeled() -> Self {
        let mut fractions = [0.0; Need::COUNT];
        fractions[Need::None.idx()] = 1.0;
        Self { fractions }
    }

    /// Fraction of time this split assigns to `need`.
    #[inline]
    pub fn fraction(&self, need: Need) -> f64 {
        self.fractions[need.idx()]
    }

    /// Iterate `(need, fraction)` pairs with non-zero fractions.
    pub fn iter(&self) -> impl Iterator<Item = (Need, f64)> + '_ {
        Need::ALL
            .iter()
            .map(|&n| (n, self.fractions[n.idx()]))
            .filter(|&(_, f)| f > 0.0)
    }
}

/// Builder for [`NeedTimeSplit`]; see [`NeedTimeSplit::builder`].
pub struct NeedTimeSplitBuilder {
    fractions: [f64; Need::COUNT],
}

impl NeedTimeSplitBuilder {
    /// Assign `fraction` of activity-time to `need`.  Assignments to
    /// [`Need::None`] are ignored — it always receives exactly the residual
    /// the other needs leave over.
    pub fn with(mut self, need: Need, fraction: f64) -> Self {
        self.fractions[need.idx()] = fraction;
        self
    }

    /// Validate and freeze the split.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSplit`] if any fraction is outside [0, 1]
    /// or the explicitly assigned fractions exceed 1 (beyond float rounding).
    pub fn build(self) -> CoreResult<NeedTimeSplit> {
        const EPS: f64 = 1e-9;

        for (i, &f) in self.fractions.iter().enumerate() {
            if !(0.0..=1.0 + EPS).contains(&f) || f.is_nan() {
                return Err(CoreError::InvalidSplit {
                    reason: format!("fraction {f} for {} outside [0, 1]", Need::ALL[i]),
                });
            }
        }
        let assigned: f64 = self.fractions.iter().skip(1).sum();
        if assigned > 1.0 + EPS {
            return Err(CoreError::InvalidSplit {
                reason: format!("assigned fractions sum to {assigned} > 1"),
            });
        }

        // Residual bucket: whatever the modeled needs leave over is
        // unmodeled time.
        let mut fractions = self.fractions;
        fractions[Need::None.idx()] = (1.0 - assigned).max(0.0);
        Ok(NeedTimeSplit { fractions })
    }
}

// ── NeedLedger ────────────────────────────────────────────────────────────────

/// Accumulated actual minutes per need.
///
/// Grows monotonically via additive credits during one simulated day and is
/// reset at day start.  Exclusively owned by the agenda/agent accumulating it.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeedLedger {
    minutes: [f64; Need::COUNT],
}

impl NeedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `minutes` to a single need.
    #[inline]
    pub fn credit(&mut self, need: Need, minutes: f64) {
        debug_assert!(minutes >= 0.0, "ledger credits are additive");
        self.minutes[need.idx()] += minutes;
    }

    /// Credit `minutes` of activity-time divided according to `split`.
    ///
    /// Because split fractions sum to 1, this adds exactly `minutes` to the
    /// ledger total.
    pub fn credit_split(&mut self, split: &NeedTimeSplit, minutes: f64) {
        for (need, fraction) in split.iter() {
            self.credit(need, fraction * minutes);
        }
    }

    /// Minutes accumulated for `need`.
    #[inline]
    pub fn minutes(&self, need: Need) -> f64 {
        self.minutes[need.idx()]
    }

    /// Total minutes accumulated across all needs.
    pub fn total(&self) -> f64 {
        self.minutes.iter().sum()
    }

    /// Per-need share of the total, as a fraction table.
    ///
    /// An empty ledger yields all-zero shares (not NaN).
    pub fn relative(&self) -> [f64; Need::COUNT] {
        let total = self.total();
        if total <= 0.0 {
            return [0.0; Need::COUNT];
        }
        let mut rel = self.minutes;
        for v in &mut rel {
            *v /= total;
        }
        rel
    }

    /// Zero all accumulated minutes (start of a new simulated day).
    pub fn reset(&mut self) {
        self.minutes = [0.0; Need::COUNT];
    }
}
