//! Activity value types.
//!
//! An [`Activity`] is an immutable catalog entry; agendas reference it by
//! [`ActivityId`] and the catalog is the single owner of the definitions.
//! The joint/individual distinction lives in [`Sociality`]: a joint activity
//! names the social network whose peers it requires and a designated
//! fallback activity performed alone when no peer shows up.

use ats_core::{ActivityId, NeedTimeSplit, NetworkKind};

use crate::WeekCalendar;

// ── ActivityCategory ──────────────────────────────────────────────────────────

/// Coarse activity class used for duration sampling and catalog queries.
///
/// The plan generator samples one candidate duration per category; the
/// negotiation phase maps each social network to one category.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityCategory {
    /// In-home activities (sleep, meals, housework).
    Home,
    /// Employment and work-adjacent activities.
    Work,
    /// Errands: shopping, appointments, family care.
    Errand,
    /// Leisure and social activities.
    Leisure,
    /// Low-effort filler, available anywhere at any time.
    Idle,
    /// Movement between locations.  Never chosen by the plan generator;
    /// inserted by the travel augmenter and the executor only.
    Travel,
}

impl ActivityCategory {
    pub const COUNT: usize = 6;

    /// All categories in declaration order.
    pub const ALL: [ActivityCategory; ActivityCategory::COUNT] = [
        ActivityCategory::Home,
        ActivityCategory::Work,
        ActivityCategory::Errand,
        ActivityCategory::Leisure,
        ActivityCategory::Idle,
        ActivityCategory::Travel,
    ];

    /// Position in [`ActivityCategory::ALL`].
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityCategory::Home    => "home",
            ActivityCategory::Work    => "work",
            ActivityCategory::Errand  => "errand",
            ActivityCategory::Leisure => "leisure",
            ActivityCategory::Idle    => "idle",
            ActivityCategory::Travel  => "travel",
        }
    }
}

impl std::fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LocationKind ──────────────────────────────────────────────────────────────

/// The place category an activity is performed at.
///
/// Each agent carries one anchor node plus a bounded alternate list per
/// location kind, assigned at bootstrap.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationKind {
    /// The agent's home (household and family-care activities).
    Household,
    /// The agent's workplace.
    Work,
    /// Leisure venues (parks, shops, restaurants).
    Leisure,
}

impl LocationKind {
    pub const COUNT: usize = 3;

    pub const ALL: [LocationKind; LocationKind::COUNT] =
        [LocationKind::Household, LocationKind::Work, LocationKind::Leisure];

    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Household => "household",
            LocationKind::Work      => "work",
            LocationKind::Leisure   => "leisure",
        }
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Sociality ─────────────────────────────────────────────────────────────────

/// Whether an activity is performed alone or with network peers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sociality {
    /// Performed alone; credited unconditionally.
    Individual,
    /// Requires co-present peers from `network`.  When no peer scheduled for
    /// the same instance has arrived, the agent performs `fallback` instead.
    Joint {
        network: NetworkKind,
        /// The designated alone-activity credited when no peer is present.
        /// Must reference an individual activity in the same catalog.
        fallback: ActivityId,
    },
}

impl Sociality {
    #[inline]
    pub fn is_joint(self) -> bool {
        matches!(self, Sociality::Joint { .. })
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

/// One immutable activity definition in the shared catalog.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activity {
    /// Catalog index, assigned by the builder.
    pub id: ActivityId,
    /// Unique human-readable description.
    pub name: String,
    pub category: ActivityCategory,
    /// Place category the activity is performed at.  Unused for the travel
    /// activity, whose target node comes from the episode it replaces.
    pub location: LocationKind,
    /// How each minute of this activity divides across needs.
    pub split: NeedTimeSplit,
    /// Weekly start-time availability windows.
    pub calendar: WeekCalendar,
    pub sociality: Sociality,
}

impl Activity {
    /// Network required for joint performance, if any.
    #[inline]
    pub fn joint_network(&self) -> Option<NetworkKind> {
        match self.sociality {
            Sociality::Joint { network, .. } => Some(network),
            Sociality::Individual => None,
        }
    }

    /// Fallback alone-activity id, if this activity is joint.
    #[inline]
    pub fn fallback(&self) -> Option<ActivityId> {
        match self.sociality {
            Sociality::Joint { fallback, .. } => Some(fallback),
            Sociality::Individual => None,
        }
    }
}
