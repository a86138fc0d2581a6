//! The shared read-only activity catalog and its builder.
//!
//! # Construction
//!
//! Activities are added through [`CatalogBuilder::add`], which assigns
//! sequential [`ActivityId`]s; [`CatalogBuilder::build`] validates the whole
//! set and freezes it into an immutable [`ActivityCatalog`].  Validation
//! enforces the preconditions the planning phases rely on:
//!
//! - exactly one travel activity;
//! - every joint fallback references an existing *individual* activity;
//! - for every [`LocationKind`] there is an always-available idle activity
//!   (this is what guarantees the plan generator's fill loop terminates).
//!
//! A fallback referenced by a joint activity must be added before it, so
//! specs are naturally ordered fallback-first.

use ats_core::{ActivityId, NeedTimeSplit, NetworkKind, Weekday};

use crate::error::{CatalogError, CatalogResult};
use crate::{Activity, ActivityCategory, LocationKind, Sociality, WeekCalendar};

// ── ActivitySpec ──────────────────────────────────────────────────────────────

/// Fully-specified parameters for one activity; the builder turns this into
/// an [`Activity`] with an assigned id.
#[derive(Clone, Debug)]
pub struct ActivitySpec {
    pub name: String,
    pub category: ActivityCategory,
    pub location: LocationKind,
    pub split: NeedTimeSplit,
    pub calendar: WeekCalendar,
    pub sociality: Sociality,
}

// ── CatalogBuilder ────────────────────────────────────────────────────────────

/// Accumulates [`ActivitySpec`]s, then validates and freezes the catalog.
pub struct CatalogBuilder {
    specs: Vec<ActivitySpec>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Add an activity and return the id it will have in the built catalog.
    pub fn add(&mut self, spec: ActivitySpec) -> ActivityId {
        let id = ActivityId(self.specs.len() as u16);
        self.specs.push(spec);
        id
    }

    /// Convenience: add the designated travel activity (all time unmodeled,
    /// always available).
    pub fn add_travel(&mut self) -> ActivityId {
        self.add(ActivitySpec {
            name: "travel".into(),
            category: ActivityCategory::Travel,
            location: LocationKind::Leisure, // never queried for travel
            split: NeedTimeSplit::unmodeled(),
            calendar: WeekCalendar::always(),
            sociality: Sociality::Individual,
        })
    }

    /// Convenience: add one always-available idle activity per location kind.
    pub fn add_idles(&mut self) -> [ActivityId; LocationKind::COUNT] {
        LocationKind::ALL.map(|location| {
            self.add(ActivitySpec {
                name: format!("idle at {location}"),
                category: ActivityCategory::Idle,
                location,
                split: NeedTimeSplit::unmodeled(),
                calendar: WeekCalendar::always(),
                sociality: Sociality::Individual,
            })
        })
    }

    /// Validate all specs and freeze them into an [`ActivityCatalog`].
    pub fn build(self) -> CatalogResult<ActivityCatalog> {
        let mut names = std::collections::HashSet::new();
        for spec in &self.specs {
            if !names.insert(spec.name.as_str()) {
                return Err(CatalogError::DuplicateName(spec.name.clone()));
            }
        }

        let travel_ids: Vec<usize> = self
            .specs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.category == ActivityCategory::Travel)
            .map(|(i, _)| i)
            .collect();
        if travel_ids.len() != 1 {
            return Err(CatalogError::TravelCount(travel_ids.len()));
        }
        let travel = ActivityId(travel_ids[0] as u16);

        for spec in &self.specs {
            if let Sociality::Joint { fallback, .. } = spec.sociality {
                let target = self.specs.get(fallback.index()).ok_or(CatalogError::BadFallback {
                    name: spec.name.clone(),
                    fallback,
                    reason: "no such activity",
                })?;
                if target.sociality.is_joint() {
                    return Err(CatalogError::BadFallback {
                        name: spec.name.clone(),
                        fallback,
                        reason: "fallback must be an individual activity",
                    });
                }
                if target.category == ActivityCategory::Travel {
                    return Err(CatalogError::BadFallback {
                        name: spec.name.clone(),
                        fallback,
                        reason: "fallback must not be the travel activity",
                    });
                }
            }
        }

        // Termination precondition for the plan generator: every location
        // kind has an idle activity that can start at any minute.
        for location in LocationKind::ALL {
            let covered = self.specs.iter().any(|s| {
                s.category == ActivityCategory::Idle
                    && s.location == location
                    && !s.sociality.is_joint()
                    && s.calendar.is_always_available()
            });
            if !covered {
                return Err(CatalogError::MissingIdle(location.as_str()));
            }
        }

        let activities = self
            .specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Activity {
                id: ActivityId(i as u16),
                name: spec.name,
                category: spec.category,
                location: spec.location,
                split: spec.split,
                calendar: spec.calendar,
                sociality: spec.sociality,
            })
            .collect();

        Ok(ActivityCatalog { activities, travel })
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── ActivityCatalog ───────────────────────────────────────────────────────────

/// The immutable, shared set of activity definitions.
///
/// All planning queries are filters over the full list — the catalog is
/// small (tens of entries) and queried per planning decision, not per tick,
/// so no secondary indices are kept.
pub struct ActivityCatalog {
    activities: Vec<Activity>,
    travel: ActivityId,
}

impl ActivityCatalog {
    /// Look up an activity by id.
    ///
    /// Ids come from this catalog (agendas only store ids the catalog
    /// handed out), so direct indexing is safe.
    #[inline]
    pub fn get(&self, id: ActivityId) -> &Activity {
        &self.activities[id.index()]
    }

    /// The designated travel activity.
    #[inline]
    pub fn travel_id(&self) -> ActivityId {
        self.travel
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    /// Individual (non-joint, non-travel) activities of `category` that may
    /// start at `minute` on `day`.
    pub fn individual_available(
        &self,
        category: ActivityCategory,
        day: Weekday,
        minute: u32,
    ) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| {
                a.category == category
                    && a.category != ActivityCategory::Travel
                    && !a.sociality.is_joint()
                    && a.calendar.allows(day, minute)
            })
            .collect()
    }

    /// Joint activities of `category` requiring `network` that may start at
    /// `minute` on `day`.
    pub fn joint_available(
        &self,
        network: NetworkKind,
        category: ActivityCategory,
        day: Weekday,
        minute: u32,
    ) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| {
                a.category == category
                    && a.joint_network() == Some(network)
                    && a.calendar.allows(day, minute)
            })
            .collect()
    }

    /// Individual activities of any category (except travel) that may start
    /// at `minute` on `day`, optionally restricted to one location kind.
    ///
    /// This backs the plan generator's exact-gap fallback; the location
    /// restriction implements the "not worth traveling" constraint.
    pub fn gap_fillers(
        &self,
        day: Weekday,
        minute: u32,
        location: Option<LocationKind>,
    ) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| {
                a.category != ActivityCategory::Travel
                    && !a.sociality.is_joint()
                    && location.is_none_or(|l| a.location == l)
                    && a.calendar.allows(day, minute)
            })
            .collect()
    }
}
