//! Unit tests for ats-schedule.

use ats_core::{ActivityId, Interval, Need, NeedTimeSplit, NetworkKind, NodeId, Weekday, MINUTES_PER_DAY};

use crate::{
    ActivityCategory, ActivitySpec, Agenda, AgendaEntry, CatalogBuilder, LocationKind, Sociality,
    WeekCalendar,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn spec(name: &str, category: ActivityCategory, location: LocationKind) -> ActivitySpec {
    ActivitySpec {
        name: name.into(),
        category,
        location,
        split: NeedTimeSplit::unmodeled(),
        calendar: WeekCalendar::always(),
        sociality: Sociality::Individual,
    }
}

/// Minimal valid catalog: travel + one idle per location kind.
fn base_builder() -> CatalogBuilder {
    let mut b = CatalogBuilder::new();
    b.add_travel();
    b.add_idles();
    b
}

fn entry(start: u32, end: u32, activity: u16, node: u32) -> AgendaEntry {
    AgendaEntry {
        interval: Interval::new(start, end),
        activity: ActivityId(activity),
        node: NodeId(node),
    }
}

// ── WeekCalendar ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod calendar {
    use super::*;

    #[test]
    fn empty_calendar_never_allows() {
        let cal = WeekCalendar::new();
        assert!(!cal.allows(Weekday::Monday, 0));
        assert!(cal.is_empty());
    }

    #[test]
    fn always_allows_everywhere() {
        let cal = WeekCalendar::always();
        assert!(cal.allows(Weekday::Sunday, 0));
        assert!(cal.allows(Weekday::Wednesday, MINUTES_PER_DAY - 1));
        assert!(cal.is_always_available());
    }

    #[test]
    fn window_bounds_are_half_open() {
        let cal = WeekCalendar::new().with_window(Weekday::Monday, Interval::new(480, 600));
        assert!(cal.allows(Weekday::Monday, 480));
        assert!(cal.allows(Weekday::Monday, 599));
        assert!(!cal.allows(Weekday::Monday, 600));
        assert!(!cal.allows(Weekday::Tuesday, 480));
    }

    #[test]
    fn workdays_skip_weekend() {
        let cal = WeekCalendar::new().with_workdays(Interval::new(480, 1_080));
        assert!(cal.allows(Weekday::Friday, 500));
        assert!(!cal.allows(Weekday::Saturday, 500));
    }

    #[test]
    fn partial_coverage_is_not_always_available() {
        let cal = WeekCalendar::new().with_daily(Interval::new(0, 1_000));
        assert!(!cal.is_always_available());
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog {
    use super::*;

    #[test]
    fn build_requires_exactly_one_travel() {
        let mut b = CatalogBuilder::new();
        b.add_idles();
        assert!(b.build().is_err()); // zero travel activities

        let mut b = base_builder();
        b.add_travel(); // second travel activity
        assert!(b.build().is_err());
    }

    #[test]
    fn build_requires_idle_per_location() {
        let mut b = CatalogBuilder::new();
        b.add_travel();
        // Idle only at home — work and leisure are uncovered.
        b.add(spec("idle home", ActivityCategory::Idle, LocationKind::Household));
        assert!(b.build().is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut b = base_builder();
        b.add(spec("nap", ActivityCategory::Home, LocationKind::Household));
        b.add(spec("nap", ActivityCategory::Home, LocationKind::Household));
        assert!(b.build().is_err());
    }

    #[test]
    fn joint_fallback_must_be_individual() {
        let mut b = base_builder();
        let dinner_alone = b.add(spec("dinner alone", ActivityCategory::Home, LocationKind::Household));
        let mut joint = spec("family dinner", ActivityCategory::Home, LocationKind::Household);
        joint.sociality = Sociality::Joint { network: NetworkKind::Household, fallback: dinner_alone };
        let family_dinner = b.add(joint);

        // A joint activity pointing at another joint activity is invalid.
        let mut bad = spec("second dinner", ActivityCategory::Home, LocationKind::Household);
        bad.sociality = Sociality::Joint { network: NetworkKind::Household, fallback: family_dinner };
        b.add(bad);
        assert!(b.build().is_err());
    }

    #[test]
    fn queries_filter_category_sociality_and_calendar() {
        let mut b = base_builder();
        let mut work = spec("work", ActivityCategory::Work, LocationKind::Work);
        work.calendar = WeekCalendar::new().with_workdays(Interval::new(480, 1_080));
        b.add(work);

        let alone = b.add(spec("coffee alone", ActivityCategory::Leisure, LocationKind::Leisure));
        let mut joint = spec("coffee with friends", ActivityCategory::Leisure, LocationKind::Leisure);
        joint.sociality = Sociality::Joint { network: NetworkKind::Friends, fallback: alone };
        b.add(joint);

        let catalog = b.build().unwrap();

        // Work available Monday 09:00, not Monday 07:00, not Saturday.
        assert_eq!(catalog.individual_available(ActivityCategory::Work, Weekday::Monday, 540).len(), 1);
        assert!(catalog.individual_available(ActivityCategory::Work, Weekday::Monday, 420).is_empty());
        assert!(catalog.individual_available(ActivityCategory::Work, Weekday::Saturday, 540).is_empty());

        // Joint query sees only the joint leisure activity, and only for its network.
        assert_eq!(catalog.joint_available(NetworkKind::Friends, ActivityCategory::Leisure, Weekday::Monday, 540).len(), 1);
        assert!(catalog.joint_available(NetworkKind::Household, ActivityCategory::Leisure, Weekday::Monday, 540).is_empty());

        // Individual leisure query must not return the joint activity.
        let leisure = catalog.individual_available(ActivityCategory::Leisure, Weekday::Monday, 540);
        assert!(leisure.iter().all(|a| !a.sociality.is_joint()));
    }

    #[test]
    fn gap_fillers_respect_location_constraint() {
        let catalog = base_builder().build().unwrap();
        let all = catalog.gap_fillers(Weekday::Monday, 300, None);
        assert_eq!(all.len(), LocationKind::COUNT); // the three idles

        let home_only = catalog.gap_fillers(Weekday::Monday, 300, Some(LocationKind::Household));
        assert_eq!(home_only.len(), 1);
        assert_eq!(home_only[0].location, LocationKind::Household);
    }
}

// ── Agenda ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agenda {
    use super::*;

    #[test]
    fn insert_rejects_overlap() {
        let mut agenda = Agenda::new();
        agenda.insert(entry(480, 600, 0, 1)).unwrap();
        assert!(agenda.insert(entry(540, 660, 1, 1)).is_err());
        assert!(agenda.insert(entry(400, 481, 1, 1)).is_err());
        // Touching intervals are fine.
        agenda.insert(entry(600, 660, 1, 1)).unwrap();
        agenda.insert(entry(400, 480, 2, 1)).unwrap();
        assert_eq!(agenda.len(), 3);
    }

    #[test]
    fn insert_rejects_empty_interval() {
        let mut agenda = Agenda::new();
        assert!(agenda.insert(entry(100, 100, 0, 1)).is_err());
    }

    #[test]
    fn entry_at_finds_covering_episode() {
        let mut agenda = Agenda::new();
        agenda.insert(entry(480, 600, 7, 1)).unwrap();
        assert_eq!(agenda.entry_at(480).unwrap().activity, ActivityId(7));
        assert_eq!(agenda.entry_at(599).unwrap().activity, ActivityId(7));
        assert!(agenda.entry_at(600).is_none());
        assert!(agenda.entry_at(0).is_none());
    }

    #[test]
    fn entry_before_matches_touching_end_only() {
        let mut agenda = Agenda::new();
        agenda.insert(entry(480, 600, 7, 1)).unwrap();
        assert_eq!(agenda.entry_before(600).unwrap().activity, ActivityId(7));
        assert!(agenda.entry_before(601).is_none()); // gap starts later than the end
        assert!(agenda.entry_before(480).is_none());
    }

    #[test]
    fn first_gap_walks_the_day() {
        let mut agenda = Agenda::new();
        assert_eq!(agenda.first_gap(), Some(Interval::full_day()));

        agenda.insert(entry(0, 480, 0, 1)).unwrap();
        assert_eq!(agenda.first_gap(), Some(Interval::new(480, MINUTES_PER_DAY)));

        agenda.insert(entry(600, MINUTES_PER_DAY, 1, 1)).unwrap();
        assert_eq!(agenda.first_gap(), Some(Interval::new(480, 600)));

        agenda.insert(entry(480, 600, 2, 1)).unwrap();
        assert_eq!(agenda.first_gap(), None);
        assert!(agenda.is_fully_planned());
    }

    #[test]
    fn working_copy_is_independent() {
        let mut agenda = Agenda::new();
        agenda.insert(entry(0, 720, 0, 1)).unwrap();
        agenda.ledger_mut().credit(Need::Leisure, 10.0);

        let mut copy = agenda.working_copy();
        copy.insert(entry(720, MINUTES_PER_DAY, 1, 2)).unwrap();
        copy.ledger_mut().credit(Need::Leisure, 5.0);

        assert_eq!(agenda.len(), 1);
        assert_eq!(copy.len(), 2);
        assert_eq!(agenda.ledger().minutes(Need::Leisure), 10.0);
        assert_eq!(copy.ledger().minutes(Need::Leisure), 15.0);
    }

    #[test]
    fn clear_drops_entries_and_ledger() {
        let mut agenda = Agenda::new();
        agenda.insert(entry(0, 100, 0, 1)).unwrap();
        agenda.ledger_mut().credit(Need::Subsistence, 100.0);
        agenda.clear();
        assert!(agenda.is_empty());
        assert_eq!(agenda.ledger().total(), 0.0);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use ats_core::Need;

    use crate::load_catalog_reader;

    use super::*;

    const CSV: &[u8] = b"\
name,category,location,network,fallback,needs,windows
travel,travel,leisure,,,,always
idle home,idle,household,,,,always
idle work,idle,work,,,,always
idle out,idle,leisure,,,,always
work,work,work,,,subsistence:1.0,workdays 08:00-18:00
dinner alone,home,household,,,subsistence:0.8,daily 17:00-21:00
family dinner,home,household,household,dinner alone,subsistence:0.5;affection:0.5,daily 17:00-21:00
";

    #[test]
    fn loads_and_validates() {
        let catalog = load_catalog_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(catalog.len(), 7);

        let work = catalog
            .individual_available(ActivityCategory::Work, Weekday::Tuesday, 540)
            .pop()
            .unwrap();
        assert_eq!(work.name, "work");
        assert_eq!(work.split.fraction(Need::Subsistence), 1.0);
    }

    #[test]
    fn joint_rows_resolve_fallback_by_name() {
        let catalog = load_catalog_reader(Cursor::new(CSV)).unwrap();
        let dinner = catalog
            .joint_available(NetworkKind::Household, ActivityCategory::Home, Weekday::Monday, 1_080)
            .pop()
            .unwrap();
        let fallback = catalog.get(dinner.fallback().unwrap());
        assert_eq!(fallback.name, "dinner alone");
        assert!(!fallback.sociality.is_joint());
    }

    #[test]
    fn unknown_fallback_errors() {
        let bad = b"\
name,category,location,network,fallback,needs,windows
travel,travel,leisure,,,,always
idle home,idle,household,,,,always
idle work,idle,work,,,,always
idle out,idle,leisure,,,,always
party,leisure,leisure,friends,no such thing,,always
";
        assert!(load_catalog_reader(Cursor::new(bad.as_slice())).is_err());
    }

    #[test]
    fn malformed_window_errors() {
        let bad = b"\
name,category,location,network,fallback,needs,windows
travel,travel,leisure,,,,sometimes 08:00-10:00
";
        assert!(load_catalog_reader(Cursor::new(bad.as_slice())).is_err());
    }
}
