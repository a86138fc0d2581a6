//! Unit tests for ats-plan.

use ats_core::{AgentId, Interval, Need, NeedLedger, NeedTimeSplit, NetworkKind, NodeId, Point, Weekday};
use ats_agent::{AgentRngs, AgentSpec, PlaceSet, PopulationBuilder, PopulationStore};
use ats_schedule::{
    ActivityCatalog, ActivityCategory, ActivitySpec, Agenda, AgendaEntry, CatalogBuilder,
    LocationKind, Sociality, WeekCalendar,
};
use ats_spatial::{AStarRouter, PathNetwork, PathNetworkBuilder};

use crate::{
    DayPlanGenerator, DurationParams, NegotiationCoordinator, PlanConfig, PlanContext,
    PlanSelector, TravelAugmenter,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn split(pairs: &[(Need, f64)]) -> NeedTimeSplit {
    let mut b = NeedTimeSplit::builder();
    for &(need, fraction) in pairs {
        b = b.with(need, fraction);
    }
    b.build().unwrap()
}

/// Catalog: travel + three idles + individual "dinner alone" + joint
/// household "family dinner" (both Home category, available all day).
fn catalog_with_joint() -> ActivityCatalog {
    let mut b = CatalogBuilder::new();
    b.add_travel();
    b.add_idles();
    let alone = b.add(ActivitySpec {
        name: "dinner alone".into(),
        category: ActivityCategory::Home,
        location: LocationKind::Household,
        split: split(&[(Need::Subsistence, 0.8)]),
        calendar: WeekCalendar::always(),
        sociality: Sociality::Individual,
    });
    b.add(ActivitySpec {
        name: "family dinner".into(),
        category: ActivityCategory::Home,
        location: LocationKind::Household,
        split: split(&[(Need::Subsistence, 0.5), (Need::Affection, 0.5)]),
        calendar: WeekCalendar::always(),
        sociality: Sociality::Joint { network: NetworkKind::Household, fallback: alone },
    });
    b.build().unwrap()
}

/// Deterministic config: household joint dinners at exactly 18:00 for
/// exactly 60 minutes, participation 1.
fn deterministic_config() -> PlanConfig {
    let mut config = PlanConfig::new().unwrap();
    config.participation = [1.0, 0.0, 0.0];
    config.joint_start_minutes = vec![18 * 60];
    config.durations[ActivityCategory::Home.idx()] = DurationParams::with_median(60, 0.0).unwrap();
    config
}

/// Two-agent household population; each agent anchors at its own node.
fn household_pair() -> (PopulationStore, AgentRngs, AgentId, AgentId) {
    let mut b = PopulationBuilder::new(11);
    let a0 = b.add_agent(AgentSpec {
        target: NeedTimeSplit::unmodeled(),
        places: PlaceSet::new(NodeId(0), NodeId(0), NodeId(0)),
        daily_caps: [1, 1, 1],
    });
    let a1 = b.add_agent(AgentSpec {
        target: NeedTimeSplit::unmodeled(),
        places: PlaceSet::new(NodeId(1), NodeId(1), NodeId(1)),
        daily_caps: [1, 1, 1],
    });
    b.link(a0, a1, NetworkKind::Household);
    let (pop, rngs) = b.build().unwrap();
    (pop, rngs, a0, a1)
}

fn two_node_network() -> PathNetwork {
    let mut b = PathNetworkBuilder::new();
    let na = b.add_node(Point::new(0.0, 0.0));
    let nb = b.add_node(Point::new(100.0, 0.0));
    b.add_link(na, nb);
    b.build()
}

fn idle_entry(start: u32, end: u32, catalog: &ActivityCatalog, node: u32) -> AgendaEntry {
    let idle_home = catalog
        .iter()
        .find(|a| a.category == ActivityCategory::Idle && a.location == LocationKind::Household)
        .unwrap();
    AgendaEntry {
        interval: Interval::new(start, end),
        activity: idle_home.id,
        node: NodeId(node),
    }
}

// ── Negotiation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod negotiation {
    use super::*;

    #[test]
    fn household_pair_commits_identical_interval() {
        // Both eligible, participation 1.0, one start (18:00), one duration
        // (60) — both joint agendas must hold the same activity over
        // [18:00, 19:00) with each agent's own resolved node.
        let catalog = catalog_with_joint();
        let config = deterministic_config();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let (mut pop, mut rngs, a0, a1) = household_pair();

        NegotiationCoordinator::negotiate(&ctx, &mut pop, &mut rngs, a0, NetworkKind::Household);

        let e0 = *pop.joint[a0.index()].first().expect("initiator entry");
        let e1 = *pop.joint[a1.index()].first().expect("peer entry");
        assert_eq!(e0.interval, Interval::new(1_080, 1_140));
        assert_eq!(e0.interval, e1.interval);
        assert_eq!(e0.activity, e1.activity);
        assert!(catalog.get(e0.activity).sociality.is_joint());
        // Per-participant location resolution: each agent's own anchor.
        assert_eq!(e0.node, NodeId(0));
        assert_eq!(e1.node, NodeId(1));
        // Both counters incremented.
        assert_eq!(pop.membership(a0, NetworkKind::Household).joint_today, 1);
        assert_eq!(pop.membership(a1, NetworkKind::Household).joint_today, 1);
    }

    #[test]
    fn capped_peer_means_no_op() {
        let catalog = catalog_with_joint();
        let config = deterministic_config();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let (mut pop, mut rngs, a0, a1) = household_pair();

        // The only peer has exhausted its cap: nobody to be joint with.
        pop.membership_mut(a1, NetworkKind::Household).joint_today = 1;
        NegotiationCoordinator::negotiate(&ctx, &mut pop, &mut rngs, a0, NetworkKind::Household);

        assert!(pop.joint[a0.index()].is_empty());
        assert!(pop.joint[a1.index()].is_empty());
        assert_eq!(pop.membership(a0, NetworkKind::Household).joint_today, 0);
    }

    #[test]
    fn capped_initiator_means_no_op() {
        let catalog = catalog_with_joint();
        let config = deterministic_config();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let (mut pop, mut rngs, a0, a1) = household_pair();

        pop.membership_mut(a0, NetworkKind::Household).joint_today = 1;
        NegotiationCoordinator::negotiate(&ctx, &mut pop, &mut rngs, a0, NetworkKind::Household);

        assert!(pop.joint[a0.index()].is_empty());
        assert!(pop.joint[a1.index()].is_empty());
    }

    #[test]
    fn exhausted_interval_search_is_silent() {
        let catalog = catalog_with_joint();
        let config = deterministic_config();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let (mut pop, mut rngs, a0, a1) = household_pair();

        // The only candidate start is already blocked in the peer's joint
        // agenda — every trial collides, so the attempt is abandoned.
        let blocker = idle_entry(1_080, 1_140, &catalog, 1);
        pop.joint[a1.index()].insert(blocker).unwrap();

        NegotiationCoordinator::negotiate(&ctx, &mut pop, &mut rngs, a0, NetworkKind::Household);

        assert!(pop.joint[a0.index()].is_empty());
        assert_eq!(pop.joint[a1.index()].len(), 1);
        assert_eq!(pop.membership(a0, NetworkKind::Household).joint_today, 0);
    }

    #[test]
    fn zero_participation_never_commits() {
        let catalog = catalog_with_joint();
        let mut config = deterministic_config();
        config.participation = [0.0, 0.0, 0.0];
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let (mut pop, mut rngs, a0, _) = household_pair();

        for _ in 0..16 {
            NegotiationCoordinator::negotiate(&ctx, &mut pop, &mut rngs, a0, NetworkKind::Household);
        }
        assert!(pop.joint[a0.index()].is_empty());
    }
}

// ── DayPlanGenerator ──────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use super::*;

    #[test]
    fn fills_the_whole_day() {
        let catalog = catalog_with_joint();
        let config = PlanConfig::new().unwrap();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Tuesday);
        let (_, mut rngs, a0, _) = household_pair();
        let places = PlaceSet::new(NodeId(0), NodeId(0), NodeId(0));

        let candidate =
            DayPlanGenerator::generate(&ctx, &Agenda::new(), &places, rngs.get_mut(a0));

        assert!(candidate.is_fully_planned());
        // Planned ledger covers exactly the planned minutes.
        assert!((candidate.ledger().total() - 1_440.0).abs() < 1e-6);
    }

    #[test]
    fn preserves_carried_over_joint_entries() {
        let catalog = catalog_with_joint();
        let config = PlanConfig::new().unwrap();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Tuesday);
        let (_, mut rngs, a0, _) = household_pair();
        let places = PlaceSet::new(NodeId(0), NodeId(0), NodeId(0));

        let mut seed = Agenda::new();
        let joint = idle_entry(1_080, 1_140, &catalog, 9);
        seed.insert(joint).unwrap();

        let candidate = DayPlanGenerator::generate(&ctx, &seed, &places, rngs.get_mut(a0));

        assert!(candidate.is_fully_planned());
        let carried = candidate.entry_at(1_080).unwrap();
        assert_eq!(*carried, joint); // untouched, only gaps were filled
    }

    #[test]
    fn candidate_count_matches_config() {
        let catalog = catalog_with_joint();
        let mut config = PlanConfig::new().unwrap();
        config.candidates = 5;
        let ctx = PlanContext::new(&catalog, &config, Weekday::Sunday);
        let (_, mut rngs, a0, _) = household_pair();
        let places = PlaceSet::new(NodeId(0), NodeId(0), NodeId(0));

        let candidates =
            DayPlanGenerator::generate_candidates(&ctx, &Agenda::new(), &places, rngs.get_mut(a0));
        assert_eq!(candidates.len(), 5);
        assert!(candidates.iter().all(Agenda::is_fully_planned));
    }

    #[test]
    fn short_gap_sticks_to_previous_location() {
        let catalog = catalog_with_joint();
        let mut config = PlanConfig::new().unwrap();
        // Make every sampled duration far larger than the 10-minute gap so
        // the exact-fit fallback is the only option.
        for params in &mut config.durations {
            *params = DurationParams::with_median(600, 0.0).unwrap();
        }
        config.min_travel_worth = 30;
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let (_, mut rngs, a0, _) = household_pair();
        // Alternates would allow other nodes; the short gap must ignore them.
        let places = PlaceSet::new(NodeId(5), NodeId(5), NodeId(5))
            .with_alternates(LocationKind::Household, vec![NodeId(6), NodeId(7)]);

        let mut seed = Agenda::new();
        seed.insert(idle_entry(0, 700, &catalog, 5)).unwrap();
        seed.insert(idle_entry(710, 1_440, &catalog, 5)).unwrap();

        let candidate = DayPlanGenerator::generate(&ctx, &seed, &places, rngs.get_mut(a0));

        assert!(candidate.is_fully_planned());
        let filler = candidate.entry_at(700).unwrap();
        assert_eq!(filler.interval, Interval::new(700, 710));
        // Pinned to the preceding entry's node and location kind.
        assert_eq!(filler.node, NodeId(5));
        assert_eq!(catalog.get(filler.activity).location, LocationKind::Household);
    }
}

// ── TravelAugmenter ───────────────────────────────────────────────────────────

#[cfg(test)]
mod travel {
    use super::*;

    /// Candidate spending the morning at node 0 and the rest at node 1.
    fn two_place_candidate(catalog: &ActivityCatalog) -> Agenda {
        let mut agenda = Agenda::new();
        agenda.insert(idle_entry(0, 720, catalog, 0)).unwrap();
        agenda.insert(idle_entry(720, 1_440, catalog, 1)).unwrap();
        for entry in [
            Interval::new(0, 720),
            Interval::new(720, 1_440),
        ] {
            agenda
                .ledger_mut()
                .credit_split(&NeedTimeSplit::unmodeled(), entry.duration() as f64);
        }
        agenda
    }

    #[test]
    fn splits_destination_episode() {
        let catalog = catalog_with_joint();
        let mut config = PlanConfig::new().unwrap();
        config.speed_m_per_min = 40.0; // 100 m → ceil(2.5) = 3 minutes
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let network = two_node_network();
        let candidate = two_place_candidate(&catalog);

        let augmented =
            TravelAugmenter::augment(&ctx, &candidate, &AStarRouter, &network).unwrap();

        assert!(augmented.is_fully_planned());
        let travel = augmented.entry_at(720).unwrap();
        assert_eq!(travel.activity, catalog.travel_id());
        assert_eq!(travel.interval, Interval::new(720, 723));
        assert_eq!(travel.node, NodeId(1)); // travel targets the destination
        let rest = augmented.entry_at(723).unwrap();
        assert_eq!(rest.interval, Interval::new(723, 1_440));
        assert_ne!(rest.activity, catalog.travel_id());
        // Ledger was rebuilt per piece and still conserves the day.
        assert!((augmented.ledger().total() - 1_440.0).abs() < 1e-6);
    }

    #[test]
    fn travel_swallows_tiny_destination_episode() {
        let catalog = catalog_with_joint();
        let mut config = PlanConfig::new().unwrap();
        config.speed_m_per_min = 40.0; // 3 minutes of travel
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let network = two_node_network();

        let mut candidate = Agenda::new();
        candidate.insert(idle_entry(0, 1_438, &catalog, 0)).unwrap();
        candidate.insert(idle_entry(1_438, 1_440, &catalog, 1)).unwrap();

        let augmented =
            TravelAugmenter::augment(&ctx, &candidate, &AStarRouter, &network).unwrap();

        // 3 ≥ 2: the whole destination episode becomes travel.
        let tail = augmented.entry_at(1_438).unwrap();
        assert_eq!(tail.activity, catalog.travel_id());
        assert_eq!(tail.interval, Interval::new(1_438, 1_440));
    }

    #[test]
    fn discards_travel_heavy_candidates() {
        let catalog = catalog_with_joint();
        let mut config = PlanConfig::new().unwrap();
        config.max_location_changes = 0;
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let network = two_node_network();
        let candidate = two_place_candidate(&catalog);

        assert_eq!(TravelAugmenter::location_changes(&candidate), 1);
        assert!(TravelAugmenter::augment(&ctx, &candidate, &AStarRouter, &network).is_none());
    }

    #[test]
    fn stationary_candidate_passes_through() {
        let catalog = catalog_with_joint();
        let config = PlanConfig::new().unwrap();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);
        let network = two_node_network();

        let mut candidate = Agenda::new();
        candidate.insert(idle_entry(0, 1_440, &catalog, 0)).unwrap();

        let augmented =
            TravelAugmenter::augment(&ctx, &candidate, &AStarRouter, &network).unwrap();
        assert_eq!(augmented.len(), 1);
        assert_eq!(augmented.entry_at(0).unwrap().activity, candidate.entry_at(0).unwrap().activity);
    }

    #[test]
    fn missing_path_discards_candidate() {
        let catalog = catalog_with_joint();
        let config = PlanConfig::new().unwrap();
        let ctx = PlanContext::new(&catalog, &config, Weekday::Monday);

        // Two disconnected nodes.
        let mut b = PathNetworkBuilder::new();
        b.add_node(Point::new(0.0, 0.0));
        b.add_node(Point::new(500.0, 0.0));
        let network = b.build();

        let candidate = two_place_candidate(&catalog);
        assert!(TravelAugmenter::augment(&ctx, &candidate, &AStarRouter, &network).is_none());
    }
}

// ── PlanSelector ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use super::*;

    fn ledger_with(pairs: &[(Need, f64)]) -> NeedLedger {
        let mut ledger = NeedLedger::new();
        for &(need, minutes) in pairs {
            ledger.credit(need, minutes);
        }
        ledger
    }

    #[test]
    fn perfect_match_scores_zero() {
        let target = split(&[(Need::Subsistence, 0.5), (Need::Leisure, 0.5)]);
        let ledger = ledger_with(&[(Need::Subsistence, 720.0), (Need::Leisure, 720.0)]);
        assert!(PlanSelector::score(&ledger, &target) < 1e-12);
    }

    #[test]
    fn selection_is_monotone_in_mse() {
        // Work/idle day vs. all-idle day against a half-subsistence target:
        // whichever has strictly lower MSE must win, in either order.
        let target = split(&[(Need::Subsistence, 0.5), (Need::Leisure, 0.5)]);

        let mut worked = Agenda::new();
        worked
            .ledger_mut()
            .credit_split(&split(&[(Need::Subsistence, 1.0)]), 480.0);
        worked.ledger_mut().credit_split(&NeedTimeSplit::unmodeled(), 960.0);

        let mut all_idle = Agenda::new();
        all_idle.ledger_mut().credit_split(&NeedTimeSplit::unmodeled(), 1_440.0);

        let mse_worked = PlanSelector::score(worked.ledger(), &target);
        let mse_idle = PlanSelector::score(all_idle.ledger(), &target);
        assert!(mse_worked < mse_idle);

        let picked = PlanSelector::select(&[Some(all_idle.clone()), Some(worked.clone())], &target);
        assert_eq!(picked, Some(1));
        let picked = PlanSelector::select(&[Some(worked), Some(all_idle)], &target);
        assert_eq!(picked, Some(0));
    }

    #[test]
    fn discarded_candidates_never_win() {
        let target = split(&[(Need::Subsistence, 0.5)]);
        let mut good = Agenda::new();
        good.ledger_mut().credit_split(&NeedTimeSplit::unmodeled(), 1_440.0);

        let picked = PlanSelector::select(&[None, Some(good), None], &target);
        assert_eq!(picked, Some(1));
        assert_eq!(PlanSelector::select(&[None, None], &target), None);
    }

    #[test]
    fn ties_keep_the_first_seen() {
        let target = NeedTimeSplit::unmodeled();
        let mut a = Agenda::new();
        a.ledger_mut().credit_split(&NeedTimeSplit::unmodeled(), 100.0);
        let b = a.clone();
        assert_eq!(PlanSelector::select(&[Some(a), Some(b)], &target), Some(0));
    }

    #[test]
    fn work_plan_is_closer_to_half_subsistence_than_all_idle() {
        // An 8-hour work block pulls the subsistence share to 1/3 — strictly
        // closer to the 0.5 target than the all-idle share of 0.
        let target = split(&[(Need::Subsistence, 0.5), (Need::Leisure, 0.5)]);

        let mut worked = Agenda::new();
        worked
            .ledger_mut()
            .credit_split(&split(&[(Need::Subsistence, 1.0)]), 480.0);
        worked.ledger_mut().credit_split(&NeedTimeSplit::unmodeled(), 960.0);

        let mut all_idle = Agenda::new();
        all_idle.ledger_mut().credit_split(&NeedTimeSplit::unmodeled(), 1_440.0);

        let picked = PlanSelector::select(&[Some(all_idle), Some(worked.clone())], &target)
            .expect("a candidate survives");
        assert_eq!(picked, 1);

        let share = worked.ledger().relative()[Need::Subsistence.idx()];
        assert!((share - 0.5).abs() < (0.0f64 - 0.5).abs());
    }
}
