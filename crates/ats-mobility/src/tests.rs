//! Unit tests for ats-mobility.

use ats_core::{AgentId, NodeId, Point};
use ats_spatial::{AStarRouter, PathNetwork, PathNetworkBuilder, Router};

use crate::{MovementEngine, Progress};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A0: AgentId = AgentId(0);

/// Straight chain a—b—c—d at x = 0, 100, 110, 120 (one long edge, two short).
fn chain() -> (PathNetwork, [NodeId; 4]) {
    let mut b = PathNetworkBuilder::new();
    let na = b.add_node(Point::new(0.0, 0.0));
    let nb = b.add_node(Point::new(100.0, 0.0));
    let nc = b.add_node(Point::new(110.0, 0.0));
    let nd = b.add_node(Point::new(120.0, 0.0));
    b.add_link(na, nb);
    b.add_link(nb, nc);
    b.add_link(nc, nd);
    (b.build(), [na, nb, nc, nd])
}

fn route(net: &PathNetwork, from: NodeId, to: NodeId) -> ats_spatial::Route {
    AStarRouter.route(net, from, to).unwrap()
}

/// Step until arrival, with a hard bound to catch non-termination.
fn step_until_arrived(
    engine: &mut MovementEngine,
    net: &PathNetwork,
    max_ticks: usize,
) -> (NodeId, usize) {
    for tick in 1..=max_ticks {
        if let Progress::Arrived(node) = engine.step(A0, net).unwrap() {
            return (node, tick);
        }
    }
    panic!("agent did not arrive within {max_ticks} ticks");
}

// ── Basic stepping ────────────────────────────────────────────────────────────

#[test]
fn advances_at_fixed_speed() {
    let (net, [na, nb, ..]) = chain();
    let mut engine = MovementEngine::new(30.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, nb), nb, &net).unwrap();

    match engine.step(A0, &net).unwrap() {
        Progress::EnRoute(p) => assert!((p.x - 30.0).abs() < 1e-12),
        other => panic!("expected EnRoute, got {other:?}"),
    }
    match engine.step(A0, &net).unwrap() {
        Progress::EnRoute(p) => assert!((p.x - 60.0).abs() < 1e-12),
        other => panic!("expected EnRoute, got {other:?}"),
    }
}

#[test]
fn terminates_on_exact_target_coordinate() {
    let (net, [na, _, _, nd]) = chain();
    let mut engine = MovementEngine::new(7.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, nd), nd, &net).unwrap();

    let (node, _) = step_until_arrived(&mut engine, &net, 10_000);
    assert_eq!(node, nd);
    assert_eq!(engine.node(A0), nd);
    // Exact equality, not tolerance — downstream compares coordinates.
    assert_eq!(engine.position(A0), net.position(nd));
    assert!(!engine.in_transit(A0));
}

#[test]
fn landing_exactly_on_bound_arrives() {
    let (net, [na, nb, ..]) = chain();
    // Edge a—b is exactly 100 long; speed 50 lands on the bound at tick 2.
    let mut engine = MovementEngine::new(50.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, nb), nb, &net).unwrap();

    assert!(matches!(engine.step(A0, &net).unwrap(), Progress::EnRoute(_)));
    assert_eq!(engine.step(A0, &net).unwrap(), Progress::Arrived(nb));
    assert_eq!(engine.position(A0), net.position(nb));
}

// ── Overshoot carry ───────────────────────────────────────────────────────────

#[test]
fn carries_overshoot_across_short_edges_in_one_tick() {
    let (net, [na, _, _, nd]) = chain();
    // Speed 200 exceeds the whole 120-unit chain: one tick, straight to d.
    let mut engine = MovementEngine::new(200.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, nd), nd, &net).unwrap();

    assert_eq!(engine.step(A0, &net).unwrap(), Progress::Arrived(nd));
    assert_eq!(engine.position(A0), net.position(nd));
}

#[test]
fn overshoot_lands_mid_next_edge() {
    let (net, [na, _, nc, _]) = chain();
    // 104 per tick: first tick ends 4 units into edge b—c.
    let mut engine = MovementEngine::new(104.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, nc), nc, &net).unwrap();

    match engine.step(A0, &net).unwrap() {
        Progress::EnRoute(p) => assert!((p.x - 104.0).abs() < 1e-9),
        other => panic!("expected EnRoute, got {other:?}"),
    }
    assert_eq!(engine.step(A0, &net).unwrap(), Progress::Arrived(nc));
    assert_eq!(engine.node(A0), nc);
}

// ── Direction handling ────────────────────────────────────────────────────────

#[test]
fn reverse_traversal_uses_shared_geometry() {
    let (net, [na, _, _, nd]) = chain();
    // Geometry was registered in the a→d orientation; walk d→a.
    let mut engine = MovementEngine::new(9.0, 1);
    engine.place(A0, nd, &net);
    engine.begin(A0, &route(&net, nd, na), na, &net).unwrap();

    match engine.step(A0, &net).unwrap() {
        Progress::EnRoute(p) => assert!((p.x - 111.0).abs() < 1e-9),
        other => panic!("expected EnRoute, got {other:?}"),
    }
    let (node, _) = step_until_arrived(&mut engine, &net, 1_000);
    assert_eq!(node, na);
    assert_eq!(engine.position(A0), net.position(na));
}

// ── API contract ──────────────────────────────────────────────────────────────

#[test]
fn trivial_route_is_a_noop() {
    let (net, [na, ..]) = chain();
    let mut engine = MovementEngine::new(10.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, na), na, &net).unwrap();
    assert!(!engine.in_transit(A0));
    assert_eq!(engine.node(A0), na);
}

#[test]
fn begin_requires_placement() {
    let (net, [na, nb, ..]) = chain();
    let mut engine = MovementEngine::new(10.0, 1);
    assert!(engine.begin(A0, &route(&net, na, nb), nb, &net).is_err());
}

#[test]
fn begin_rejects_double_start() {
    let (net, [na, nb, _, nd]) = chain();
    let mut engine = MovementEngine::new(10.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, nb), nb, &net).unwrap();
    assert!(engine.begin(A0, &route(&net, na, nd), nd, &net).is_err());
}

#[test]
fn step_without_path_errors() {
    let (net, [na, ..]) = chain();
    let mut engine = MovementEngine::new(10.0, 1);
    engine.place(A0, na, &net);
    assert!(engine.step(A0, &net).is_err());
}

#[test]
fn node_is_invalid_while_in_transit() {
    let (net, [na, nb, ..]) = chain();
    let mut engine = MovementEngine::new(10.0, 1);
    engine.place(A0, na, &net);
    engine.begin(A0, &route(&net, na, nb), nb, &net).unwrap();
    assert_eq!(engine.node(A0), NodeId::INVALID);
    assert!(engine.in_transit(A0));
}
