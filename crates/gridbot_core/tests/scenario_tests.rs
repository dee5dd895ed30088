//! End-to-end scenarios driving the agent through full ticks.

use gridbot_core::prelude::*;
use gridbot_test_utils::fixtures::SnapshotBuilder;

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn agent() -> Agent {
    Agent::new(UnitTypeCatalog::standard()).expect("standard catalog resolves")
}

fn idle_count(snapshot: &WorldSnapshot) -> usize {
    snapshot
        .units()
        .iter()
        .filter(|u| snapshot.is_idle(u.id))
        .count()
}

/// 8x8 map (area 64, no offset), 1 depot, 3 workers, 2 piles: exactly
/// one free worker harvests and two go to battle.
#[test]
fn scenario_small_map_allocates_one_free_worker() {
    let mut b = SnapshotBuilder::new(8, 8);
    let w: Vec<_> = (0..3).map(|i| b.worker(P0, i, 3)).collect();
    b.depot(P0, 1, 1);
    b.pile(6, 3);
    b.pile(6, 4);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);

    // The single free worker harvests; battle workers see no enemies
    // and stay idle.
    assert!(matches!(bundle.get(w[0]), Some(Action::Harvest { .. })));
    assert!(bundle.get(w[1]).is_none());
    assert!(bundle.get(w[2]).is_none());
    assert!(bundle.len() <= idle_count(&snap));
}

/// No resource piles left: every worker goes to battle regardless of
/// the depot/barracks configuration. The first two fight; beyond that
/// the rest are parked so they don't crowd the same chokepoint.
#[test]
fn scenario_no_piles_sends_all_workers_to_battle() {
    let mut b = SnapshotBuilder::new(12, 12);
    let w: Vec<_> = (0..4).map(|i| b.worker(P0, i, 6)).collect();
    b.depot(P0, 1, 1);
    b.barracks(P0, 3, 1);
    let enemy = b.worker(P1, 11, 6);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);

    assert_eq!(bundle.get(w[0]), Some(&Action::Attack { target: enemy }));
    assert_eq!(bundle.get(w[1]), Some(&Action::Attack { target: enemy }));
    // Workers three and four are parked down the depot's edge; the
    // move replaces their battle order.
    assert!(matches!(bundle.get(w[2]), Some(Action::Move { .. })));
    assert!(matches!(bundle.get(w[3]), Some(Action::Move { .. })));
}

/// 6 resources, no barracks, 4 workers, depot right of center: one
/// barracks build at (depot.x+2, depot.y-2), and nothing more once
/// the barracks exists.
#[test]
fn scenario_single_barracks_build_then_stop() {
    let mut b = SnapshotBuilder::new(10, 10);
    for i in 0..4 {
        b.worker(P0, i, 6);
    }
    b.depot(P0, 6, 5);
    b.pile(9, 9);
    b.resources(P0, 6);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);

    let builds: Vec<_> = bundle
        .iter()
        .filter(|(_, a)| matches!(a, Action::Build { .. }))
        .collect();
    assert_eq!(builds.len(), 1);
    let (_, build) = builds[0];
    assert_eq!(
        build,
        &Action::Build {
            kind: agent.catalog().resolve("barracks").unwrap(),
            at: GridPos::new(8, 3)
        }
    );

    // Next tick the barracks exists (mid-construction counts); no
    // second build order goes out.
    b.barracks(P0, 8, 3);
    let snap2 = b.build();
    let bundle2 = agent.get_action(P0, &snap2);
    assert!(
        !bundle2.iter().any(|(_, a)| matches!(a, Action::Build { .. })),
        "no second barracks build once one exists"
    );
}

/// A combat unit with nothing visible emits no action this tick.
#[test]
fn scenario_combat_unit_idles_without_targets() {
    let mut b = SnapshotBuilder::new(10, 10);
    let lone = b.light(P0, 4, 4);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);
    assert!(bundle.get(lone).is_none());
    assert!(bundle.is_empty());
}

/// A worker already harvesting its nearest pile/depot pair receives
/// no fresh order next tick.
#[test]
fn scenario_harvest_order_not_reissued() {
    let mut b = SnapshotBuilder::new(8, 8);
    let w = b.worker(P0, 2, 2);
    let depot = b.depot(P0, 0, 0);
    let pile = b.pile(4, 4);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);
    assert_eq!(bundle.get(w), Some(&Action::Harvest { pile, depot }));

    // The host reports the harvest in flight on the next tick.
    b.current(w, CurrentAction::Harvest { pile, depot });
    let snap2 = b.build();
    let bundle2 = agent.get_action(P0, &snap2);
    assert!(bundle2.get(w).is_none());
}

/// The depot never trains a worker once the population cap is
/// exceeded, however rich the player is.
#[test]
fn scenario_worker_population_cap() {
    let mut b = SnapshotBuilder::new(16, 16);
    let depot = b.depot(P0, 8, 8);
    for i in 0..6 {
        b.worker(P0, i, 0);
    }
    b.pile(15, 15);
    b.resources(P0, 999);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);
    assert!(bundle.get(depot).is_none());
}

/// Both a non-depot enemy and an enemy depot visible: the non-depot
/// enemy is attacked, even when the depot is closer.
#[test]
fn scenario_attack_prioritizes_units_over_depots() {
    let mut b = SnapshotBuilder::new(12, 12);
    let fighter = b.light(P0, 0, 0);
    b.depot(P1, 1, 0);
    let enemy = b.worker(P1, 10, 10);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);
    assert_eq!(bundle.get(fighter), Some(&Action::Attack { target: enemy }));
}

/// Across consecutive successful trainings the barracks strictly
/// alternates the two combat types.
#[test]
fn scenario_barracks_alternation() {
    let mut b = SnapshotBuilder::new(10, 10);
    let barracks = b.barracks(P0, 5, 5);
    b.resources(P0, 100);
    let snap = b.build();

    let mut agent = agent();
    let ranged = agent.catalog().resolve("ranged").unwrap();
    let light = agent.catalog().resolve("light").unwrap();

    let mut trained = Vec::new();
    for _ in 0..4 {
        let bundle = agent.get_action(P0, &snap);
        match bundle.get(barracks) {
            Some(Action::Train { kind }) => trained.push(*kind),
            other => panic!("expected a train order, got {other:?}"),
        }
    }
    assert_eq!(trained, vec![ranged, light, ranged, light]);
}

/// A skipped tick (unaffordable) does not advance the rotation.
#[test]
fn scenario_alternation_survives_skipped_ticks() {
    let mut b = SnapshotBuilder::new(10, 10);
    let barracks = b.barracks(P0, 5, 5);
    b.resources(P0, 100);
    let rich = b.build();
    b.resources(P0, 0);
    let broke = b.build();

    let mut agent = agent();
    let ranged = agent.catalog().resolve("ranged").unwrap();
    let light = agent.catalog().resolve("light").unwrap();

    assert_eq!(
        agent.get_action(P0, &rich).get(barracks),
        Some(&Action::Train { kind: ranged })
    );
    // Broke tick: no train, no rotation advance.
    assert!(agent.get_action(P0, &broke).get(barracks).is_none());
    assert_eq!(
        agent.get_action(P0, &rich).get(barracks),
        Some(&Action::Train { kind: light })
    );
}

/// On all-idle snapshots the bundle never exceeds the idle unit count.
#[test]
fn scenario_actions_bounded_by_idle_units() {
    let mut b = SnapshotBuilder::new(16, 16);
    for i in 0..5 {
        b.worker(P0, i, 8);
    }
    b.depot(P0, 2, 2);
    b.barracks(P0, 4, 2);
    b.pile(12, 8);
    b.pile(13, 8);
    b.worker(P1, 15, 15);
    b.depot(P1, 14, 14);
    b.resources(P0, 7);
    let snap = b.build();

    let mut agent = agent();
    let bundle = agent.get_action(P0, &snap);
    assert!(bundle.len() <= idle_count(&snap));

    // Every unit got at most one action by construction; check the
    // bundle addresses only our own units or structures.
    for (unit, _) in bundle.iter() {
        let u = snap.unit(unit).expect("bundle refers to a known unit");
        assert_eq!(u.owner, Owner::Player(P0));
    }
}
