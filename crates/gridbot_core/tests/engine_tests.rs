//! Moved out of the lib into an integration test: these tests use
//! `gridbot_test_utils`, which itself depends on `gridbot_core`, and
//! linking it into the lib's unit-test build duplicates the crate's
//! types (they fail to unify).

mod tests {
    use gridbot_core::catalog::UnitTypeCatalog;
    use gridbot_core::engine::{Agent, AgentState};
    use gridbot_core::snapshot::PlayerId;
    use gridbot_core::action::Action;
    use gridbot_core::snapshot::GridPos;
    use gridbot_test_utils::fixtures::SnapshotBuilder;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn agent() -> Agent {
        Agent::new(UnitTypeCatalog::standard()).unwrap()
    }

    #[test]
    fn test_small_map_flag_recomputed_each_tick() {
        let mut agent = agent();
        let small = SnapshotBuilder::new(8, 8).build();
        let big = SnapshotBuilder::new(16, 16).build();

        agent.get_action(P0, &small);
        assert!(agent.state().small_map);
        agent.get_action(P0, &big);
        assert!(!agent.state().small_map);
    }

    #[test]
    fn test_reset_restores_rotation() {
        let mut agent = agent();
        let mut b = SnapshotBuilder::new(10, 10);
        b.barracks(P0, 5, 5);
        b.resources(P0, 100);
        let snap = b.build();

        agent.get_action(P0, &snap); // trains ranged, flips rotation
        assert_ne!(agent.state(), &AgentState::new());

        agent.reset();
        assert_eq!(agent.state(), &AgentState::new());
    }

    #[test]
    fn test_empty_snapshot_yields_empty_bundle() {
        let mut agent = agent();
        let bundle = agent.get_action(P0, &SnapshotBuilder::new(8, 8).build());
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_third_battle_worker_is_parked() {
        let mut b = SnapshotBuilder::new(10, 10);
        // Quota = 1 depot + 1 offset = 2 free; five workers leave
        // three for battle.
        let ids: Vec<_> = (0..5).map(|i| b.worker(P0, i, 4)).collect();
        b.depot(P0, 1, 1);
        b.pile(9, 4);
        let snap = b.build();

        let mut agent = agent();
        let bundle = agent.get_action(P0, &snap);

        // No enemies, so the first two battle workers have nothing to
        // do; the third is parked on the depot's side of the map.
        assert_eq!(
            bundle.get(ids[4]),
            Some(&Action::Move {
                dest: GridPos::new(0, 9)
            })
        );
        assert!(bundle.get(ids[2]).is_none());
        assert!(bundle.get(ids[3]).is_none());
    }

    #[test]
    fn test_wedged_ranged_repositions_instead_of_fighting() {
        let mut b = SnapshotBuilder::new(10, 10);
        b.depot(P0, 7, 7);
        b.barracks(P0, 5, 5);
        let wedged = b.ranged(P0, 5, 6); // distance 1 from barracks
        let fighter = b.ranged(P0, 2, 2);
        b.worker(P1, 0, 5);
        let snap = b.build();

        let mut agent = agent();
        let bundle = agent.get_action(P0, &snap);

        assert!(matches!(bundle.get(wedged), Some(Action::Move { .. })));
        assert!(matches!(bundle.get(fighter), Some(Action::Attack { .. })));
    }
}
