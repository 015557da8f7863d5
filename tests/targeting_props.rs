use std::collections::HashSet;

use broadside::{
    AttackResult, Board, MatchConfig, PlacementSearch, Point, Spacing, TargetState,
    TargetingEngine,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn placed_board(config: &MatchConfig, spacing: Spacing, rng: &mut SmallRng) -> Board {
    let mut board = Board::new(config);
    PlacementSearch::new(spacing).place_fleet(&mut board, rng).unwrap();
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_sinks_fleet_without_repeating(seed in any::<u64>(), spread in any::<bool>()) {
        let cfg = MatchConfig::standard();
        let mut rng = SmallRng::seed_from_u64(seed);
        let spacing = if spread { Spacing::Spread } else { Spacing::Packed };
        let mut board = placed_board(&cfg, spacing, &mut rng);
        let mut engine = TargetingEngine::new(&cfg);
        let mut seen: HashSet<Point> = HashSet::new();
        let mut after_hit = false;

        while !board.all_destroyed() {
            let p = engine.next_attack(&mut rng);
            prop_assert!(p.is_some(), "engine ran dry with ships afloat");
            let p = p.unwrap();
            prop_assert!(seen.insert(p), "{} attacked twice", p);
            if after_hit && engine.state() != TargetState::Hunt {
                let anchor = engine.anchor();
                prop_assert!(p.row == anchor.row || p.col == anchor.col || engine.state() == TargetState::Recover);
            }
            let result = board.attack(p);
            prop_assert!(result.is_ok());
            let result = result.ok();
            engine.record_result(p, result);
            after_hit = result == Some(AttackResult::Hit);
        }
        prop_assert!(seen.len() <= 100);
        prop_assert_eq!(engine.attacked_count(), seen.len());
    }

    #[test]
    fn misses_in_hunt_stay_in_hunt(seed in any::<u64>(), shots in 1usize..60) {
        let cfg = MatchConfig::standard();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut engine = TargetingEngine::new(&cfg);
        for _ in 0..shots {
            let p = engine.next_attack(&mut rng).unwrap();
            engine.record_result(p, Some(AttackResult::Miss));
            prop_assert_eq!(engine.state(), TargetState::Hunt);
        }
    }
}

#[test]
fn full_sweep_covers_every_cell_once() {
    let cfg = MatchConfig::new(7, 9).and_then(|c| c.with_ship(2, 'P', "patrol")).unwrap();
    let mut rng = SmallRng::seed_from_u64(99);
    let mut engine = TargetingEngine::new(&cfg);
    let mut seen = HashSet::new();
    while let Some(p) = engine.next_attack(&mut rng) {
        assert!(seen.insert(p));
        engine.record_result(p, Some(AttackResult::Miss));
    }
    assert_eq!(seen.len(), 63);
}
