use broadside::{
    AttackResult, Board, BoardError, Cell, Direction, MatchConfig, PlacementSearch, Point, Spacing,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn snapshot(board: &Board) -> Vec<Option<Cell>> {
    (0..board.rows() as i32)
        .flat_map(|r| (0..board.cols() as i32).map(move |c| Point::new(r, c)))
        .map(|p| board.cell(p))
        .collect()
}

fn random_board(seed: u64) -> Board {
    let cfg = MatchConfig::standard();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(&cfg);
    PlacementSearch::new(Spacing::Packed)
        .place_fleet(&mut board, &mut rng)
        .unwrap();
    let shots = rng.random_range(0..40);
    for _ in 0..shots {
        let p = Point::new(rng.random_range(0..10), rng.random_range(0..10));
        let _ = board.attack(p);
    }
    board
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Horizontal), Just(Direction::Vertical)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn clear_resets_everything(seed in any::<u64>()) {
        let mut board = random_board(seed);
        board.clear();
        prop_assert!(snapshot(&board).iter().all(|c| *c == Some(Cell::Empty)));
        for id in 0..board.fleet().len() {
            prop_assert!(!board.is_placed(id));
        }
    }

    #[test]
    fn place_then_unplace_roundtrips(
        seed in any::<u64>(),
        row in -2i32..12,
        col in -2i32..12,
        dir in direction(),
    ) {
        let cfg = MatchConfig::new(10, 10)
            .and_then(|c| c.with_ship(5, 'A', "a"))
            .and_then(|c| c.with_ship(3, 'B', "b"))
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(&cfg);
        let other = Point::new(rng.random_range(0..10), rng.random_range(0..8));
        board.place_ship(other, 1, Direction::Horizontal).unwrap();
        let before = snapshot(&board);

        let origin = Point::new(row, col);
        match board.place_ship(origin, 0, dir) {
            Ok(()) => {
                prop_assert!(board.is_placed(0));
                prop_assert_eq!(
                    board.place_ship(origin, 0, dir),
                    Err(BoardError::ShipAlreadyPlaced(0))
                );
                board.unplace_ship(origin, 0, dir).unwrap();
                prop_assert!(!board.is_placed(0));
            }
            Err(_) => prop_assert!(!board.is_placed(0)),
        }
        prop_assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn blocked_cells_never_hold_ships(seed in any::<u64>(), row in 0i32..10, col in 0i32..10, dir in direction()) {
        let cfg = MatchConfig::new(10, 10).and_then(|c| c.with_ship(4, 'A', "a")).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(&cfg);
        board.block(&mut rng);
        let before = snapshot(&board);
        if board.place_ship(Point::new(row, col), 0, dir).is_ok() {
            prop_assert!(board.ship_cells(0).all(|p| !board.is_blocked(p)));
        } else {
            prop_assert_eq!(snapshot(&board), before);
        }
    }

    #[test]
    fn second_attack_is_always_invalid(seed in any::<u64>(), row in 0i32..10, col in 0i32..10) {
        let mut board = random_board(seed);
        let p = Point::new(row, col);
        let _ = board.attack(p);
        let after_first = snapshot(&board);
        prop_assert_eq!(board.attack(p), Err(BoardError::AlreadyAttacked(p)));
        prop_assert_eq!(snapshot(&board), after_first);
    }

    #[test]
    fn sinking_every_cell_destroys_the_fleet(seed in any::<u64>()) {
        let cfg = MatchConfig::standard();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(&cfg);
        PlacementSearch::new(Spacing::Packed).place_fleet(&mut board, &mut rng).unwrap();
        for id in 0..cfg.fleet().len() {
            let cells: Vec<Point> = board.ship_cells(id).collect();
            prop_assert_eq!(cells.len(), cfg.fleet()[id].length());
            let (last, rest) = cells.split_last().unwrap();
            for &p in rest {
                prop_assert_eq!(board.attack(p), Ok(AttackResult::Hit));
            }
            prop_assert_eq!(board.attack(*last), Ok(AttackResult::Destroyed(id)));
        }
        prop_assert!(board.all_destroyed());
    }
}
