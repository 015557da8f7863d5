use anyhow::Context;
use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Board;
use crate::common::{AttackResult, Point};
use crate::config::{Mask, MatchConfig};
use crate::placement::{PlacementSearch, Spacing};
use crate::ship::Direction;
use crate::targeting::{random_open_point, TargetingEngine};

use super::Player;

/// Distance along the anchor's row and column searched by [`MediocrePlayer`].
pub const MEDIOCRE_REACH: i32 = 4;

/// Random draws on the cross before enumerating what is left of it.
const MEDIOCRE_CROSS_DRAWS: usize = 100;

/// Stacks ship `k` at `(k, 0)` and fires from the bottom-right corner
/// leftwards, then upwards, wrapping around. Ignores every result.
pub struct AwfulPlayer {
    name: String,
    rows: i32,
    cols: i32,
    last: Point,
}

impl AwfulPlayer {
    pub fn new(name: &str, config: &MatchConfig) -> Self {
        Self {
            name: name.to_string(),
            rows: config.rows() as i32,
            cols: config.cols() as i32,
            last: Point::ORIGIN,
        }
    }
}

impl Player for AwfulPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_fleet(&mut self, _rng: &mut SmallRng, board: &mut Board) -> anyhow::Result<()> {
        for k in 0..board.fleet().len() {
            board
                .place_ship(Point::new(k as i32, 0), k, Direction::Horizontal)
                .with_context(|| format!("{} cannot stack ship {}", self.name, k))?;
        }
        Ok(())
    }

    fn next_attack_point(&mut self, _rng: &mut SmallRng) -> anyhow::Result<Point> {
        let mut p = self.last;
        if p.col > 0 {
            p.col -= 1;
        } else {
            p.col = self.cols - 1;
            p.row = if p.row > 0 { p.row - 1 } else { self.rows - 1 };
        }
        self.last = p;
        Ok(p)
    }
}

/// Which mode a [`MediocrePlayer`] is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Random,
    Cross { anchor: Point },
}

/// Random shots until something is hit, then random shots along the hit
/// cell's row and column until that ship sinks or the cross runs out.
pub struct MediocrePlayer {
    name: String,
    rows: i32,
    cols: i32,
    mode: Mode,
    attacked: Mask,
}

impl MediocrePlayer {
    pub fn new(name: &str, config: &MatchConfig) -> Self {
        Self {
            name: name.to_string(),
            rows: config.rows() as i32,
            cols: config.cols() as i32,
            mode: Mode::Random,
            attacked: Mask::new(),
        }
    }

    fn open(&self, p: Point) -> bool {
        p.row >= 0
            && p.col >= 0
            && p.row < self.rows
            && p.col < self.cols
            && !self.attacked.contains(p)
    }

    fn cross_point(&self, anchor: Point, rng: &mut SmallRng) -> Option<Point> {
        for _ in 0..MEDIOCRE_CROSS_DRAWS {
            let d = rng.random_range(-MEDIOCRE_REACH..=MEDIOCRE_REACH);
            let p = if rng.random_bool(0.5) {
                anchor.offset(d, 0)
            } else {
                anchor.offset(0, d)
            };
            if self.open(p) {
                return Some(p);
            }
        }
        (-MEDIOCRE_REACH..=MEDIOCRE_REACH)
            .flat_map(|d| [anchor.offset(d, 0), anchor.offset(0, d)])
            .find(|&p| self.open(p))
    }
}

impl Player for MediocrePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_fleet(&mut self, rng: &mut SmallRng, board: &mut Board) -> anyhow::Result<()> {
        PlacementSearch::new(Spacing::Packed)
            .place_fleet(board, rng)
            .with_context(|| format!("{} could not lay out a fleet", self.name))
    }

    fn next_attack_point(&mut self, rng: &mut SmallRng) -> anyhow::Result<Point> {
        if let Mode::Cross { anchor } = self.mode {
            if let Some(p) = self.cross_point(anchor, rng) {
                return Ok(p);
            }
            debug!("{}: cross around {} exhausted", self.name, anchor);
            self.mode = Mode::Random;
        }
        // Grid fully attacked only if the opponent somehow survived; any
        // point is as good as another then.
        Ok(random_open_point(&self.attacked, self.rows, self.cols, rng).unwrap_or(Point::ORIGIN))
    }

    fn record_attack_result(&mut self, p: Point, result: Option<AttackResult>) {
        let _ = self.attacked.insert(p);
        match (self.mode, result) {
            (Mode::Random, Some(AttackResult::Hit)) => self.mode = Mode::Cross { anchor: p },
            (Mode::Cross { .. }, Some(AttackResult::Destroyed(_))) => self.mode = Mode::Random,
            _ => {}
        }
    }
}

/// Spread-out fleet plus the full hunt/kill [`TargetingEngine`].
pub struct GoodPlayer {
    name: String,
    engine: TargetingEngine,
}

impl GoodPlayer {
    pub fn new(name: &str, config: &MatchConfig) -> Self {
        Self {
            name: name.to_string(),
            engine: TargetingEngine::new(config),
        }
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }
}

impl Player for GoodPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_fleet(&mut self, rng: &mut SmallRng, board: &mut Board) -> anyhow::Result<()> {
        PlacementSearch::new(Spacing::Spread)
            .place_fleet(board, rng)
            .with_context(|| format!("{} could not lay out a spread fleet", self.name))
    }

    fn next_attack_point(&mut self, rng: &mut SmallRng) -> anyhow::Result<Point> {
        Ok(self.engine.next_attack(rng).unwrap_or(Point::ORIGIN))
    }

    fn record_attack_result(&mut self, p: Point, result: Option<AttackResult>) {
        self.engine.record_result(p, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targeting::TargetState;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn awful_sweeps_from_bottom_right() {
        let cfg = MatchConfig::new(2, 3).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut p = AwfulPlayer::new("awful", &cfg);
        let shots: Vec<Point> = (0..7)
            .map(|_| p.next_attack_point(&mut rng).unwrap())
            .collect();
        let expected: Vec<Point> = [(1, 2), (1, 1), (1, 0), (0, 2), (0, 1), (0, 0), (1, 2)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(shots, expected);
    }

    #[test]
    fn awful_stacks_ships_in_column_zero() {
        let cfg = MatchConfig::standard();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut board = Board::new(&cfg);
        AwfulPlayer::new("awful", &cfg)
            .place_fleet(&mut rng, &mut board)
            .unwrap();
        for k in 0..cfg.fleet().len() {
            assert_eq!(board.ship_cells(k).next(), Some(Point::new(k as i32, 0)));
        }
    }

    #[test]
    fn awful_placement_fails_on_a_short_grid() {
        let cfg = MatchConfig::new(1, 5)
            .and_then(|c| c.with_ship(2, 'A', "a"))
            .and_then(|c| c.with_ship(2, 'B', "b"))
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut board = Board::new(&cfg);
        assert!(AwfulPlayer::new("awful", &cfg)
            .place_fleet(&mut rng, &mut board)
            .is_err());
    }

    #[test]
    fn mediocre_stays_on_the_cross_after_a_hit() {
        let cfg = MatchConfig::standard();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut p = MediocrePlayer::new("mediocre", &cfg);
        let anchor = Point::new(5, 5);
        p.record_attack_result(anchor, Some(AttackResult::Hit));
        for _ in 0..10 {
            let next = p.next_attack_point(&mut rng).unwrap();
            assert!(next.row == 5 || next.col == 5);
            assert!((next.row - 5).abs() <= MEDIOCRE_REACH);
            assert!((next.col - 5).abs() <= MEDIOCRE_REACH);
            assert_ne!(next, anchor);
            p.record_attack_result(next, Some(AttackResult::Miss));
        }
        p.record_attack_result(Point::new(5, 6), Some(AttackResult::Destroyed(4)));
        assert_eq!(p.mode, Mode::Random);
    }

    #[test]
    fn mediocre_never_repeats_a_point() {
        let cfg = MatchConfig::new(4, 4).unwrap();
        let mut rng = SmallRng::seed_from_u64(12);
        let mut p = MediocrePlayer::new("mediocre", &cfg);
        let mut seen = HashSet::new();
        for i in 0..16 {
            let next = p.next_attack_point(&mut rng).unwrap();
            assert!(seen.insert(next));
            let result = if i == 0 { AttackResult::Hit } else { AttackResult::Miss };
            p.record_attack_result(next, Some(result));
        }
    }

    #[test]
    fn good_player_places_a_spread_fleet() {
        let cfg = MatchConfig::standard();
        let mut rng = SmallRng::seed_from_u64(21);
        let mut board = Board::new(&cfg);
        GoodPlayer::new("good", &cfg)
            .place_fleet(&mut rng, &mut board)
            .unwrap();
        for id in 0..cfg.fleet().len() {
            assert!(board.is_placed(id));
        }
    }

    #[test]
    fn good_player_feeds_results_to_its_engine() {
        let cfg = MatchConfig::standard();
        let mut rng = SmallRng::seed_from_u64(8);
        let mut p = GoodPlayer::new("good", &cfg);
        let first = p.next_attack_point(&mut rng).unwrap();
        p.record_attack_result(first, Some(AttackResult::Hit));
        assert_eq!(p.engine().state(), TargetState::Alert);
        assert_eq!(p.engine().anchor(), first);
        assert!(p.engine().has_attacked(first));

        let next = p.next_attack_point(&mut rng).unwrap();
        assert!(next.row == first.row || next.col == first.col);
        assert_ne!(next, first);
    }
}
