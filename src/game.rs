//! Turn-by-turn match driver.

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use log::{info, warn};
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::board::Board;
use crate::common::{AttackResult, BoardError};
use crate::config::MatchConfig;
use crate::player::Player;

/// Which side of the table a player sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub winner: Seat,
    pub winner_name: String,
    /// Shots fired by both players together.
    pub turns: usize,
}

/// Plays matches on one configuration.
pub struct Match<'a> {
    config: &'a MatchConfig,
}

impl<'a> Match<'a> {
    pub fn new(config: &'a MatchConfig) -> Self {
        Self { config }
    }

    /// Turns each player gets before the match is abandoned.
    pub fn turn_cap(&self) -> usize {
        self.config.rows() * self.config.cols() * 2
    }

    /// Run a match to completion.
    ///
    /// Progress is written to `out`. With `pause`, a line is read from it
    /// after every turn.
    pub fn play(
        &self,
        p1: &mut dyn Player,
        p2: &mut dyn Player,
        rng: &mut SmallRng,
        out: &mut dyn Write,
        mut pause: Option<&mut dyn BufRead>,
    ) -> anyhow::Result<MatchOutcome> {
        let mut players: [&mut dyn Player; 2] = [p1, p2];
        let mut boards = [Board::new(self.config), Board::new(self.config)];
        for (player, board) in players.iter_mut().zip(boards.iter_mut()) {
            player
                .place_fleet(rng, board)
                .with_context(|| format!("{} could not place their ships", player.name()))?;
        }
        info!(
            "match start: {} vs {} on {}x{}",
            players[0].name(),
            players[1].name(),
            self.config.rows(),
            self.config.cols()
        );

        let mut turns = 0;
        for _ in 0..self.turn_cap() {
            for attacker in [Seat::First, Seat::Second] {
                turns += 1;
                if take_turn(&mut players, &mut boards, attacker, rng, out)? {
                    let winner_name = players[attacker.index()].name().to_string();
                    info!("match over: {} wins after {} turns", winner_name, turns);
                    return Ok(MatchOutcome {
                        winner: attacker,
                        winner_name,
                        turns,
                    });
                }
                if let Some(input) = pause.as_deref_mut() {
                    write!(out, "Press enter to continue: ")?;
                    out.flush()?;
                    let mut line = String::new();
                    input.read_line(&mut line)?;
                }
            }
        }
        bail!("no winner after {} turns each", self.turn_cap())
    }
}

/// One shot by `attacker`. Returns true once the defender has nothing left.
fn take_turn(
    players: &mut [&mut dyn Player; 2],
    boards: &mut [Board; 2],
    attacker: Seat,
    rng: &mut SmallRng,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let defender = attacker.other();
    let (a, d) = (attacker.index(), defender.index());
    let shots_only = players[a].is_interactive();
    let (attacker_name, defender_name) =
        (players[a].name().to_string(), players[d].name().to_string());

    writeln!(out, "{}'s turn. Board for {}:", attacker_name, defender_name)?;
    write!(out, "{}", boards[d].view(shots_only))?;

    let p = players[a].next_attack_point(rng)?;
    let result = match boards[d].attack(p) {
        Ok(result) => Some(result),
        Err(BoardError::OutOfBounds(_)) | Err(BoardError::AlreadyAttacked(_)) => None,
        Err(e) => return Err(e.into()),
    };
    players[a].record_attack_result(p, result);
    players[d].record_opponent_attack(p);

    match result {
        None => {
            warn!("{} wasted a shot at {}", attacker_name, p);
            writeln!(out, "{} wasted a shot at {}.", attacker_name, p)?;
        }
        Some(result) => {
            write!(out, "{} attacked {} and ", attacker_name, p)?;
            match result {
                AttackResult::Miss => writeln!(out, "missed, resulting in:")?,
                AttackResult::Hit => writeln!(out, "hit something, resulting in:")?,
                AttackResult::Destroyed(id) => writeln!(
                    out,
                    "destroyed the {}, resulting in:",
                    boards[d].fleet()[id].name()
                )?,
            }
            write!(out, "{}", boards[d].view(shots_only))?;
        }
    }

    if !boards[d].all_destroyed() {
        return Ok(false);
    }
    writeln!(out, "{} wins!", attacker_name)?;
    if players[d].is_interactive() {
        writeln!(out, "Here's where {}'s ships were:", attacker_name)?;
        write!(out, "{}", boards[a].view(false))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Point;
    use crate::player::{AwfulPlayer, HumanPlayer};
    use rand::SeedableRng;
    use std::io;

    fn tiny() -> MatchConfig {
        MatchConfig::new(2, 2).and_then(|c| c.with_ship(1, 'S', "skiff")).unwrap()
    }

    /// Fires a fixed list of points, then the origin forever.
    struct Scripted {
        shots: Vec<Point>,
        results: Vec<Option<AttackResult>>,
    }

    impl Player for Scripted {
        fn name(&self) -> &str {
            "script"
        }

        fn place_fleet(&mut self, _rng: &mut SmallRng, board: &mut Board) -> anyhow::Result<()> {
            board.place_ship(Point::new(1, 1), 0, crate::ship::Direction::Horizontal)?;
            Ok(())
        }

        fn next_attack_point(&mut self, _rng: &mut SmallRng) -> anyhow::Result<Point> {
            Ok(if self.shots.is_empty() {
                Point::ORIGIN
            } else {
                self.shots.remove(0)
            })
        }

        fn record_attack_result(&mut self, _p: Point, result: Option<AttackResult>) {
            self.results.push(result);
        }
    }

    #[test]
    fn wasted_shots_are_reported_and_game_finishes() {
        let cfg = tiny();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut first = Scripted {
            shots: vec![Point::new(5, 5), Point::new(0, 0), Point::new(0, 0)],
            results: Vec::new(),
        };
        // Awful opens at (1,1), right where the script keeps its skiff.
        let mut second = AwfulPlayer::new("awful", &cfg);
        let mut out = Vec::new();
        let outcome = Match::new(&cfg)
            .play(&mut first, &mut second, &mut rng, &mut out, None)
            .unwrap();
        assert_eq!(outcome.winner, Seat::Second);
        assert_eq!(outcome.winner_name, "awful");
        assert_eq!(outcome.turns, 2);
        assert_eq!(first.results, vec![None]);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("script wasted a shot at (5,5)."));
        assert!(text.contains("awful attacked (1,1) and destroyed the skiff, resulting in:"));
        assert!(text.contains("awful wins!"));
        assert!(!text.contains("Here's where"));
    }

    #[test]
    fn interactive_loser_sees_winner_board_and_pauses() {
        let cfg = tiny();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut human = HumanPlayer::new(
            "Hal",
            Box::new(io::Cursor::new(b"h\n0 0\n0 1\n1 0\n1 1\n1 1\n".to_vec())),
            Box::new(io::sink()),
        );
        let mut awful = AwfulPlayer::new("awful", &cfg);
        let mut out = Vec::new();
        let mut pause = io::Cursor::new(b"\n\n\n\n\n\n\n".to_vec());
        let outcome = Match::new(&cfg)
            .play(&mut human, &mut awful, &mut rng, &mut out, Some(&mut pause as &mut dyn BufRead))
            .unwrap();
        assert_eq!(outcome.winner, Seat::Second);
        assert_eq!(outcome.turns, 8);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Press enter to continue: "));
        assert!(text.contains("Here's where awful's ships were:"));
        // The human's view of the opponent never shows a live ship.
        assert!(!text.lines().take(3).any(|l| l.contains('S')));
    }

    #[test]
    fn placement_failure_names_the_player() {
        let cfg = MatchConfig::new(1, 3)
            .and_then(|c| c.with_ship(1, 'A', "a"))
            .and_then(|c| c.with_ship(1, 'B', "b"))
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut p1 = AwfulPlayer::new("stacker", &cfg);
        let mut p2 = AwfulPlayer::new("other", &cfg);
        let err = Match::new(&cfg)
            .play(&mut p1, &mut p2, &mut rng, &mut io::sink(), None)
            .unwrap_err();
        assert!(err.to_string().contains("stacker"));
    }
}
