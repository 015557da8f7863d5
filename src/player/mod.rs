//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - AwfulPlayer: Clusters its fleet and sweeps the grid in a fixed order
//! - MediocrePlayer: Random shots, then a cross-shaped search after a hit
//! - GoodPlayer: Spread placement plus the hunt/kill targeting engine
//! - HumanPlayer: Interactive text player

use core::fmt;
use core::str::FromStr;

use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::{AttackResult, Point};
use crate::config::MatchConfig;

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Placing its fleet onto its own board
/// - Selecting points to attack on the opponent's board
/// - Handling feedback from its own and the opponent's shots
pub trait Player {
    fn name(&self) -> &str;

    /// Place the whole fleet onto the provided board.
    fn place_fleet(&mut self, rng: &mut SmallRng, board: &mut Board) -> anyhow::Result<()>;

    /// Choose the next point to attack.
    fn next_attack_point(&mut self, rng: &mut SmallRng) -> anyhow::Result<Point>;

    /// Inform the player of the outcome of its last shot; `None` if the
    /// shot was rejected.
    fn record_attack_result(&mut self, _p: Point, _result: Option<AttackResult>) {}

    /// Inform the player of an opponent shot against its board.
    fn record_opponent_attack(&mut self, _p: Point) {}

    /// Whether a person is at the keyboard. Interactive attackers only see
    /// the shots on the opponent's board.
    fn is_interactive(&self) -> bool {
        false
    }
}

pub mod ai;
pub use ai::{AwfulPlayer, GoodPlayer, MediocrePlayer};

pub mod cli;
pub use cli::{stdin_lines, HumanPlayer};

/// The closed set of player variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Awful,
    Mediocre,
    Good,
}

impl PlayerKind {
    pub const ALL: [PlayerKind; 4] = [
        PlayerKind::Human,
        PlayerKind::Awful,
        PlayerKind::Mediocre,
        PlayerKind::Good,
    ];

    fn as_str(self) -> &'static str {
        match self {
            PlayerKind::Human => "human",
            PlayerKind::Awful => "awful",
            PlayerKind::Mediocre => "mediocre",
            PlayerKind::Good => "good",
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown player kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlayerKind(pub String);

impl fmt::Display for UnknownPlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown player kind '{}' (expected human, awful, mediocre or good)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPlayerKind {}

impl FromStr for PlayerKind {
    type Err = UnknownPlayerKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPlayerKind(s.to_string()))
    }
}

/// Build a player of the given kind. Human players talk over stdin/stdout.
pub fn create_player(kind: PlayerKind, name: &str, config: &MatchConfig) -> Box<dyn Player> {
    match kind {
        PlayerKind::Human => Box::new(HumanPlayer::stdio(name)),
        PlayerKind::Awful => Box::new(AwfulPlayer::new(name, config)),
        PlayerKind::Mediocre => Box::new(MediocrePlayer::new(name, config)),
        PlayerKind::Good => Box::new(GoodPlayer::new(name, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("Good".parse::<PlayerKind>(), Ok(PlayerKind::Good));
        assert_eq!(" mediocre ".parse::<PlayerKind>(), Ok(PlayerKind::Mediocre));
        assert_eq!(
            "great".parse::<PlayerKind>(),
            Err(UnknownPlayerKind("great".to_string()))
        );
        for kind in PlayerKind::ALL {
            assert_eq!(kind.to_string().parse::<PlayerKind>(), Ok(kind));
        }
    }

    #[test]
    fn factory_builds_named_players() {
        let cfg = MatchConfig::standard();
        let p = create_player(PlayerKind::Awful, "Ann", &cfg);
        assert_eq!(p.name(), "Ann");
        assert!(!p.is_interactive());
        assert!(create_player(PlayerKind::Human, "Hal", &cfg).is_interactive());
    }
}
