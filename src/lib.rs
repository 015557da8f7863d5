mod bitboard;
mod board;
mod common;
mod config;
mod game;
mod grid;
mod logging;
mod placement;
pub mod player;
mod ship;
mod targeting;

pub use bitboard::{BitBoard, BitBoardError, Points};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::{Cell, GridModel};
pub use logging::{init_logging, LOG_ENV};
pub use placement::*;
pub use player::{
    create_player, stdin_lines, AwfulPlayer, GoodPlayer, HumanPlayer, MediocrePlayer, Player,
    PlayerKind, UnknownPlayerKind,
};
pub use ship::*;
pub use targeting::*;
