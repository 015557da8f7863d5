//! Backtracking fleet placement used by the automated players.
//!
//! Each attempt blocks a random half of the grid and then runs a
//! depth-first search: for the current ship, scan cells in row-major
//! order, try horizontal then vertical, and accept a placement only if
//! the rest of the fleet can then be placed from the grid origin.
//! Every attempt visits at most [`SEARCH_NODE_BUDGET`] candidate
//! placements; running out counts as a failed attempt.

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Point, ShipId};
use crate::grid::Cell;
use crate::ship::{ship_cells, Direction};

/// Number of freshly blocked boards to try before giving up.
pub const ATTEMPT_BUDGET: usize = 50;

/// Candidate placements tried per attempt before the attempt is abandoned.
pub const SEARCH_NODE_BUDGET: usize = 100_000;

/// Distance, along a row or column, inside which another ship is not
/// tolerated when placing with [`Spacing::Spread`].
pub const SPACING_RADIUS: i32 = 4;

/// Whether ships may sit close to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Any legal layout.
    Packed,
    /// No two ships within [`SPACING_RADIUS`] of each other along a
    /// row or column.
    Spread,
}

/// Randomized backtracking search for a full fleet layout.
#[derive(Debug, Clone, Copy)]
pub struct PlacementSearch {
    spacing: Spacing,
    attempts: usize,
    nodes: usize,
}

impl PlacementSearch {
    pub fn new(spacing: Spacing) -> Self {
        Self {
            spacing,
            attempts: ATTEMPT_BUDGET,
            nodes: SEARCH_NODE_BUDGET,
        }
    }

    /// Override the attempt budget.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Override the per-attempt node budget.
    pub fn with_node_budget(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Place every ship of the board's fleet.
    ///
    /// On success the board holds the whole fleet and no blocked cells.
    /// On failure the board is left cleared.
    pub fn place_fleet<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        let exhausted = BoardError::PlacementExhausted {
            attempts: self.attempts,
        };
        let cells: usize = board.fleet().iter().map(|s| s.length()).sum();
        if cells > board.rows() * board.cols() {
            return Err(exhausted);
        }
        for attempt in 0..self.attempts {
            board.block(rng);
            if self.place_from(board, 0) {
                board.unblock();
                debug!("fleet placed on attempt {}", attempt + 1);
                return Ok(());
            }
            board.clear();
        }
        debug!("fleet placement exhausted after {} attempts", self.attempts);
        Err(exhausted)
    }

    /// Place ships `id..` anywhere on the board, honouring blocked cells.
    ///
    /// Returns `false` with the board exactly as it was on entry if no
    /// layout exists or the node budget runs out first.
    pub fn place_from(&self, board: &mut Board, id: ShipId) -> bool {
        let mut nodes = self.nodes;
        let placed = self.search(board, id, &mut nodes);
        if !placed && nodes == 0 {
            debug!("placement search ran out of its {} node budget", self.nodes);
        }
        placed
    }

    fn search(&self, board: &mut Board, id: ShipId, nodes: &mut usize) -> bool {
        if id == board.fleet().len() {
            return true;
        }
        let points: Vec<Point> = (0..board.rows() as i32)
            .flat_map(|r| (0..board.cols() as i32).map(move |c| Point::new(r, c)))
            .collect();
        for origin in points {
            for dir in Direction::ALL {
                if *nodes == 0 {
                    return false;
                }
                *nodes -= 1;
                if !self.try_place(board, origin, id, dir) {
                    continue;
                }
                if self.search(board, id + 1, nodes) {
                    return true;
                }
                // Placement just succeeded with these arguments.
                let _ = board.unplace_ship(origin, id, dir);
            }
        }
        false
    }

    fn try_place(&self, board: &mut Board, origin: Point, id: ShipId, dir: Direction) -> bool {
        if board.check_placement(origin, id, dir).is_err() {
            return false;
        }
        if self.spacing == Spacing::Spread && crowded(board, origin, id, dir) {
            return false;
        }
        board.place_ship(origin, id, dir).is_ok()
    }
}

/// True if any cell of the prospective ship has a different ship within
/// [`SPACING_RADIUS`] along its row or its column.
fn crowded(board: &Board, origin: Point, id: ShipId, dir: Direction) -> bool {
    let len = board.fleet()[id].length();
    let other = |p: Point| matches!(board.cell(p), Some(Cell::Ship(s)) if s != id);
    ship_cells(origin, len, dir).any(|p| {
        (-SPACING_RADIUS..=SPACING_RADIUS)
            .any(|d| other(p.offset(0, d)) || other(p.offset(d, 0)))
    })
}
