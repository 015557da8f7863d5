//! Board state: ship placement legality, blocking, shot resolution and
//! win detection on top of [`GridModel`].

use core::fmt;

use log::trace;
use rand::Rng;

use crate::common::{AttackResult, BoardError, Point, ShipId};
use crate::config::{MatchConfig, EMPTY_MARKER, HIT_MARKER, MISS_MARKER};
use crate::grid::{Cell, GridModel};
use crate::ship::{ship_cells, Direction, ShipSpec};

/// Probability that `block` marks any given cell.
const BLOCK_PROBABILITY: f64 = 0.5;

/// One player's board.
#[derive(Debug, Clone)]
pub struct Board {
    grid: GridModel,
}

impl Board {
    /// Create an empty board for the given configuration.
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            grid: GridModel::new(config),
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn fleet(&self) -> &[ShipSpec] {
        self.grid.fleet()
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.grid.in_bounds(p)
    }

    /// Cell at `p`, or `None` off the grid.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        self.grid.get(p)
    }

    pub fn is_placed(&self, id: ShipId) -> bool {
        self.grid.placed.get(id).copied().unwrap_or(false)
    }

    pub fn is_blocked(&self, p: Point) -> bool {
        self.grid.blocked.contains(p)
    }

    /// Points currently holding ship `id`, live or hit.
    pub fn ship_cells(&self, id: ShipId) -> impl Iterator<Item = Point> + '_ {
        self.grid.points().filter(move |&p| {
            matches!(self.grid.get(p), Some(Cell::Ship(s)) | Some(Cell::Hit(s)) if s == id)
        })
    }

    /// Reset every cell to empty, drop all blocking and unplace every ship.
    pub fn clear(&mut self) {
        self.grid.reset();
    }

    /// Independently block each cell with probability one half.
    pub fn block<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.blocked.clear_all();
        let points: Vec<Point> = self.grid.points().collect();
        for p in points {
            if rng.random_bool(BLOCK_PROBABILITY) {
                // Every grid point fits the mask capacity.
                let _ = self.grid.blocked.insert(p);
            }
        }
        trace!("blocked {} cells", self.grid.blocked.count());
    }

    /// Clear the blocked mask, leaving ships where they are.
    pub fn unblock(&mut self) {
        self.grid.blocked.clear_all();
    }

    fn spec(&self, id: ShipId) -> Result<&ShipSpec, BoardError> {
        self.grid.fleet().get(id).ok_or(BoardError::InvalidShipId(id))
    }

    /// Check that ship `id` could be placed at `origin` along `dir`.
    pub fn check_placement(
        &self,
        origin: Point,
        id: ShipId,
        dir: Direction,
    ) -> Result<(), BoardError> {
        let len = self.spec(id)?.length();
        if self.grid.placed[id] {
            return Err(BoardError::ShipAlreadyPlaced(id));
        }
        for p in ship_cells(origin, len, dir) {
            match self.grid.get(p) {
                None => return Err(BoardError::OutOfBounds(p)),
                Some(_) if self.grid.blocked.contains(p) => {
                    return Err(BoardError::CellBlocked(p))
                }
                Some(Cell::Empty) => {}
                Some(_) => return Err(BoardError::ShipOverlaps(p)),
            }
        }
        Ok(())
    }

    /// Place ship `id` with its top/left cell at `origin`.
    ///
    /// Fails without touching the board if the id is unknown or already
    /// placed, or if any covered cell is off the grid, blocked or occupied.
    pub fn place_ship(
        &mut self,
        origin: Point,
        id: ShipId,
        dir: Direction,
    ) -> Result<(), BoardError> {
        self.check_placement(origin, id, dir)?;
        let len = self.grid.fleet()[id].length();
        for p in ship_cells(origin, len, dir) {
            if let Some(cell) = self.grid.get_mut(p) {
                *cell = Cell::Ship(id);
            }
        }
        self.grid.placed[id] = true;
        Ok(())
    }

    /// Remove ship `id` previously placed at `origin` along `dir`.
    ///
    /// Every covered cell must currently hold a live segment of exactly
    /// that ship.
    pub fn unplace_ship(
        &mut self,
        origin: Point,
        id: ShipId,
        dir: Direction,
    ) -> Result<(), BoardError> {
        let len = self.spec(id)?.length();
        if !self.grid.placed[id] {
            return Err(BoardError::ShipNotPlaced(id));
        }
        let matches = ship_cells(origin, len, dir).all(|p| self.grid.get(p) == Some(Cell::Ship(id)));
        if !matches {
            return Err(BoardError::ShipMismatch(id));
        }
        for p in ship_cells(origin, len, dir) {
            if let Some(cell) = self.grid.get_mut(p) {
                *cell = Cell::Empty;
            }
        }
        self.grid.placed[id] = false;
        Ok(())
    }

    /// Resolve a shot at `p`.
    pub fn attack(&mut self, p: Point) -> Result<AttackResult, BoardError> {
        let cell = self.grid.get_mut(p).ok_or(BoardError::OutOfBounds(p))?;
        if cell.is_resolved() {
            return Err(BoardError::AlreadyAttacked(p));
        }
        match *cell {
            Cell::Ship(id) => {
                *cell = Cell::Hit(id);
                let alive = self.grid.cells().iter().any(|&c| c == Cell::Ship(id));
                if alive {
                    Ok(AttackResult::Hit)
                } else {
                    Ok(AttackResult::Destroyed(id))
                }
            }
            _ => {
                *cell = Cell::Miss;
                Ok(AttackResult::Miss)
            }
        }
    }

    /// True when no live ship segment remains.
    pub fn all_destroyed(&self) -> bool {
        !self
            .grid
            .cells()
            .iter()
            .any(|c| matches!(c, Cell::Ship(_)))
    }

    /// Rendering of the board. With `shots_only`, only misses and hits
    /// are shown and everything else reads as open water.
    pub fn view(&self, shots_only: bool) -> BoardView<'_> {
        BoardView {
            board: self,
            shots_only,
        }
    }
}

/// Display adapter returned by [`Board::view`].
pub struct BoardView<'a> {
    board: &'a Board,
    shots_only: bool,
}

impl BoardView<'_> {
    fn marker(&self, cell: Cell) -> char {
        match cell {
            Cell::Miss => MISS_MARKER,
            Cell::Hit(_) => HIT_MARKER,
            Cell::Empty => EMPTY_MARKER,
            Cell::Ship(_) if self.shots_only => EMPTY_MARKER,
            Cell::Ship(id) => self.board.fleet()[id].symbol(),
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board;
        write!(f, "  ")?;
        for c in 0..board.cols() {
            write!(f, "{} ", c)?;
        }
        writeln!(f)?;
        for r in 0..board.rows() {
            write!(f, "{} ", r)?;
            for c in 0..board.cols() {
                let cell = board.cell(Point::new(r as i32, c as i32)).unwrap_or_default();
                write!(f, "{} ", self.marker(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
