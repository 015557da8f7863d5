//! Common types for broadside: grid points, attack results and errors.

use core::fmt;

/// Index of a ship within the configured fleet.
pub type ShipId = usize;

/// A (row, column) position on a grid.
///
/// Coordinates are signed so that probing offsets around a point can step
/// off the grid and be rejected by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Point displaced by `(dr, dc)`.
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Checkerboard colour of this point.
    pub fn parity(self) -> i32 {
        (self.row + self.col).rem_euclid(2)
    }
}

impl From<(i32, i32)> for Point {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Outcome of a valid shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackResult {
    /// The shot landed in open water.
    Miss,
    /// The shot hit a ship that still has unhit cells.
    Hit,
    /// The shot hit the last live cell of the given ship.
    Destroyed(ShipId),
}

impl AttackResult {
    pub fn is_hit(self) -> bool {
        !matches!(self, AttackResult::Miss)
    }

    /// Id of the ship this shot finished off, if any.
    pub fn destroyed(self) -> Option<ShipId> {
        match self {
            AttackResult::Destroyed(id) => Some(id),
            _ => None,
        }
    }
}

/// Errors returned by Board operations.
///
/// Every one of these is reported before the board is touched, so the
/// caller may simply try something else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Ship id is not an index into the fleet.
    InvalidShipId(ShipId),
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced(ShipId),
    /// Attempted to remove a ship that is not on the board.
    ShipNotPlaced(ShipId),
    /// Some cell of the request lies off the grid.
    OutOfBounds(Point),
    /// Placement touches a blocked cell.
    CellBlocked(Point),
    /// Placement overlaps a cell that is not empty.
    ShipOverlaps(Point),
    /// Removal names cells that do not hold that ship.
    ShipMismatch(ShipId),
    /// The cell was already resolved by an earlier shot.
    AlreadyAttacked(Point),
    /// Placement search ran out of attempts.
    PlacementExhausted { attempts: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidShipId(id) => write!(f, "Ship id {} is not in the fleet", id),
            BoardError::ShipAlreadyPlaced(id) => write!(f, "Ship {} is already placed", id),
            BoardError::ShipNotPlaced(id) => write!(f, "Ship {} is not placed", id),
            BoardError::OutOfBounds(p) => write!(f, "Point {} is out of bounds", p),
            BoardError::CellBlocked(p) => write!(f, "Cell {} is blocked", p),
            BoardError::ShipOverlaps(p) => write!(f, "Cell {} is already occupied", p),
            BoardError::ShipMismatch(id) => {
                write!(f, "Ship {} does not occupy the requested cells", id)
            }
            BoardError::AlreadyAttacked(p) => write!(f, "Cell {} was already attacked", p),
            BoardError::PlacementExhausted { attempts } => {
                write!(f, "Could not place the fleet after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Errors detected while validating a match configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RowsOutOfRange(usize),
    ColsOutOfRange(usize),
    /// Ship length is zero or longer than both grid dimensions.
    BadShipLength(usize),
    UnprintableSymbol(char),
    ReservedSymbol(char),
    DuplicateSymbol(char),
    /// Total ship cells would exceed the grid area.
    FleetTooLarge { cells: usize, area: usize },
    EmptyFleet,
    /// Config file contents could not be decoded.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::config::{MAX_COLS, MAX_ROWS};
        match self {
            ConfigError::RowsOutOfRange(r) => {
                write!(f, "Number of rows {} must be >= 1 and <= {}", r, MAX_ROWS)
            }
            ConfigError::ColsOutOfRange(c) => {
                write!(f, "Number of columns {} must be >= 1 and <= {}", c, MAX_COLS)
            }
            ConfigError::BadShipLength(l) => {
                write!(f, "Bad ship length {}; it must be >= 1 and fit on the board", l)
            }
            ConfigError::UnprintableSymbol(ch) => write!(
                f,
                "Unprintable character with value {} must not be used as a ship symbol",
                *ch as u32
            ),
            ConfigError::ReservedSymbol(ch) => {
                write!(f, "Character {} must not be used as a ship symbol", ch)
            }
            ConfigError::DuplicateSymbol(ch) => {
                write!(f, "Ship symbol {} must not be used for more than one ship", ch)
            }
            ConfigError::FleetTooLarge { cells, area } => write!(
                f,
                "Board is too small to fit all ships ({} cells on a board of {})",
                cells, area
            ),
            ConfigError::EmptyFleet => write!(f, "The fleet has no ships"),
            ConfigError::Parse(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
