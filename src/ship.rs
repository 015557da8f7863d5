//! Ship specifications and the cells a placement covers.

use crate::common::Point;

/// Axis a ship is laid along from its top/left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Both directions in the order placement search tries them.
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    /// Unit step `(dr, dc)` along this direction.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }
}

/// One slot of the fleet: length, display symbol and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipSpec {
    length: usize,
    symbol: char,
    name: String,
}

impl ShipSpec {
    /// Create a new ship spec. Validation happens in
    /// [`MatchConfig`](crate::MatchConfig), not here.
    pub fn new(length: usize, symbol: char, name: impl Into<String>) -> Self {
        Self {
            length,
            symbol,
            name: name.into(),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Cells covered by a ship of `length` laid from `origin` along `dir`.
pub fn ship_cells(origin: Point, length: usize, dir: Direction) -> impl Iterator<Item = Point> {
    let (dr, dc) = dir.step();
    (0..length as i32).map(move |i| origin.offset(dr * i, dc * i))
}
