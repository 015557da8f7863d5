//! Raw grid storage shared by [`Board`](crate::Board): cell states, the
//! placement-only blocked mask and per-ship placed flags.

use crate::common::{Point, ShipId};
use crate::config::{MatchConfig, Mask};
use crate::ship::ShipSpec;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Live segment of the given ship.
    Ship(ShipId),
    Miss,
    /// Destroyed segment of the given ship.
    Hit(ShipId),
}

impl Cell {
    /// True once a shot has landed here.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Miss | Cell::Hit(_))
    }
}

/// Row-major grid of [`Cell`]s plus fleet metadata.
#[derive(Debug, Clone)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    fleet: Vec<ShipSpec>,
    cells: Box<[Cell]>,
    pub(crate) blocked: Mask,
    pub(crate) placed: Vec<bool>,
}

impl GridModel {
    pub fn new(config: &MatchConfig) -> Self {
        let (rows, cols) = (config.rows(), config.cols());
        Self {
            rows,
            cols,
            fleet: config.fleet().to_vec(),
            cells: vec![Cell::Empty; rows * cols].into_boxed_slice(),
            blocked: Mask::new(),
            placed: vec![false; config.fleet().len()],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn fleet(&self) -> &[ShipSpec] {
        &self.fleet
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && (p.row as usize) < self.rows && (p.col as usize) < self.cols
    }

    fn linearize(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.row as usize * self.cols + p.col as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: Point) -> Option<Cell> {
        self.linearize(p).map(|i| self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.linearize(p).map(move |i| &mut self.cells[i])
    }

    /// Every point of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let cols = self.cols as i32;
        (0..(self.rows * self.cols) as i32).map(move |i| Point::new(i / cols, i % cols))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset all cells, the blocked mask and the placed flags.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.blocked.clear_all();
        self.placed.fill(false);
    }
}
