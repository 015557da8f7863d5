//! Hunt/kill targeting state machine.
//!
//! The engine only ever sees the outcome of its own shots. It hunts on a
//! checkerboard until something is hit, searches around that anchor for a
//! second hit to learn the ship's axis, then walks the axis in both
//! directions. A kill that took more hits than the sunk ship is long means
//! another ship was clipped nearby, so the engine sweeps the neighbourhood
//! before going back to hunting.

use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::common::{AttackResult, Point};
use crate::config::{MatchConfig, Mask};

/// Random checkerboard draws before hunting on any colour.
pub const HUNT_PARITY_DRAWS: usize = 50;
/// Random draws at each alert radius before widening it.
pub const ALERT_DRAWS_PER_RADIUS: usize = 50;
/// Random draws at each recover radius before widening it.
pub const RECOVER_DRAWS_PER_RADIUS: usize = 30;
/// Widest neighbourhood swept after an over-long kill.
pub const RECOVER_MAX_RADIUS: i32 = 3;
/// Misses tolerated in the recover sweep before hunting again.
pub const RECOVER_MAX_MISSES: usize = 12;

/// Current mode of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// No unfinished hit; search the grid.
    Hunt,
    /// One hit at the anchor; look along its row and column.
    Alert,
    /// Axis known; extend from the anchor towards the second hit.
    ProbeForward,
    /// Forward exhausted; extend from the anchor the other way.
    ProbeBackward,
    /// A kill used surplus hits; sweep around the anchor.
    Recover,
}

/// Per-player targeting state, persisted for a whole match.
#[derive(Debug, Clone)]
pub struct TargetingEngine {
    rows: i32,
    cols: i32,
    ship_lengths: Vec<usize>,
    /// Checkerboard colour hunted first, if the smallest ship spans two cells.
    parity: Option<i32>,
    state: TargetState,
    anchor: Point,
    /// Unit step from the anchor towards the second hit.
    axis: (i32, i32),
    attacked: Mask,
    hits: Mask,
    hits_since_anchor: usize,
    recover_misses: usize,
}

/// Uniformly chosen in-bounds point not in `attacked`.
pub(crate) fn random_open_point<R: Rng + ?Sized>(
    attacked: &Mask,
    rows: i32,
    cols: i32,
    rng: &mut R,
) -> Option<Point> {
    let open: Vec<Point> = (!*attacked)
        .iter()
        .filter(|p| p.row < rows && p.col < cols)
        .collect();
    open.choose(rng).copied()
}

impl TargetingEngine {
    pub fn new(config: &MatchConfig) -> Self {
        let ship_lengths: Vec<usize> = config.fleet().iter().map(|s| s.length()).collect();
        let shortest = ship_lengths.iter().copied().min().unwrap_or(1);
        Self {
            rows: config.rows() as i32,
            cols: config.cols() as i32,
            ship_lengths,
            parity: (shortest >= 2).then_some(0),
            state: TargetState::Hunt,
            anchor: Point::ORIGIN,
            axis: (0, 1),
            attacked: Mask::new(),
            hits: Mask::new(),
            hits_since_anchor: 0,
            recover_misses: 0,
        }
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn has_attacked(&self, p: Point) -> bool {
        self.attacked.contains(p)
    }

    pub fn attacked_count(&self) -> usize {
        self.attacked.count()
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    fn open(&self, p: Point) -> bool {
        self.in_bounds(p) && !self.attacked.contains(p)
    }

    fn set_state(&mut self, next: TargetState) {
        if next != self.state {
            debug!("targeting {:?} -> {:?} (anchor {})", self.state, next, self.anchor);
            self.state = next;
        }
    }

    /// Next point to attack, never one already attacked. `None` once every
    /// cell of the grid has been attacked.
    pub fn next_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Point> {
        // Exhausting a mode only ever moves towards Hunt, so this ends.
        loop {
            let pick = match self.state {
                TargetState::Hunt => return self.hunt(rng),
                TargetState::Alert => self.alert(rng),
                TargetState::ProbeForward | TargetState::ProbeBackward => self.probe(),
                TargetState::Recover => self.recover(rng),
            };
            if pick.is_some() {
                return pick;
            }
        }
    }

    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(rng.random_range(0..self.rows), rng.random_range(0..self.cols))
    }

    fn hunt<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Point> {
        if let Some(parity) = self.parity {
            for _ in 0..HUNT_PARITY_DRAWS {
                let p = self.random_point(rng);
                if p.parity() == parity && self.open(p) {
                    return Some(p);
                }
            }
        }
        random_open_point(&self.attacked, self.rows, self.cols, rng)
    }

    fn alert<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Point> {
        let max_radius = self.rows.max(self.cols);
        for radius in 1..=max_radius {
            for _ in 0..ALERT_DRAWS_PER_RADIUS {
                let d = rng.random_range(-radius..=radius);
                let p = if rng.random_bool(0.5) {
                    self.anchor.offset(0, d)
                } else {
                    self.anchor.offset(d, 0)
                };
                if self.open(p) {
                    return Some(p);
                }
            }
        }
        let cross = (-max_radius..=max_radius)
            .flat_map(|d| [self.anchor.offset(0, d), self.anchor.offset(d, 0)])
            .find(|&p| self.open(p));
        if cross.is_none() {
            self.set_state(TargetState::Hunt);
        }
        cross
    }

    fn probe(&mut self) -> Option<Point> {
        let (dr, dc) = match self.state {
            TargetState::ProbeBackward => (-self.axis.0, -self.axis.1),
            _ => self.axis,
        };
        let mut p = self.anchor.offset(dr, dc);
        while self.in_bounds(p) && self.hits.contains(p) {
            p = p.offset(dr, dc);
        }
        if self.open(p) {
            return Some(p);
        }
        let next = match self.state {
            TargetState::ProbeForward => TargetState::ProbeBackward,
            _ => TargetState::Alert,
        };
        self.set_state(next);
        None
    }

    fn recover<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Point> {
        for radius in 1..=RECOVER_MAX_RADIUS {
            for _ in 0..RECOVER_DRAWS_PER_RADIUS {
                let p = self.anchor.offset(
                    rng.random_range(-radius..=radius),
                    rng.random_range(-radius..=radius),
                );
                if self.open(p) {
                    return Some(p);
                }
            }
        }
        let r = RECOVER_MAX_RADIUS;
        let near = (-r..=r)
            .flat_map(|dr| (-r..=r).map(move |dc| (dr, dc)))
            .map(|(dr, dc)| self.anchor.offset(dr, dc))
            .find(|&p| self.open(p));
        if near.is_none() {
            self.set_state(TargetState::Hunt);
        }
        near
    }

    /// Feed back the outcome of attacking `p`; `None` means the shot was
    /// rejected as invalid.
    pub fn record_result(&mut self, p: Point, result: Option<AttackResult>) {
        if self.in_bounds(p) {
            let _ = self.attacked.insert(p);
        }
        let Some(result) = result else {
            warn!("shot at {} was rejected", p);
            return;
        };
        if result.is_hit() {
            let _ = self.hits.insert(p);
            self.hits_since_anchor += 1;
        }

        match result {
            AttackResult::Miss => match self.state {
                TargetState::ProbeForward => self.set_state(TargetState::ProbeBackward),
                TargetState::ProbeBackward => self.set_state(TargetState::Alert),
                TargetState::Recover => {
                    self.recover_misses += 1;
                    if self.recover_misses >= RECOVER_MAX_MISSES {
                        self.set_state(TargetState::Hunt);
                    }
                }
                TargetState::Hunt | TargetState::Alert => {}
            },
            AttackResult::Hit => match self.state {
                TargetState::Hunt | TargetState::Recover => {
                    self.anchor = p;
                    self.set_state(TargetState::Alert);
                }
                TargetState::Alert => {
                    let (dr, dc) = (p.row - self.anchor.row, p.col - self.anchor.col);
                    if dr == 0 || dc == 0 {
                        self.axis = (dr.signum(), dc.signum());
                        self.set_state(TargetState::ProbeForward);
                    }
                }
                TargetState::ProbeForward | TargetState::ProbeBackward => {}
            },
            AttackResult::Destroyed(id) => {
                let length = self.ship_lengths.get(id).copied().unwrap_or(0);
                let next = if self.state != TargetState::Hunt && self.hits_since_anchor > length
                {
                    self.recover_misses = 0;
                    TargetState::Recover
                } else {
                    TargetState::Hunt
                };
                self.hits_since_anchor = 0;
                self.set_state(next);
            }
        }
    }
}
