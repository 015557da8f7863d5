//! A fixed-capacity set of grid points packed into an unsigned integer.
//!
//! Boards of any size up to `N×N` share one representation: a point
//! `(row, col)` maps to bit `row * N + col`. Callers are responsible for
//! checking points against their own (possibly smaller) grid dimensions;
//! the bitboard only rejects points outside its `N×N` capacity.

use core::ops::Not;
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::Point;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Point lies outside `[0..N) × [0..N)`.
    IndexOutOfBounds { row: i32, col: i32 },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

impl std::error::Error for BitBoardError {}

/// A set of points on an N×N grid stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const BOARD_BITS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    /// Create an empty set without a capacity check.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    #[inline]
    fn index(p: Point) -> Result<usize, BitBoardError> {
        if p.row < 0 || p.col < 0 || p.row as usize >= N || p.col as usize >= N {
            Err(BitBoardError::IndexOutOfBounds {
                row: p.row,
                col: p.col,
            })
        } else {
            Ok(p.row as usize * N + p.col as usize)
        }
    }

    /// Number of points in the set.
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Membership test. Points outside the capacity are never members.
    pub fn contains(&self, p: Point) -> bool {
        match Self::index(p) {
            Ok(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            Err(_) => false,
        }
    }

    /// Add `p`, returning `true` if it was not already present.
    pub fn insert(&mut self, p: Point) -> Result<bool, BitBoardError> {
        let idx = Self::index(p)?;
        let bit = T::one() << idx;
        let fresh = (self.bits & bit).is_zero();
        self.bits = self.bits | bit;
        Ok(fresh)
    }

    /// Remove every point.
    #[inline]
    pub fn clear_all(&mut self) {
        self.bits = T::zero();
    }

    /// Iterator over members in row-major order.
    #[inline]
    pub fn iter(&self) -> Points<T, N> {
        Points {
            bits: self.bits,
            idx: 0,
        }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the members of a bitboard.
#[derive(Clone, Copy)]
pub struct Points<T, const N: usize> {
    bits: T,
    idx: usize,
}

impl<T, const N: usize> Iterator for Points<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.bits >> idx) & T::one()) != T::zero() {
                return Some(Point::new((idx / N) as i32, (idx % N) as i32));
            }
        }
        None
    }
}

/// Complement within the N×N capacity.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::mask(),
        }
    }
}
