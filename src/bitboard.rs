//! A fixed-size occupancy bitboard using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. An `N×N`
//! grid is packed into an unsigned integer `T`; bit `row * N + col` marks
//! the cell as occupied.

use core::fmt;
use core::ops::{BitAnd, BitOr};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::config::BOARD_SIZE;
use crate::coordinate::Coordinate;

/// Occupancy grid sized for the game board.
pub type Grid = BitBoard<u128, { BOARD_SIZE as usize }>;

/// A fixed-size N×N bitboard stored in the unsigned integer `T`.
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
    /// Create a new empty bitboard.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Number of occupied cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Whether `coord` is occupied. Cells outside `N×N` are never occupied.
    pub fn contains(&self, coord: Coordinate) -> bool {
        match Self::bit(coord) {
            Some(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            None => false,
        }
    }

    /// Mark `coord` as occupied. Returns `false` if the cell is outside the
    /// board.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        match Self::bit(coord) {
            Some(idx) => {
                self.bits = self.bits | (T::one() << idx);
                true
            }
            None => false,
        }
    }

    /// Whether the two boards share any occupied cell.
    pub fn intersects(&self, other: &Self) -> bool {
        !(*self & *other).is_empty()
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all().filter(move |&c| self.contains(c))
    }

    #[inline]
    fn bit(coord: Coordinate) -> Option<usize> {
        if coord.row() >= N || coord.col() >= N {
            None
        } else {
            Some(coord.row() * N + coord.col())
        }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>", N, N)?;
        for row in 0..N {
            for col in 0..N {
                let idx = row * N + col;
                let set = ((self.bits >> idx) & T::one()) != T::zero();
                f.write_str(if set { "1" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
