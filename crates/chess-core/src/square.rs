//! Board coordinates and direction vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of files and ranks on the board.
pub const BOARD_SIZE: u8 = 8;

/// A coordinate that does not lie on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinate ({file}, {rank}) is off the board")]
pub struct OutOfBounds {
    pub file: i16,
    pub rank: i16,
}

/// Returns true iff both coordinates lie in `[0, BOARD_SIZE - 1]`.
#[inline]
pub const fn on_board(file: i16, rank: i16) -> bool {
    file >= 0 && file < BOARD_SIZE as i16 && rank >= 0 && rank < BOARD_SIZE as i16
}

/// A square on the board, stored as a 0-63 index.
///
/// Squares use little-endian rank-file mapping: a1 = 0, b1 = 1, ..., h8 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank, both in 0-7.
    pub const fn new(file: u8, rank: u8) -> Result<Self, OutOfBounds> {
        match Self::from_coords(file as i16, rank as i16) {
            Some(sq) => Ok(sq),
            None => Err(OutOfBounds {
                file: file as i16,
                rank: rank as i16,
            }),
        }
    }

    /// Creates a square from signed coordinates, `None` when off the board.
    #[inline]
    pub const fn from_coords(file: i16, rank: i16) -> Option<Self> {
        if on_board(file, rank) {
            Some(Square((rank as u8) * BOARD_SIZE + file as u8))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase().checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        Square::new(file, rank).ok()
    }

    /// Iterates over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the file (0 = a, 7 = h).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// Returns the rank (0 = first rank, 7 = eighth rank).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// Returns the square reached by adding `offset` scaled by `steps`.
    #[inline]
    pub const fn offset(self, offset: Offset, steps: i16) -> Option<Square> {
        Square::from_coords(
            self.file() as i16 + offset.file as i16 * steps,
            self.rank() as i16 + offset.rank as i16 * steps,
        )
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// A displacement in (file, rank) steps. Used both as a unit direction for
/// sliding templates and as a fixed leap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub file: i8,
    pub rank: i8,
}

impl Offset {
    pub const NORTH: Offset = Offset::new(0, 1);
    pub const SOUTH: Offset = Offset::new(0, -1);
    pub const EAST: Offset = Offset::new(1, 0);
    pub const WEST: Offset = Offset::new(-1, 0);
    pub const NORTH_EAST: Offset = Offset::new(1, 1);
    pub const NORTH_WEST: Offset = Offset::new(-1, 1);
    pub const SOUTH_EAST: Offset = Offset::new(1, -1);
    pub const SOUTH_WEST: Offset = Offset::new(-1, -1);

    /// The four rook directions.
    pub const ORTHOGONAL: [Offset; 4] = [Offset::NORTH, Offset::EAST, Offset::SOUTH, Offset::WEST];

    /// The four bishop directions.
    pub const DIAGONAL: [Offset; 4] = [
        Offset::NORTH_EAST,
        Offset::SOUTH_EAST,
        Offset::SOUTH_WEST,
        Offset::NORTH_WEST,
    ];

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Offset { file, rank }
    }

    /// Returns the opposite offset.
    #[inline]
    pub const fn reversed(self) -> Self {
        Offset::new(-self.file, -self.rank)
    }

    /// Squared euclidean length.
    #[inline]
    pub const fn length_squared(self) -> u8 {
        (self.file as i16 * self.file as i16 + self.rank as i16 * self.rank as i16) as u8
    }

    /// Returns the unit direction and step count that lead from `from` to
    /// `to`, if the two squares share a rank, file, or diagonal.
    pub fn between(from: Square, to: Square) -> Option<(Offset, u8)> {
        let df = to.file() as i8 - from.file() as i8;
        let dr = to.rank() as i8 - from.rank() as i8;
        if (df, dr) == (0, 0) {
            return None;
        }
        if df != 0 && dr != 0 && df.abs() != dr.abs() {
            return None;
        }
        let steps = df.abs().max(dr.abs()) as u8;
        Some((Offset::new(df.signum(), dr.signum()), steps))
    }
}
