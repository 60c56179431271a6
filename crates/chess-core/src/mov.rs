//! Move representation.

use crate::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece relocation from one square to another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4").
    pub fn to_coordinate(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}

/// A legal move together with every side effect it carries.
///
/// - `secondary` is the rook relocation of a castling move.
/// - `sentenced` is the square whose piece is removed. It equals
///   `primary.to` for ordinary captures and differs only for en passant.
///   Quiet moves have none.
/// - `promotion` is set when a pawn reaches the farthest rank. The caller
///   chooses the replacement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub primary: Move,
    pub secondary: Option<Move>,
    pub sentenced: Option<Square>,
    pub promotion: bool,
}

impl MoveDescriptor {
    /// Creates a quiet move descriptor with no side effects.
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        MoveDescriptor {
            primary: Move::new(from, to),
            secondary: None,
            sentenced: None,
            promotion: false,
        }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.primary.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.primary.to
    }

    /// Returns true if the move removes an opposing piece.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.sentenced.is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.secondary.is_some()
    }

    /// Returns true if the captured piece does not stand on the destination.
    pub fn is_en_passant(&self) -> bool {
        matches!(self.sentenced, Some(sq) if sq != self.primary.to)
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if let Some(rook) = self.secondary {
            write!(f, " (+{})", rook)?;
        }
        if let Some(sq) = self.sentenced {
            write!(f, " x{}", sq)?;
        }
        if self.promotion {
            write!(f, " =?")?;
        }
        Ok(())
    }
}
