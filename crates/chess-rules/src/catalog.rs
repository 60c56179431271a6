//! Movement catalog: the templates each piece kind moves by.
//!
//! Bishop, rook, queen, king, and knight templates never change and live in
//! constant tables. Pawn templates depend on color and move count, and the
//! king's castling templates depend on the board, so those are synthesized
//! per query.

use chess_core::{Offset, Piece, PieceKind, Square, BOARD_SIZE};
use std::borrow::Cow;

use crate::geometry::{linear_run_length, KNIGHT_RADIUS_SQ};
use crate::Board;

/// What a linear template may do with the squares it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Empty squares only (pawn push, castling).
    MoveOnly,
    /// Opposing pieces only (pawn capture).
    AttackOnly,
    Both,
}

impl Capability {
    #[inline]
    pub const fn can_move(self) -> bool {
        matches!(self, Capability::MoveOnly | Capability::Both)
    }

    #[inline]
    pub const fn can_attack(self) -> bool {
        matches!(self, Capability::AttackOnly | Capability::Both)
    }
}

/// Extra rules attached to a linear template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    Plain,
    /// Pawn diagonal: may also capture a pawn that just skipped the target
    /// square.
    EnPassant,
    /// Two-square king move; the rook on `rook` jumps over the king. Only
    /// valid if no square the king crosses is attacked.
    Castle { rook: Square },
}

/// A straight run in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slide {
    pub direction: Offset,
    pub max_len: u8,
    pub capability: Capability,
    pub special: Special,
}

/// A movement template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Linear(Slide),
    /// Fixed leap; the destinations are the offsets whose squared length is
    /// `radius_sq`.
    Leaper { radius_sq: u8 },
}

impl Template {
    /// Returns true if this template, used from the far end, can capture on a
    /// square `distance` steps away along `direction`.
    pub fn attacks_along(&self, direction: Offset, distance: u8) -> bool {
        match self {
            Template::Linear(slide) => {
                slide.capability.can_attack()
                    && slide.direction == direction
                    && distance <= slide.max_len
            }
            Template::Leaper { .. } => false,
        }
    }

    /// Returns true if this is a leap of the given squared radius.
    pub fn leaps(&self, radius_sq: u8) -> bool {
        matches!(self, Template::Leaper { radius_sq: r } if *r == radius_sq)
    }
}

const fn slide(direction: Offset, max_len: u8) -> Template {
    Template::Linear(Slide {
        direction,
        max_len,
        capability: Capability::Both,
        special: Special::Plain,
    })
}

const BISHOP: [Template; 4] = [
    slide(Offset::NORTH_EAST, BOARD_SIZE),
    slide(Offset::SOUTH_EAST, BOARD_SIZE),
    slide(Offset::SOUTH_WEST, BOARD_SIZE),
    slide(Offset::NORTH_WEST, BOARD_SIZE),
];

const ROOK: [Template; 4] = [
    slide(Offset::NORTH, BOARD_SIZE),
    slide(Offset::EAST, BOARD_SIZE),
    slide(Offset::SOUTH, BOARD_SIZE),
    slide(Offset::WEST, BOARD_SIZE),
];

const QUEEN: [Template; 8] = [
    ROOK[0], ROOK[1], ROOK[2], ROOK[3], BISHOP[0], BISHOP[1], BISHOP[2], BISHOP[3],
];

const KING: [Template; 8] = [
    slide(Offset::NORTH, 1),
    slide(Offset::EAST, 1),
    slide(Offset::SOUTH, 1),
    slide(Offset::WEST, 1),
    slide(Offset::NORTH_EAST, 1),
    slide(Offset::SOUTH_EAST, 1),
    slide(Offset::SOUTH_WEST, 1),
    slide(Offset::NORTH_WEST, 1),
];

const KNIGHT: [Template; 1] = [Template::Leaper {
    radius_sq: KNIGHT_RADIUS_SQ,
}];

/// Returns the fixed templates of a kind. Pawns have none; see
/// [`templates`].
pub fn base_templates(kind: PieceKind) -> &'static [Template] {
    match kind {
        PieceKind::Pawn => &[],
        PieceKind::Knight => &KNIGHT,
        PieceKind::Bishop => &BISHOP,
        PieceKind::Rook => &ROOK,
        PieceKind::Queen => &QUEEN,
        PieceKind::King => &KING,
    }
}

/// Returns the templates a piece moves by, excluding castling.
pub fn templates(piece: &Piece) -> Cow<'static, [Template]> {
    match piece.kind {
        PieceKind::Pawn => Cow::Owned(pawn_templates(piece)),
        kind => Cow::Borrowed(base_templates(kind)),
    }
}

fn pawn_templates(pawn: &Piece) -> Vec<Template> {
    let forward = pawn.color.forward();
    let capture = |file: i8| {
        Template::Linear(Slide {
            direction: Offset::new(file, forward),
            max_len: 1,
            capability: Capability::AttackOnly,
            special: Special::EnPassant,
        })
    };
    vec![
        Template::Linear(Slide {
            direction: Offset::new(0, forward),
            max_len: if pawn.is_unmoved() { 2 } else { 1 },
            capability: Capability::MoveOnly,
            special: Special::Plain,
        }),
        capture(-1),
        capture(1),
    ]
}

/// Synthesizes the castling templates for the king on `king_sq`.
///
/// A template is produced for each rank direction in which the king has
/// never moved, the run from the king ends on an unmoved rook of the same
/// color, and the king's two-square path is empty. Whether the crossed
/// squares are attacked is left to the legal move resolver.
pub fn castling_templates(board: &Board, king_sq: Square) -> Vec<Template> {
    let Some(king) = board.piece_at(king_sq) else {
        return Vec::new();
    };
    if king.kind != PieceKind::King || !king.is_unmoved() {
        return Vec::new();
    }

    [Offset::EAST, Offset::WEST]
        .into_iter()
        .filter_map(|direction| {
            let run = linear_run_length(king_sq, direction, BOARD_SIZE, board);
            if run < 3 {
                return None;
            }
            let rook_sq = king_sq.offset(direction, run as i16)?;
            let rook = board.piece_at(rook_sq)?;
            let eligible =
                rook.kind == PieceKind::Rook && rook.color == king.color && rook.is_unmoved();
            eligible.then_some(Template::Linear(Slide {
                direction,
                max_len: 2,
                capability: Capability::MoveOnly,
                special: Special::Castle { rook: rook_sq },
            }))
        })
        .collect()
}
