//! Legal move resolution.
//!
//! Raw moves become legal moves under one of three regimes: the king must
//! never step onto an attacked square, any other piece must answer a live
//! check, and a pinned piece must stay on its pin line.

use chess_core::{Color, Move, MoveDescriptor, Offset, Piece, PieceKind, Square};
use tracing::trace;

use super::{raw_moves, RawMove};
use crate::check::{attacks_on_king, is_in_check, king_in_check, CheckInfo};
use crate::{Board, RulesError};

/// Returns every legal move of the piece on `from`.
///
/// An empty list is a normal answer (the piece is pinned, the side is
/// mated, and so on). A side without a king has nothing to protect, so its
/// non-king pieces get their raw moves unfiltered.
pub fn legal_moves(board: &Board, from: Square) -> Result<Vec<MoveDescriptor>, RulesError> {
    let piece = *board.piece_at(from).ok_or(RulesError::SquareEmpty(from))?;
    let raw = raw_moves(board, from)?;

    let kept = if piece.kind == PieceKind::King {
        king_moves(board, from, &piece, raw)?
    } else {
        match board.king_square(piece.color) {
            Some(king_sq) => {
                let infos = attacks_on_king(piece.color, board)?;
                constrained_moves(board, from, &piece, king_sq, &infos, raw)?
            }
            None => raw,
        }
    };

    Ok(kept
        .into_iter()
        .map(|m| describe(from, &piece, m))
        .collect())
}

/// Returns every legal move of one side.
pub fn all_legal_moves(board: &Board, color: Color) -> Result<Vec<MoveDescriptor>, RulesError> {
    let mut moves = Vec::new();
    for (sq, _) in board.pieces(color) {
        moves.extend(legal_moves(board, sq)?);
    }
    Ok(moves)
}

/// Returns true as soon as any piece of `color` has a legal move.
pub fn has_legal_move(board: &Board, color: Color) -> Result<bool, RulesError> {
    for (sq, _) in board.pieces(color) {
        if !legal_moves(board, sq)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Simulates the king on `from` standing on `to` and reports whether it is
/// safe there. The simulation runs on a private copy of the board.
fn king_safe_on(board: &Board, from: Square, to: Square) -> Result<bool, RulesError> {
    let mut sim = board.clone();
    let king = sim.take(from).ok_or(RulesError::SquareEmpty(from))?;
    sim.place(to, king);
    Ok(!king_in_check(king.color, &sim)?)
}

fn king_moves(
    board: &Board,
    from: Square,
    king: &Piece,
    raw: Vec<RawMove>,
) -> Result<Vec<RawMove>, RulesError> {
    let mut kept = Vec::with_capacity(raw.len());
    for m in raw {
        let safe = match m.castle_rook {
            Some(_) => castle_path_safe(board, from, m.to, king.color)?,
            None => king_safe_on(board, from, m.to)?,
        };
        if safe {
            kept.push(m);
        }
    }
    Ok(kept)
}

/// A castling king may not start, cross, or land on an attacked square.
fn castle_path_safe(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
) -> Result<bool, RulesError> {
    if king_in_check(color, board)? {
        trace!(king = %from, "castling refused: in check");
        return Ok(false);
    }
    let Some((direction, distance)) = Offset::between(from, to) else {
        return Ok(false);
    };
    for step in 1..=distance {
        let Some(sq) = from.offset(direction, step as i16) else {
            return Ok(false);
        };
        if !king_safe_on(board, from, sq)? {
            trace!(king = %from, attacked = %sq, "castling refused: path attacked");
            return Ok(false);
        }
    }
    Ok(true)
}

fn constrained_moves(
    board: &Board,
    from: Square,
    piece: &Piece,
    king_sq: Square,
    infos: &[CheckInfo],
    mut raw: Vec<RawMove>,
) -> Result<Vec<RawMove>, RulesError> {
    let live: Vec<&CheckInfo> = infos.iter().filter(|i| i.is_live()).collect();
    if live.len() > 1 {
        // Only the king can answer two checks at once.
        return Ok(Vec::new());
    }

    if let Some(check) = live.first() {
        let answers = check.resolving_squares(king_sq);
        raw.retain(|m| answers.contains(&m.to) || m.sentenced == Some(check.attacker));
    }

    for pin in infos.iter().filter(|i| i.cover == Some(from)) {
        if piece.kind == PieceKind::Knight {
            return Ok(Vec::new());
        }
        let line = pin.resolving_squares(king_sq);
        raw.retain(|m| line.contains(&m.to));
    }

    // En passant empties two squares of a rank at once, which can uncover
    // a line the analysis above never saw.
    let mut kept = Vec::with_capacity(raw.len());
    for m in raw {
        let exposing = match m.sentenced {
            Some(victim) if victim != m.to => en_passant_exposes_king(board, from, m.to, victim)?,
            _ => false,
        };
        if !exposing {
            kept.push(m);
        }
    }
    Ok(kept)
}

fn en_passant_exposes_king(
    board: &Board,
    from: Square,
    to: Square,
    victim: Square,
) -> Result<bool, RulesError> {
    let mut sim = board.clone();
    sim.take(victim);
    let pawn = sim.relocate(from, to)?;
    let infos = attacks_on_king(pawn.color, &sim)?;
    Ok(is_in_check(&infos))
}

fn describe(from: Square, piece: &Piece, m: RawMove) -> MoveDescriptor {
    let secondary = m.castle_rook.and_then(|rook| {
        let (direction, _) = Offset::between(from, m.to)?;
        Some(Move::new(rook, from.offset(direction, 1)?))
    });
    MoveDescriptor {
        primary: Move::new(from, m.to),
        secondary,
        sentenced: m.sentenced,
        promotion: piece.kind == PieceKind::Pawn && m.to.rank() == piece.color.promotion_rank(),
    }
}
