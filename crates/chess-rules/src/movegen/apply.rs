//! Executing a move descriptor on a board.

use chess_core::{MoveDescriptor, Offset, PieceKind};
use tracing::trace;

use crate::board::Trace;
use crate::{Board, RulesError};

/// Applies a move and returns the new board.
///
/// Removes the sentenced piece, moves the primary piece (and the castling
/// rook), bumps the move count of every piece that moved, clears the traces
/// the opponent left on its previous move, and records a trace when a pawn
/// double-steps. Promotion is left to the caller ([`Board::promote`]).
///
/// The descriptor is expected to come from
/// [`legal_moves`](super::legal::legal_moves) on the same board; only the
/// presence of the moving pieces is checked.
pub fn apply_move(board: &Board, descriptor: &MoveDescriptor) -> Result<Board, RulesError> {
    let mut next = board.clone();
    let from = descriptor.from();
    let to = descriptor.to();

    if let Some(victim) = descriptor.sentenced {
        if victim != to {
            next.take(victim);
        }
    }

    let mover = next.relocate(from, to)?;
    next.place(to, mover.with_move_count(mover.move_count + 1));

    if let Some(rook_move) = descriptor.secondary {
        let rook = next.relocate(rook_move.from, rook_move.to)?;
        next.place(rook_move.to, rook.with_move_count(rook.move_count + 1));
    }

    next.clear_traces(mover.color.opposite());

    let advance = to.rank() as i8 - from.rank() as i8;
    if mover.kind == PieceKind::Pawn && advance.abs() == 2 {
        if let Some(skipped) = from.offset(Offset::new(0, mover.color.forward()), 1) {
            next.set_trace(
                skipped,
                Trace {
                    kind: mover.kind,
                    color: mover.color,
                    pawn: to,
                },
            );
        }
    }

    trace!(mv = %descriptor, "applied");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::legal::legal_moves;
    use chess_core::{Color, Move, Piece, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn find(board: &Board, from: &str, to: &str) -> MoveDescriptor {
        legal_moves(board, sq(from))
            .unwrap()
            .into_iter()
            .find(|d| d.to() == sq(to))
            .unwrap()
    }

    #[test]
    fn quiet_move_transfers_piece() {
        let board = Board::standard();
        let next = apply_move(&board, &find(&board, "g1", "f3")).unwrap();
        assert!(next.piece_at(sq("g1")).is_none());
        let knight = next.piece_at(sq("f3")).unwrap();
        assert_eq!(knight.kind, PieceKind::Knight);
        assert_eq!(knight.move_count, 1);
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn double_step_leaves_trace() {
        let board = Board::standard();
        let next = apply_move(&board, &find(&board, "e2", "e4")).unwrap();
        assert_eq!(
            next.trace_at(sq("e3")),
            Some(&Trace {
                kind: PieceKind::Pawn,
                color: Color::White,
                pawn: sq("e4"),
            })
        );
        let after = apply_move(&next, &find(&next, "g8", "f6")).unwrap();
        assert!(after.trace_at(sq("e3")).is_none());
    }

    #[test]
    fn castling_moves_rook() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("h1"), PieceKind::Rook, Color::White)
            .with(sq("e8"), PieceKind::King, Color::Black);
        let next = apply_move(&board, &find(&board, "e1", "g1")).unwrap();
        assert_eq!(next.piece_at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
        let rook = next.piece_at(sq("f1")).unwrap();
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.move_count, 1);
        assert!(next.piece_at(sq("h1")).is_none());
        assert!(next.piece_at(sq("e1")).is_none());
    }

    #[test]
    fn en_passant_removes_sentenced_pawn() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e8"), PieceKind::King, Color::Black)
            .with(sq("d7"), PieceKind::Pawn, Color::Black);
        let mut board = board;
        board.place(
            sq("e5"),
            Piece::new(PieceKind::Pawn, Color::White).with_move_count(2),
        );
        let board = apply_move(&board, &find(&board, "d7", "d5")).unwrap();
        let capture = find(&board, "e5", "d6");
        assert_eq!(capture.sentenced, Some(sq("d5")));
        let next = apply_move(&board, &capture).unwrap();
        assert!(next.piece_at(sq("d5")).is_none());
        assert_eq!(next.piece_at(sq("d6")).map(|p| p.color), Some(Color::White));
        assert!(next.trace_at(sq("d6")).is_none());
    }

    #[test]
    fn missing_mover_is_an_error() {
        let descriptor = MoveDescriptor {
            primary: Move::new(sq("d4"), sq("d5")),
            secondary: None,
            sentenced: None,
            promotion: false,
        };
        assert_eq!(
            apply_move(&Board::empty(), &descriptor),
            Err(RulesError::SquareEmpty(sq("d4")))
        );
    }
}
