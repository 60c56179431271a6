//! Move generation.
//!
//! [`expand`] turns one movement template into the squares it reaches on a
//! given board (pseudo-legal moves). The [`legal`] submodule filters those
//! against checks and pins, and [`apply`] executes the result.

pub mod apply;
pub mod legal;
pub mod perft;

use chess_core::{Square, BOARD_SIZE};

use crate::catalog::{castling_templates, templates, Special, Template};
use crate::geometry::{leaper_points, linear_run_length};
use crate::{Board, RulesError};

/// A destination reached by a template, before legality filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMove {
    pub to: Square,
    /// Square of the piece this move removes, if any.
    pub sentenced: Option<Square>,
    /// Rook that jumps over the king when this is a castling move.
    pub castle_rook: Option<Square>,
}

impl RawMove {
    const fn quiet(to: Square) -> Self {
        RawMove {
            to,
            sentenced: None,
            castle_rook: None,
        }
    }

    const fn capture(to: Square, sentenced: Square) -> Self {
        RawMove {
            to,
            sentenced: Some(sentenced),
            castle_rook: None,
        }
    }
}

/// Expands one template for the piece on `from`.
///
/// Sliding runs stop on the first occupied square, which becomes a capture
/// when the template may attack and the piece there is an opponent's. A
/// pawn diagonal over an empty square captures en passant when that square
/// holds an opposing trace. The board is never modified.
pub fn expand(board: &Board, from: Square, template: &Template) -> Result<Vec<RawMove>, RulesError> {
    let mover = *board.piece_at(from).ok_or(RulesError::SquareEmpty(from))?;
    let mut moves = Vec::new();

    match template {
        Template::Linear(slide) => {
            let run = linear_run_length(from, slide.direction, slide.max_len, board);
            for step in 1..=run {
                let Some(to) = from.offset(slide.direction, step as i16) else {
                    break;
                };
                match board.piece_at(to) {
                    Some(target) => {
                        if slide.capability.can_attack() && target.color != mover.color {
                            moves.push(RawMove::capture(to, to));
                        }
                    }
                    None if slide.capability.can_move() => match slide.special {
                        Special::Castle { rook } => {
                            if step == slide.max_len {
                                moves.push(RawMove {
                                    castle_rook: Some(rook),
                                    ..RawMove::quiet(to)
                                });
                            }
                        }
                        Special::Plain | Special::EnPassant => moves.push(RawMove::quiet(to)),
                    },
                    None => {
                        if slide.special == Special::EnPassant {
                            if let Some(victim) = en_passant_victim(board, to, &mover) {
                                moves.push(RawMove::capture(to, victim));
                            }
                        }
                    }
                }
            }
        }
        Template::Leaper { radius_sq } => {
            for to in leaper_points(from, *radius_sq)? {
                match board.piece_at(to) {
                    Some(target) if target.color == mover.color => {}
                    Some(_) => moves.push(RawMove::capture(to, to)),
                    None => moves.push(RawMove::quiet(to)),
                }
            }
        }
    }

    Ok(moves)
}

/// Returns the square of the pawn an en passant capture onto `to` removes.
fn en_passant_victim(board: &Board, to: Square, mover: &chess_core::Piece) -> Option<Square> {
    let trace = board.trace_at(to)?;
    if trace.color == mover.color {
        return None;
    }
    let victim = board.piece_at(trace.pawn)?;
    (victim.color == trace.color && victim.kind == trace.kind).then_some(trace.pawn)
}

/// Expands every template of the piece on `from`, castling included.
pub fn raw_moves(board: &Board, from: Square) -> Result<Vec<RawMove>, RulesError> {
    let piece = *board.piece_at(from).ok_or(RulesError::SquareEmpty(from))?;
    let mut all = templates(&piece).into_owned();
    all.extend(castling_templates(board, from));

    let mut moves = Vec::with_capacity(2 * BOARD_SIZE as usize);
    for template in &all {
        moves.extend(expand(board, from, template)?);
    }
    Ok(moves)
}
