//! Coordinate math shared by the move generator and the check analyzer.

use chess_core::{Offset, Square};

use crate::{Board, RulesError};

/// Squared radius of the knight's leap, `(±1, ±2)` and `(±2, ±1)`.
pub const KNIGHT_RADIUS_SQ: u8 = 5;

const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(1, 2),
    Offset::new(2, 1),
    Offset::new(2, -1),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(-1, 2),
];

/// Returns the offset table for a leap of the given squared radius.
pub fn leap_offsets(radius_sq: u8) -> Result<&'static [Offset], RulesError> {
    match radius_sq {
        KNIGHT_RADIUS_SQ => Ok(&KNIGHT_OFFSETS),
        _ => Err(RulesError::ImpossibleTemplate { radius_sq }),
    }
}

/// Counts the steps from `origin` along `direction`, up to `max_len` or the
/// board edge.
///
/// The walk stops on the first occupied square and counts it, so the last
/// counted step may hold a piece. Callers decide whether that square is a
/// capture or a block.
pub fn linear_run_length(origin: Square, direction: Offset, max_len: u8, board: &Board) -> u8 {
    let mut len = 0;
    while len < max_len {
        let Some(sq) = origin.offset(direction, len as i16 + 1) else {
            break;
        };
        len += 1;
        if board.is_occupied(sq) {
            break;
        }
    }
    len
}

/// Returns the on-board squares one leap of the given radius away from
/// `center`. Each destination appears once.
pub fn leaper_points(center: Square, radius_sq: u8) -> Result<Vec<Square>, RulesError> {
    let mut points: Vec<Square> = leap_offsets(radius_sq)?
        .iter()
        .filter_map(|offset| center.offset(*offset, 1))
        .collect();
    points.sort();
    points.dedup();
    Ok(points)
}
