//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use chess_core::{Color, MoveDescriptor, PieceKind};

use super::apply::apply_move;
use super::legal::all_legal_moves;
use crate::{Board, RulesError};

/// Counts the number of leaf nodes at the given depth, `color` to move.
///
/// A promotion counts once per promotion kind.
pub fn perft(board: &Board, color: Color, depth: u32) -> Result<u64, RulesError> {
    if depth == 0 {
        return Ok(1);
    }

    let mut nodes = 0u64;
    for m in all_legal_moves(board, color)? {
        for next in successors(board, &m)? {
            nodes += perft(&next, color.opposite(), depth - 1)?;
        }
    }
    Ok(nodes)
}

/// Perft with divide - node count below each root move, sorted by move.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(
    board: &Board,
    color: Color,
    depth: u32,
) -> Result<Vec<(String, u64)>, RulesError> {
    let mut results = Vec::new();
    for m in all_legal_moves(board, color)? {
        let mut nodes = 0;
        for next in successors(board, &m)? {
            nodes += perft(&next, color.opposite(), depth.saturating_sub(1))?;
        }
        results.push((m.primary.to_coordinate(), nodes));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

fn successors(board: &Board, m: &MoveDescriptor) -> Result<Vec<Board>, RulesError> {
    let next = apply_move(board, m)?;
    if !m.promotion {
        return Ok(vec![next]);
    }
    let mut boards = Vec::with_capacity(PieceKind::PROMOTIONS.len());
    for kind in PieceKind::PROMOTIONS {
        let mut promoted = next.clone();
        promoted.promote(m.to(), kind)?;
        boards.push(promoted);
    }
    Ok(boards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Board::standard(), Color::White, 1), Ok(20));
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Board::standard(), Color::White, 2), Ok(400));
    }

    #[test]
    fn divide_sums_to_perft() {
        let divide = perft_divide(&Board::standard(), Color::White, 2).unwrap();
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert!(divide.iter().all(|(_, n)| *n == 20));
    }
}
