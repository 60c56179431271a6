//! Game status evaluation.
//!
//! Combines legal-move existence with check state for one side, then applies
//! the draw rules: repetition of the same move and the halfmove limit.

use chess_core::{Color, Move};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::check::{attacks_on_king, is_in_check};
use crate::config::{RulesConfig, REPETITION_STRIDE};
use crate::movegen::legal::has_legal_move;
use crate::{Board, RulesError};

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Nothing to report.
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true if no further moves may be played.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw(_)
        )
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawReason {
    /// The same move recurred on the side's turns within the repetition
    /// window.
    Repetition,
    /// The halfmove clock reached the configured limit.
    FiftyMoveRule,
}

/// Evaluates the status of `color` with the default [`RulesConfig`].
///
/// `history` lists every half-move played so far, oldest first.
/// `halfmove_clock` counts half-moves since the last capture or pawn move.
pub fn status(
    board: &Board,
    color: Color,
    history: &[Move],
    halfmove_clock: u32,
) -> Result<GameStatus, RulesError> {
    status_with(&RulesConfig::default(), board, color, history, halfmove_clock)
}

/// Evaluates the status of `color` with the given thresholds.
///
/// Checkmate and stalemate take precedence over draws, and draws over
/// check.
pub fn status_with(
    config: &RulesConfig,
    board: &Board,
    color: Color,
    history: &[Move],
    halfmove_clock: u32,
) -> Result<GameStatus, RulesError> {
    let in_check = is_in_check(&attacks_on_king(color, board)?);
    let can_move = has_legal_move(board, color)?;

    let result = if !can_move {
        if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else if is_repetition(config, history) {
        GameStatus::Draw(DrawReason::Repetition)
    } else if halfmove_clock >= config.halfmove_limit {
        GameStatus::Draw(DrawReason::FiftyMoveRule)
    } else if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    };

    debug!(%color, ?result, halfmove_clock, "status");
    Ok(result)
}

/// Returns true if the latest half-move repeats the same (from, to) pair
/// played by the same side on its earlier non-consecutive turns, all within
/// the repetition window.
pub fn is_repetition(config: &RulesConfig, history: &[Move]) -> bool {
    let span = config.repetition_span();
    if config.repetition_count < 2 || span > config.repetition_window || history.len() < span {
        return false;
    }
    let last = history.len() - 1;
    (1..config.repetition_count).all(|k| history[last - k * REPETITION_STRIDE] == history[last])
}
