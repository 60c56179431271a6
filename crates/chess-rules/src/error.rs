//! Error types for rule queries.

use chess_core::{Color, OutOfBounds, Square};
use thiserror::Error;

/// Errors returned by board queries and rule evaluation.
///
/// All of them are local and recoverable. A query with zero legal moves is
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("no piece on {0}")]
    SquareEmpty(Square),

    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),

    #[error("no {0} king on the board")]
    NoKing(Color),

    /// A leaper template whose radius has no offset table. Indicates a bug
    /// in the movement catalog.
    #[error("movement template with leap radius² {radius_sq} has no offset table")]
    ImpossibleTemplate { radius_sq: u8 },
}
