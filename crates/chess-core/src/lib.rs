//! Core types for chess.
//!
//! This crate provides the value types shared between the rule engine and
//! its collaborators (input handling, rendering, persistence):
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] and [`Offset`] for board coordinates and directions
//! - [`Move`] and [`MoveDescriptor`] for moves and their side effects
//!
//! All of them derive `serde` traits so a collaborator can persist them in
//! whatever format it likes.

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{Move, MoveDescriptor};
pub use piece::{Piece, PieceKind};
pub use square::{on_board, Offset, OutOfBounds, Square, BOARD_SIZE};
