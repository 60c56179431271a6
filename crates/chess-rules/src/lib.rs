//! Chess rule evaluation on a board of optional pieces.
//!
//! This crate provides:
//! - [`Board`] - 64 cells of optional pieces plus the en passant trace board
//! - [`legal_moves`] - every legal destination of one piece, as
//!   [`MoveDescriptor`](chess_core::MoveDescriptor)s
//! - [`apply_move`] - executes a descriptor and returns the next board
//! - [`status`] - check, checkmate, stalemate and draw detection
//! - [`Game`] - a session that tracks side to move, history and the
//!   halfmove clock
//!
//! # Architecture
//!
//! Every piece kind maps to a list of movement templates (sliding lines with
//! a maximum length, or leaps at a fixed distance). The raw generator
//! expands templates into candidate destinations, the check analyzer looks
//! outward from each king for live checks and pins, and the legal resolver
//! combines both.
//!
//! # Example
//!
//! ```
//! use chess_core::Square;
//! use chess_rules::{Game, GameStatus};
//!
//! let sq = |s| Square::from_algebraic(s).unwrap();
//! let mut game = Game::new();
//! assert_eq!(game.legal_moves(sq("g1")).unwrap().len(), 2);
//! assert_eq!(game.make_move(sq("e2"), sq("e4"), None), Ok(GameStatus::Ongoing));
//! ```

mod board;
pub mod catalog;
pub mod check;
mod config;
mod error;
mod game;
pub mod geometry;
pub mod movegen;
pub mod rules;

pub use board::{Board, Trace};
pub use check::{attacks_on_king, is_in_check, king_in_check, CheckInfo};
pub use config::{ConfigError, RulesConfig};
pub use error::RulesError;
pub use game::{Game, GameError};
pub use movegen::apply::apply_move;
pub use movegen::legal::{all_legal_moves, has_legal_move, legal_moves};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{raw_moves, RawMove};
pub use rules::{is_repetition, status, status_with, DrawReason, GameStatus};
