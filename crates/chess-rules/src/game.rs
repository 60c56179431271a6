//! Game session management.
//!
//! [`Game`] owns the board and the bookkeeping the status evaluator needs:
//! the side to move, the (from, to) history and the halfmove clock.

use std::fmt;

use chess_core::{Color, Move, MoveDescriptor, PieceKind, Square};
use thiserror::Error;
use tracing::debug;

use crate::config::RulesConfig;
use crate::movegen::apply::apply_move;
use crate::movegen::legal::legal_moves;
use crate::rules::{status_with, GameStatus};
use crate::{Board, RulesError};

/// Error type for game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The destination is not among the piece's legal moves.
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    /// The piece belongs to the side not on move.
    #[error("{0} is not on move")]
    WrongColor(Color),
    /// A pawn reached its last rank without a promotion choice.
    #[error("promotion piece required for {0}")]
    PromotionRequired(Move),
    /// The promotion choice is not allowed for this move.
    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),
    /// The game already ended.
    #[error("game is over: {0:?}")]
    GameOver(GameStatus),
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// A chess game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    history: Vec<Move>,
    halfmove_clock: u32,
    config: RulesConfig,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
            history: Vec::new(),
            halfmove_clock: 0,
            config: RulesConfig::default(),
            status: GameStatus::Ongoing,
        }
    }

    /// Creates a game from a custom position.
    ///
    /// Fails with [`RulesError::NoKing`] if the side to move has no king.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, GameError> {
        Self::with_config(board, side_to_move, RulesConfig::default())
    }

    /// Creates a game from a custom position and draw thresholds.
    pub fn with_config(
        board: Board,
        side_to_move: Color,
        config: RulesConfig,
    ) -> Result<Self, GameError> {
        let status = status_with(&config, &board, side_to_move, &[], 0)?;
        Ok(Game {
            board,
            side_to_move,
            history: Vec::new(),
            halfmove_clock: 0,
            config,
            status,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns every half-move played, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Half-moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Returns the status of the side to move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the side to move is in check, mated or not.
    pub fn is_check(&self) -> bool {
        matches!(self.status, GameStatus::Check | GameStatus::Checkmate)
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the legal moves of the piece on `square`.
    pub fn legal_moves(&self, square: Square) -> Result<Vec<MoveDescriptor>, RulesError> {
        legal_moves(&self.board, square)
    }

    /// Plays a move for the side to move and returns the status of the
    /// opponent.
    ///
    /// `promotion` must be given exactly when a pawn reaches its last rank.
    /// On error the game is left unchanged.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<GameStatus, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }

        let piece = *self
            .board
            .piece_at(from)
            .ok_or(RulesError::SquareEmpty(from))?;
        if piece.color != self.side_to_move {
            return Err(GameError::WrongColor(piece.color));
        }

        let attempted = Move::new(from, to);
        let descriptor = legal_moves(&self.board, from)?
            .into_iter()
            .find(|d| d.to() == to)
            .ok_or(GameError::IllegalMove(attempted))?;

        let mut next = apply_move(&self.board, &descriptor)?;
        match (descriptor.promotion, promotion) {
            (true, None) => return Err(GameError::PromotionRequired(attempted)),
            (true, Some(kind)) => {
                if !next.promote(to, kind)? {
                    return Err(GameError::InvalidPromotion(kind));
                }
            }
            (false, Some(kind)) => return Err(GameError::InvalidPromotion(kind)),
            (false, None) => {}
        }

        let clock = if piece.kind == PieceKind::Pawn || descriptor.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        let mut history = self.history.clone();
        history.push(attempted);
        let opponent = self.side_to_move.opposite();
        let status = status_with(&self.config, &next, opponent, &history, clock)?;

        debug!(mv = %descriptor, ?status, clock, "move played");

        self.board = next;
        self.side_to_move = opponent;
        self.history = history;
        self.halfmove_clock = clock;
        self.status = status;
        Ok(status)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move ({:?})", self.side_to_move, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DrawReason;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(game: &mut Game, moves: &[&str]) -> GameStatus {
        let mut status = game.status();
        for m in moves {
            status = game.make_move(sq(&m[0..2]), sq(&m[2..4]), None).unwrap();
        }
        status
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.history().is_empty());
        assert!(!game.is_check());
        assert!(!game.is_over());
    }

    #[test]
    fn moves_alternate() {
        let mut game = Game::new();
        assert_eq!(play(&mut game, &["e2e4"]), GameStatus::Ongoing);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.history(), &[Move::new(sq("e2"), sq("e4"))]);
    }

    #[test]
    fn wrong_color() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(sq("e7"), sq("e5"), None),
            Err(GameError::WrongColor(Color::Black))
        );
    }

    #[test]
    fn illegal_move_leaves_game_unchanged() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(sq("e2"), sq("e5"), None),
            Err(GameError::IllegalMove(Move::new(sq("e2"), sq("e5"))))
        );
        assert_eq!(
            game.make_move(sq("e4"), sq("e5"), None),
            Err(GameError::Rules(RulesError::SquareEmpty(sq("e4"))))
        );
        assert_eq!(game.board(), &Board::standard());
        assert!(game.history().is_empty());
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        let status = play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(status, GameStatus::Checkmate);
        assert!(game.is_check());
        assert_eq!(
            game.make_move(sq("a2"), sq("a3"), None),
            Err(GameError::GameOver(GameStatus::Checkmate))
        );
    }

    #[test]
    fn halfmove_clock() {
        let mut game = Game::new();
        play(&mut game, &["g1f3", "b8c6"]);
        assert_eq!(game.halfmove_clock(), 2);
        play(&mut game, &["e2e4"]);
        assert_eq!(game.halfmove_clock(), 0);
        play(&mut game, &["c6d4", "f3d4"]);
        assert_eq!(game.halfmove_clock(), 0);
    }

    #[test]
    fn knight_shuffle_repeats() {
        let mut game = Game::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play(&mut game, &shuffle);
        assert_eq!(play(&mut game, &shuffle), GameStatus::Ongoing);
        assert_eq!(
            play(&mut game, &["g1f3"]),
            GameStatus::Draw(DrawReason::Repetition)
        );
        assert!(game.is_over());
    }

    #[test]
    fn promotion_choice() {
        let board = Board::empty()
            .with(sq("a1"), PieceKind::King, Color::White)
            .with(sq("b7"), PieceKind::Pawn, Color::White)
            .with(sq("h8"), PieceKind::King, Color::Black);
        let mut game = Game::from_board(board, Color::White).unwrap();

        assert_eq!(
            game.make_move(sq("b7"), sq("b8"), None),
            Err(GameError::PromotionRequired(Move::new(sq("b7"), sq("b8"))))
        );
        assert_eq!(
            game.make_move(sq("b7"), sq("b8"), Some(PieceKind::King)),
            Err(GameError::InvalidPromotion(PieceKind::King))
        );
        assert_eq!(
            game.make_move(sq("b7"), sq("b8"), Some(PieceKind::Queen)),
            Ok(GameStatus::Check)
        );
        assert_eq!(
            game.board().piece_at(sq("b8")).map(|p| p.kind),
            Some(PieceKind::Queen)
        );
    }

    #[test]
    fn promotion_on_quiet_move_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move(sq("e2"), sq("e4"), Some(PieceKind::Queen)),
            Err(GameError::InvalidPromotion(PieceKind::Queen))
        );
    }

    #[test]
    fn kingless_position_rejected() {
        let board = Board::empty().with(sq("e8"), PieceKind::King, Color::Black);
        assert_eq!(
            Game::from_board(board, Color::White).unwrap_err(),
            GameError::Rules(RulesError::NoKing(Color::White))
        );
    }
}
