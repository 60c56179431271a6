//! Board representation: an 8×8 grid of optional pieces plus the trace
//! board used for en passant.

use chess_core::{Color, Piece, PieceKind, Square, BOARD_SIZE};
use std::fmt;

use crate::RulesError;

/// Marker left on the square a pawn skipped over with its double step.
///
/// The trace lives for exactly one opposing move. `pawn` is the square the
/// pawn landed on; an en passant capture removes the piece there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trace {
    pub kind: PieceKind,
    pub color: Color,
    pub pawn: Square,
}

const SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Full board state.
///
/// Each cell owns at most one [`Piece`]. Moving a piece transfers it to the
/// destination cell and leaves the source empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; SQUARES],
    traces: [Option<Trace>; SQUARES],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [None; SQUARES],
            traces: [None; SQUARES],
        }
    }

    /// Creates the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                board.put(file as u8, color.back_rank(), Piece::new(*kind, color));
                board.put(file as u8, color.pawn_rank(), Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    fn put(&mut self, file: u8, rank: u8, piece: Piece) {
        if let Ok(sq) = Square::new(file, rank) {
            self.cells[sq.index()] = Some(piece);
        }
    }

    /// Returns the board with an unmoved piece added. Convenient for
    /// building positions.
    pub fn with(mut self, sq: Square, kind: PieceKind, color: Color) -> Self {
        self.place(sq, Piece::new(kind, color));
        self
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.cells[sq.index()].as_ref()
    }

    /// Returns the piece at raw coordinates.
    pub fn piece_at_coords(&self, file: u8, rank: u8) -> Result<Option<&Piece>, RulesError> {
        let sq = Square::new(file, rank)?;
        Ok(self.piece_at(sq))
    }

    /// Returns true if the square holds a piece.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_some()
    }

    /// Puts a piece on a square, returning whatever stood there.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.cells[sq.index()].replace(piece)
    }

    /// Removes and returns the piece on a square.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Moves whatever stands on `from` to `to` without touching move
    /// counts. The previous occupant of `to` is dropped.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Result<Piece, RulesError> {
        let piece = self.take(from).ok_or(RulesError::SquareEmpty(from))?;
        self.cells[to.index()] = Some(piece);
        Ok(piece)
    }

    /// Replaces a pawn with a piece of the given kind, keeping its color and
    /// move count. Returns false and leaves the board unchanged if the square
    /// does not hold a pawn or `kind` is not a promotion target.
    pub fn promote(&mut self, sq: Square, kind: PieceKind) -> Result<bool, RulesError> {
        let cell = self.cells[sq.index()]
            .as_mut()
            .ok_or(RulesError::SquareEmpty(sq))?;
        if cell.kind != PieceKind::Pawn || !kind.is_promotion_target() {
            return Ok(false);
        }
        cell.kind = kind;
        Ok(true)
    }

    /// Returns the square of the given side's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Iterates over every occupied square.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the pieces of one side.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Returns the trace recorded on a square, if any.
    #[inline]
    pub fn trace_at(&self, sq: Square) -> Option<&Trace> {
        self.traces[sq.index()].as_ref()
    }

    /// Records a trace on a square.
    pub fn set_trace(&mut self, sq: Square, trace: Trace) {
        self.traces[sq.index()] = Some(trace);
    }

    /// Clears every trace left by the given side.
    pub fn clear_traces(&mut self, color: Color) {
        for cell in self.traces.iter_mut() {
            if matches!(cell, Some(t) if t.color == color) {
                *cell = None;
            }
        }
    }

    /// Returns a copy of the board with one side's pieces removed, except
    /// its king. Lines of sight toward that king then run through the
    /// removed pieces.
    pub(crate) fn without_friends_of(&self, color: Color) -> Board {
        let mut stripped = self.clone();
        for cell in stripped.cells.iter_mut() {
            if matches!(cell, Some(p) if p.color == color && p.kind != PieceKind::King) {
                *cell = None;
            }
        }
        stripped
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Renders the board with rank 8 on top, White in uppercase and `.` for
/// empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_SIZE).rev() {
            for file in 0..BOARD_SIZE {
                let symbol = match self.piece_at_coords(file, rank) {
                    Ok(Some(piece)) => piece.symbol(),
                    _ => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
