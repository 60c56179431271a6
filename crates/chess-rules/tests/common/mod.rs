//! Shared helpers for integration tests.

#![allow(dead_code)]

use chess_core::{Color, MoveDescriptor, Piece, PieceKind, Square};
use chess_rules::{legal_moves, Board};

/// A middlegame position rich in castling, pins and captures.
pub const KIWIPETE: [&str; 8] = [
    "r...k..r", "p.ppqpb.", "bn..pnp.", "...PN...", ".p..P...", "..N..Q.p", "PPPBBPPP",
    "R...K..R",
];

pub fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

/// Builds a board from eight rows, rank 8 first. Uppercase is White,
/// lowercase Black, `.` empty. Pawns away from their starting rank count
/// as moved; every other piece is unmoved.
pub fn diagram(rows: [&str; 8]) -> Board {
    let mut board = Board::empty();
    for (i, row) in rows.iter().enumerate() {
        let rank = 7 - i as u8;
        for (file, c) in row.chars().enumerate() {
            let kind = match c.to_ascii_lowercase() {
                'p' => PieceKind::Pawn,
                'n' => PieceKind::Knight,
                'b' => PieceKind::Bishop,
                'r' => PieceKind::Rook,
                'q' => PieceKind::Queen,
                'k' => PieceKind::King,
                _ => continue,
            };
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let moved = kind == PieceKind::Pawn && rank != color.pawn_rank();
            let piece = Piece::new(kind, color).with_move_count(u32::from(moved));
            board.place(Square::new(file as u8, rank).unwrap(), piece);
        }
    }
    board
}

/// Sorted destinations of the piece on `from`.
pub fn targets(board: &Board, from: &str) -> Vec<Square> {
    let mut to: Vec<Square> = legal_moves(board, sq(from))
        .unwrap()
        .iter()
        .map(|d| d.to())
        .collect();
    to.sort();
    to
}

pub fn squares(list: &[&str]) -> Vec<Square> {
    let mut v: Vec<Square> = list.iter().map(|s| sq(s)).collect();
    v.sort();
    v
}

pub fn find(board: &Board, from: &str, to: &str) -> MoveDescriptor {
    legal_moves(board, sq(from))
        .unwrap()
        .into_iter()
        .find(|d| d.to() == sq(to))
        .unwrap()
}
