use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceType};

/// A square on the board. File 0 = a, rank 0 = rank 1.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    pub fn new(file: u8, rank: u8) -> Option<Position> {
        if file < 8 && rank < 8 {
            Some(Position { file, rank })
        } else {
            None
        }
    }

    /// Parse a two-character square such as "e4".
    pub fn from_algebraic(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        Self::from_chars(bytes[0] as char, bytes[1] as char)
    }

    pub(crate) fn from_chars(file: char, rank: char) -> Option<Position> {
        let file = file_index(file)?;
        let rank = rank_index(rank)?;
        Some(Position { file, rank })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    /// Signed (file, rank) offset from `self` to `to`.
    pub fn delta(self, to: Position) -> (i32, i32) {
        (
            to.file as i32 - self.file as i32,
            to.rank as i32 - self.rank as i32,
        )
    }

    pub fn chebyshev_distance(self, other: Position) -> i32 {
        let (dx, dy) = self.delta(other);
        dx.abs().max(dy.abs())
    }

    /// Every square in scan order: ascending rank, then ascending file.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Position { file, rank }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

pub(crate) fn file_index(c: char) -> Option<u8> {
    if ('a'..='h').contains(&c) {
        Some(c as u8 - b'a')
    } else {
        None
    }
}

pub(crate) fn rank_index(c: char) -> Option<u8> {
    if ('1'..='8').contains(&c) {
        Some(c as u8 - b'1')
    } else {
        None
    }
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The 8x8 grid. Row-major: `squares[rank][file]`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// A board holding the standard opening position.
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.setup_standard_position();
        board
    }

    /// Clears the grid and places the standard 32 pieces.
    pub fn setup_standard_position(&mut self) {
        self.squares = [[None; 8]; 8];
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            self.place_new(piece_type, Color::White, file, 0);
            self.place_new(PieceType::Pawn, Color::White, file, 1);
            self.place_new(PieceType::Pawn, Color::Black, file, 6);
            self.place_new(piece_type, Color::Black, file, 7);
        }
    }

    fn place_new(&mut self, piece_type: PieceType, color: Color, file: u8, rank: u8) {
        let position = Position { file, rank };
        self.place(Piece::new(piece_type, color, position));
    }

    pub fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.rank as usize][position.file as usize]
    }

    /// Overwrite a square. A piece stored here must already carry `position`.
    pub fn set(&mut self, position: Position, piece: Option<Piece>) {
        if let Some(p) = piece {
            assert_eq!(
                p.position, position,
                "piece cache out of sync: {:?} stored at {position}",
                p
            );
        }
        self.squares[position.rank as usize][position.file as usize] = piece;
    }

    /// Put a piece on the square its own `position` names.
    pub fn place(&mut self, piece: Piece) {
        self.set(piece.position, Some(piece));
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position).is_none()
    }

    pub fn is_occupied_by(&self, position: Position, color: Color) -> bool {
        self.get(position).map(|p| p.color == color).unwrap_or(false)
    }

    /// Every piece on the board in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        Position::all().filter_map(move |sq| self.get(sq))
    }

    pub fn find_kings(&self, color: Color) -> Vec<Position> {
        self.pieces()
            .filter(|p| p.piece_type == PieceType::King && p.color == color)
            .map(|p| p.position)
            .collect()
    }

    /// Panics if any piece's cached position disagrees with its square.
    /// A mismatch is an internal defect, never a user error.
    pub fn assert_consistent(&self) {
        for sq in Position::all() {
            if let Some(p) = self.get(sq) {
                assert_eq!(p.position, sq, "piece {:?} stored under {sq}", p);
            }
        }
    }
}
