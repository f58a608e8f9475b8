use serde::{Deserialize, Serialize};

use crate::board::Position;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank a pawn of this colour promotes on.
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Relative material value, used for capture scoring only.
    pub fn value(self) -> u32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 3,
            PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 0,
        }
    }

    /// Uppercase notation letter.
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// Maps a notation letter (either case) to a piece type. `P` is accepted
    /// here; callers decide whether a pawn is meaningful in their context.
    pub fn from_letter(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn is_promotion_target(self) -> bool {
        !matches!(self, PieceType::Pawn | PieceType::King)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    /// Mirrors the square the piece is stored under. Only the move applier
    /// writes it after setup.
    pub position: Position,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color, position: Position) -> Self {
        Piece {
            piece_type,
            color,
            position,
            has_moved: false,
        }
    }

    /// Furthest a pawn may step forward without capturing.
    pub fn max_forward(&self) -> i32 {
        if self.has_moved {
            1
        } else {
            2
        }
    }

    /// Single-letter board code: uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_match_material_table() {
        let values: Vec<u32> = [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ]
        .iter()
        .map(|pt| pt.value())
        .collect();
        assert_eq!(values, vec![1, 3, 3, 5, 9, 0]);
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(PieceType::from_letter('n'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_letter('Q'), Some(PieceType::Queen));
        assert_eq!(PieceType::from_letter('x'), None);
    }

    #[test]
    fn symbol_case_follows_colour() {
        let sq = Position::new(0, 0).unwrap();
        assert_eq!(Piece::new(PieceType::Knight, Color::White, sq).symbol(), 'N');
        assert_eq!(Piece::new(PieceType::Knight, Color::Black, sq).symbol(), 'n');
    }

    #[test]
    fn pawn_range_shrinks_after_first_move() {
        let mut pawn = Piece::new(PieceType::Pawn, Color::White, Position::new(4, 1).unwrap());
        assert_eq!(pawn.max_forward(), 2);
        pawn.has_moved = true;
        assert_eq!(pawn.max_forward(), 1);
    }
}
