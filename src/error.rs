use thiserror::Error;

use crate::board::Position;
use crate::piece::{Color, PieceType};

/// Every recoverable failure of the move pipeline. None of these leave the
/// board modified; the caller may simply ask for another move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid notation: {0}")]
    InvalidNotation(String),
    #[error("invalid promotion choice: {0}")]
    InvalidPromotionChoice(String),
    #[error("no {color:?} {piece_type:?} can move to {target}")]
    NoCandidatePiece {
        piece_type: PieceType,
        color: Color,
        target: Position,
    },
}

pub type Result<T> = std::result::Result<T, MoveError>;
