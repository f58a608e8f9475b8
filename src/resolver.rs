use crate::board::{Board, Position};
use crate::error::{MoveError, Result};
use crate::notation::{CastleSide, MoveIntent, Target};
use crate::piece::{Color, Piece, PieceType};
use crate::rules::{is_legal_destination, touches_enemy_king};

/// Finds the piece a move intent refers to.
///
/// Squares are scanned by ascending rank, then ascending file, and the first
/// piece of the right kind and colour that may legally reach the target (and
/// matches the disambiguator, if any) wins. Several candidates without a
/// disambiguator are not treated as an error.
pub fn resolve(board: &Board, intent: &MoveIntent, color: Color) -> Result<(Piece, Position)> {
    if let Target::Castle(side) = intent.target {
        return resolve_castle(board, side, color);
    }

    let target = intent.target_square(color);
    let found = board
        .pieces()
        .filter(|p| p.piece_type == intent.piece_type && p.color == color)
        .filter(|p| is_legal_destination(board, p, target))
        .find(|p| {
            intent
                .disambiguator
                .map(|d| d.matches(p.position))
                .unwrap_or(true)
        });

    match found {
        Some(piece) => {
            log::debug!("{:?} resolved to {:?} on {}", intent.target, piece.piece_type, piece.position);
            Ok((piece, target))
        }
        None => Err(MoveError::NoCandidatePiece {
            piece_type: intent.piece_type,
            color,
            target,
        }),
    }
}

/// A castle needs the king on its home square, a same-colour rook in the
/// corner, nothing between them, and a landing square clear of the enemy
/// king. Whether either piece has moved before is not tracked.
fn resolve_castle(board: &Board, side: CastleSide, color: Color) -> Result<(Piece, Position)> {
    let rank = color.home_rank();
    let square = |file: u8| Position::new(file, rank).expect("home rank square");
    let target = square(side.king_file());
    let no_candidate = MoveError::NoCandidatePiece {
        piece_type: PieceType::King,
        color,
        target,
    };

    let king = match board.get(square(4)) {
        Some(p) if p.piece_type == PieceType::King && p.color == color => p,
        _ => return Err(no_candidate),
    };
    let rook_in_corner = board
        .get(square(side.rook_file()))
        .map(|p| p.piece_type == PieceType::Rook && p.color == color)
        .unwrap_or(false);
    if !rook_in_corner {
        return Err(no_candidate);
    }

    let (lo, hi) = match side {
        CastleSide::King => (5, 7),
        CastleSide::Queen => (1, 4),
    };
    if (lo..hi).any(|file| !board.is_empty(square(file))) {
        return Err(no_candidate);
    }
    if touches_enemy_king(board, target, color) {
        return Err(no_candidate);
    }

    Ok((king, target))
}
