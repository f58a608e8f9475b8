// =============================================================================
// Piece movement rules
//
// Geometry per piece type plus one uniform occupancy layer. Sliding pieces are
// never blocked by intervening pieces, pawns may step in either direction, and
// the only king-safety rule is that a king may not land next to the enemy
// king. These are the rules this engine plays by, not standard chess.
// =============================================================================

use crate::board::{Board, Position};
use crate::piece::{Color, Piece, PieceType};

fn pawn_reach(dx: i32, dy: i32, is_capture: bool, max_forward: i32) -> bool {
    if is_capture {
        dx.abs() == 1 && dy.abs() == 1
    } else {
        dx == 0 && (1..=max_forward).contains(&dy.abs())
    }
}

fn knight_reach(dx: i32, dy: i32) -> bool {
    matches!((dx.abs(), dy.abs()), (2, 1) | (1, 2))
}

fn bishop_reach(dx: i32, dy: i32) -> bool {
    dx != 0 && dx.abs() == dy.abs()
}

fn rook_reach(dx: i32, dy: i32) -> bool {
    (dx != 0) ^ (dy != 0)
}

fn queen_reach(dx: i32, dy: i32) -> bool {
    rook_reach(dx, dy) ^ bishop_reach(dx, dy)
}

fn king_reach(dx: i32, dy: i32) -> bool {
    dx.abs() <= 1 && dy.abs() <= 1
}

/// Pure geometry: can `piece` get from where it stands to `to`?
/// `is_capture` only matters for pawns.
pub fn can_reach(piece: &Piece, to: Position, is_capture: bool) -> bool {
    let (dx, dy) = piece.position.delta(to);
    match piece.piece_type {
        PieceType::Pawn => pawn_reach(dx, dy, is_capture, piece.max_forward()),
        PieceType::Knight => knight_reach(dx, dy),
        PieceType::Bishop => bishop_reach(dx, dy),
        PieceType::Rook => rook_reach(dx, dy),
        PieceType::Queen => queen_reach(dx, dy),
        PieceType::King => king_reach(dx, dy),
    }
}

/// True iff `target` holds a piece of the side opposing `mover`.
pub fn is_capture(board: &Board, target: Position, mover: Color) -> bool {
    board.is_occupied_by(target, mover.opposite())
}

/// True iff `to` sits within one square of any enemy king.
pub fn touches_enemy_king(board: &Board, to: Position, color: Color) -> bool {
    board
        .find_kings(color.opposite())
        .into_iter()
        .any(|king| king.chebyshev_distance(to) <= 1)
}

/// Geometry plus occupancy: the destination must be empty or hold an enemy
/// piece, and a king may not step next to the enemy king.
pub fn is_legal_destination(board: &Board, piece: &Piece, to: Position) -> bool {
    let capture = is_capture(board, to, piece.color);
    if !can_reach(piece, to, capture) {
        return false;
    }
    if board.is_occupied_by(to, piece.color) {
        return false;
    }
    if piece.piece_type == PieceType::King && touches_enemy_king(board, to, piece.color) {
        return false;
    }
    true
}

/// All squares `piece` may legally move to, in scan order.
pub fn legal_destinations(board: &Board, piece: &Piece) -> Vec<Position> {
    Position::all()
        .filter(|&to| is_legal_destination(board, piece, to))
        .collect()
}
