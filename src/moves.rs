use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::error::Result;
use crate::notation::promotion_choice;
use crate::piece::{Color, Piece, PieceType};

/// Supplies the promotion piece when the move text did not name one.
/// Implementations may block on user input; the library never does.
pub trait PromotionChooser {
    fn choose(&mut self, color: Color) -> Result<PieceType>;
}

/// Always picks the same piece. Handy for scripted games and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedPromotion(pub PieceType);

impl PromotionChooser for FixedPromotion {
    fn choose(&mut self, _color: Color) -> Result<PieceType> {
        Ok(self.0)
    }
}

/// Record of one applied move.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AppliedMove {
    pub piece_type: PieceType,
    pub color: Color,
    pub from: Position,
    pub to: Position,
    pub captured: Option<Piece>,
    pub promoted_to: Option<PieceType>,
    /// Rook relocation when the move was a castle.
    pub rook_hop: Option<(Position, Position)>,
}

fn relocate(board: &mut Board, mut piece: Piece, to: Position) -> Piece {
    board.set(piece.position, None);
    piece.position = to;
    board.set(to, Some(piece));
    piece
}

/// King stepping two files along its home rank: returns where the rook
/// jumps from and to.
fn castle_rook_hop(piece: &Piece, to: Position) -> Option<(Position, Position)> {
    if piece.piece_type != PieceType::King {
        return None;
    }
    let rank = piece.color.home_rank();
    if piece.position.rank() != rank || to.rank() != rank {
        return None;
    }
    let (rook_file, landing_file) = match piece.position.delta(to) {
        (2, 0) => (7, 5),
        (-2, 0) => (0, 3),
        _ => return None,
    };
    Some((Position::new(rook_file, rank)?, Position::new(landing_file, rank)?))
}

/// Moves `piece` to `destination`, overwriting whatever enemy piece stood
/// there. A pawn reaching its last rank is replaced by the promotion piece:
/// `promotion` if the move text named one, otherwise whatever `chooser`
/// returns. The choice is settled before the board is touched, so an error
/// leaves the board as it was.
///
/// Panics if `destination` holds a piece of the mover's colour; the resolver
/// never produces such a move.
pub fn apply(
    board: &mut Board,
    piece: Piece,
    destination: Position,
    promotion: Option<PieceType>,
    chooser: &mut dyn PromotionChooser,
) -> Result<AppliedMove> {
    assert!(
        !board.is_occupied_by(destination, piece.color),
        "{:?} would land on its own piece at {destination}",
        piece
    );
    debug_assert_eq!(board.get(piece.position), Some(piece));

    let promotes = piece.piece_type == PieceType::Pawn
        && destination.rank() == piece.color.promotion_rank();
    let promoted_to = if promotes {
        let choice = match promotion {
            Some(kind) => kind,
            None => chooser.choose(piece.color)?,
        };
        // Re-validate whatever the chooser handed back.
        Some(promotion_choice(choice.letter())?)
    } else {
        if promotion.is_some() {
            log::warn!("promotion suffix ignored: {:?} is not promoting on {destination}", piece.piece_type);
        }
        None
    };

    let from = piece.position;
    let captured = board.get(destination).filter(|p| p.color != piece.color);
    let rook_hop = castle_rook_hop(&piece, destination);

    let mut moved = relocate(board, piece, destination);
    if moved.piece_type == PieceType::Pawn {
        moved.has_moved = true;
        board.set(destination, Some(moved));
    }

    if let Some((rook_from, rook_to)) = rook_hop {
        if let Some(rook) = board.get(rook_from) {
            relocate(board, rook, rook_to);
        }
    }

    if let Some(kind) = promoted_to {
        board.set(destination, Some(Piece::new(kind, moved.color, destination)));
        log::info!("{:?} pawn promoted to {kind:?} on {destination}", moved.color);
    }

    if let Some(victim) = captured {
        log::info!(
            "{:?} {:?} captured {:?} {:?} on {destination}",
            moved.color, moved.piece_type, victim.color, victim.piece_type
        );
    }

    Ok(AppliedMove {
        piece_type: piece.piece_type,
        color: piece.color,
        from,
        to: destination,
        captured,
        promoted_to,
        rook_hop,
    })
}
