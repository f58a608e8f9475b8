// =============================================================================
// Turn controller
//
// Owns the board and whose turn it is. Each ply runs the text through the
// notation parser, the resolver and the move applier; a failure anywhere
// leaves the board and the turn exactly as they were so the caller can ask
// for another move. There is no check, mate or stalemate detection: the game
// lasts until the caller stops feeding moves.
// =============================================================================

use crate::board::Board;
use crate::error::{MoveError, Result};
use crate::moves::{apply, AppliedMove, PromotionChooser};
use crate::notation::{is_well_formed, parse};
use crate::piece::{Color, PieceType};
use crate::resolver::resolve;

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    ply: u32,
    /// White pieces taken by Black.
    captured_white: Vec<PieceType>,
    /// Black pieces taken by White.
    captured_black: Vec<PieceType>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard opening position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Start from an arbitrary position. Useful for tests and puzzles.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        board.assert_consistent();
        Game {
            board,
            side_to_move,
            ply: 0,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Plies applied so far.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Pieces of `color` that the opponent has captured.
    pub fn captured(&self, color: Color) -> &[PieceType] {
        match color {
            Color::White => &self.captured_white,
            Color::Black => &self.captured_black,
        }
    }

    /// Material `color` has taken from the opponent.
    pub fn score(&self, color: Color) -> u32 {
        self.captured(color.opposite()).iter().map(|pt| pt.value()).sum()
    }

    /// Plays one move for the side to move.
    pub fn play(&mut self, text: &str, chooser: &mut dyn PromotionChooser) -> Result<AppliedMove> {
        let text = text.trim();
        if !is_well_formed(text) {
            log::debug!("rejected malformed move {text:?}");
            return Err(MoveError::InvalidNotation(text.to_string()));
        }

        let color = self.side_to_move;
        let result = parse(text)
            .and_then(|intent| {
                let (piece, to) = resolve(&self.board, &intent, color)?;
                apply(&mut self.board, piece, to, intent.promotion, chooser)
            });
        let applied = match result {
            Ok(applied) => applied,
            Err(e) => {
                log::warn!("{color:?} move {text:?} rejected: {e}");
                return Err(e);
            }
        };
        self.board.assert_consistent();

        if let Some(victim) = applied.captured {
            match victim.color {
                Color::White => self.captured_white.push(victim.piece_type),
                Color::Black => self.captured_black.push(victim.piece_type),
            }
        }
        self.ply += 1;
        self.side_to_move = color.opposite();
        log::info!(
            "ply {}: {color:?} {text} ({} -> {})",
            self.ply,
            applied.from,
            applied.to
        );
        Ok(applied)
    }

    /// Feeds moves until the source runs dry. `observer` sees every outcome,
    /// applied or rejected; a rejected move is simply skipped and the same
    /// side moves again. Returns the number of plies applied.
    pub fn run<I, F>(&mut self, moves: I, chooser: &mut dyn PromotionChooser, mut observer: F) -> u32
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: FnMut(&Game, &Result<AppliedMove>),
    {
        let start = self.ply;
        for text in moves {
            let outcome = self.play(text.as_ref(), chooser);
            observer(&*self, &outcome);
        }
        self.ply - start
    }
}
