use std::fmt;

use serde::Serialize;

use crate::board::{Board, Position};
use crate::game::Game;
use crate::piece::Color;

const TOP: &str = "   ┌───┬───┬───┬───┬───┬───┬───┬───┐";
const MIDDLE: &str = "   ├───┼───┼───┼───┼───┼───┼───┼───┤";
const BOTTOM: &str = "   └───┴───┴───┴───┴───┴───┴───┴───┘";
const FILES: &str = "     a   b   c   d   e   f   g   h";

/// Render the board as a boxed text grid, rank 8 at the top, files a-h from
/// left to right. White pieces are uppercase, Black lowercase, empty squares
/// blank.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str(TOP);
    out.push('\n');

    for rank in (0..8u8).rev() {
        if rank != 7 {
            out.push_str(MIDDLE);
            out.push('\n');
        }
        out.push_str(&format!(" {} │", rank + 1));
        for file in 0..8u8 {
            let symbol = Position::new(file, rank)
                .and_then(|sq| board.get(sq))
                .map(|p| p.symbol())
                .unwrap_or(' ');
            out.push_str(&format!(" {symbol} │"));
        }
        out.push('\n');
    }

    out.push_str(BOTTOM);
    out.push('\n');
    out.push_str(FILES);
    out
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

/// Machine-readable view of a game for front ends.
#[derive(Serialize, Debug)]
pub struct Snapshot {
    /// `squares[rank][file]`, rank 0 = rank 1. Piece codes as in the text grid.
    pub squares: Vec<Vec<Option<String>>>,
    pub side_to_move: Color,
    pub ply: u32,
    pub white_score: u32,
    pub black_score: u32,
}

pub fn snapshot(game: &Game) -> Snapshot {
    let board = game.board();
    let squares = (0..8u8)
        .map(|rank| {
            (0..8u8)
                .map(|file| {
                    Position::new(file, rank)
                        .and_then(|sq| board.get(sq))
                        .map(|p| p.symbol().to_string())
                })
                .collect()
        })
        .collect();

    Snapshot {
        squares,
        side_to_move: game.side_to_move(),
        ply: game.ply(),
        white_score: game.score(Color::White),
        black_score: game.score(Color::Black),
    }
}

pub fn snapshot_json(game: &Game) -> serde_json::Result<String> {
    serde_json::to_string(&snapshot(game))
}
