pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod render;
pub mod resolver;
pub mod rules;

pub use board::{Board, Position};
pub use error::MoveError;
pub use game::Game;
pub use piece::{Color, Piece, PieceType};
