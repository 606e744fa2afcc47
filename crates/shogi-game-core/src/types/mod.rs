//! 基本型の定義

mod color;
mod moves;
mod piece;
mod square;

pub use color::Color;
pub use moves::{MoveCandidate, MoveList, MoveOrigin};
pub use piece::{Piece, PieceType};
pub use square::{BOARD_SIZE, Square};
