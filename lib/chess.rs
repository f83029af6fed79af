mod bitboard;
mod board;
mod check;
mod color;
mod direction;
mod figure;
mod game;
mod info;
mod layout;
mod r#move;
mod outcome;
mod piece;
mod position;
mod promotion;
mod role;
mod rules;

pub use bitboard::*;
pub use board::*;
pub use check::*;
pub use color::*;
pub use direction::*;
pub use figure::*;
pub use game::*;
pub use info::*;
pub use layout::*;
pub use outcome::*;
pub use piece::*;
pub use position::*;
pub use promotion::*;
pub use r#move::*;
pub use role::*;
pub use rules::*;
