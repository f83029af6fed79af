use crate::chess::{Color, Position, Role};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use test_strategy::Arbitrary;

/// An immutable snapshot of a piece on the board.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Constructor, Arbitrary, Deserialize, Serialize,
)]
#[serde(deny_unknown_fields)]
pub struct Figure {
    pub role: Role,
    pub color: Color,
    pub position: Position,
}

impl Figure {
    /// Whether this figure stands where a piece of its role and color may start the game.
    pub fn is_at_start(&self) -> bool {
        let (x, y) = (self.position.x(), self.position.y());
        match self.role {
            Role::Pawn => y == self.color.pawn_row(),
            Role::King => self.position == self.color.king_home(),
            Role::Rook => y == self.color.home_row() && (x == 0 || x == Position::SIZE - 1),
            _ => y == self.color.home_row(),
        }
    }
}

/// Uppercase letters for white, lowercase for black.
impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0; 4];
        let c = self.role.to_string().chars().next().unwrap_or('?');
        match self.color {
            Color::White => f.write_str(c.to_ascii_uppercase().encode_utf8(&mut buffer)),
            Color::Black => f.write_char(c),
        }
    }
}
