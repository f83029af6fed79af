use crate::chess::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Not;
use test_strategy::Arbitrary;

/// The color of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    /// An iterator over both colors, white first.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        [Color::White, Color::Black].into_iter()
    }

    /// The step along `y` that pawns of this color advance by.
    ///
    /// White starts at the bottom of the board (`y = 7`) and moves towards `y = 0`.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row where the non-pawn pieces of this color start.
    pub fn home_row(&self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The row where the pawns of this color start.
    pub fn pawn_row(&self) -> i8 {
        self.home_row() + self.forward()
    }

    /// The square where the king of this color starts.
    pub fn king_home(&self) -> Position {
        Position::new(4, self.home_row())
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn color_implements_not_operator(c: Color) {
        assert_eq!(!!c, c);
        assert_ne!(!c, c);
    }

    #[proptest]
    fn pawns_advance_towards_the_opponents_home_row(c: Color) {
        let mut row = c.pawn_row();
        while (0..8).contains(&(row + c.forward())) {
            row += c.forward();
        }

        assert_eq!(row, (!c).home_row());
    }

    #[test]
    fn iter_yields_white_first() {
        assert_eq!(Vec::from_iter(Color::iter()), vec![Color::White, Color::Black]);
    }

    #[proptest]
    fn color_serializes_in_lowercase(c: Color) {
        assert_eq!(ron::ser::to_string(&c)?, c.to_string());
    }
}
