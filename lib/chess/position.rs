use crate::chess::Direction;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, iter::successors, str::FromStr};
use test_strategy::Arbitrary;

/// A coordinate on the chess board.
///
/// `x` runs along the files, `a` through `h`, and `y` runs along the ranks from black's home row
/// at `y = 0` down to white's home row at `y = 7`. Positions may lie off the board, in which case
/// [`Position::is_on_board`] is `false`.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary, Deserialize, Serialize,
)]
#[serde(deny_unknown_fields)]
pub struct Position {
    #[strategy(0i8..8)]
    x: i8,
    #[strategy(0i8..8)]
    y: i8,
}

impl Position {
    /// The number of columns and rows on the board.
    pub const SIZE: i8 = 8;

    /// Constructs [`Position`] from a pair of coordinates.
    pub const fn new(x: i8, y: i8) -> Self {
        Position { x, y }
    }

    /// The column.
    pub const fn x(&self) -> i8 {
        self.x
    }

    /// The row.
    pub const fn y(&self) -> i8 {
        self.y
    }

    /// Whether this position lies within `[0, 7] × [0, 7]`.
    pub const fn is_on_board(&self) -> bool {
        0 <= self.x && self.x < Self::SIZE && 0 <= self.y && self.y < Self::SIZE
    }

    /// This position shifted by `(dx, dy)`, possibly off the board.
    pub const fn offset(&self, dx: i8, dy: i8) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }

    /// A unique number in `0..64` for positions on the board.
    pub fn index(&self) -> usize {
        debug_assert!(self.is_on_board(), "{self} is off the board");
        (self.y * Self::SIZE + self.x) as usize
    }

    /// The position with the given [`index`][`Position::index`].
    pub fn from_index(i: usize) -> Self {
        debug_assert!(i < 64);
        Position::new(i as i8 % Self::SIZE, i as i8 / Self::SIZE)
    }

    /// An iterator over all positions on the board.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..64).map(Position::from_index)
    }

    /// The positions reached by repeatedly stepping in a [`Direction`], until off the board.
    ///
    /// The starting position is not included.
    pub fn ray(self, d: Direction) -> impl Iterator<Item = Self> {
        let (dx, dy) = d.step();
        successors(Some(self.offset(dx, dy)), move |p| Some(p.offset(dx, dy)))
            .take_while(Position::is_on_board)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let file = (b'a' + self.x as u8) as char;
            let rank = Self::SIZE - self.y;
            write!(f, "{file}{rank}")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse position, expected a square in the range `a1..=h8`")]
pub struct ParsePositionError;

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Position::new(
                (f - b'a') as i8,
                Self::SIZE - (r - b'0') as i8,
            )),
            _ => Err(ParsePositionError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn arbitrary_positions_are_on_the_board(p: Position) {
        assert!(p.is_on_board());
    }

    #[proptest]
    fn positions_outside_range_are_off_the_board(
        #[filter(!(0..8).contains(&#x))] x: i8,
        #[strategy(0i8..8)] y: i8,
    ) {
        assert!(!Position::new(x, y).is_on_board());
        assert!(!Position::new(y, x).is_on_board());
    }

    #[proptest]
    fn from_index_inverts_index(p: Position) {
        assert_eq!(Position::from_index(p.index()), p);
    }

    #[test]
    fn iter_visits_every_square_once() {
        let indices: Vec<_> = Position::iter().map(|p| p.index()).collect();
        assert_eq!(indices, Vec::from_iter(0..64));
    }

    #[proptest]
    fn offset_shifts_coordinates(p: Position, #[strategy(-8i8..8)] dx: i8, #[strategy(-8i8..8)] dy: i8) {
        let q = p.offset(dx, dy);
        assert_eq!((q.x() - p.x(), q.y() - p.y()), (dx, dy));
    }

    #[proptest]
    fn ray_stays_on_the_board_and_excludes_origin(p: Position, d: Direction) {
        for q in p.ray(d) {
            assert!(q.is_on_board());
            assert_ne!(q, p);
            assert_eq!(Direction::between(p, q), Some(d));
        }
    }

    #[test]
    fn ray_stops_at_the_edge() {
        let ray: Vec<_> = Position::new(5, 2).ray(Direction::NorthEast).collect();
        assert_eq!(ray, vec![Position::new(6, 1), Position::new(7, 0)]);
    }

    #[test]
    fn position_displays_in_algebraic_notation() {
        assert_eq!(Position::new(4, 6).to_string(), "e2");
        assert_eq!(Position::new(0, 0).to_string(), "a8");
        assert_eq!(Position::new(7, 7).to_string(), "h1");
        assert_eq!(Position::new(-1, 3).to_string(), "(-1, 3)");
    }

    #[proptest]
    fn parsing_printed_position_is_an_identity(p: Position) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn parsing_position_fails_if_length_not_two(#[filter(#s.len() != 2)] s: String) {
        assert_eq!(s.parse::<Position>(), Err(ParsePositionError));
    }

    #[proptest]
    fn parsing_position_fails_if_file_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        #[strategy(1u8..=8)] r: u8,
    ) {
        assert_eq!(format!("{c}{r}").parse::<Position>(), Err(ParsePositionError));
    }
}
