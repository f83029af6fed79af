use crate::chess::Position;
use test_strategy::Arbitrary;

/// One of the eight unit steps on the chess board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// The directions along ranks and files.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The directions along diagonals.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// All eight directions.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The `(dx, dy)` step, where north points towards `y = 0`.
    pub fn step(&self) -> (i8, i8) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Whether this direction runs along a diagonal.
    pub fn is_diagonal(&self) -> bool {
        Direction::DIAGONAL.contains(self)
    }

    /// The direction of a unit step, if `(dx, dy)` is one.
    pub fn from_step(dx: i8, dy: i8) -> Option<Self> {
        Direction::ALL.into_iter().find(|d| d.step() == (dx, dy))
    }

    /// The direction from `whence` to `whither`, if they lie on the same rank, file or diagonal.
    ///
    /// Returns `None` for identical positions and for any other vector, such as a knight's jump.
    pub fn between(whence: Position, whither: Position) -> Option<Self> {
        let dx = whither.x() - whence.x();
        let dy = whither.y() - whence.y();

        if (dx == 0) != (dy == 0) || (dx != 0 && dx.abs() == dy.abs()) {
            Direction::from_step(dx.signum(), dy.signum())
        } else {
            None
        }
    }
}
