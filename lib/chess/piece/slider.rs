use super::Piece;
use crate::chess::{Bitboard, Direction, GameInfo};

/// Whether `(dx, dy)` runs along a rank or a file, but not both.
pub(super) fn is_orthogonal(dx: i8, dy: i8) -> bool {
    (dx == 0) != (dy == 0)
}

/// Whether `(dx, dy)` runs along a diagonal.
pub(super) fn is_diagonal(dx: i8, dy: i8) -> bool {
    dx != 0 && dx.abs() == dy.abs()
}

/// Squares along each direction, up to and including the first one occupied.
pub(super) fn threatened_positions(
    piece: &Piece,
    info: &impl GameInfo,
    directions: &[Direction],
) -> Bitboard {
    let mut bb = Bitboard::empty();

    for &d in directions {
        for p in piece.position().ray(d) {
            bb.insert(p);
            if info.piece_at(p).is_some() {
                break;
            }
        }
    }

    bb
}
