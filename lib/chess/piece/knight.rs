use super::on_board;
use crate::chess::{Bitboard, Position};

/// The eight jumps of a knight.
const JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Whether `(dx, dy)` is a permutation of `(±1, ±2)`.
pub(super) fn is_jump(dx: i8, dy: i8) -> bool {
    matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1))
}

pub(super) fn jumps(p: Position) -> Bitboard {
    on_board(JUMPS.iter().map(|&(dx, dy)| p.offset(dx, dy)))
}
