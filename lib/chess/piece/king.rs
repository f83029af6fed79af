use super::{on_board, Piece};
use crate::chess::{Bitboard, Direction, GameInfo, Position};

/// The eight squares around `p`.
pub(super) fn adjacent(p: Position) -> Bitboard {
    on_board(Direction::ALL.iter().map(|d| {
        let (dx, dy) = d.step();
        p.offset(dx, dy)
    }))
}

/// Adjacent squares plus the castling destinations.
pub(super) fn candidates(piece: &Piece) -> Bitboard {
    let p = piece.position();
    adjacent(p) | on_board([p.offset(-2, 0), p.offset(2, 0)])
}

pub(super) fn validate_move(piece: &Piece, info: &impl GameInfo, target: Position) -> bool {
    let p = piece.position();
    let (dx, dy) = (target.x() - p.x(), target.y() - p.y());

    if dy == 0 && dx.abs() == 2 {
        validate_castle(piece, info, target)
    } else {
        dx.abs() <= 1
            && dy.abs() <= 1
            && piece.validate_capture(info, target)
            && !info.threatened_by(target, !piece.color())
    }
}

/// Castling towards `target`, two columns away from the king's home square.
///
/// Neither the king's square, the square it crosses, nor its destination may be threatened.
fn validate_castle(piece: &Piece, info: &impl GameInfo, target: Position) -> bool {
    let (c, p) = (piece.color(), piece.position());
    let side = (target.x() - p.x()).signum();
    let corner = Position::new(if side > 0 { Position::SIZE - 1 } else { 0 }, p.y());

    !piece.has_moved()
        && p == c.king_home()
        && target.is_on_board()
        && !info.threatened_by(p, !c)
        && info.validate_rook_for_castle(corner, c)
        && !info.is_intervening_piece(p, corner)
        && !info.threatened_by(p.offset(side, 0), !c)
        && !info.threatened_by(target, !c)
}
