use super::{on_board, Piece};
use crate::chess::{Bitboard, GameInfo, Position, Role};

/// The two squares diagonally ahead, the only ones a pawn threatens.
pub(super) fn threatened_positions(piece: &Piece) -> Bitboard {
    let (p, f) = (piece.position(), piece.color().forward());
    on_board([p.offset(-1, f), p.offset(1, f)])
}

/// Every square a pawn could conceivably move to.
pub(super) fn candidates(piece: &Piece) -> Bitboard {
    let (p, f) = (piece.position(), piece.color().forward());
    threatened_positions(piece) | on_board([p.offset(0, f), p.offset(0, 2 * f)])
}

pub(super) fn validate_move(piece: &Piece, info: &impl GameInfo, target: Position) -> bool {
    if !piece.validate_threatened(info, target) {
        return false;
    }

    let p = piece.position();
    let dx = target.x() - p.x();
    let advance = (target.y() - p.y()) * piece.color().forward();

    match (dx.abs(), advance) {
        (0, 1) => info.piece_at(target).is_none(),
        (0, 2) => !piece.has_moved() && info.piece_at(target).is_none(),
        (1, 1) => match info.piece_at(target) {
            Some(f) => f.color != piece.color(),
            None => validate_en_passant(piece, info, target),
        },
        _ => false,
    }
}

/// Whether moving diagonally onto the empty `target` captures a pawn that just advanced two rows.
fn validate_en_passant(piece: &Piece, info: &impl GameInfo, target: Position) -> bool {
    let p = piece.position();
    info.previous_move().map_or(false, |m| {
        m.role == Role::Pawn
            && m.color != piece.color()
            && m.rows() == 2
            && m.whither.y() == p.y()
            && (m.whither.x() - p.x()).abs() == 1
            && m.whither.x() == target.x()
    })
}
