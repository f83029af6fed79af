use crate::chess::{Bitboard, Color, Direction, Figure, GameInfo, Position, Role};
use derive_more::DebugCustom;

mod king;
mod knight;
mod pawn;
mod slider;

/// A chess piece owned by a [`Board`][`crate::chess::Board`].
///
/// Captured pieces are never removed, they just stop taking part in the game.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Piece({color} {role:?} at {position})")]
pub struct Piece {
    color: Color,
    role: Role,
    position: Position,
    captured: bool,
    moved: bool,
}

impl Piece {
    /// Constructs an unmoved [`Piece`].
    pub fn new(role: Role, color: Color, position: Position) -> Self {
        Piece {
            color,
            role,
            position,
            captured: false,
            moved: false,
        }
    }

    /// This piece's [`Color`].
    pub fn color(&self) -> Color {
        self.color
    }

    /// This piece's [`Role`].
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's current [`Position`].
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether this piece has been captured.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Whether this piece has moved at least once.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// A snapshot of this piece.
    pub fn figure(&self) -> Figure {
        Figure::new(self.role, self.color, self.position)
    }

    pub(crate) fn relocate(&mut self, p: Position) {
        self.position = p;
        self.moved = true;
    }

    pub(crate) fn capture(&mut self) {
        self.captured = true;
    }

    pub(crate) fn promote(&mut self, r: Role) {
        self.role = r;
    }

    /// Whether `target` is a distinct square on the board with nothing standing in between.
    ///
    /// Only straight lines and diagonals can be blocked, any other vector is never obstructed.
    pub fn validate_threatened(&self, info: &impl GameInfo, target: Position) -> bool {
        target != self.position
            && target.is_on_board()
            && !info.is_intervening_piece(self.position, target)
    }

    /// Whether `target` is [threatened](`Self::validate_threatened`) and either empty or held by
    /// the opponent.
    pub(crate) fn validate_capture(&self, info: &impl GameInfo, target: Position) -> bool {
        self.validate_threatened(info, target) && info.is_capturable(self.color, target)
    }

    /// Whether this piece may move to `target` according to its own geometry.
    ///
    /// Whether the move leaves the king in check is not considered here.
    pub fn validate_move(&self, info: &impl GameInfo, target: Position) -> bool {
        if !target.is_on_board() {
            return false;
        }

        let (dx, dy) = (target.x() - self.position.x(), target.y() - self.position.y());
        match self.role {
            Role::Pawn => pawn::validate_move(self, info, target),
            Role::King => king::validate_move(self, info, target),
            Role::Knight => knight::is_jump(dx, dy) && self.validate_capture(info, target),
            Role::Bishop => slider::is_diagonal(dx, dy) && self.validate_capture(info, target),
            Role::Rook => slider::is_orthogonal(dx, dy) && self.validate_capture(info, target),
            Role::Queen => {
                (slider::is_diagonal(dx, dy) || slider::is_orthogonal(dx, dy))
                    && self.validate_capture(info, target)
            }
        }
    }

    /// The squares this piece could capture on if an opponent stood there.
    pub fn threatened_positions(&self, info: &impl GameInfo) -> Bitboard {
        match self.role {
            Role::Pawn => pawn::threatened_positions(self),
            Role::Knight => knight::jumps(self.position),
            Role::King => king::adjacent(self.position),
            Role::Bishop => slider::threatened_positions(self, info, &Direction::DIAGONAL),
            Role::Rook => slider::threatened_positions(self, info, &Direction::ORTHOGONAL),
            Role::Queen => slider::threatened_positions(self, info, &Direction::ALL),
        }
    }

    /// The squares this piece may move to according to [`Self::validate_move`].
    pub fn valid_moves(&self, info: &impl GameInfo) -> Bitboard {
        let candidates = match self.role {
            Role::Pawn => pawn::candidates(self),
            Role::King => king::candidates(self),
            _ => self.threatened_positions(info),
        };

        candidates
            .into_iter()
            .filter(|&p| self.validate_move(info, p))
            .collect()
    }
}

/// The on-board squares among `positions`.
fn on_board(positions: impl IntoIterator<Item = Position>) -> Bitboard {
    positions.into_iter().filter(Position::is_on_board).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::MockGameInfo;
    use test_strategy::proptest;

    /// A mock of an empty board, where nothing is threatened.
    pub(super) fn empty_board() -> MockGameInfo {
        let mut info = MockGameInfo::new();
        info.expect_is_intervening_piece().return_const(false);
        info.expect_is_capturable().return_const(true);
        info.expect_threatened_by().return_const(false);
        info.expect_piece_at().returning(|_| None);
        info.expect_previous_move().returning(|| None);
        info.expect_validate_rook_for_castle().return_const(false);
        info
    }

    #[proptest]
    fn new_pieces_have_not_moved(r: Role, c: Color, p: Position) {
        let piece = Piece::new(r, c, p);
        assert!(!piece.has_moved());
        assert!(!piece.is_captured());
        assert_eq!(piece.figure(), Figure::new(r, c, p));
    }

    #[proptest]
    fn relocating_marks_the_piece_as_moved(r: Role, c: Color, a: Position, b: Position) {
        let mut piece = Piece::new(r, c, a);
        piece.relocate(b);
        assert!(piece.has_moved());
        assert_eq!(piece.position(), b);
    }

    #[proptest]
    fn no_piece_threatens_its_own_square(r: Role, c: Color, p: Position) {
        let piece = Piece::new(r, c, p);
        assert!(!piece.validate_threatened(&empty_board(), p));
        assert!(!piece.threatened_positions(&empty_board()).contains(p));
    }

    #[proptest]
    fn no_piece_threatens_squares_off_the_board(
        r: Role,
        c: Color,
        p: Position,
        #[strategy(8i8..16)] x: i8,
        #[strategy(0i8..8)] y: i8,
    ) {
        let piece = Piece::new(r, c, p);
        assert!(!piece.validate_threatened(&empty_board(), Position::new(x, y)));
        assert!(!piece.validate_move(&empty_board(), Position::new(-x, y)));
    }

    #[proptest]
    fn pieces_never_move_to_squares_held_by_their_own_color(
        r: Role,
        c: Color,
        a: Position,
        b: Position,
    ) {
        let mut info = MockGameInfo::new();
        info.expect_is_intervening_piece().return_const(false);
        info.expect_is_capturable().return_const(false);
        info.expect_threatened_by().return_const(false);
        info.expect_piece_at()
            .returning(move |p| Some(Figure::new(Role::Pawn, c, p)));
        info.expect_previous_move().returning(|| None);
        info.expect_validate_rook_for_castle().return_const(false);

        assert!(!Piece::new(r, c, a).validate_move(&info, b));
    }

    #[proptest]
    fn blocked_squares_are_not_threatened(r: Role, c: Color, a: Position, b: Position) {
        let mut info = MockGameInfo::new();
        info.expect_is_intervening_piece().return_const(true);
        assert!(!Piece::new(r, c, a).validate_threatened(&info, b));
    }

    #[proptest]
    fn valid_moves_agree_with_validate_move(r: Role, c: Color, p: Position) {
        let piece = Piece::new(r, c, p);
        let info = empty_board();
        let moves = piece.valid_moves(&info);
        for q in Position::iter() {
            if moves.contains(q) {
                assert!(piece.validate_move(&info, q));
            }
        }
    }

    #[proptest]
    fn valid_moves_of_non_pawns_are_threatened_on_an_empty_board(
        #[filter(!matches!(#r, Role::Pawn | Role::King))] r: Role,
        c: Color,
        p: Position,
    ) {
        let piece = Piece::new(r, c, p);
        let info = empty_board();
        assert_eq!(piece.valid_moves(&info), piece.threatened_positions(&info));
    }

    #[test]
    fn queen_threatens_the_union_of_rook_and_bishop() {
        let info = empty_board();
        let p = Position::new(3, 4);
        let queen = Piece::new(Role::Queen, Color::White, p).threatened_positions(&info);
        let rook = Piece::new(Role::Rook, Color::White, p).threatened_positions(&info);
        let bishop = Piece::new(Role::Bishop, Color::White, p).threatened_positions(&info);
        assert_eq!(queen, rook | bishop);
        assert_eq!(queen.len(), 27);
    }

    #[proptest]
    fn targets_far_off_the_board_are_never_valid(
        r: Role,
        c: Color,
        p: Position,
        #[strategy(i8::MIN..-64)] x: i8,
        #[strategy(-8i8..16)] y: i8,
    ) {
        let piece = Piece::new(r, c, p);
        assert!(!piece.validate_move(&empty_board(), Position::new(x, y)));
        assert!(!piece.validate_move(&empty_board(), Position::new(y, x)));
        assert!(!piece.validate_move(&empty_board(), Position::new(i8::MAX, x)));
    }
}
