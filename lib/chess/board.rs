use crate::chess::*;
use arrayvec::ArrayVec;
use derive_more::{DebugCustom, Display, Error};
use std::fmt::{self, Write};
use tracing::{debug, error, instrument, trace};

/// An arrangement of pieces that can never occur in a game of chess.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum InvalidState {
    #[display(fmt = "the {_0} king is missing")]
    MissingKing(#[error(not(source))] Color),

    #[display(fmt = "there is more than one {_0} king")]
    TooManyKings(#[error(not(source))] Color),

    #[display(fmt = "both kings are in check")]
    DualCheck,

    #[display(fmt = "the piece moving to {_0} would capture its own color")]
    SameColorCapture(#[error(not(source))] Position),

    #[display(fmt = "there is no piece at {_0}")]
    EmptySquare(#[error(not(source))] Position),

    #[display(fmt = "{_0} is off the board")]
    OffBoard(#[error(not(source))] Position),

    #[display(fmt = "more than one piece at {_0}")]
    Overlap(#[error(not(source))] Position),
}

/// The reason why a move was rejected.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum IllegalMove {
    #[display(fmt = "there is no piece at {_0}")]
    NoPiece(#[error(not(source))] Position),

    #[display(fmt = "it is not {_0}'s turn")]
    OutOfTurn(#[error(not(source))] Color),

    #[display(fmt = "invalid move")]
    InvalidMove,

    #[display(fmt = "move results in or does not alleviate check")]
    SelfCheck,

    #[display(fmt = "move leads to an invalid state: {_0}")]
    InvalidState(#[error(source)] InvalidState),
}

impl From<InvalidState> for IllegalMove {
    fn from(e: InvalidState) -> Self {
        IllegalMove::InvalidState(e)
    }
}

/// The chess board.
///
/// Pieces live in a fixed arena indexed by the grid, so copying a board copies every piece.
#[derive(DebugCustom, Clone)]
#[debug(fmt = "Board({self})")]
pub struct Board {
    pieces: ArrayVec<Piece, 64>,
    grid: [Option<u8>; 64],
    threats: [Bitboard; 2],
    check: ColorInCheck,
    error: Option<IllegalMove>,
    rules: Rules,
}

/// The last rejection reason is not part of the position.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.grid == other.grid
            && self.threats == other.threats
            && self.check == other.check
            && self.rules == other.rules
    }
}

impl Eq for Board {}

impl Board {
    /// The standard starting position.
    pub fn standard(rules: Rules) -> Self {
        let mut board = Board::place(&Layout::standard(), rules);
        board.threats = board.compute_threats(&[]);
        board
    }

    /// Sets up a board from an arbitrary [`Layout`].
    pub fn new(layout: &Layout, rules: Rules) -> Result<Self, InvalidState> {
        layout.validate()?;
        let mut board = Board::place(layout, rules);
        board.refresh(&[])?;
        Ok(board)
    }

    /// Places pieces on an empty board, assuming the layout is valid.
    ///
    /// Pieces away from their starting squares count as having moved.
    fn place(layout: &Layout, rules: Rules) -> Self {
        let mut board = Board {
            pieces: ArrayVec::new(),
            grid: [None; 64],
            threats: [Bitboard::empty(); 2],
            check: ColorInCheck::None,
            error: None,
            rules,
        };

        for f in layout {
            let mut piece = Piece::new(f.role, f.color, f.position);
            if !f.is_at_start() {
                piece.relocate(f.position);
            }

            board.grid[f.position.index()] = Some(board.pieces.len() as u8);
            board.pieces.push(piece);
        }

        board
    }

    /// The [`Rules`] in effect.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// The live [`Piece`] at this [`Position`], if any.
    pub fn piece(&self, p: Position) -> Option<&Piece> {
        if p.is_on_board() {
            self.grid[p.index()].map(|i| &self.pieces[i as usize])
        } else {
            None
        }
    }

    /// A snapshot of the piece at this [`Position`], if any.
    pub fn piece_at(&self, p: Position) -> Option<Figure> {
        self.piece(p).map(Piece::figure)
    }

    /// An iterator over the live pieces.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| !p.is_captured())
    }

    /// An iterator over the pieces captured so far.
    pub fn captured(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.is_captured())
    }

    /// The live pieces as a [`Layout`].
    pub fn layout(&self) -> Layout {
        Layout::new(self.iter().map(Piece::figure).collect())
    }

    /// The [`Position`] of the king of this [`Color`].
    pub fn king(&self, c: Color) -> Option<Position> {
        self.iter()
            .find(|p| p.role() == Role::King && p.color() == c)
            .map(Piece::position)
    }

    /// Which side, if any, is in check.
    pub fn color_in_check(&self) -> ColorInCheck {
        self.check
    }

    /// Whether any piece of this [`Color`] threatens this [`Position`].
    pub fn threatened_by(&self, p: Position, c: Color) -> bool {
        self.threats[c as usize].contains(p)
    }

    /// Every [`Position`] threatened by this [`Color`].
    pub fn threatened_positions(&self, c: Color) -> Bitboard {
        self.threats[c as usize]
    }

    /// The first piece strictly between `whence` and `whither`.
    ///
    /// Only positions on the same rank, file or diagonal can have pieces in between.
    pub fn intervening_piece(&self, whence: Position, whither: Position) -> Option<Figure> {
        let d = Direction::between(whence, whither)?;
        whence
            .ray(d)
            .take_while(|&p| p != whither)
            .find_map(|p| self.piece_at(p))
    }

    /// Whether some piece stands strictly between `whence` and `whither`.
    pub fn is_intervening_piece(&self, whence: Position, whither: Position) -> bool {
        self.intervening_piece(whence, whither).is_some()
    }

    /// Why the last move request was rejected, if it was.
    pub fn move_error(&self) -> Option<IllegalMove> {
        self.error
    }

    /// Works out the full effect of moving the piece at `whence` to `whither`.
    ///
    /// No rules are checked beyond refusing to capture a piece of the same color.
    pub(crate) fn resolve(&self, whence: Position, whither: Position) -> Result<Move, InvalidState> {
        let piece = self.piece(whence).ok_or(InvalidState::EmptySquare(whence))?;
        if !whither.is_on_board() {
            return Err(InvalidState::OffBoard(whither));
        }

        let c = piece.color();
        let (dx, dy) = (whither.x() - whence.x(), whither.y() - whence.y());
        let mut m = Move::new(c, piece.role(), whence, whither);

        match self.piece(whither) {
            Some(t) if t.color() == c => return Err(InvalidState::SameColorCapture(whither)),
            Some(t) => m.capture = Some((t.role(), whither)),
            None => {}
        }

        match piece.role() {
            Role::King if whence == c.king_home() && dy == 0 && dx.abs() == 2 => {
                let corner = Position::new(if dx > 0 { Position::SIZE - 1 } else { 0 }, whence.y());
                let landing = whence.offset(dx.signum(), 0);
                match self.piece(corner) {
                    Some(r) if r.role() == Role::Rook && r.color() == c => {
                        if self.piece(landing).is_none() {
                            m.secondary = Some(Secondary {
                                role: Role::Rook,
                                whence: corner,
                                whither: landing,
                            });
                        }
                    }

                    _ => {}
                }
            }

            Role::Pawn => {
                if dx.abs() == 1 && dy == c.forward() && m.capture.is_none() {
                    let victim = Position::new(whither.x(), whence.y());
                    match self.piece(victim) {
                        Some(v) if v.role() == Role::Pawn && v.color() != c => {
                            m.capture = Some((Role::Pawn, victim));
                        }

                        _ => {}
                    }
                }

                if whither.y() == (!c).home_row() {
                    m.promotion = Some(self.rules.promotion.into());
                }
            }

            _ => {}
        }

        Ok(m)
    }

    fn relocate(&mut self, whence: Position, whither: Position) -> Result<usize, InvalidState> {
        let i = self.grid[whence.index()]
            .take()
            .ok_or(InvalidState::EmptySquare(whence))?;

        self.grid[whither.index()] = Some(i);
        self.pieces[i as usize].relocate(whither);
        Ok(i as usize)
    }

    /// Mutates the board according to a resolved [`Move`].
    fn apply(&mut self, m: &Move) -> Result<(), InvalidState> {
        if let Some((_, p)) = m.capture {
            let i = self.grid[p.index()]
                .take()
                .ok_or(InvalidState::EmptySquare(p))?;

            self.pieces[i as usize].capture();
        }

        let i = self.relocate(m.whence, m.whither)?;

        if let Some(s) = m.secondary {
            self.relocate(s.whence, s.whither)?;
        }

        if let Some(r) = m.promotion {
            self.pieces[i].promote(r);
        }

        Ok(())
    }

    fn compute_threats(&self, history: &[Move]) -> [Bitboard; 2] {
        let view = GameView::new(self, history);
        let mut threats = [Bitboard::empty(); 2];
        for p in self.iter() {
            threats[p.color() as usize] |= p.threatened_positions(&view);
        }

        threats
    }

    fn detect_check(&self) -> Result<ColorInCheck, InvalidState> {
        let mut check = ColorInCheck::None;
        for c in Color::iter() {
            let king = self.king(c).ok_or(InvalidState::MissingKing(c))?;
            if self.threatened_by(king, !c) {
                if check != ColorInCheck::None {
                    return Err(InvalidState::DualCheck);
                }

                check = c.into();
            }
        }

        Ok(check)
    }

    /// Recomputes the threat cache and which side is in check.
    fn refresh(&mut self, history: &[Move]) -> Result<ColorInCheck, InvalidState> {
        self.threats = self.compute_threats(history);
        self.check = self.detect_check()?;
        Ok(self.check)
    }

    fn commit(&mut self, history: &mut Vec<Move>, m: Move) -> Result<ColorInCheck, InvalidState> {
        self.apply(&m)?;
        history.push(m);
        self.refresh(history)
    }

    /// Moves a piece without checking whether the move is legal.
    pub(crate) fn force_move(
        &mut self,
        history: &mut Vec<Move>,
        whence: Position,
        whither: Position,
    ) -> Result<Move, InvalidState> {
        let m = self.resolve(whence, whither)?;
        self.commit(history, m)?;
        Ok(m)
    }

    /// Decides whether a move is legal without touching the board.
    ///
    /// The move is played on a copy of the game, which must not leave the mover in check.
    pub(crate) fn evaluate(
        &self,
        history: &[Move],
        whence: Position,
        whither: Position,
    ) -> Result<Move, IllegalMove> {
        let piece = self.piece(whence).ok_or(IllegalMove::NoPiece(whence))?;

        if self.rules.alternate_turns && piece.color() != Game::turn_after(history) {
            return Err(IllegalMove::OutOfTurn(piece.color()));
        }

        let view = GameView::new(self, history);
        if !piece.validate_move(&view, whither) {
            return Err(IllegalMove::InvalidMove);
        }

        let m = self.resolve(whence, whither)?;
        let hypothetical = view.force_move(whence, whither)?;
        if hypothetical.board().color_in_check().is(piece.color()) {
            return Err(IllegalMove::SelfCheck);
        }

        Ok(m)
    }

    /// Plays a move if it is legal, otherwise records why it was rejected.
    #[instrument(level = "trace", skip(self, history), ret)]
    pub(crate) fn play(
        &mut self,
        history: &mut Vec<Move>,
        whence: Position,
        whither: Position,
    ) -> Result<Move, IllegalMove> {
        let m = match self.evaluate(history, whence, whither) {
            Ok(m) => m,
            Err(e) => {
                debug!(%whence, %whither, reason = %e, "move rejected");
                self.error = Some(e);
                return Err(e);
            }
        };

        self.error = None;
        if let Err(e) = self.commit(history, m) {
            error!(%m, "{e}");
            panic!("committing `{m}` left the board in an invalid state: {e}");
        }

        trace!(%m, check = %self.check, "move committed");
        Ok(m)
    }

    /// Requests the piece at `whence` be moved to `whither`, given the moves played so far.
    ///
    /// Returns whether the move was committed and appended to `history`, the reason for a
    /// rejection is kept in [`Board::move_error`].
    pub fn request_move(
        &mut self,
        history: &mut Vec<Move>,
        whence: Position,
        whither: Position,
    ) -> bool {
        self.play(history, whence, whither).is_ok()
    }
}

/// Rows from `y = 0` separated by `/`, with uppercase letters for white and `.` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..Position::SIZE {
            if y > 0 {
                f.write_char('/')?;
            }

            for x in 0..Position::SIZE {
                match self.piece_at(Position::new(x, y)) {
                    Some(fig) => write!(f, "{fig}")?,
                    None => f.write_char('.')?,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn board(figures: &[(Role, Color, (i8, i8))]) -> Result<Board, InvalidState> {
        let layout = figures
            .iter()
            .map(|&(r, c, (x, y))| Figure::new(r, c, Position::new(x, y)))
            .collect();

        Board::new(&Layout::new(layout), Rules::default())
    }

    #[test]
    fn standard_board_displays_row_by_row() {
        assert_eq!(
            Board::standard(Rules::default()).to_string(),
            "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn standard_board_is_equivalent_to_the_standard_layout() {
        let rules = Rules::default();
        assert_eq!(Board::new(&Layout::standard(), rules), Ok(Board::standard(rules)));
    }

    #[test]
    fn nobody_is_in_check_at_the_start() {
        let board = Board::standard(Rules::default());
        assert_eq!(board.color_in_check(), ColorInCheck::None);
        assert_eq!(board.move_error(), None);
    }

    #[proptest]
    fn pawns_threaten_the_row_ahead_at_the_start(c: Color, #[strategy(0i8..8)] x: i8) {
        let board = Board::standard(Rules::default());
        let ahead = c.pawn_row() + c.forward();
        assert!(board.threatened_by(Position::new(x, ahead), c));
        assert!(!board.threatened_by(Position::new(x, ahead + c.forward()), c));
        assert!(!board.threatened_by(Position::new(x, ahead), !c));
    }

    #[proptest]
    fn kings_start_on_their_home_squares(c: Color) {
        let board = Board::standard(Rules::default());
        assert_eq!(board.king(c), Some(c.king_home()));
    }

    #[test]
    fn intervening_piece_is_the_first_piece_in_between() {
        let board = Board::standard(Rules::default());
        let rook = Position::new(0, 7);
        let found = board.intervening_piece(rook, Position::new(0, 0));
        assert_eq!(found, Some(Figure::new(Role::Pawn, Color::White, Position::new(0, 6))));
    }

    #[test]
    fn endpoints_are_never_intervening() {
        let board = Board::standard(Rules::default());
        assert!(!board.is_intervening_piece(Position::new(0, 7), Position::new(0, 6)));
        assert!(!board.is_intervening_piece(Position::new(0, 6), Position::new(0, 1)));
    }

    #[test]
    fn knight_jumps_have_nothing_in_between() {
        let board = Board::standard(Rules::default());
        assert!(!board.is_intervening_piece(Position::new(1, 7), Position::new(2, 5)));
    }

    #[proptest]
    fn nothing_intervenes_between_a_square_and_itself(p: Position) {
        let board = Board::standard(Rules::default());
        assert!(!board.is_intervening_piece(p, p));
    }

    #[test]
    fn board_detects_check() {
        let board = board(&[
            (Role::King, Color::White, (4, 7)),
            (Role::King, Color::Black, (4, 0)),
            (Role::Rook, Color::Black, (4, 3)),
        ]);

        assert_eq!(board.map(|b| b.color_in_check()), Ok(ColorInCheck::White));
    }

    #[test]
    fn board_rejects_dual_check() {
        let board = board(&[
            (Role::King, Color::White, (4, 7)),
            (Role::King, Color::Black, (4, 0)),
            (Role::Rook, Color::Black, (4, 3)),
            (Role::Rook, Color::White, (0, 0)),
        ]);

        assert_eq!(board, Err(InvalidState::DualCheck));
    }

    #[test]
    fn board_rejects_missing_king() {
        let board = board(&[(Role::King, Color::White, (4, 7))]);
        assert_eq!(board, Err(InvalidState::MissingKing(Color::Black)));
    }

    #[test]
    fn resolve_finds_the_castling_rook() {
        let board = board(&[
            (Role::King, Color::White, (4, 7)),
            (Role::Rook, Color::White, (7, 7)),
            (Role::King, Color::Black, (4, 0)),
        ])
        .unwrap();

        let m = board.resolve(Position::new(4, 7), Position::new(6, 7)).unwrap();
        assert_eq!(
            m.secondary,
            Some(Secondary {
                role: Role::Rook,
                whence: Position::new(7, 7),
                whither: Position::new(5, 7),
            })
        );
    }

    #[test]
    fn resolve_finds_the_pawn_captured_en_passant() {
        let board = board(&[
            (Role::King, Color::White, (4, 7)),
            (Role::Pawn, Color::White, (4, 3)),
            (Role::Pawn, Color::Black, (3, 3)),
            (Role::King, Color::Black, (4, 0)),
        ])
        .unwrap();

        let m = board.resolve(Position::new(4, 3), Position::new(3, 2)).unwrap();
        assert_eq!(m.capture, Some((Role::Pawn, Position::new(3, 3))));
        assert!(m.kind().contains(MoveKind::EN_PASSANT));
    }

    #[test]
    fn resolve_promotes_pawns_on_the_far_row() {
        let mut rules = Rules::default();
        rules.promotion = Promotion::Knight;

        let layout = Layout::new(vec![
            Figure::new(Role::King, Color::White, Position::new(4, 7)),
            Figure::new(Role::Pawn, Color::White, Position::new(0, 1)),
            Figure::new(Role::King, Color::Black, Position::new(4, 0)),
        ]);

        let board = Board::new(&layout, rules).unwrap();
        let m = board.resolve(Position::new(0, 1), Position::new(0, 0)).unwrap();
        assert_eq!(m.promotion, Some(Role::Knight));
    }

    #[proptest]
    fn resolve_refuses_to_capture_own_pieces(c: Color, #[strategy(0i8..8)] x: i8) {
        let board = Board::standard(Rules::default());
        let whence = Position::new(x, c.home_row());
        let whither = Position::new(x, c.pawn_row());
        assert_eq!(
            board.resolve(whence, whither),
            Err(InvalidState::SameColorCapture(whither))
        );
    }

    #[proptest]
    fn resolve_requires_a_piece(#[strategy(2i8..6)] y: i8, #[strategy(0i8..8)] x: i8, p: Position) {
        let board = Board::standard(Rules::default());
        let whence = Position::new(x, y);
        assert_eq!(board.resolve(whence, p), Err(InvalidState::EmptySquare(whence)));
    }

    #[test]
    fn force_move_captures_and_keeps_the_captured_piece() {
        let mut board = Board::standard(Rules::default());
        let mut history = Vec::new();
        let m = board
            .force_move(&mut history, Position::new(3, 7), Position::new(3, 1))
            .unwrap();

        assert_eq!(m.capture, Some((Role::Pawn, Position::new(3, 1))));
        assert_eq!(board.captured().count(), 1);
        assert_eq!(board.iter().count(), 31);
        assert_eq!(history, vec![m]);
        assert_eq!(board.color_in_check(), ColorInCheck::Black);
    }

    #[test]
    fn evaluate_does_not_touch_the_board() {
        let board = Board::standard(Rules::default());
        let before = board.clone();
        let m = board.evaluate(&[], Position::new(4, 6), Position::new(4, 4));
        assert_eq!(m.map(|m| m.to_string()), Ok("e2e4".to_string()));
        assert_eq!(board, before);
    }

    #[test]
    fn evaluate_rejects_empty_squares() {
        let board = Board::standard(Rules::default());
        let p = Position::new(4, 4);
        assert_eq!(board.evaluate(&[], p, p.offset(0, -1)), Err(IllegalMove::NoPiece(p)));
    }

    #[test]
    fn evaluate_rejects_moves_into_check() {
        let board = board(&[
            (Role::King, Color::White, (4, 7)),
            (Role::Bishop, Color::White, (4, 6)),
            (Role::Rook, Color::Black, (4, 0)),
            (Role::King, Color::Black, (1, 0)),
        ])
        .unwrap();

        let pinned = Position::new(4, 6);
        assert_eq!(
            board.evaluate(&[], pinned, Position::new(5, 5)),
            Err(IllegalMove::SelfCheck)
        );
    }

    #[test]
    fn play_records_the_rejection_reason() {
        let mut board = Board::standard(Rules::default());
        let mut history = Vec::new();
        let whence = Position::new(4, 6);

        assert_eq!(
            board.play(&mut history, whence, Position::new(4, 3)),
            Err(IllegalMove::InvalidMove)
        );

        assert_eq!(board.move_error(), Some(IllegalMove::InvalidMove));
        assert!(history.is_empty());

        assert!(board.play(&mut history, whence, Position::new(4, 4)).is_ok());
        assert_eq!(board.move_error(), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn request_move_appends_committed_moves_to_history() {
        let mut board = Board::standard(Rules::default());
        let mut history = Vec::new();

        assert!(!board.request_move(&mut history, Position::new(6, 7), Position::new(6, 5)));
        assert_eq!(board.move_error(), Some(IllegalMove::InvalidMove));
        assert!(history.is_empty());

        assert!(board.request_move(&mut history, Position::new(6, 7), Position::new(5, 5)));
        assert_eq!(board.move_error(), None);
        assert_eq!(history.iter().map(Move::to_string).collect::<Vec<_>>(), ["g1f3"]);
        assert_eq!(board.piece_at(Position::new(5, 5)).map(|f| f.role), Some(Role::Knight));
    }

    #[test]
    fn rejection_reasons_are_descriptive() {
        assert_eq!(
            IllegalMove::SelfCheck.to_string(),
            "move results in or does not alleviate check"
        );

        assert_eq!(
            IllegalMove::NoPiece(Position::new(4, 4)).to_string(),
            "there is no piece at e4"
        );
    }
}
