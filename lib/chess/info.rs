use crate::chess::{Board, Color, Figure, Game, InvalidState, Move, Position, Role};

/// The read-only view of a game that pieces consult to validate their moves.
#[cfg_attr(test, mockall::automock)]
pub trait GameInfo {
    /// Whether any piece of [`Color`] threatens this [`Position`].
    fn threatened_by(&self, p: Position, c: Color) -> bool;

    /// The last [`Move`] committed, if any.
    fn previous_move(&self) -> Option<Move>;

    /// Whether an unmoved rook of [`Color`] stands at this [`Position`].
    fn validate_rook_for_castle(&self, p: Position, c: Color) -> bool;

    /// Whether a piece of [`Color`] may end its move at this [`Position`].
    ///
    /// That is the case if the square is empty or held by the opponent.
    fn is_capturable(&self, c: Color, p: Position) -> bool;

    /// Whether some piece stands strictly between two positions on a line or diagonal.
    fn is_intervening_piece(&self, whence: Position, whither: Position) -> bool;

    /// The [`Figure`] at this [`Position`], if any.
    fn piece_at(&self, p: Position) -> Option<Figure>;

    /// A copy of the game with the piece at `whence` forcibly moved to `whither`.
    fn force_move(&self, whence: Position, whither: Position) -> Result<Game, InvalidState>;
}

/// [`GameInfo`] over a [`Board`] and its history.
#[derive(Debug, Copy, Clone)]
pub struct GameView<'a> {
    board: &'a Board,
    history: &'a [Move],
}

impl<'a> GameView<'a> {
    /// Constructs [`GameView`].
    pub fn new(board: &'a Board, history: &'a [Move]) -> Self {
        GameView { board, history }
    }
}

impl GameInfo for GameView<'_> {
    fn threatened_by(&self, p: Position, c: Color) -> bool {
        self.board.threatened_by(p, c)
    }

    fn previous_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    fn validate_rook_for_castle(&self, p: Position, c: Color) -> bool {
        self.board
            .piece(p)
            .map_or(false, |r| r.role() == Role::Rook && r.color() == c && !r.has_moved())
    }

    fn is_capturable(&self, c: Color, p: Position) -> bool {
        self.board.piece_at(p).map_or(true, |f| f.color != c)
    }

    fn is_intervening_piece(&self, whence: Position, whither: Position) -> bool {
        self.board.is_intervening_piece(whence, whither)
    }

    fn piece_at(&self, p: Position) -> Option<Figure> {
        self.board.piece_at(p)
    }

    fn force_move(&self, whence: Position, whither: Position) -> Result<Game, InvalidState> {
        let mut board = self.board.clone();
        let mut history = self.history.to_vec();
        board.force_move(&mut history, whence, whither)?;
        Ok(Game::from_parts(board, history))
    }
}
