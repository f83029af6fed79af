use crate::chess::*;
use proptest::{prelude::*, sample::Selector};
use tracing::instrument;

/// A game of chess.
///
/// Holds the [`Board`] along with every [`Move`] committed so far.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    /// A new game from the standard starting position with some [`Rules`].
    pub fn with_rules(rules: Rules) -> Self {
        Self::from_parts(Board::standard(rules), Vec::new())
    }

    /// A new game from an arbitrary [`Layout`].
    pub fn from_layout(layout: &Layout, rules: Rules) -> Result<Self, InvalidState> {
        Ok(Self::from_parts(Board::new(layout, rules)?, Vec::new()))
    }

    pub(crate) fn from_parts(board: Board, history: Vec<Move>) -> Self {
        Game { board, history }
    }

    /// The current [`Board`].
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The moves committed so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The last [`Move`] committed, if any.
    pub fn previous_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// The [`Rules`] in effect.
    pub fn rules(&self) -> Rules {
        self.board.rules()
    }

    /// The side to move.
    ///
    /// White moves first, then the side that did not make the last move.
    pub fn turn(&self) -> Color {
        Self::turn_after(&self.history)
    }

    pub(crate) fn turn_after(history: &[Move]) -> Color {
        history.last().map_or(Color::White, |m| !m.color)
    }

    /// A read-only [`GameInfo`] view of this game.
    pub fn view(&self) -> GameView<'_> {
        GameView::new(&self.board, &self.history)
    }

    /// Requests the piece at `whence` be moved to `whither`.
    ///
    /// Returns whether the move was committed, the reason for a rejection is kept by the
    /// [`Board`] in [`Board::move_error`].
    pub fn request_move(&mut self, whence: Position, whither: Position) -> bool {
        self.board.request_move(&mut self.history, whence, whither)
    }

    /// Plays a move if it is legal.
    pub fn play(&mut self, whence: Position, whither: Position) -> Result<Move, IllegalMove> {
        self.board.play(&mut self.history, whence, whither)
    }

    /// Moves a piece regardless of whether the move is legal.
    ///
    /// The game is left unchanged if the resulting position is invalid.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn force_move(&mut self, whence: Position, whither: Position) -> Result<Move, InvalidState> {
        let mut board = self.board.clone();
        let mut history = self.history.clone();
        let m = board.force_move(&mut history, whence, whither)?;
        self.board = board;
        self.history = history;
        Ok(m)
    }

    /// The legal moves of the side to move that match [`MoveKind`].
    pub fn moves(&self, kind: MoveKind) -> Vec<Move> {
        let turn = self.turn();
        let view = self.view();

        let mut moves = Vec::new();
        for piece in self.board.iter().filter(|p| p.color() == turn) {
            for whither in piece.valid_moves(&view) {
                match self.board.evaluate(&self.history, piece.position(), whither) {
                    Ok(m) if kind.intersects(m.kind()) => moves.push(m),
                    _ => {}
                }
            }
        }

        moves
    }

    /// The [`Outcome`] of the game, if it's over.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.moves(MoveKind::ANY).is_empty() {
            None
        } else if self.board.color_in_check().is(self.turn()) {
            Some(Outcome::Checkmate(!self.turn()))
        } else {
            Some(Outcome::Stalemate)
        }
    }
}

/// Random games reached by playing legal moves from the standard starting position.
impl Arbitrary for Game {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..64usize, any::<Selector>())
            .prop_map(|(plies, selector)| {
                let mut game = Game::new();
                for _ in 0..plies {
                    match selector.try_select(game.moves(MoveKind::ANY)) {
                        Some(m) => {
                            game.play(m.whence, m.whither).ok();
                        }

                        None => break,
                    }
                }

                game
            })
            .no_shrink()
            .boxed()
    }
}
