use crate::chess::{Bitboard, Color, Figure, InvalidState, Position, Role};
use derive_more::{Deref, Display, Error, From, IntoIterator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The arrangement of pieces a game starts from.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Deref, IntoIterator, Deserialize, Serialize)]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
#[serde(transparent)]
pub struct Layout(#[into_iterator(owned, ref)] Vec<Figure>);

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

impl Layout {
    /// The roles on the home rows, from `x = 0` to `x = 7`.
    const HOME_ROW: [Role; 8] = [
        Role::Rook,
        Role::Knight,
        Role::Bishop,
        Role::Queen,
        Role::King,
        Role::Bishop,
        Role::Knight,
        Role::Rook,
    ];

    /// Constructs [`Layout`] from an arbitrary list of [`Figure`]s.
    pub fn new(figures: Vec<Figure>) -> Self {
        Layout(figures)
    }

    /// The standard starting arrangement.
    ///
    /// White occupies rows 7 and 6, black rows 0 and 1.
    pub fn standard() -> Self {
        let mut figures = Vec::with_capacity(32);

        for c in Color::iter() {
            for (x, &r) in (0..).zip(Self::HOME_ROW.iter()) {
                figures.push(Figure::new(r, c, Position::new(x, c.home_row())));
            }

            for x in 0..Position::SIZE {
                figures.push(Figure::new(Role::Pawn, c, Position::new(x, c.pawn_row())));
            }
        }

        Layout(figures)
    }

    /// Checks that pieces are on the board, never overlap, and each side has exactly one king.
    pub fn validate(&self) -> Result<(), InvalidState> {
        let mut occupied = Bitboard::empty();
        let mut kings = [0usize; 2];

        for f in &self.0 {
            if !f.position.is_on_board() {
                return Err(InvalidState::OffBoard(f.position));
            } else if occupied.contains(f.position) {
                return Err(InvalidState::Overlap(f.position));
            }

            occupied.insert(f.position);
            if f.role == Role::King {
                kings[f.color as usize] += 1;
            }
        }

        for c in Color::iter() {
            match kings[c as usize] {
                0 => return Err(InvalidState::MissingKing(c)),
                1 => {}
                _ => return Err(InvalidState::TooManyKings(c)),
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Layout`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse layout")]
pub struct ParseLayoutError(ron::de::SpannedError);

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
