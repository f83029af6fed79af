use crate::chess::{Color, Position, Role};
use bitflags::bitflags;
use derive_more::{DebugCustom, Display};
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Characteristics of a [`Move`].
    #[derive(Default)]
    pub struct MoveKind: u8 {
        const ANY =         0b00000001;
        const CASTLE =      0b00000010;
        const PROMOTION =   0b00000100;
        const CAPTURE =     0b00001000;
        const EN_PASSANT =  0b00010000;
    }
}

/// The piece that moves alongside the main one, i.e. the rook when castling.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[display(fmt = "{role}{whence}{whither}")]
#[serde(deny_unknown_fields)]
pub struct Secondary {
    pub role: Role,
    pub whence: Position,
    pub whither: Position,
}

/// A committed chess move, as recorded in the history of a game.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[debug(fmt = "Move({self})")]
#[serde(deny_unknown_fields)]
pub struct Move {
    pub color: Color,
    pub role: Role,
    pub whence: Position,
    pub whither: Position,
    pub secondary: Option<Secondary>,
    pub capture: Option<(Role, Position)>,
    pub promotion: Option<Role>,
}

impl Move {
    /// A move without any side effects.
    pub fn new(color: Color, role: Role, whence: Position, whither: Position) -> Self {
        Move {
            color,
            role,
            whence,
            whither,
            secondary: None,
            capture: None,
            promotion: None,
        }
    }

    /// The [`MoveKind`] flags that describe this move.
    pub fn kind(&self) -> MoveKind {
        let mut kind = MoveKind::ANY;

        if self.secondary.is_some() {
            kind |= MoveKind::CASTLE;
        }

        if self.promotion.is_some() {
            kind |= MoveKind::PROMOTION;
        }

        if let Some((_, p)) = self.capture {
            kind |= MoveKind::CAPTURE;
            if p != self.whither {
                kind |= MoveKind::EN_PASSANT;
            }
        }

        kind
    }

    /// The vertical distance covered by the main piece.
    pub fn rows(&self) -> i8 {
        (self.whither.y() - self.whence.y()).abs()
    }
}

/// Pure coordinate notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.whence, self.whither)?;
        if let Some(r) = self.promotion {
            write!(f, "{r}")?;
        }

        Ok(())
    }
}
