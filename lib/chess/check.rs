use crate::chess::Color;
use derive_more::Display;
use test_strategy::Arbitrary;

/// Which side, if any, is in check.
///
/// Both sides can never be in check at the same time.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum ColorInCheck {
    #[default]
    #[display(fmt = "none")]
    None,
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl ColorInCheck {
    /// The [`Color`] in check, if any.
    pub fn color(&self) -> Option<Color> {
        match self {
            ColorInCheck::None => None,
            ColorInCheck::White => Some(Color::White),
            ColorInCheck::Black => Some(Color::Black),
        }
    }

    /// Whether the given [`Color`] is in check.
    pub fn is(&self, c: Color) -> bool {
        self.color() == Some(c)
    }
}

impl From<Option<Color>> for ColorInCheck {
    fn from(c: Option<Color>) -> Self {
        match c {
            None => ColorInCheck::None,
            Some(Color::White) => ColorInCheck::White,
            Some(Color::Black) => ColorInCheck::Black,
        }
    }
}

impl From<Color> for ColorInCheck {
    fn from(c: Color) -> Self {
        Some(c).into()
    }
}
