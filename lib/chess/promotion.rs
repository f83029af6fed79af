use crate::chess::Role;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use test_strategy::Arbitrary;

/// The [`Role`] a pawn is promoted to once it reaches the opponent's home row.
#[derive(
    Debug,
    Display,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[default]
    #[display(fmt = "q")]
    Queen,
}

impl From<Promotion> for Role {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Knight => Role::Knight,
            Promotion::Bishop => Role::Bishop,
            Promotion::Rook => Role::Rook,
            Promotion::Queen => Role::Queen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn pawns_are_promoted_to_queens_by_default() {
        assert_eq!(Role::from(Promotion::default()), Role::Queen);
    }

    #[proptest]
    fn promotion_never_yields_pawn_or_king(p: Promotion) {
        assert!(!matches!(Role::from(p), Role::Pawn | Role::King));
    }

    #[proptest]
    fn promotion_displays_as_its_role(p: Promotion) {
        assert_eq!(p.to_string(), Role::from(p).to_string());
    }
}
