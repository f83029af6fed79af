use crate::chess::Promotion;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// Configuration for a [`Game`][`crate::chess::Game`].
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash, Arbitrary, Deserialize, Serialize)]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
#[serde(deny_unknown_fields, rename = "rules", default)]
pub struct Rules {
    /// Whether white moves first and the colors take turns.
    ///
    /// When unset, either color may move at any time.
    pub alternate_turns: bool,

    /// What pawns become once they reach the opponent's home row.
    pub promotion: Promotion,
}

/// The reason why parsing [`Rules`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse rules")]
pub struct ParseRulesError(ron::de::SpannedError);

impl FromStr for Rules {
    type Err = ParseRulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
