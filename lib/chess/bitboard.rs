use crate::chess::Position;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Constructor, Deref, Not};
use std::fmt::{self, Write};
use std::iter::FromIterator;

/// A set of [`Position`]s on the chess board.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Constructor,
    Deref,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for p in Position::iter() {
            f.write_char(if self.contains(p) { '■' } else { '◻' })?;
            f.write_char(if p.x() < Position::SIZE - 1 { ' ' } else { '\n' })?;
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty set.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// The set of all positions on the board.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard(0xFFFFFFFFFFFFFFFF)
    }

    /// The number of [`Position`]s in the set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the set is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this [`Position`] is in the set.
    ///
    /// Positions off the board are never in the set.
    #[inline(always)]
    pub fn contains(&self, p: Position) -> bool {
        p.is_on_board() && self.0 & (1 << p.index()) != 0
    }

    /// Adds a [`Position`] to this set.
    #[inline(always)]
    pub fn with(&self, p: Position) -> Self {
        Bitboard(self.0 | 1 << p.index())
    }

    /// Removes a [`Position`] from this set.
    #[inline(always)]
    pub fn without(&self, p: Position) -> Self {
        Bitboard(self.0 & !(1 << p.index()))
    }

    /// Inserts a [`Position`] in place.
    #[inline(always)]
    pub fn insert(&mut self, p: Position) {
        *self = self.with(p);
    }

    /// An iterator over the [`Position`]s in this set, in order of [`Position::index`].
    #[inline(always)]
    pub fn iter(&self) -> Positions {
        Positions(*self)
    }
}

impl From<Position> for Bitboard {
    #[inline(always)]
    fn from(p: Position) -> Self {
        Bitboard::empty().with(p)
    }
}

impl FromIterator<Position> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::empty(), |bb, p| bb.with(p))
    }
}

impl IntoIterator for Bitboard {
    type Item = Position;
    type IntoIter = Positions;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the [`Position`]s in a [`Bitboard`].
#[derive(Debug)]
pub struct Positions(Bitboard);

impl Iterator for Positions {
    type Item = Position;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            let p = Position::from_index(self.0.trailing_zeros() as _);
            self.0 = self.0.without(p);
            Some(p)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for Positions {
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }
}
