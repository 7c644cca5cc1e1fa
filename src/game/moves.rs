//! Move values.
//!
//! A [`Move`] is a pure value describing a transfer between two piles, or
//! the batch deal that puts one stock card on every tableau pile at once.
//! The batch case is its own variant rather than a sentinel destination,
//! so no out-of-band pile reference exists anywhere in the engine.
//! Equality is structural; generators return sets with no two equal moves.

use std::fmt;

use super::pile::PileRef;

/// A transfer of one or more cards, or a batch stock deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    /// Move the top `count` cards of `from` onto `to`, order preserved.
    Transfer {
        /// Source pile.
        from: PileRef,
        /// Destination pile.
        to: PileRef,
        /// Number of cards moved (≥ 1; > 1 only for built groups).
        count: u8,
    },
    /// Deal one stock card onto each of the first `count` tableau piles.
    BatchDeal {
        /// Number of tableau piles that receive a card.
        count: u8,
    },
}

impl Move {
    /// Single-card transfer.
    #[inline]
    pub fn transfer(from: PileRef, to: PileRef) -> Self {
        Move::Transfer { from, to, count: 1 }
    }

    /// Group transfer of `count` cards.
    #[inline]
    pub fn transfer_group(from: PileRef, to: PileRef, count: u8) -> Self {
        debug_assert!(count >= 1);
        Move::Transfer { from, to, count }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Transfer { from, to, count } => {
                write!(f, "move({}, {}, {})", from, to, count)
            }
            Move::BatchDeal { count } => write!(f, "deal({})", count),
        }
    }
}
