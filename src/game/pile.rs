//! Piles and pile references.
//!
//! A [`Pile`] is an ordered stack of cards mutated only at its top (the
//! most recently added card, stored last). Piles live in an arena owned by
//! the position; a [`PileRef`] is a stable arena index assigned once at
//! construction and never reused, so cloning a position is a deep,
//! reference-free copy and sibling search branches cannot alias.

use std::fmt;

use super::card::Card;

/// Stable opaque reference to one pile within a position's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PileRef(u8);

impl PileRef {
    /// Wrap an arena index. Only the position layout hands these out.
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index <= u8::MAX as usize, "pile arena index must fit a byte");
        Self(index as u8)
    }

    /// Arena index of this reference.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered stack of cards; top = last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    /// Create an empty pile.
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Create a pile from cards in bottom-to-top order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Number of cards in the pile.
    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pile holds no cards.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards in bottom-to-top order.
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The top card, if any.
    #[inline]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Add a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the top card, if any.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove the top `count` cards, preserving their relative order.
    ///
    /// # Panics
    /// Panics if the pile holds fewer than `count` cards; callers only
    /// pass counts taken from generated moves.
    pub fn take_top(&mut self, count: usize) -> Vec<Card> {
        assert!(
            count <= self.cards.len(),
            "cannot take {} cards from a pile of {}",
            count,
            self.cards.len()
        );
        self.cards.split_off(self.cards.len() - count)
    }

    /// Append cards on top, preserving their relative order.
    pub fn place(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }
}
