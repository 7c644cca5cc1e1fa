//! Game positions.
//!
//! A [`GameState`] composes one shared, read-only rule configuration with
//! the complete set of piles for a position. Piles live in an indexed
//! arena; named groups (foundations, cells, stock, waste, tableau,
//! reserve, hole) are slices of arena references laid out once at
//! construction, in a fixed order:
//!
//! ```text
//! foundations | cells | stock | waste | tableau piles | reserve | hole
//! ```
//!
//! Mutation happens only through [`GameState::apply`]. Equality and
//! hashing cover pile contents alone, so a search driver can deduplicate
//! positions regardless of how they were reached.

use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::card::{Card, Suit, SUITS};
use super::moves::Move;
use super::pile::{Pile, PileRef};
use crate::rules::SolRules;

/// A single configurable solitaire position.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) rules: Arc<SolRules>,
    pub(crate) piles: Vec<Pile>,
    pub(crate) foundations: Vec<PileRef>,
    pub(crate) cells: Vec<PileRef>,
    pub(crate) stock: Option<PileRef>,
    pub(crate) waste: Option<PileRef>,
    pub(crate) tableau: Vec<PileRef>,
    pub(crate) reserve: Vec<PileRef>,
    pub(crate) hole: Option<PileRef>,
    // Derived flag, recomputed on demand and dropped on mutation.
    pub(crate) solved: Cell<Option<bool>>,
}

impl GameState {
    /// Create a position with empty piles laid out for `rules`.
    ///
    /// If the rules ask for pre-filled foundations, the rank-1 card of
    /// each suit is placed on its foundation.
    pub fn new(rules: Arc<SolRules>) -> Self {
        let mut piles = Vec::with_capacity(rules.total_pile_count());
        let mut alloc = |n: usize| -> Vec<PileRef> {
            (0..n)
                .map(|_| {
                    let r = PileRef::new(piles.len());
                    piles.push(Pile::new());
                    r
                })
                .collect()
        };

        let foundations = alloc(rules.foundation_count());
        let cells = alloc(rules.cells as usize);
        let stock = alloc(usize::from(rules.stock_size > 0)).pop();
        let waste = alloc(usize::from(rules.has_waste())).pop();
        let tableau = alloc(rules.tableau_pile_count as usize);
        let reserve = alloc(rules.reserve_pile_count());
        let hole = alloc(usize::from(rules.hole)).pop();

        let mut state = Self {
            rules,
            piles,
            foundations,
            cells,
            stock,
            waste,
            tableau,
            reserve,
            hole,
            solved: Cell::new(None),
        };

        if state.rules.foundations_init_card {
            state.fill_foundations();
        }
        state
    }

    /// Create a position from explicit pile contents in arena order.
    ///
    /// Intended for tests and tools that lay out a position by hand; the
    /// outer vector must match the layout length for `rules` exactly.
    ///
    /// # Panics
    /// Panics on a pile-count mismatch.
    pub fn from_piles(rules: Arc<SolRules>, piles: Vec<Vec<Card>>) -> Self {
        let mut state = Self::new(rules);
        assert_eq!(
            piles.len(),
            state.piles.len(),
            "expected {} piles for this rule configuration",
            state.piles.len()
        );
        for (slot, cards) in state.piles.iter_mut().zip(piles) {
            *slot = Pile::from_cards(cards);
        }
        state.solved.set(None);
        state
    }

    /// The rule configuration in force.
    #[inline]
    pub fn rules(&self) -> &SolRules {
        &self.rules
    }

    /// The pile behind a reference.
    #[inline]
    pub fn pile(&self, r: PileRef) -> &Pile {
        &self.piles[r.index()]
    }

    /// Foundation pile references, indexed by suit (suit + 4 for the
    /// second deck under `two_decks`). Empty when foundations are off.
    #[inline]
    pub fn foundations(&self) -> &[PileRef] {
        &self.foundations
    }

    /// Cell pile references.
    #[inline]
    pub fn cells(&self) -> &[PileRef] {
        &self.cells
    }

    /// The stock pile, if the rules lay one out.
    #[inline]
    pub fn stock(&self) -> Option<PileRef> {
        self.stock
    }

    /// The waste pile, if the rules lay one out.
    #[inline]
    pub fn waste(&self) -> Option<PileRef> {
        self.waste
    }

    /// Tableau pile references in deal order.
    #[inline]
    pub fn tableau(&self) -> &[PileRef] {
        &self.tableau
    }

    /// Reserve pile references (one pile when stacked).
    #[inline]
    pub fn reserve(&self) -> &[PileRef] {
        &self.reserve
    }

    /// The hole pile, if the rules lay one out.
    #[inline]
    pub fn hole(&self) -> Option<PileRef> {
        self.hole
    }

    /// The card currently showing in the hole, if any.
    ///
    /// The hole accumulates every card played into it; only the latest
    /// one governs adjacency.
    pub fn hole_card(&self) -> Option<Card> {
        self.hole.and_then(|h| self.pile(h).top())
    }

    /// Place one card on top of a pile. Used during deal construction.
    pub(crate) fn place_card(&mut self, r: PileRef, card: Card) {
        self.piles[r.index()].push(card);
        self.solved.set(None);
    }

    /// Pre-fill each foundation with the rank-1 card of its suit.
    fn fill_foundations(&mut self) {
        for (i, &f) in self.foundations.iter().enumerate() {
            let suit = SUITS[i % 4];
            self.piles[f.index()].push(Card::new(1, suit));
        }
        self.solved.set(None);
    }

    /// The foundation piles a card of `suit` may land on: `[suit]`, plus
    /// `[suit + 4]` for the second deck under `two_decks`.
    pub(crate) fn foundations_for_suit(&self, suit: Suit) -> impl Iterator<Item = PileRef> + '_ {
        let first = self.foundations.get(suit.index()).copied();
        let second = if self.rules.two_decks {
            self.foundations.get(suit.index() + 4).copied()
        } else {
            None
        };
        first.into_iter().chain(second)
    }

    /// Apply a move produced by [`legal_moves`](GameState::legal_moves),
    /// mutating this position in place.
    ///
    /// # Panics
    /// Panics on moves that the generator cannot have produced (empty
    /// source, short stock, self-transfer); such a call is a programming
    /// defect, not a recoverable condition.
    pub fn apply(&mut self, mv: &Move) {
        match *mv {
            Move::Transfer { from, to, count } => {
                assert!(count >= 1, "transfer of zero cards");
                assert_ne!(from, to, "transfer onto the same pile");
                let cards = self.piles[from.index()].take_top(count as usize);
                self.piles[to.index()].place(cards);
            }
            Move::BatchDeal { count } => {
                let stock = self.stock.expect("batch deal without a stock pile");
                assert!(
                    count as usize <= self.tableau.len(),
                    "batch deal wider than the tableau"
                );
                for i in 0..count as usize {
                    let card = self.piles[stock.index()]
                        .pop()
                        .expect("batch deal from a short stock");
                    let dest = self.tableau[i];
                    self.piles[dest.index()].push(card.faced(true));
                }
            }
        }
        self.solved.set(None);
    }

    /// Whether this position is solved: every pile other than the
    /// foundations and the hole is empty.
    ///
    /// The answer is cached until the next mutation; move generation
    /// refreshes it as a byproduct of its pile scan.
    pub fn is_solved(&self) -> bool {
        if let Some(s) = self.solved.get() {
            return s;
        }
        let s = self.compute_solved();
        self.solved.set(Some(s));
        s
    }

    pub(crate) fn compute_solved(&self) -> bool {
        let in_play = self
            .cells
            .iter()
            .chain(self.stock.iter())
            .chain(self.waste.iter())
            .chain(self.tableau.iter())
            .chain(self.reserve.iter());
        in_play.fold(true, |acc, &r| acc && self.pile(r).is_empty())
    }

    /// Total number of cards across every pile, the hole included.
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }
}

// Two positions with identical pile contents are interchangeable for
// search purposes; the rules reference and the solved cache stay out of
// identity.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.piles == other.piles
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piles.hash(state);
    }
}
