//! Rule-driven legal-move generation.
//!
//! One pass over the pile groups produces the exhaustive, duplicate-free
//! set of legal moves for the current position under the active rule
//! configuration. Legality is decided entirely here; [`super::state::GameState::apply`]
//! trusts every move this module returns. Callers must treat the result
//! as a set: no ordering is promised.
//!
//! Every single-card source (a tableau top, a filled cell, a reserve
//! card, the waste top) is routed through the same destination rules, so
//! a new policy value lands in exactly one predicate. Group moves,
//! foundation removal and stock dealing are the only category-specific
//! passes.

use super::card::Card;
use super::moves::Move;
use super::pile::PileRef;
use super::state::GameState;
use crate::rules::StockDealType;

impl GameState {
    /// Enumerate every legal move in this position.
    ///
    /// The scan also refreshes the cached solved flag, since solvedness
    /// falls out of the same pile inspection.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();

        // Single-card sources share one destination routine.
        for src in self.single_card_sources() {
            if let Some(card) = self.pile(src).top() {
                self.single_card_moves(&mut moves, src, card);
            }
        }

        if self.rules.move_built_group {
            self.built_group_moves(&mut moves);
        }

        if self.rules.foundations_removable {
            self.foundation_removal_moves(&mut moves);
        }

        self.stock_moves(&mut moves);

        self.solved.set(Some(self.compute_solved()));
        moves
    }

    /// Piles whose top card moves one at a time: tableau piles, cells,
    /// reserve piles (a stacked reserve is laid out as a single pile, so
    /// only its top is ever reachable) and the waste.
    fn single_card_sources(&self) -> impl Iterator<Item = PileRef> + '_ {
        self.tableau
            .iter()
            .chain(self.cells.iter())
            .chain(self.reserve.iter())
            .copied()
            .chain(self.waste.iter().copied())
    }

    /// All destinations for one card sitting on top of `src`.
    fn single_card_moves(&self, moves: &mut Vec<Move>, src: PileRef, card: Card) {
        // Foundations, indexed by suit.
        for f in self.foundations_for_suit(card.suit()) {
            if self.foundation_accepts(f, card) {
                moves.push(Move::transfer(src, f));
            }
        }

        // The hole, by rank adjacency to its current card.
        if let (Some(h), Some(hole_card)) = (self.hole(), self.hole_card()) {
            if self.rank_adjacent(card.rank(), hole_card.rank()) {
                moves.push(Move::transfer(src, h));
            }
        }

        // Tableau piles: spaces policy for empty piles, build policy
        // against the top card otherwise.
        for &t in &self.tableau {
            if t == src {
                continue;
            }
            if self.tableau_accepts(t, card) {
                moves.push(Move::transfer(src, t));
            }
        }

        // Cells are interchangeable; one move to the first empty slot
        // stands for all of them.
        if let Some(cell) = self.first_empty_cell() {
            moves.push(Move::transfer(src, cell));
        }
    }

    /// Group moves: every internally build-compliant run ending at a
    /// tableau top is a candidate, sized by its length; the run's bottom
    /// card decides destination legality. Single-card moves are already
    /// covered by the single-card pass.
    fn built_group_moves(&self, moves: &mut Vec<Move>) {
        for &src in &self.tableau {
            let cards = self.pile(src).cards();
            let run = self.built_run_len(cards);

            for count in 2..=run {
                let bottom = cards[cards.len() - count];
                for &t in &self.tableau {
                    if t == src {
                        continue;
                    }
                    if self.tableau_accepts(t, bottom) {
                        moves.push(Move::transfer_group(src, t, count as u8));
                    }
                }
            }
        }
    }

    /// Length of the longest run ending at the pile top whose adjacent
    /// pairs all satisfy the build relation (strictly descending by one
    /// rank toward the top).
    fn built_run_len(&self, cards: &[Card]) -> usize {
        if cards.is_empty() {
            return 0;
        }
        let mut run = 1;
        while run < cards.len() {
            let upper = cards[cards.len() - run];
            let lower = cards[cards.len() - run - 1];
            if self.rules.build_policy.permits(upper, lower) {
                run += 1;
            } else {
                break;
            }
        }
        run
    }

    /// Foundation tops back onto the tableau, when the rules allow it and
    /// the removal is not provably useless.
    fn foundation_removal_moves(&self, moves: &mut Vec<Move>) {
        for &f in &self.foundations {
            let Some(card) = self.pile(f).top() else {
                continue;
            };
            if !self.foundation_removal_useful(card) {
                continue;
            }
            for &t in &self.tableau {
                if self.tableau_accepts(t, card) {
                    moves.push(Move::transfer(f, t));
                }
            }
        }
    }

    /// Dominance bound on foundation removal: pulling a rank-`r` card
    /// back can only help while some rank-`r − 1` card is still outside
    /// the foundations, so removal is blocked once every foundation
    /// holds rank `r − 1` or higher. Conservative: never blocks a
    /// removal that could make progress.
    fn foundation_removal_useful(&self, card: Card) -> bool {
        let needed = card.rank() - 1;
        !self
            .foundations
            .iter()
            .all(|&f| self.pile(f).top().map_or(0, |c| c.rank()) >= needed)
    }

    /// Stock moves: one card to the waste, or one batch deal covering as
    /// many tableau piles as the stock can feed.
    fn stock_moves(&self, moves: &mut Vec<Move>) {
        let Some(stock) = self.stock() else {
            return;
        };
        if self.pile(stock).is_empty() {
            return;
        }
        match self.rules.stock_deal_type {
            StockDealType::Waste => {
                if let Some(waste) = self.waste() {
                    moves.push(Move::transfer(stock, waste));
                }
            }
            StockDealType::TableauPiles => {
                let count = self.pile(stock).len().min(self.tableau.len());
                if count > 0 {
                    moves.push(Move::BatchDeal { count: count as u8 });
                }
            }
        }
    }

    fn tableau_accepts(&self, t: PileRef, card: Card) -> bool {
        match self.pile(t).top() {
            None => self.rules.spaces_policy.permits(card, self.rules.max_rank),
            Some(top) => self.rules.build_policy.permits(card, top),
        }
    }

    fn foundation_accepts(&self, f: PileRef, card: Card) -> bool {
        match self.pile(f).top() {
            None => card.rank() == 1,
            Some(top) => top.rank() + 1 == card.rank(),
        }
    }

    fn first_empty_cell(&self) -> Option<PileRef> {
        self.cells.iter().copied().find(|&c| self.pile(c).is_empty())
    }

    /// Rank adjacency modulo `max_rank`, with wraparound between rank 1
    /// and the highest rank.
    fn rank_adjacent(&self, a: u8, b: u8) -> bool {
        let max = self.rules.max_rank;
        a == b + 1 || a + 1 == b || (a == 1 && b == max) || (a == max && b == 1)
    }
}
