//! Seeded deck shuffles and the random hole-variant deal.
//!
//! The same seed always yields the same deal, so a position can be named
//! by `(variant, seed)` alone and reproduced anywhere.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

use super::card::{Card, Suit};
use super::state::GameState;
use crate::rules::{RulesError, SolRules};

/// A full deck for `max_rank`, shuffled deterministically from `seed`.
pub fn shuffled_deck(seed: u64, max_rank: u8) -> Vec<Card> {
    let mut indices: Vec<u8> = (0..max_rank * 4).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    indices
        .into_iter()
        .map(|i| Card::new(i % max_rank + 1, Suit::from_index(i / max_rank)))
        .collect()
}

/// Deal a random position for a hole variant.
///
/// The ace of spades starts on the hole; the rest of the shuffled deck is
/// dealt three cards to a tableau pile, left to right. The configuration
/// must leave exactly three cards per pile once the ace is set aside.
pub fn deal_hole_game(rules: Arc<SolRules>, seed: u64) -> Result<GameState, RulesError> {
    if !rules.hole {
        return Err(RulesError::NotAHoleVariant);
    }
    let cards = rules.deck_size() - 1;
    let piles = rules.tableau_pile_count as usize;
    if cards != piles * 3 {
        return Err(RulesError::UnevenHoleDeal { cards, piles });
    }

    let mut gs = GameState::new(rules.clone());
    let hole = gs.hole().expect("hole variant lays out a hole pile");
    gs.place_card(hole, Card::new(1, Suit::Spades));

    let mut placed = 0usize;
    for card in shuffled_deck(seed, rules.max_rank) {
        if card == Card::new(1, Suit::Spades) {
            continue;
        }
        let dest = gs.tableau()[placed / 3];
        gs.place_card(dest, card);
        placed += 1;
    }
    Ok(gs)
}
