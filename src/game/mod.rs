//! Game state: cards, piles, positions and the legal-move generator.
//!
//! A [`GameState`] owns every pile of one position as an indexed arena and
//! shares one read-only rule configuration. The lifecycle is:
//!
//! 1. Construct a position from a JSON deal document ([`deal::parse`]) or a
//!    seeded shuffle ([`deck::deal_hole_game`])
//! 2. Enumerate legal moves ([`GameState::legal_moves`])
//! 3. Apply a move ([`GameState::apply`]), yielding the successor in place
//!
//! Move generation decides legality completely; application is infallible
//! for generated moves and panics on anything else, since an illegal move
//! reaching `apply` is a programming defect rather than a runtime
//! condition. The external search driver owns branching, deduplication and
//! backtracking; two states with identical pile contents compare equal and
//! hash identically to support that.

pub mod card;
pub mod deal;
pub mod deck;
pub mod movegen;
pub mod moves;
pub mod pile;
pub mod printer;
pub mod state;

pub use card::{Card, Color, Suit};
pub use deal::DealError;
pub use moves::Move;
pub use pile::{Pile, PileRef};
pub use state::GameState;
