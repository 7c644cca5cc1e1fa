//! # Patience Engine
//!
//! A rule-driven state-transition core for solitaire solvers. One declarative
//! rule configuration describes a whole solitaire variant; given a
//! configuration and a position, the engine enumerates exactly the legal
//! moves and produces successor positions.
//!
//! ## Features
//!
//! - **Declarative Variants**: Build/spaces policies, cells, stock, waste,
//!   reserve, foundations and hole slots combine freely into one rule set
//! - **Uniform Move Generation**: One table-driven pass produces the
//!   exhaustive, duplicate-free legal move set for any configuration
//! - **In-Place Application**: Generated moves apply infallibly; branching
//!   search drivers clone positions as they see fit
//! - **Reproducible Deals**: Seeded shuffles for the hole-adjacency variant,
//!   JSON deal ingestion for everything else
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use patience_engine::{GameState, GameVariant, SolRules};
//!
//! // 1. Pick a rule set (preset or JSON)
//! let rules = Arc::new(SolRules::preset(GameVariant::FreeCell));
//!
//! // 2. Ingest a deal document
//! let state = patience_engine::game::deal::parse(&rules, deal_json)?;
//!
//! // 3. Enumerate and apply legal moves
//! for mv in state.legal_moves() {
//!     let mut next = state.clone();
//!     next.apply(&mv);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`rules`]: Variant configuration schema and policy predicates
//! - [`game`]: Cards, piles, positions, move generation and deal ingestion
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  External search driver                    │
//! │   (state-graph bookkeeping, dedup, backtracking - not us)  │
//! └────────────────────────────────────────────────────────────┘
//!                │ legal_moves() / apply()
//!                ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  GameState: pile arena + named groups + cached solved flag │
//! │  Move generator: policy predicates over pile categories    │
//! └────────────────────────────────────────────────────────────┘
//!                │ reads
//!                ▼
//!          ┌───────────┐
//!          │  SolRules │  build/spaces policies, pile counts, toggles
//!          └───────────┘
//! ```

#![warn(missing_docs)]

/// Variant configuration module.
///
/// Defines the rule schema that fully determines legality semantics.
pub mod rules;

/// Game state module.
///
/// Cards, piles, moves, positions, the legal-move generator, deal
/// ingestion and display.
pub mod game;

// Re-export commonly used types at crate root for convenience
pub use game::{Card, Color, GameState, Move, Pile, PileRef, Suit};
pub use rules::{
    BuildPolicy, FaceUpPolicy, GameVariant, RulesError, SolRules, SpacesPolicy, StockDealType,
};
