//! Solitaire variant configuration loaded from JSON.
//!
//! A [`SolRules`] value fully determines legality semantics for one variant:
//! which suit relation tableau builds must satisfy, what may occupy an
//! emptied pile, which auxiliary pile groups exist, and so on. The four
//! independent rule axes (build, spaces, group-move, dealing) are closed
//! tagged enums consumed by small pure predicate functions, so adding a
//! policy value never touches unrelated code paths.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::game::Card;

/// Which suit relation two stacked tableau cards must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildPolicy {
    /// Descending rank, any suits.
    AnySuit,
    /// Descending rank, alternating colors.
    RedBlack,
    /// Descending rank, identical suit.
    SameSuit,
    /// No tableau-to-tableau stacking at all.
    NoBuild,
}

impl BuildPolicy {
    /// Check whether `moving` may be stacked onto `onto` on a tableau pile.
    ///
    /// Common to every policy: the moving card's rank must be exactly one
    /// less than the destination top's rank.
    pub fn permits(self, moving: Card, onto: Card) -> bool {
        if moving.rank() + 1 != onto.rank() {
            return false;
        }
        match self {
            BuildPolicy::AnySuit => true,
            BuildPolicy::RedBlack => moving.suit().color() != onto.suit().color(),
            BuildPolicy::SameSuit => moving.suit() == onto.suit(),
            BuildPolicy::NoBuild => false,
        }
    }
}

/// What may occupy an emptied tableau pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpacesPolicy {
    /// Any card.
    Any,
    /// Only a card of the highest rank in play.
    Kings,
    /// Nothing: spaces stay empty.
    NoBuild,
}

impl SpacesPolicy {
    /// Check whether `moving` may be placed into an empty tableau pile.
    pub fn permits(self, moving: Card, max_rank: u8) -> bool {
        match self {
            SpacesPolicy::Any => true,
            SpacesPolicy::Kings => moving.rank() == max_rank,
            SpacesPolicy::NoBuild => false,
        }
    }
}

/// Where the stock deals its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockDealType {
    /// One card at a time onto the waste pile.
    Waste,
    /// One card onto every tableau pile at once.
    TableauPiles,
}

/// Which dealt cards start face-up. Affects display only, never legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaceUpPolicy {
    /// Every card is dealt face-up.
    All,
    /// Only the cards on top of each pile are face-up.
    TopCards,
}

/// Well-known variants with built-in rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameVariant {
    /// Klondike: red-black builds, kings in spaces, stock dealt to waste.
    Klondike,
    /// FreeCell: red-black builds, four cells, everything face-up.
    FreeCell,
    /// Spanish Patience: any-suit builds over thirteen piles.
    SpanishPatience,
    /// Black Hole: 17 piles of 3, moves go to the hole by rank adjacency.
    BlackHole,
    /// Black Hole on a 28-card deck (`max_rank` 7), 9 piles of 3.
    SimpleBlackHole,
}

/// Immutable description of one solitaire variant.
///
/// Construct via [`SolRules::preset`], [`SolRules::from_json_str`] or a
/// struct literal over [`Default`], then run [`SolRules::validate`] before
/// building positions from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolRules {
    /// Suit relation required to stack one tableau card onto another.
    pub build_policy: BuildPolicy,
    /// Rule governing what may be placed into an emptied tableau pile.
    pub spaces_policy: SpacesPolicy,
    /// Whether a build-compliant run may move as one unit.
    pub move_built_group: bool,
    /// Number of tableau piles.
    pub tableau_pile_count: u8,
    /// Number of single-card holding cells.
    pub cells: u8,
    /// Number of reserve slots.
    pub reserve_size: u8,
    /// Whether the reserve is one LIFO pile rather than independent slots.
    pub reserve_stacked: bool,
    /// Number of cards in the stock at the start of play.
    pub stock_size: u8,
    /// Where the stock deals its cards.
    pub stock_deal_type: StockDealType,
    /// Whether foundations exist.
    pub foundations: bool,
    /// Whether cards may be moved back off a foundation.
    pub foundations_removable: bool,
    /// Whether foundations start pre-filled with the rank-1 card per suit.
    pub foundations_init_card: bool,
    /// Whether a hole slot exists (hole-adjacency variants).
    pub hole: bool,
    /// Whether two decks are in play, doubling suit/foundation counts.
    pub two_decks: bool,
    /// Which dealt cards start face-up (display only).
    pub face_up_policy: FaceUpPolicy,
    /// Highest rank in play (13 standard).
    pub max_rank: u8,
}

impl Default for SolRules {
    fn default() -> Self {
        Self {
            build_policy: BuildPolicy::AnySuit,
            spaces_policy: SpacesPolicy::Any,
            move_built_group: false,
            tableau_pile_count: 0,
            cells: 0,
            reserve_size: 0,
            reserve_stacked: false,
            stock_size: 0,
            stock_deal_type: StockDealType::Waste,
            foundations: false,
            foundations_removable: false,
            foundations_init_card: false,
            hole: false,
            two_decks: false,
            face_up_policy: FaceUpPolicy::All,
            max_rank: 13,
        }
    }
}

impl SolRules {
    /// Built-in rule set for a well-known variant.
    pub fn preset(variant: GameVariant) -> Self {
        match variant {
            GameVariant::Klondike => Self {
                build_policy: BuildPolicy::RedBlack,
                spaces_policy: SpacesPolicy::Kings,
                move_built_group: true,
                tableau_pile_count: 7,
                stock_size: 24,
                stock_deal_type: StockDealType::Waste,
                foundations: true,
                face_up_policy: FaceUpPolicy::TopCards,
                ..Self::default()
            },
            GameVariant::FreeCell => Self {
                build_policy: BuildPolicy::RedBlack,
                spaces_policy: SpacesPolicy::Any,
                tableau_pile_count: 8,
                cells: 4,
                foundations: true,
                ..Self::default()
            },
            GameVariant::SpanishPatience => Self {
                build_policy: BuildPolicy::AnySuit,
                spaces_policy: SpacesPolicy::Any,
                tableau_pile_count: 13,
                foundations: true,
                ..Self::default()
            },
            GameVariant::BlackHole => Self {
                build_policy: BuildPolicy::NoBuild,
                spaces_policy: SpacesPolicy::NoBuild,
                tableau_pile_count: 17,
                hole: true,
                ..Self::default()
            },
            GameVariant::SimpleBlackHole => Self {
                build_policy: BuildPolicy::NoBuild,
                spaces_policy: SpacesPolicy::NoBuild,
                tableau_pile_count: 9,
                hole: true,
                max_rank: 7,
                ..Self::default()
            },
        }
    }

    /// Load a rule configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RulesError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a rule configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: Self =
            serde_json::from_str(json).map_err(|e| RulesError::ParseError(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Validate internal consistency. Fatal at construction (never at play).
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.tableau_pile_count == 0 {
            return Err(RulesError::NoTableauPiles);
        }
        if self.max_rank == 0 || self.max_rank > 13 {
            return Err(RulesError::InvalidMaxRank(self.max_rank));
        }
        if self.foundations_removable && !self.foundations {
            return Err(RulesError::FoundationFlagWithoutFoundations("foundations_removable"));
        }
        if self.foundations_init_card && !self.foundations {
            return Err(RulesError::FoundationFlagWithoutFoundations("foundations_init_card"));
        }
        if self.hole && self.two_decks {
            return Err(RulesError::HoleWithTwoDecks);
        }
        let total = self.total_pile_count();
        if total > u8::MAX as usize {
            return Err(RulesError::TooManyPiles(total));
        }
        Ok(())
    }

    /// Number of foundation piles this configuration lays out.
    pub fn foundation_count(&self) -> usize {
        if self.foundations {
            if self.two_decks {
                8
            } else {
                4
            }
        } else {
            0
        }
    }

    /// Number of reserve piles this configuration lays out.
    pub fn reserve_pile_count(&self) -> usize {
        if self.reserve_size == 0 {
            0
        } else if self.reserve_stacked {
            1
        } else {
            self.reserve_size as usize
        }
    }

    /// Whether a waste pile exists alongside the stock.
    pub fn has_waste(&self) -> bool {
        self.stock_size > 0 && self.stock_deal_type == StockDealType::Waste
    }

    /// Number of cards in the full deck for this configuration.
    pub fn deck_size(&self) -> usize {
        self.max_rank as usize * 4 * if self.two_decks { 2 } else { 1 }
    }

    /// Total number of piles a position for these rules owns.
    pub fn total_pile_count(&self) -> usize {
        self.foundation_count()
            + self.cells as usize
            + usize::from(self.stock_size > 0)
            + usize::from(self.has_waste())
            + self.tableau_pile_count as usize
            + self.reserve_pile_count()
            + usize::from(self.hole)
    }
}

/// Errors raised by an internally inconsistent rule configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Could not read the configuration file.
    IoError(String),
    /// The configuration document was not valid JSON for the schema.
    ParseError(String),
    /// A variant with zero tableau piles is unplayable.
    NoTableauPiles,
    /// `max_rank` must be between 1 and 13.
    InvalidMaxRank(u8),
    /// A foundation toggle was set while foundations are disabled.
    FoundationFlagWithoutFoundations(&'static str),
    /// The hole-adjacency family is a single-deck game.
    HoleWithTwoDecks,
    /// Pile references are single bytes; the layout must fit.
    TooManyPiles(usize),
    /// A hole-variant deal cannot split the deck into piles of three.
    UnevenHoleDeal {
        /// Cards to deal after reserving the hole card.
        cards: usize,
        /// Tableau piles the configuration asks for.
        piles: usize,
    },
    /// A seeded deal was requested for a configuration without a hole.
    NotAHoleVariant,
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::NoTableauPiles => write!(f, "Rule configuration has no tableau piles"),
            Self::InvalidMaxRank(r) => write!(f, "Invalid max rank: {} (must be 1-13)", r),
            Self::FoundationFlagWithoutFoundations(flag) => {
                write!(f, "'{}' is set but foundations are disabled", flag)
            }
            Self::HoleWithTwoDecks => write!(f, "Hole variants are single-deck games"),
            Self::TooManyPiles(n) => write!(f, "Layout needs {} piles; at most 255 fit", n),
            Self::UnevenHoleDeal { cards, piles } => {
                write!(f, "Cannot deal {} cards into {} piles of three", cards, piles)
            }
            Self::NotAHoleVariant => {
                write!(f, "Seeded dealing is only defined for hole variants")
            }
        }
    }
}

impl std::error::Error for RulesError {}
