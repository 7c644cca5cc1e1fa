//! JSON deal ingestion.
//!
//! A deal document is a JSON object keyed by named pile groups, each an
//! ordered array of card tokens (the hole: a single token):
//!
//! ```json
//! {
//!   "tableau piles": [["KS", "6D"], ["8H"]],
//!   "stock": ["AC", "4D"],
//!   "waste": []
//! }
//! ```
//!
//! Parsing checks the document twice over: grammar (shapes, card-token
//! pattern, unknown top-level keys) and conformance with the rule
//! configuration in force (pile counts, reserve shape, foundation
//! sequences, and a full-deck audit that rejects duplicate or missing
//! cards). Failures surface as a descriptive [`DealError`]; nothing is
//! ever silently corrected.

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::sync::Arc;

use super::card::{Card, SUITS};
use super::pile::Pile;
use super::state::GameState;
use crate::rules::{FaceUpPolicy, SolRules};

/// Top-level keys a deal document may carry.
const KNOWN_GROUPS: [&str; 7] = [
    "tableau piles",
    "hole",
    "cells",
    "stock",
    "waste",
    "reserve",
    "foundations",
];

/// Parse a deal document into a position laid out for `rules`.
pub fn parse(rules: &Arc<SolRules>, json: &str) -> Result<GameState, DealError> {
    let doc: Value =
        serde_json::from_str(json).map_err(|e| DealError::Syntax(e.to_string()))?;
    let obj = doc.as_object().ok_or(DealError::ExpectedObject)?;

    for key in obj.keys() {
        if !KNOWN_GROUPS.contains(&key.as_str()) {
            return Err(DealError::UnknownKey(key.clone()));
        }
    }

    let mut gs = GameState::new(rules.clone());

    parse_tableau(&mut gs, obj)?;
    parse_hole(&mut gs, obj)?;
    parse_cells(&mut gs, obj)?;
    parse_stock(&mut gs, obj)?;
    parse_waste(&mut gs, obj)?;
    parse_reserve(&mut gs, obj)?;
    parse_foundations(&mut gs, obj)?;

    audit_full_deck(&gs)?;
    Ok(gs)
}

type Doc = serde_json::Map<String, Value>;

fn parse_card(v: &Value, group: &'static str, rules: &SolRules) -> Result<Card, DealError> {
    let token = v.as_str().ok_or(DealError::ExpectedCard(group))?;
    let card =
        Card::from_token(token).ok_or_else(|| DealError::BadCardToken(token.to_string()))?;
    if card.rank() > rules.max_rank {
        return Err(DealError::RankOutOfRange {
            token: token.to_string(),
            max_rank: rules.max_rank,
        });
    }
    Ok(card)
}

fn group_array<'a>(
    obj: &'a Doc,
    group: &'static str,
    allowed: bool,
) -> Result<Option<&'a Vec<Value>>, DealError> {
    match obj.get(group) {
        None => Ok(None),
        Some(_) if !allowed => Err(DealError::UnexpectedGroup(group)),
        Some(v) => v
            .as_array()
            .map(Some)
            .ok_or(DealError::ExpectedArray(group)),
    }
}

fn parse_tableau(gs: &mut GameState, obj: &Doc) -> Result<(), DealError> {
    let group = "tableau piles";
    let piles = group_array(obj, group, true)?.ok_or(DealError::MissingGroup(group))?;
    if piles.len() != gs.tableau().len() {
        return Err(DealError::PileCountMismatch {
            group,
            expected: gs.tableau().len(),
            actual: piles.len(),
        });
    }

    let face_up = gs.rules().face_up_policy == FaceUpPolicy::All;
    for (i, json_pile) in piles.iter().enumerate() {
        let cards = json_pile.as_array().ok_or(DealError::ExpectedArray(group))?;
        let dest = gs.tableau()[i];
        for json_card in cards {
            let card = parse_card(json_card, group, gs.rules())?;
            gs.place_card(dest, card.faced(face_up));
        }
    }
    Ok(())
}

fn parse_hole(gs: &mut GameState, obj: &Doc) -> Result<(), DealError> {
    match (obj.get("hole"), gs.hole()) {
        (None, _) => Ok(()),
        (Some(_), None) => Err(DealError::UnexpectedGroup("hole")),
        (Some(v), Some(hole)) => {
            let card = parse_card(v, "hole", gs.rules())?;
            gs.place_card(hole, card);
            Ok(())
        }
    }
}

fn parse_cells(gs: &mut GameState, obj: &Doc) -> Result<(), DealError> {
    let group = "cells";
    let Some(cells) = group_array(obj, group, !gs.cells().is_empty())? else {
        return Ok(());
    };
    // An empty array stands for "all cells free"
    if cells.is_empty() {
        return Ok(());
    }
    if cells.len() != gs.cells().len() {
        return Err(DealError::PileCountMismatch {
            group,
            expected: gs.cells().len(),
            actual: cells.len(),
        });
    }
    for (i, json_card) in cells.iter().enumerate() {
        let card = parse_card(json_card, group, gs.rules())?;
        let dest = gs.cells()[i];
        gs.place_card(dest, card);
    }
    Ok(())
}

fn parse_stock(gs: &mut GameState, obj: &Doc) -> Result<(), DealError> {
    let group = "stock";
    if let (Some(cards), Some(stock)) =
        (group_array(obj, group, gs.stock().is_some())?, gs.stock())
    {
        for json_card in cards {
            let card = parse_card(json_card, group, gs.rules())?;
            gs.place_card(stock, card);
        }
    }
    Ok(())
}

fn parse_waste(gs: &mut GameState, obj: &Doc) -> Result<(), DealError> {
    let group = "waste";
    if let (Some(cards), Some(waste)) =
        (group_array(obj, group, gs.waste().is_some())?, gs.waste())
    {
        for json_card in cards {
            let card = parse_card(json_card, group, gs.rules())?;
            gs.place_card(waste, card);
        }
    }
    Ok(())
}

fn parse_reserve(gs: &mut GameState, obj: &Doc) -> Result<(), DealError> {
    let group = "reserve";
    if gs.rules().reserve_size == 0 {
        group_array(obj, group, false)?;
        return Ok(());
    }
    let cards = group_array(obj, group, true)?.ok_or(DealError::MissingGroup(group))?;
    // A regular reserve is multiple single-card piles; a stacked reserve
    // is one multiple-card pile.
    if cards.len() != gs.rules().reserve_size as usize {
        return Err(DealError::PileCountMismatch {
            group,
            expected: gs.rules().reserve_size as usize,
            actual: cards.len(),
        });
    }
    for (i, json_card) in cards.iter().enumerate() {
        let card = parse_card(json_card, group, gs.rules())?;
        let dest = if gs.rules().reserve_stacked {
            gs.reserve()[0]
        } else {
            gs.reserve()[i]
        };
        gs.place_card(dest, card);
    }
    Ok(())
}

fn parse_foundations(gs: &mut GameState, obj: &Doc) -> Result<(), DealError> {
    let group = "foundations";
    let Some(piles) = group_array(obj, group, !gs.foundations().is_empty())? else {
        return Ok(());
    };
    if piles.len() != gs.foundations().len() {
        return Err(DealError::PileCountMismatch {
            group,
            expected: gs.foundations().len(),
            actual: piles.len(),
        });
    }

    // The document overrides any pre-filled initial card
    for i in 0..gs.foundations().len() {
        let f = gs.foundations()[i];
        gs.piles[f.index()] = Pile::new();
    }
    gs.solved.set(None);

    for (i, json_pile) in piles.iter().enumerate() {
        let cards = json_pile.as_array().ok_or(DealError::ExpectedArray(group))?;
        let suit = SUITS[i % 4];
        let dest = gs.foundations()[i];
        for (pos, json_card) in cards.iter().enumerate() {
            let card = parse_card(json_card, group, gs.rules())?;
            if card.suit() != suit || card.rank() != pos as u8 + 1 {
                return Err(DealError::BadFoundation(format!(
                    "foundation {} expects {} cards ascending from rank 1, got {}",
                    i,
                    suit.to_char(),
                    card
                )));
            }
            gs.place_card(dest, card);
        }
    }
    Ok(())
}

/// Reject duplicate or missing cards: the final multiset across every
/// pile (hole included) must equal the full deck for the configuration.
fn audit_full_deck(gs: &GameState) -> Result<(), DealError> {
    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    for pile in &gs.piles {
        for &card in pile.cards() {
            *counts.entry(card).or_insert(0) += 1;
        }
    }

    let expected = if gs.rules().two_decks { 2 } else { 1 };
    for rank in 1..=gs.rules().max_rank {
        for suit in SUITS {
            let card = Card::new(rank, suit);
            let got = counts.get(&card).copied().unwrap_or(0);
            if got > expected {
                return Err(DealError::DuplicateCard(card));
            }
            if got < expected {
                return Err(DealError::MissingCard(card));
            }
        }
    }
    Ok(())
}

/// Errors raised by a malformed deal document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    /// The document is not valid JSON.
    Syntax(String),
    /// The document's top level is not an object.
    ExpectedObject,
    /// An unknown top-level key.
    UnknownKey(String),
    /// A group the rule configuration does not lay out.
    UnexpectedGroup(&'static str),
    /// A group the rule configuration requires is absent.
    MissingGroup(&'static str),
    /// A group that must be a JSON array is not.
    ExpectedArray(&'static str),
    /// A card slot that must be a string token is not.
    ExpectedCard(&'static str),
    /// A token that does not match the card pattern.
    BadCardToken(String),
    /// A card above the configured highest rank.
    RankOutOfRange {
        /// The offending token.
        token: String,
        /// The configured highest rank.
        max_rank: u8,
    },
    /// A pile group with the wrong number of entries.
    PileCountMismatch {
        /// The group in question.
        group: &'static str,
        /// Entries the rule configuration calls for.
        expected: usize,
        /// Entries the document supplied.
        actual: usize,
    },
    /// A foundation pile that is not an ascending same-suit run from 1.
    BadFoundation(String),
    /// A card that appears more often than the deck holds it.
    DuplicateCard(Card),
    /// A card the deck holds but the document never places.
    MissingCard(Card),
}

impl std::fmt::Display for DealError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "Malformed deal: invalid JSON: {}", e),
            Self::ExpectedObject => write!(f, "Malformed deal: top level must be an object"),
            Self::UnknownKey(k) => write!(f, "Malformed deal: unknown key '{}'", k),
            Self::UnexpectedGroup(g) => {
                write!(f, "Malformed deal: '{}' is not part of this variant", g)
            }
            Self::MissingGroup(g) => write!(f, "Malformed deal: missing '{}'", g),
            Self::ExpectedArray(g) => write!(f, "Malformed deal: '{}' must be an array", g),
            Self::ExpectedCard(g) => {
                write!(f, "Malformed deal: '{}' entries must be card tokens", g)
            }
            Self::BadCardToken(t) => write!(f, "Malformed deal: bad card token '{}'", t),
            Self::RankOutOfRange { token, max_rank } => {
                write!(f, "Malformed deal: '{}' exceeds max rank {}", token, max_rank)
            }
            Self::PileCountMismatch { group, expected, actual } => {
                write!(
                    f,
                    "Malformed deal: '{}' has {} entries, expected {}",
                    group, actual, expected
                )
            }
            Self::BadFoundation(msg) => write!(f, "Malformed deal: {}", msg),
            Self::DuplicateCard(c) => write!(f, "Malformed deal: duplicate card {}", c),
            Self::MissingCard(c) => write!(f, "Malformed deal: missing card {}", c),
        }
    }
}

impl std::error::Error for DealError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameVariant;

    fn mini_rules() -> Arc<SolRules> {
        // Four aces over two piles: the smallest complete deck
        Arc::new(SolRules {
            tableau_pile_count: 2,
            max_rank: 1,
            ..SolRules::default()
        })
    }

    #[test]
    fn test_parse_minimal_deal() {
        let gs = parse(
            &mini_rules(),
            r#"{ "tableau piles": [["AC", "AD"], ["AH", "AS"]] }"#,
        )
        .unwrap();
        assert_eq!(gs.card_count(), 4);
        assert_eq!(gs.pile(gs.tableau()[0]).cards()[0], Card::from_token("AC").unwrap());
        assert_eq!(gs.pile(gs.tableau()[1]).top(), Card::from_token("AS"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse(
            &mini_rules(),
            r#"{ "tableau piles": [["AC","AD"],["AH","AS"]], "joker": [] }"#,
        )
        .unwrap_err();
        assert_eq!(err, DealError::UnknownKey("joker".to_string()));
    }

    #[test]
    fn test_missing_tableau_rejected() {
        let err = parse(&mini_rules(), r#"{}"#).unwrap_err();
        assert_eq!(err, DealError::MissingGroup("tableau piles"));
    }

    #[test]
    fn test_pile_count_mismatch() {
        let err = parse(&mini_rules(), r#"{ "tableau piles": [["AC"]] }"#).unwrap_err();
        assert_eq!(
            err,
            DealError::PileCountMismatch {
                group: "tableau piles",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_bad_token_rejected() {
        let err = parse(
            &mini_rules(),
            r#"{ "tableau piles": [["AC", "XX"], ["AH", "AS"]] }"#,
        )
        .unwrap_err();
        assert_eq!(err, DealError::BadCardToken("XX".to_string()));
    }

    #[test]
    fn test_rank_above_max_rejected() {
        let err = parse(
            &mini_rules(),
            r#"{ "tableau piles": [["AC", "2D"], ["AH", "AS"]] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DealError::RankOutOfRange { .. }));
    }

    #[test]
    fn test_duplicate_and_missing_cards_rejected() {
        let dup = parse(
            &mini_rules(),
            r#"{ "tableau piles": [["AC", "AC"], ["AH", "AS"]] }"#,
        )
        .unwrap_err();
        assert_eq!(dup, DealError::DuplicateCard(Card::from_token("AC").unwrap()));

        let missing = parse(
            &mini_rules(),
            r#"{ "tableau piles": [["AC"], ["AH", "AS"]] }"#,
        )
        .unwrap_err();
        assert_eq!(missing, DealError::MissingCard(Card::from_token("AD").unwrap()));
    }

    #[test]
    fn test_group_for_disabled_feature_rejected() {
        let err = parse(
            &mini_rules(),
            r#"{ "tableau piles": [["AC","AD"],["AH","AS"]], "cells": ["AC"] }"#,
        )
        .unwrap_err();
        assert_eq!(err, DealError::UnexpectedGroup("cells"));
    }

    #[test]
    fn test_hole_deal() {
        let rules = Arc::new(SolRules {
            tableau_pile_count: 1,
            hole: true,
            max_rank: 1,
            build_policy: crate::rules::BuildPolicy::NoBuild,
            spaces_policy: crate::rules::SpacesPolicy::NoBuild,
            ..SolRules::default()
        });
        let gs = parse(
            &rules,
            r#"{ "tableau piles": [["AC", "AD", "AH"]], "hole": "AS" }"#,
        )
        .unwrap();
        assert_eq!(gs.hole_card(), Card::from_token("AS"));
    }

    #[test]
    fn test_foundations_prefill_and_override() {
        let rules = Arc::new(SolRules {
            tableau_pile_count: 1,
            foundations: true,
            foundations_init_card: true,
            max_rank: 1,
            ..SolRules::default()
        });

        // Absent foundations: the initial card fills them
        let gs = parse(&rules, r#"{ "tableau piles": [[]] }"#).unwrap();
        assert_eq!(gs.pile(gs.foundations()[0]).top(), Card::from_token("AC"));
        assert_eq!(gs.card_count(), 4);

        // Supplied foundations replace the pre-fill, not stack on it
        let gs = parse(
            &rules,
            r#"{ "tableau piles": [[]],
                 "foundations": [["AC"], ["AD"], ["AH"], ["AS"]] }"#,
        )
        .unwrap();
        assert_eq!(gs.card_count(), 4);
    }

    #[test]
    fn test_bad_foundation_sequence_rejected() {
        let rules = Arc::new(SolRules {
            tableau_pile_count: 1,
            foundations: true,
            max_rank: 2,
            ..SolRules::default()
        });
        let err = parse(
            &rules,
            r#"{ "tableau piles": [["AC","2C","AD","2D","AH","2H","AS"]],
                 "foundations": [[], [], [], ["2S"]] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DealError::BadFoundation(_)));
    }

    #[test]
    fn test_reserve_shapes() {
        let spread = Arc::new(SolRules {
            tableau_pile_count: 1,
            reserve_size: 3,
            max_rank: 1,
            ..SolRules::default()
        });
        let gs = parse(
            &spread,
            r#"{ "tableau piles": [["AS"]], "reserve": ["AC", "AD", "AH"] }"#,
        )
        .unwrap();
        assert_eq!(gs.reserve().len(), 3);
        assert_eq!(gs.pile(gs.reserve()[2]).top(), Card::from_token("AH"));

        let stacked = Arc::new(SolRules {
            reserve_stacked: true,
            ..(*spread).clone()
        });
        let gs = parse(
            &stacked,
            r#"{ "tableau piles": [["AS"]], "reserve": ["AC", "AD", "AH"] }"#,
        )
        .unwrap();
        assert_eq!(gs.reserve().len(), 1);
        assert_eq!(gs.pile(gs.reserve()[0]).len(), 3);
        assert_eq!(gs.pile(gs.reserve()[0]).top(), Card::from_token("AH"));
    }

    #[test]
    fn test_klondike_tableau_faces_follow_policy() {
        let rules = Arc::new(SolRules::preset(GameVariant::Klondike));
        let mut tableau: Vec<Vec<String>> = Vec::new();
        let mut stock: Vec<String> = Vec::new();
        let mut deck = Vec::new();
        for rank in 1..=13u8 {
            for suit in SUITS {
                deck.push(Card::new(rank, suit).token());
            }
        }
        let mut it = deck.into_iter();
        for i in 0..7 {
            tableau.push((0..=i).map(|_| it.next().unwrap()).collect());
        }
        stock.extend(it);

        let doc = serde_json::json!({ "tableau piles": tableau, "stock": stock });
        let gs = parse(&rules, &doc.to_string()).unwrap();
        assert_eq!(gs.card_count(), 52);
        // TOP_CARDS policy deals the tableau face-down
        assert!(!gs.pile(gs.tableau()[0]).top().unwrap().is_face_up());
        assert_eq!(gs.pile(gs.stock().unwrap()).len(), 24);
    }
}
