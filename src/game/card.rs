//! Card representation for solitaire variants.
//!
//! Cards carry a rank (1 up to the variant's `max_rank`), a suit, and a
//! face-up tag. The tag affects display only: equality and hashing are
//! rank+suit identity, so a face-down card and its face-up twin are the
//! same card to the move generator and to state deduplication.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Suit of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// ♣
    Clubs,
    /// ♦
    Diamonds,
    /// ♥
    Hearts,
    /// ♠
    Spades,
}

/// Card color, derived from the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Diamonds and hearts.
    Red,
    /// Clubs and spades.
    Black,
}

/// All four suits in index order.
pub const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

impl Suit {
    /// Suit from its index (0-3).
    #[inline]
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < 4, "suit index must be 0-3");
        SUITS[index as usize & 3]
    }

    /// Index of this suit (0-3).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Color of this suit.
    pub fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Diamonds | Suit::Hearts => Color::Red,
        }
    }

    /// Suit character for tokens.
    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A single playing card.
#[derive(Clone, Copy)]
pub struct Card {
    rank: u8,
    suit: Suit,
    face_up: bool,
}

impl Card {
    /// Create a face-up card from rank (1-13) and suit.
    #[inline]
    pub fn new(rank: u8, suit: Suit) -> Self {
        debug_assert!((1..=13).contains(&rank), "rank must be 1-13");
        Self { rank, suit, face_up: true }
    }

    /// Parse a card from a token like `"AS"`, `"10h"`, `"0c"` or `"KD"`.
    ///
    /// The rank part is `A`/`J`/`Q`/`K` (case-insensitive), a number
    /// 1-13, or the compact `0` meaning ten. The final character is the
    /// suit letter.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.len() < 2 {
            return None;
        }
        let (rank_part, suit_part) = token.split_at(token.len() - 1);
        let suit = Suit::from_char(suit_part.chars().next()?)?;

        let rank = match rank_part.to_ascii_uppercase().as_str() {
            "A" => 1,
            "0" => 10,
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            n => match n.parse::<u8>() {
                Ok(r) if (1..=13).contains(&r) => r,
                _ => return None,
            },
        };

        Some(Self::new(rank, suit))
    }

    /// Get the card's rank (1-13).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Get the card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Whether the card is face-up. Display-only; never affects legality.
    #[inline]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// The same card with the given facing.
    #[inline]
    pub fn faced(self, face_up: bool) -> Self {
        Self { face_up, ..self }
    }

    /// Canonical token for this card, e.g. `"AS"` or `"10H"`.
    pub fn token(&self) -> String {
        let mut s = match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        };
        s.push(self.suit.to_char());
        s
    }
}

// Identity is rank+suit; facing is presentation state.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
