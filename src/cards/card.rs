//! Suits and cards.
//!
//! A card is a suit plus a value from 1 to `MAX_CARD_VALUE`. Its text form is the value
//! followed by a suit letter: `2d`, `10h`, `3s`, `7c`.
//!
//! ## Suit Effects
//!
//! | Suit     | Letter | Effect when attacking                    |
//! |----------|--------|------------------------------------------|
//! | Spades   | `s`    | none                                     |
//! | Diamonds | `d`    | defender pays more to react or counter   |
//! | Crosses  | `c`    | +2 to the hit roll                       |
//! | Hearts   | `h`    | +2 flat damage whenever damage is dealt  |
//!
//! Advantage (consulted only on value ties):
//! Spades > Crosses > Diamonds > Hearts > Spades.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Hit-roll bonus granted by Crosses.
pub const CROSSES_HIT_BONUS: i32 = 2;

/// Flat damage bonus granted by Hearts.
pub const HEARTS_DAMAGE_BONUS: u32 = 2;

/// Largest card value accepted in notation.
///
/// A duel rolls one d4 per point of value difference.
pub const MAX_CARD_VALUE: u32 = 100;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Diamonds,
    Crosses,
    Hearts,
}

impl Suit {
    /// All suits in notation order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Crosses, Suit::Hearts];

    /// Notation letter (lowercase).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Diamonds => 'd',
            Suit::Crosses => 'c',
            Suit::Hearts => 'h',
        }
    }

    /// Parse a notation letter, ignoring case.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Suit> {
        match letter.to_ascii_lowercase() {
            's' => Some(Suit::Spades),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Crosses),
            'h' => Some(Suit::Hearts),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Diamonds => "Diamonds",
            Suit::Crosses => "Crosses",
            Suit::Hearts => "Hearts",
        }
    }

    /// The suit this one has advantage over.
    #[must_use]
    pub const fn beats(self) -> Suit {
        match self {
            Suit::Spades => Suit::Crosses,
            Suit::Crosses => Suit::Diamonds,
            Suit::Diamonds => Suit::Hearts,
            Suit::Hearts => Suit::Spades,
        }
    }

    /// Check whether this suit dominates `other` in the advantage cycle.
    #[must_use]
    pub fn has_advantage_over(self, other: Suit) -> bool {
        self.beats() == other
    }

    /// Bonus added to the hit roll when attacking with this suit.
    #[must_use]
    pub const fn hit_bonus(self) -> i32 {
        match self {
            Suit::Crosses => CROSSES_HIT_BONUS,
            _ => 0,
        }
    }

    /// Flat bonus added to damage dealt by this suit.
    #[must_use]
    pub const fn damage_bonus(self) -> u32 {
        match self {
            Suit::Hearts => HEARTS_DAMAGE_BONUS,
            _ => 0,
        }
    }

    /// Whether attacks with this suit make reactions and counters dearer.
    #[must_use]
    pub const fn raises_reaction_cost(self) -> bool {
        matches!(self, Suit::Diamonds)
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Malformed card token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid card notation: '{token}' (expected <number><suit>, e.g. '2d', '10h')")]
pub struct CardParseError {
    pub token: String,
}

/// An immutable playing card.
///
/// Serializes as its notation string (`"10h"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub suit: Suit,
    pub value: u32,
}

impl Card {
    /// Create a card. `value` should be within `1..=MAX_CARD_VALUE`.
    #[must_use]
    pub const fn new(suit: Suit, value: u32) -> Self {
        Self { suit, value }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.suit.letter())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || CardParseError {
            token: token.to_string(),
        };

        let mut chars = token.chars();
        let suit = chars.next_back().and_then(Suit::from_letter).ok_or_else(invalid)?;
        let digits = chars.as_str();

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        match digits.parse::<u32>() {
            Ok(value) if (1..=MAX_CARD_VALUE).contains(&value) => Ok(Card::new(suit, value)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}
