//! Decks: a live, consumable buffer of cards plus the original composition.
//!
//! Cards leave the live buffer through `draw`, `take` and `remove_card`.
//! They only come back through `reset`, which copies the original
//! composition into a fresh buffer. The original is never aliased by the
//! live buffer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;
use thiserror::Error;

use super::card::Card;
use crate::core::DiceRng;

/// Inline capacity for the live buffer; larger decks spill to the heap.
const INLINE_CARDS: usize = 16;

/// Deck notation with one or more malformed tokens.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid card notation: {}", .invalid_tokens.join(", "))]
pub struct DeckParseError {
    /// Every offending token, in notation order.
    pub invalid_tokens: Vec<String>,
}

impl DeckParseError {
    pub fn new(invalid_tokens: Vec<String>) -> Self {
        Self { invalid_tokens }
    }
}

/// A deck of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: SmallVec<[Card; INLINE_CARDS]>,
    original: Vec<Card>,
}

impl Deck {
    /// Create a deck whose original composition is `cards`, in order.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let original: Vec<Card> = cards.into_iter().collect();
        Self {
            cards: original.iter().copied().collect(),
            original,
        }
    }

    /// Parse whitespace-separated notation such as `"2d 2d 3h 10s"`.
    ///
    /// Blank notation yields an empty deck. Every malformed token is
    /// reported, not just the first.
    pub fn parse(notation: &str) -> Result<Self, DeckParseError> {
        parse_cards(notation).map(Self::new)
    }

    /// Check notation without building a deck.
    pub fn validate(notation: &str) -> Result<(), DeckParseError> {
        parse_cards(notation).map(|_| ())
    }

    /// Shuffle the remaining cards.
    pub fn shuffle(&mut self, rng: &mut DiceRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the top (last) card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove and return the card at `index`.
    ///
    /// The top card fills the gap, so the order of the rest changes.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.swap_remove(index))
    }

    /// Remove the first card equal to `card`.
    ///
    /// Returns whether one was found.
    pub fn remove_card(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c == card) {
            Some(index) => {
                self.cards.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn peek(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The composition this deck was built with.
    #[must_use]
    pub fn original(&self) -> &[Card] {
        &self.original
    }

    #[must_use]
    pub fn original_size(&self) -> usize {
        self.original.len()
    }

    /// Restore the original composition, unshuffled.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend(self.original.iter().copied());
    }
}

impl FromStr for Deck {
    type Err = DeckParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Deck {
    /// Remaining cards in notation form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

fn parse_cards(notation: &str) -> Result<Vec<Card>, DeckParseError> {
    let mut cards = Vec::new();
    let mut invalid_tokens = Vec::new();

    for token in notation.split_whitespace() {
        match token.parse::<Card>() {
            Ok(card) => cards.push(card),
            Err(err) => invalid_tokens.push(err.token),
        }
    }

    if invalid_tokens.is_empty() {
        Ok(cards)
    } else {
        Err(DeckParseError::new(invalid_tokens))
    }
}
