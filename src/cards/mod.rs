//! Cards and decks.
//!
//! - `Card`: immutable suit + value, parsed from notation like `10h`
//! - `Deck`: consumable buffer that remembers its original composition

pub mod card;
pub mod deck;

pub use card::{Card, CardParseError, Suit, CROSSES_HIT_BONUS, HEARTS_DAMAGE_BONUS, MAX_CARD_VALUE};
pub use deck::{Deck, DeckParseError};
