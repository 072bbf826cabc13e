//! Theoretical damage bounds.
//!
//! The damage a deck could deal if every card were played, every attack
//! landed and nothing was ever played in defense. A reference ceiling for
//! charts, not a result any match achieves.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

use crate::cards::Card;

/// Mean of a d4.
const D4_MEAN: f64 = 2.5;

/// Min / average / max damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalDamage {
    pub min: u32,
    pub avg: f64,
    pub max: u32,
}

impl TheoreticalDamage {
    /// Bounds for one unopposed card: `value` d4 plus the suit bonus.
    #[must_use]
    pub fn of_card(card: &Card) -> Self {
        let bonus = card.suit.damage_bonus();
        Self {
            min: card.value.saturating_add(bonus),
            avg: card.value as f64 * D4_MEAN + bonus as f64,
            max: card.value.saturating_mul(4).saturating_add(bonus),
        }
    }

    /// Bounds summed over every card in `cards`.
    #[must_use]
    pub fn of_deck(cards: &[Card]) -> Self {
        cards.iter().map(Self::of_card).sum()
    }
}

impl Add for TheoreticalDamage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            min: self.min.saturating_add(rhs.min),
            avg: self.avg + rhs.avg,
            max: self.max.saturating_add(rhs.max),
        }
    }
}

impl Sum for TheoreticalDamage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
