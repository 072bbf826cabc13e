//! Conservative policy: spend weak cards, save strong ones.

use super::lowest_where;
use crate::cards::Card;
use crate::combat::Combatant;
use crate::core::DiceRng;

/// Chance of throwing away the lowest card when nothing can match the attack.
const SACRIFICE_CHANCE: f64 = 0.3;

/// Defend chance with an empty deck; falls by `DEFEND_SCARCITY_SLOPE` at full deck.
const DEFEND_BASE_CHANCE: f64 = 0.4;
const DEFEND_SCARCITY_SLOPE: f64 = 0.3;

pub(super) fn select_attack_card(combatant: &mut Combatant, _rng: &mut DiceRng) -> Option<Card> {
    let index = lowest_where(combatant.deck.peek(), |_| true)?;
    combatant.deck.take(index)
}

/// Meet the attack with the cheapest card that matches or beats it.
pub(super) fn select_defense_card(
    combatant: &mut Combatant,
    attack: &Card,
    rng: &mut DiceRng,
) -> Option<Card> {
    let cards = combatant.deck.peek();
    if cards.is_empty() {
        return None;
    }

    let index = match lowest_where(cards, |c| c.value >= attack.value) {
        Some(index) => index,
        None if rng.chance(SACRIFICE_CHANCE) => lowest_where(cards, |_| true)?,
        None => return None,
    };
    combatant.deck.take(index)
}

/// Defend more often as the deck runs low.
pub(super) fn should_defend(combatant: &Combatant, rng: &mut DiceRng) -> bool {
    let deck = &combatant.deck;
    let remaining_ratio = deck.remaining() as f64 / deck.original_size().max(1) as f64;
    rng.chance(DEFEND_BASE_CHANCE - remaining_ratio * DEFEND_SCARCITY_SLOPE)
}
