//! Hit-roll resolution: the first layer of every attack.

use serde::{Deserialize, Serialize};

use super::dice::roll_d20;
use crate::cards::Card;
use crate::combat::Combatant;
use crate::core::DiceRng;

/// Outcome of a hit roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitRoll {
    /// d20 plus every bonus.
    pub total: i32,
    pub success: bool,
}

impl HitRoll {
    /// Resolve a hit roll from a known d20 result.
    ///
    /// The attack lands only when the total strictly exceeds `target_ac`.
    #[must_use]
    pub fn from_d20(d20: u32, hit_bonus: i32, card: &Card, target_ac: i32) -> Self {
        let total = d20 as i32 + hit_bonus + card.suit.hit_bonus();
        Self {
            total,
            success: total > target_ac,
        }
    }
}

/// Roll to hit `defender` with `card`.
pub fn resolve_hit_roll(
    rng: &mut DiceRng,
    attacker: &Combatant,
    defender: &Combatant,
    card: &Card,
) -> HitRoll {
    let d20 = roll_d20(rng);
    HitRoll::from_d20(d20, attacker.hit_bonus, card, defender.effective_ac())
}
