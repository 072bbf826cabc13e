//! Card-duel resolution: the second layer of an attack that landed.
//!
//! The higher card wins and its opponent takes one d4 per point of
//! difference. Only the attacker's card adds its suit's damage bonus.
//! Equal values fall back to the suit advantage cycle, except in a
//! counter, where a tie deals nothing.

use serde::{Deserialize, Serialize};

use super::dice::roll_d4;
use crate::cards::Card;
use crate::core::DiceRng;

/// How a duel was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelKind {
    /// Attack value was higher by `margin`.
    AttackWins { margin: u32 },
    /// Defense value was higher by `margin`.
    DefenseWins { margin: u32 },
    /// Equal values in a counter.
    CounterTie,
    /// Equal values with nothing played in defense.
    Unopposed,
    AttackerAdvantage,
    DefenderAdvantage,
    /// Equal values, neither suit dominates.
    Blocked,
}

/// Damage dealt by a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOutcome {
    /// Damage the attacker takes.
    pub attacker_damage: u32,
    /// Damage the defender takes.
    pub defender_damage: u32,
    pub kind: DuelKind,
}

impl DuelOutcome {
    fn to_defender(damage: u32, kind: DuelKind) -> Self {
        Self {
            attacker_damage: 0,
            defender_damage: damage,
            kind,
        }
    }

    fn to_attacker(damage: u32, kind: DuelKind) -> Self {
        Self {
            attacker_damage: damage,
            defender_damage: 0,
            kind,
        }
    }

    fn nothing(kind: DuelKind) -> Self {
        Self::to_defender(0, kind)
    }
}

impl std::fmt::Display for DuelOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DuelKind::AttackWins { margin } => write!(
                f,
                "attack wins by {margin}: defender takes {}",
                self.defender_damage
            ),
            DuelKind::DefenseWins { margin } => write!(
                f,
                "defense wins by {margin}: attacker takes {}",
                self.attacker_damage
            ),
            DuelKind::CounterTie => f.write_str("counter tied: no damage"),
            DuelKind::Unopposed => write!(f, "no defense: defender takes {}", self.defender_damage),
            DuelKind::AttackerAdvantage => {
                write!(f, "attacker advantage: defender takes {}", self.defender_damage)
            }
            DuelKind::DefenderAdvantage => {
                write!(f, "defender advantage: attacker takes {}", self.attacker_damage)
            }
            DuelKind::Blocked => f.write_str("tied with no advantage: fully blocked"),
        }
    }
}

/// Resolve `attack` against an optional `defense` card.
///
/// A missing defense counts as value 0. With `is_counter` set, equal values
/// never deal damage and the advantage cycle is not consulted.
pub fn resolve_card_duel(
    rng: &mut DiceRng,
    attack: &Card,
    defense: Option<&Card>,
    is_counter: bool,
) -> DuelOutcome {
    let attack_value = attack.value;
    let defense_value = defense.map_or(0, |card| card.value);
    let margin = attack_value.abs_diff(defense_value);
    let bonus = attack.suit.damage_bonus();

    if attack_value > defense_value {
        return DuelOutcome::to_defender(
            roll_d4(rng, margin) + bonus,
            DuelKind::AttackWins { margin },
        );
    }
    if defense_value > attack_value {
        return DuelOutcome::to_attacker(roll_d4(rng, margin), DuelKind::DefenseWins { margin });
    }

    if is_counter {
        return DuelOutcome::nothing(DuelKind::CounterTie);
    }

    let Some(defense) = defense else {
        return DuelOutcome::to_defender(roll_d4(rng, 1) + bonus, DuelKind::Unopposed);
    };

    if attack.suit.has_advantage_over(defense.suit) {
        DuelOutcome::to_defender(roll_d4(rng, 1) + bonus, DuelKind::AttackerAdvantage)
    } else if defense.suit.has_advantage_over(attack.suit) {
        DuelOutcome::to_attacker(roll_d4(rng, 1), DuelKind::DefenderAdvantage)
    } else {
        DuelOutcome::nothing(DuelKind::Blocked)
    }
}
