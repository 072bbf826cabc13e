//! Per-turn trace and single-match result.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::combat::{Combatant, DamageStats};
use crate::core::{Side, Sides};
use crate::rules::{DuelKind, HitRoll, TheoreticalDamage};

/// What the attacking side did with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnAction {
    Attack,
    Defend,
    /// Wanted to attack but the strategy produced no card.
    NoCards,
}

/// One combatant's state at the end of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSnapshot {
    /// Cumulative damage taken so far.
    pub damage_taken: u32,
    pub resources: i32,
    pub cards_remaining: usize,
    pub reactions_used: u32,
    pub counters_used: u32,
}

impl SideSnapshot {
    pub fn of(combatant: &Combatant) -> Self {
        Self {
            damage_taken: combatant.damage_taken.total,
            resources: combatant.resources,
            cards_remaining: combatant.deck.remaining(),
            reactions_used: combatant.reactions_used,
            counters_used: combatant.counters_used,
        }
    }
}

/// A counter-attack by the defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub card: Card,
    /// Hit roll against the original attacker.
    pub hit: HitRoll,
    /// Damage dealt to the original attacker.
    pub damage: u32,
}

/// Everything that happened during one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub hit: HitRoll,
    pub attack_card: Card,
    pub defense_card: Option<Card>,
    /// Damage the defender took from the duel.
    pub damage_dealt: u32,
    /// Damage the attacker took from the duel, excluding any counter.
    pub damage_taken: u32,
    /// How the duel was decided; `None` when the attack missed.
    pub duel: Option<DuelKind>,
    /// Whether the defender paid for a reaction.
    ///
    /// The strategy may still decline to play a card after paying; check
    /// `defense_card` to see whether one was played.
    pub reaction: bool,
    pub counter: Option<CounterRecord>,
}

impl AttackRecord {
    pub(crate) fn new(attack_card: Card, hit: HitRoll) -> Self {
        Self {
            hit,
            attack_card,
            defense_card: None,
            damage_dealt: 0,
            damage_taken: 0,
            duel: None,
            reaction: false,
            counter: None,
        }
    }

    #[must_use]
    pub fn counter_occurred(&self) -> bool {
        self.counter.is_some()
    }
}

/// State of the match after one turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// Zero-based turn index.
    pub turn: usize,
    pub attacker: Side,
    pub action: TurnAction,
    pub sides: Sides<SideSnapshot>,
    /// Present for `TurnAction::Attack` only.
    pub attack: Option<AttackRecord>,
}

impl TurnSnapshot {
    /// Side that did not act this turn.
    #[must_use]
    pub fn defender(&self) -> Side {
        self.attacker.opponent()
    }
}

/// Full trace and statistics of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Seed of the generator the match ran on.
    pub seed: u64,
    pub total_turns: usize,
    pub turns: Vec<TurnSnapshot>,
    /// Damage taken by each side.
    pub damage: Sides<DamageStats>,
    /// Bounds on the damage each side could take, from the opposing deck.
    pub theoretical: Sides<TheoreticalDamage>,
}

impl SimulationResult {
    /// Total damage taken by `side`.
    #[must_use]
    pub fn total_damage(&self, side: Side) -> u32 {
        self.damage[side].total
    }

    /// Number of turns in which a counter happened.
    #[must_use]
    pub fn counter_count(&self) -> usize {
        self.turns
            .iter()
            .filter_map(|t| t.attack.as_ref())
            .filter(|a| a.counter_occurred())
            .count()
    }
}
