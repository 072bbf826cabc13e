//! Combatants: static configuration plus per-match runtime state.

use crate::cards::{Deck, DeckParseError, Suit};
use crate::core::{CombatantConfig, DiceRng, Side};
use crate::rules::reaction_cost;
use crate::strategy::StrategyKind;

use super::damage::DamageStats;

/// Armor class bonus granted by a defend action.
pub const DEFEND_AC_BONUS: i32 = 3;

/// A fighter in a match.
///
/// Built fresh for every match; decks are consumed by play, so a combatant
/// is never carried from one batch run into the next.
#[derive(Clone, Debug)]
pub struct Combatant {
    side: Side,

    /// Cards still available to attack, react and counter with.
    pub deck: Deck,

    // === Static configuration ===
    pub armor_class: i32,
    pub hit_bonus: i32,
    pub reaction_chance: f64,
    pub counter_chance: f64,
    pub base_resources: i32,
    pub danger: i32,
    pub strategy: StrategyKind,

    // === Runtime state ===
    /// Resources left to pay for reactions and counters.
    pub resources: i32,
    pub damage_taken: DamageStats,
    /// AC bonus from a defend action, cleared at this combatant's next turn.
    pub temp_ac_bonus: i32,
    pub cards_played: u32,
    /// Reaction and counter payments made.
    pub reactions_used: u32,
    pub counters_used: u32,
}

impl Combatant {
    /// Build a combatant, parsing its deck notation.
    pub fn new(side: Side, config: &CombatantConfig) -> Result<Self, DeckParseError> {
        let deck = Deck::parse(&config.deck)?;
        Ok(Self::with_deck(side, config, deck))
    }

    /// Build a combatant around an already parsed deck.
    pub fn with_deck(side: Side, config: &CombatantConfig, deck: Deck) -> Self {
        Self {
            side,
            deck,
            armor_class: config.armor_class,
            hit_bonus: config.hit_bonus,
            reaction_chance: config.reaction_chance,
            counter_chance: config.counter_chance,
            base_resources: config.base_resources,
            danger: config.danger,
            strategy: config.strategy,
            resources: config.base_resources,
            damage_taken: DamageStats::new(),
            temp_ac_bonus: 0,
            cards_played: 0,
            reactions_used: 0,
            counters_used: 0,
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.side.name()
    }

    /// Restore the full deck, shuffle it, and clear all runtime state.
    pub fn reset(&mut self, rng: &mut DiceRng) {
        self.deck.reset();
        self.deck.shuffle(rng);
        self.resources = self.base_resources;
        self.damage_taken.reset();
        self.temp_ac_bonus = 0;
        self.cards_played = 0;
        self.reactions_used = 0;
        self.counters_used = 0;
    }

    /// Armor class including any defend bonus.
    #[must_use]
    pub fn effective_ac(&self) -> i32 {
        self.armor_class + self.temp_ac_bonus
    }

    /// Cost to react to, or counter, an attack made with `attack_suit`.
    #[must_use]
    pub fn reaction_cost(&self, attack_suit: Suit) -> i32 {
        reaction_cost(self.danger, attack_suit)
    }

    /// Whether the resource pool covers a reaction against `attack_suit`.
    #[must_use]
    pub fn can_react(&self, attack_suit: Suit) -> bool {
        self.resources >= self.reaction_cost(attack_suit)
    }

    /// Pay for a reaction.
    pub fn pay_reaction_cost(&mut self, attack_suit: Suit) {
        self.resources -= self.reaction_cost(attack_suit);
        self.reactions_used += 1;
    }

    /// Pay for a counter. Counters draw on the same pool as reactions.
    pub fn pay_counter_cost(&mut self, attack_suit: Suit) {
        self.pay_reaction_cost(attack_suit);
        self.counters_used += 1;
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.damage_taken.record(amount);
    }

    /// Drop bonuses that only last until this combatant's next turn.
    pub fn clear_temp_bonuses(&mut self) {
        self.temp_ac_bonus = 0;
    }

    pub fn apply_defend(&mut self) {
        self.temp_ac_bonus = DEFEND_AC_BONUS;
    }
}
