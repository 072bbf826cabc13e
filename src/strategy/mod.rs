//! Card selection policies.
//!
//! Every combatant follows one of a closed set of policies:
//! - `Balanced`: random attacks, frequent reactions, occasional defending
//! - `Conservative`: spends its weakest cards, defends more as its deck thins
//! - `Aggressive`: leads with its strongest cards, rarely defends
//!
//! Policies are looked up by name through [`STRATEGY_TABLE`] and dispatched
//! with a `match`, so the set cannot grow behind the engine's back.
//!
//! Every selection removes the chosen card from the combatant's deck.

mod aggressive;
mod balanced;
mod conservative;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::combat::Combatant;
use crate::core::DiceRng;

/// A card selection policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum StrategyKind {
    #[default]
    Balanced,
    Conservative,
    Aggressive,
}

/// Recognised strategy names. Lookup ignores case.
pub const STRATEGY_TABLE: &[(&str, StrategyKind)] = &[
    ("balanced", StrategyKind::Balanced),
    ("random", StrategyKind::Balanced),
    ("conservative", StrategyKind::Conservative),
    ("aggressive", StrategyKind::Aggressive),
];

impl StrategyKind {
    /// Look up a strategy by name, falling back to `Balanced`.
    ///
    /// ```
    /// use card_duel_sim::strategy::StrategyKind;
    ///
    /// assert_eq!(StrategyKind::from_name("Aggressive"), StrategyKind::Aggressive);
    /// assert_eq!(StrategyKind::from_name("random"), StrategyKind::Balanced);
    /// assert_eq!(StrategyKind::from_name("berserk"), StrategyKind::Balanced);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        STRATEGY_TABLE
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map_or(StrategyKind::Balanced, |&(_, kind)| kind)
    }

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::Balanced => "balanced",
            StrategyKind::Conservative => "conservative",
            StrategyKind::Aggressive => "aggressive",
        }
    }

    /// Choose and remove a card to attack with.
    pub fn select_attack_card(self, combatant: &mut Combatant, rng: &mut DiceRng) -> Option<Card> {
        match self {
            StrategyKind::Balanced => balanced::select_attack_card(combatant, rng),
            StrategyKind::Conservative => conservative::select_attack_card(combatant, rng),
            StrategyKind::Aggressive => aggressive::select_attack_card(combatant, rng),
        }
    }

    /// Choose and remove a card to contest `attack` with, or decline.
    pub fn select_defense_card(
        self,
        combatant: &mut Combatant,
        attack: &Card,
        rng: &mut DiceRng,
    ) -> Option<Card> {
        match self {
            StrategyKind::Balanced => balanced::select_defense_card(combatant, attack, rng),
            StrategyKind::Conservative => conservative::select_defense_card(combatant, attack, rng),
            StrategyKind::Aggressive => aggressive::select_defense_card(combatant, attack, rng),
        }
    }

    /// Decide whether to spend this turn defending instead of attacking.
    pub fn should_defend(self, combatant: &Combatant, rng: &mut DiceRng) -> bool {
        match self {
            StrategyKind::Balanced => balanced::should_defend(combatant, rng),
            StrategyKind::Conservative => conservative::should_defend(combatant, rng),
            StrategyKind::Aggressive => aggressive::should_defend(combatant, rng),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for StrategyKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<StrategyKind> for &'static str {
    fn from(kind: StrategyKind) -> Self {
        kind.name()
    }
}

/// Index of the lowest-value card matching `keep`; the first one on ties.
fn lowest_where(cards: &[Card], keep: impl Fn(&Card) -> bool) -> Option<usize> {
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| keep(card))
        .min_by_key(|(_, card)| card.value)
        .map(|(i, _)| i)
}

/// Index of the highest-value card; the first one on ties.
fn highest(cards: &[Card]) -> Option<usize> {
    cards
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u32)>, (i, card)| match best {
            Some((_, value)) if value >= card.value => best,
            _ => Some((i, card.value)),
        })
        .map(|(i, _)| i)
}
