//! Simulation configuration types.
//!
//! Callers describe a match with:
//! - `CombatantConfig`: one fighter's deck, defences and resource economy
//! - `SimulationConfig`: both fighters plus turn count, turn order and seed
//! - `BatchConfig`: a simulation repeated many times
//!
//! All three deserialize with defaults for missing fields, so a partial JSON
//! document is a valid configuration.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::side::{Side, Sides};
use crate::cards::Deck;
use crate::strategy::StrategyKind;

/// Runs per chunk in the cooperative batch runner.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Configuration for one combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantConfig {
    /// Deck notation, e.g. `"2d 2d 3h 3c 5s 10h"`.
    pub deck: String,

    /// Base armor class the opponent's hit roll must beat.
    pub armor_class: i32,

    /// Flat bonus added to this combatant's hit rolls.
    pub hit_bonus: i32,

    /// Probability of contesting a successful hit with a card.
    pub reaction_chance: f64,

    /// Probability of striking back after an exchange.
    pub counter_chance: f64,

    /// Resource pool at the start of a match.
    pub base_resources: i32,

    /// Resource cost of a reaction or counter.
    pub danger: i32,

    /// Card selection policy.
    pub strategy: StrategyKind,
}

impl Default for CombatantConfig {
    fn default() -> Self {
        Self {
            deck: String::new(),
            armor_class: 10,
            hit_bonus: 0,
            reaction_chance: 0.5,
            counter_chance: 0.3,
            base_resources: 10,
            danger: 3,
            strategy: StrategyKind::Balanced,
        }
    }
}

impl CombatantConfig {
    /// Create a config with the given deck and default everything else.
    pub fn new(deck: impl Into<String>) -> Self {
        Self {
            deck: deck.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_armor_class(mut self, ac: i32) -> Self {
        self.armor_class = ac;
        self
    }

    #[must_use]
    pub fn with_hit_bonus(mut self, bonus: i32) -> Self {
        self.hit_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_reaction_chance(mut self, chance: f64) -> Self {
        self.reaction_chance = chance;
        self
    }

    #[must_use]
    pub fn with_counter_chance(mut self, chance: f64) -> Self {
        self.counter_chance = chance;
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: i32) -> Self {
        self.base_resources = resources;
        self
    }

    #[must_use]
    pub fn with_danger(mut self, danger: i32) -> Self {
        self.danger = danger;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    fn check(&self, side: Side, problems: &mut Vec<ConfigError>) {
        if let Err(source) = Deck::validate(&self.deck) {
            problems.push(ConfigError::InvalidDeck { side, source });
        }

        for (field, value) in [
            ("reaction chance", self.reaction_chance),
            ("counter chance", self.counter_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                problems.push(ConfigError::InvalidChance { side, field, value });
            }
        }
    }
}

/// Configuration for a single match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub protagonist: CombatantConfig,
    pub antagonist: CombatantConfig,

    /// Turns to play. The match never ends early.
    pub num_turns: usize,

    /// Whether the protagonist attacks on turn 0.
    pub protagonist_starts: bool,

    /// RNG seed. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            protagonist: CombatantConfig::default(),
            antagonist: CombatantConfig::default(),
            num_turns: 10,
            protagonist_starts: true,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a config for the two combatants with default match settings.
    pub fn new(protagonist: CombatantConfig, antagonist: CombatantConfig) -> Self {
        Self {
            protagonist,
            antagonist,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_turns(mut self, turns: usize) -> Self {
        self.num_turns = turns;
        self
    }

    #[must_use]
    pub fn with_protagonist_starts(mut self, starts: bool) -> Self {
        self.protagonist_starts = starts;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Both combatant configs, indexable by side.
    pub fn combatants(&self) -> Sides<&CombatantConfig> {
        Sides::new(&self.protagonist, &self.antagonist)
    }

    /// Collect every problem with this configuration.
    ///
    /// The engine does not call this; it is offered to input layers that
    /// want to report all mistakes at once before invoking a simulation.
    pub fn validate(&self) -> std::result::Result<(), Vec<ConfigError>> {
        let mut problems = Vec::new();
        for (side, config) in self.combatants().iter() {
            config.check(side, &mut problems);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Configuration for a batch of independent matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    #[serde(flatten)]
    pub simulation: SimulationConfig,

    /// Number of matches to play.
    pub num_runs: usize,

    /// Runs between yield points in the async runner.
    pub chunk_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            num_runs: 100,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl BatchConfig {
    /// Create a batch of `num_runs` matches of `simulation`.
    pub fn new(simulation: SimulationConfig, num_runs: usize) -> Self {
        Self {
            simulation,
            num_runs,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Validate the simulation and the batch settings.
    pub fn validate(&self) -> std::result::Result<(), Vec<ConfigError>> {
        let mut problems = match self.simulation.validate() {
            Ok(()) => Vec::new(),
            Err(problems) => problems,
        };
        if self.chunk_size == 0 {
            problems.push(ConfigError::ZeroChunkSize);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
