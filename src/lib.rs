//! # card-duel-sim
//!
//! A two-combatant, turn-based card combat engine with stochastic resolution.
//!
//! ## Design Principles
//!
//! 1. **Two Layers of Chance**: Every attack rolls a d20 against the
//!    defender's armor class, and only a hit goes on to a card duel where
//!    value differences are rolled as d4s and ties fall to suit advantage.
//!
//! 2. **Resource Economy**: Reactions and counters cost resources, so a
//!    defender that reacts early cannot react late.
//!
//! 3. **Reproducible**: All randomness flows through an injected, seedable
//!    `DiceRng`. A seed replays a match exactly; batches fork one generator
//!    per run.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, errors
//! - `cards`: Suits, cards and decks
//! - `combat`: Combatants and damage statistics
//! - `rules`: Dice, hit rolls, card duels, reaction costs, damage bounds
//! - `strategy`: Card selection policies
//! - `simulation`: Turn engine, single runs and batches
//!
//! ## Example
//!
//! ```
//! use card_duel_sim::{run_batch_simulation, BatchConfig, CombatantConfig, Side, SimulationConfig};
//!
//! let simulation = SimulationConfig::new(
//!     CombatantConfig::new("2d 2d 3h 10s"),
//!     CombatantConfig::new("5c 5c 4h").with_armor_class(12),
//! )
//! .with_seed(7);
//!
//! let batch = run_batch_simulation(&BatchConfig::new(simulation, 50))?;
//! assert_eq!(batch.distribution[Side::Antagonist].len(), 50);
//! # Ok::<(), card_duel_sim::SimError>(())
//! ```

pub mod core;
pub mod cards;
pub mod combat;
pub mod rules;
pub mod strategy;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{
    BatchConfig, CombatantConfig, ConfigError, DiceRng, Result, Side, Sides, SimError,
    SimulationConfig,
};

pub use crate::cards::{Card, CardParseError, Deck, DeckParseError, Suit};

pub use crate::combat::{Combatant, DamageStats};

pub use crate::rules::{DuelKind, DuelOutcome, HitRoll, TheoreticalDamage};

pub use crate::strategy::StrategyKind;

pub use crate::simulation::{
    run_batch_simulation, run_batch_simulation_async, run_single_simulation, BatchProgress,
    BatchResult, CancelToken, CombatSimulation, SimulationResult, TurnAction, TurnSnapshot,
};
