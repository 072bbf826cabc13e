//! Core engine types: sides, RNG, configuration, errors.
//!
//! Everything here is independent of card rules; the other modules build on
//! these types.

pub mod side;
pub mod rng;
pub mod config;
pub mod error;

pub use side::{Side, Sides};
pub use rng::DiceRng;
pub use config::{BatchConfig, CombatantConfig, SimulationConfig, DEFAULT_CHUNK_SIZE};
pub use error::{ConfigError, Result, SimError};
