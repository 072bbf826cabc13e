//! Error types surfaced by the engine and its configuration helpers.

use thiserror::Error;

use super::side::Side;
use crate::cards::DeckParseError;

/// Problems found by [`SimulationConfig::validate`](super::SimulationConfig::validate).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("{side} deck: {source}")]
    InvalidDeck {
        side: Side,
        #[source]
        source: DeckParseError,
    },

    #[error("{side} {field} must be within [0, 1], got {value}")]
    InvalidChance {
        side: Side,
        field: &'static str,
        value: f64,
    },

    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
}

/// Errors returned by the public simulation entry points.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    #[error("{side} deck: {source}")]
    Deck {
        side: Side,
        #[source]
        source: DeckParseError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("batch cancelled after {completed} of {total} runs")]
    Cancelled { completed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, SimError>;
