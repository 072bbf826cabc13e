//! Match simulation and batch aggregation.
//!
//! - [`CombatSimulation`]: the turn engine for one match
//! - [`run_single_simulation`]: one match from a config, with its full trace
//! - [`run_batch_simulation`] / [`run_batch_simulation_async`]: many matches
//!   folded into a [`BatchResult`]

pub mod batch;
pub mod engine;
pub mod snapshot;

pub use batch::{
    run_batch_simulation, run_batch_simulation_async, BatchAccumulator, BatchProgress,
    BatchResult, BatchRunner, CancelToken, DamageRange, PerTurnAverages,
};
pub use engine::{run_single_simulation, CombatSimulation};
pub use snapshot::{
    AttackRecord, CounterRecord, SideSnapshot, SimulationResult, TurnAction, TurnSnapshot,
};
