//! Batch runner: many independent matches folded into aggregate statistics.
//!
//! Every run gets fresh combatants, fresh copies of the parsed decks and its
//! own generator forked from the batch generator, so a batch with a fixed
//! seed is fully reproducible and any single run can be replayed with
//! [`run_single_simulation`](super::run_single_simulation).
//!
//! The async runner performs exactly the same computation in chunks,
//! reporting progress and yielding to the runtime between chunks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Deck;
use crate::core::{BatchConfig, ConfigError, DiceRng, Result, SimError, SimulationConfig, Sides};
use crate::rules::TheoreticalDamage;

use super::engine::{parse_decks, CombatSimulation};
use super::snapshot::SimulationResult;

/// Runs finished so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    /// Completed share in `[0, 1]`; an empty batch counts as done.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Shared flag for stopping an async batch between chunks.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Min / average / max of per-run damage totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: u32,
    pub avg: f64,
    pub max: u32,
}

/// Per-turn averages across runs, indexed by turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerTurnAverages {
    pub resources: Vec<f64>,
    /// Cumulative damage taken by the end of each turn.
    pub damage: Vec<f64>,
    pub cards_remaining: Vec<f64>,
    pub reactions: Vec<f64>,
}

/// Aggregate statistics of a batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub num_runs: usize,
    /// Damage taken per run, by side.
    pub damage: Sides<DamageRange>,
    /// Every run's damage total, in run order.
    pub distribution: Sides<Vec<u32>>,
    pub per_turn: Sides<PerTurnAverages>,
    pub theoretical: Sides<TheoreticalDamage>,
}

#[derive(Clone, Copy, Debug, Default)]
struct TurnSums {
    resources: f64,
    damage: f64,
    cards_remaining: f64,
    reactions: f64,
}

/// Folds match results into a [`BatchResult`] one at a time.
#[derive(Clone, Debug)]
pub struct BatchAccumulator {
    num_runs: usize,
    totals: Sides<Vec<u32>>,
    turn_sums: Sides<Vec<TurnSums>>,
    turn_samples: Vec<usize>,
    theoretical: Option<Sides<TheoreticalDamage>>,
}

impl BatchAccumulator {
    /// Create an accumulator for matches of `num_turns` turns.
    pub fn new(num_turns: usize) -> Self {
        Self {
            num_runs: 0,
            totals: Sides::default(),
            turn_sums: Sides::from_fn(|_| vec![TurnSums::default(); num_turns]),
            turn_samples: vec![0; num_turns],
            theoretical: None,
        }
    }

    #[must_use]
    pub fn num_runs(&self) -> usize {
        self.num_runs
    }

    pub fn push(&mut self, result: &SimulationResult) {
        self.num_runs += 1;
        // Decks are identical across runs, so the first result's bounds hold.
        self.theoretical.get_or_insert_with(|| result.theoretical.clone());

        for (side, stats) in result.damage.iter() {
            self.totals[side].push(stats.total);
        }

        for (index, snap) in result.turns.iter().enumerate().take(self.turn_samples.len()) {
            self.turn_samples[index] += 1;
            for (side, state) in snap.sides.iter() {
                let sums = &mut self.turn_sums[side][index];
                sums.resources += f64::from(state.resources);
                sums.damage += f64::from(state.damage_taken);
                sums.cards_remaining += state.cards_remaining as f64;
                sums.reactions += f64::from(state.reactions_used);
            }
        }
    }

    pub fn finish(self) -> BatchResult {
        let samples = self.turn_samples;
        let per_turn = self.turn_sums.map(|_, sums| {
            let mut averages = PerTurnAverages::default();
            for (sum, &count) in sums.iter().zip(&samples).filter(|(_, count)| **count > 0) {
                let count = count as f64;
                averages.resources.push(sum.resources / count);
                averages.damage.push(sum.damage / count);
                averages.cards_remaining.push(sum.cards_remaining / count);
                averages.reactions.push(sum.reactions / count);
            }
            averages
        });

        BatchResult {
            num_runs: self.num_runs,
            damage: self.totals.as_ref().map(|_, totals| damage_range(totals)),
            distribution: self.totals,
            per_turn,
            theoretical: self.theoretical.unwrap_or_default(),
        }
    }
}

fn damage_range(totals: &[u32]) -> DamageRange {
    if totals.is_empty() {
        return DamageRange::default();
    }
    let sum: u64 = totals.iter().map(|&t| u64::from(t)).sum();
    DamageRange {
        min: totals.iter().copied().min().unwrap_or(0),
        avg: sum as f64 / totals.len() as f64,
        max: totals.iter().copied().max().unwrap_or(0),
    }
}

/// Steps through a batch a chunk at a time.
///
/// Both decks are parsed once up front; a bad deck fails the whole batch
/// before any run starts.
#[derive(Clone, Debug)]
pub struct BatchRunner {
    simulation: SimulationConfig,
    decks: Sides<Deck>,
    rng: DiceRng,
    total: usize,
    completed: usize,
    accumulator: BatchAccumulator,
}

impl BatchRunner {
    pub fn new(config: &BatchConfig) -> Result<Self> {
        let decks = parse_decks(&config.simulation)?;
        let rng = config
            .simulation
            .seed
            .map_or_else(DiceRng::from_entropy, DiceRng::new);

        Ok(Self {
            simulation: config.simulation.clone(),
            decks,
            rng,
            total: config.num_runs,
            completed: 0,
            accumulator: BatchAccumulator::new(config.simulation.num_turns),
        })
    }

    /// Seed of the batch generator every run is forked from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn progress(&self) -> BatchProgress {
        BatchProgress {
            completed: self.completed,
            total: self.total,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }

    /// Play up to `max_runs` more runs. Returns how many were played.
    pub fn run_chunk(&mut self, max_runs: usize) -> usize {
        let runs = max_runs.min(self.total - self.completed);
        for _ in 0..runs {
            let run_rng = self.rng.fork();
            let result =
                CombatSimulation::with_decks(&self.simulation, self.decks.clone(), run_rng).run();
            self.accumulator.push(&result);
        }
        self.completed += runs;
        runs
    }

    /// Aggregate the runs played so far.
    pub fn finish(self) -> BatchResult {
        self.accumulator.finish()
    }
}

/// Play every run of `config` and aggregate the results.
pub fn run_batch_simulation(config: &BatchConfig) -> Result<BatchResult> {
    let mut runner = BatchRunner::new(config)?;
    debug!(seed = runner.seed(), runs = config.num_runs, "batch started");

    runner.run_chunk(config.num_runs);

    let result = runner.finish();
    debug!(
        runs = result.num_runs,
        protagonist_avg = result.damage.protagonist.avg,
        antagonist_avg = result.damage.antagonist.avg,
        "batch finished"
    );
    Ok(result)
}

/// Play every run of `config` in chunks of `config.chunk_size`.
///
/// `progress` is called after each chunk, and the task yields to the runtime
/// before the next one. Once `cancel` fires, the batch stops at the next
/// chunk boundary and the partial aggregate is dropped.
///
/// With the same seed the result equals that of [`run_batch_simulation`].
pub async fn run_batch_simulation_async(
    config: &BatchConfig,
    mut progress: impl FnMut(BatchProgress),
    cancel: &CancelToken,
) -> Result<BatchResult> {
    if config.chunk_size == 0 {
        return Err(ConfigError::ZeroChunkSize.into());
    }

    let mut runner = BatchRunner::new(config)?;
    debug!(
        seed = runner.seed(),
        runs = config.num_runs,
        chunk_size = config.chunk_size,
        "async batch started"
    );

    while !runner.is_finished() {
        if cancel.is_cancelled() {
            let BatchProgress { completed, total } = runner.progress();
            info!(completed, total, "batch cancelled");
            return Err(SimError::Cancelled { completed, total });
        }

        runner.run_chunk(config.chunk_size);
        progress(runner.progress());
        tokio::task::yield_now().await;
    }

    let result = runner.finish();
    debug!(runs = result.num_runs, "async batch finished");
    Ok(result)
}
