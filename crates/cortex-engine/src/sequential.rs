//! Single-threaded engine: one partition, no barrier waits.
//!
//! [`SequentialEngine`] runs the exact phase sequence of the parallel
//! engine on a single partition spanning the whole grid, with every
//! barrier replaced by [`NoopBarrier`]. Because each cell reads only the
//! current buffer, the results are bit-identical to a multi-worker run of
//! the same configuration.
//!
//! Unlike [`TickEngine`](crate::TickEngine), it can be driven one tick at
//! a time and inspected between ticks.

use std::sync::Arc;
use std::time::Instant;

use cortex_core::{Energy, InputNode, ObservationNode, TickError};
use cortex_grid::EnergyGrid;

use crate::barrier::NoopBarrier;
use crate::config::{ConfigError, RunConfig};
use crate::report::{finish_run, RunError, RunReport};
use crate::worker::{EngineRun, TickShared, TickStatus, Worker};

/// Stepwise engine for a single worker.
pub struct SequentialEngine {
    worker: Worker<NoopBarrier>,
    tick_ms: f64,
    ticks_completed: u64,
    failure: Option<TickError>,
}

impl SequentialEngine {
    /// Validate the run and set up the grid buffers.
    ///
    /// The threading section of `config` is ignored apart from validation.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] found by [`RunConfig::validate`],
    /// [`RunConfig::validate_grid`], or
    /// [`validate_nodes`](crate::config::validate_nodes).
    pub fn new(
        config: &RunConfig,
        initial: &EnergyGrid,
        observations: Vec<ObservationNode>,
        inputs: Vec<InputNode>,
    ) -> Result<Self, ConfigError> {
        let (shared, partitions) = TickShared::prepare(config, initial, observations, inputs, 1)?;
        let partition = partitions
            .into_iter()
            .next()
            .ok_or(ConfigError::ZeroWorkers)?;
        Ok(Self {
            worker: Worker::new(shared, NoopBarrier, partition),
            tick_ms: config.tick_ms,
            ticks_completed: 0,
            failure: None,
        })
    }

    /// Configured number of ticks.
    pub fn num_ticks(&self) -> u64 {
        self.worker.shared().num_ticks
    }

    /// Number of ticks completed so far; also the index of the next tick.
    pub fn current_tick(&self) -> u64 {
        self.ticks_completed
    }

    /// Whether the run reached its tick count or stopped on a failure.
    pub fn is_finished(&self) -> bool {
        self.failure.is_some() || self.ticks_completed >= self.num_ticks()
    }

    /// The failure that stopped the run, if any.
    pub fn failure(&self) -> Option<&TickError> {
        self.failure.as_ref()
    }

    /// Run the next tick.
    ///
    /// Returns the index of the completed tick, the [`TickError`] if it
    /// failed, or `None` once the run is finished. After a failure the
    /// partially written buffers are kept and no further tick runs.
    pub fn execute_tick(&mut self) -> Option<Result<u64, TickError>> {
        if self.is_finished() {
            return None;
        }
        let tick = self.ticks_completed;
        match self.worker.execute_tick(tick) {
            TickStatus::Completed => {
                self.ticks_completed += 1;
                Some(Ok(tick))
            }
            TickStatus::Failed(error) => {
                self.failure = Some(error.clone());
                Some(Err(error))
            }
            // A lone worker only aborts because of its own failure.
            TickStatus::Aborted => None,
        }
    }

    /// Energies after the last completed tick.
    pub fn snapshot(&self) -> EnergyGrid {
        self.worker.shared().grids.snapshot(self.worker.front())
    }

    /// Current per-cell slopes.
    ///
    /// Slopes are retained as-is after a failure: cells computed earlier in
    /// the failing tick hold that tick's slope, the others still hold the
    /// slope from the last completed tick.
    pub fn slopes(&self) -> EnergyGrid {
        self.worker.shared().grids.slope_snapshot()
    }

    /// Energy at `(x, y)` after the last completed tick.
    pub fn energy_at(&self, x: usize, y: usize) -> Option<Energy> {
        self.worker.shared().grids.energy_at(self.worker.front(), x, y)
    }

    /// Observation nodes in the order they were supplied.
    pub fn observations(&self) -> impl Iterator<Item = &ObservationNode> {
        self.worker.partition().observations().iter().map(|(_, node)| node)
    }

    /// Run every remaining tick and hand back the results.
    ///
    /// # Errors
    ///
    /// [`RunError::Tick`] with the partial report if a tick fails.
    pub fn run(mut self) -> Result<RunReport, RunError> {
        let start = Instant::now();
        while let Some(result) = self.execute_tick() {
            if result.is_err() {
                break;
            }
        }
        let elapsed = start.elapsed();
        let tick_ms = self.tick_ms;
        finish_run(self.into_run(), 1, elapsed, tick_ms)
    }

    fn into_run(self) -> EngineRun {
        let shared = Arc::clone(self.worker.shared());
        let exit = self.worker.finish(self.ticks_completed, self.failure);
        EngineRun::collect(&shared, vec![exit])
    }
}
