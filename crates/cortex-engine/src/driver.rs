//! Simulation driver: picks an engine, runs every tick, reports timing.

use cortex_core::{InputNode, ObservationNode};
use cortex_grid::EnergyGrid;

use crate::config::{ConfigError, RunConfig};
use crate::engine::TickEngine;
use crate::report::{RunError, RunReport};
use crate::sequential::SequentialEngine;

enum Backend {
    Sequential(SequentialEngine),
    Parallel(TickEngine),
}

/// A fully validated run, ready to execute.
///
/// Uses [`SequentialEngine`] when the configuration resolves to a single
/// worker and [`TickEngine`] otherwise; both produce identical numbers.
///
/// # Examples
///
/// ```
/// use cortex_core::ObservationNode;
/// use cortex_engine::{RunConfig, Simulation, ThreadingConfig};
/// use cortex_grid::EnergyGrid;
///
/// let config = RunConfig {
///     threading: ThreadingConfig::fixed(2),
///     ..RunConfig::new(3, 3, 1)
/// };
/// let initial = EnergyGrid::seeded(3, 3, &[(1, 1, 10.0)]).unwrap();
/// let observations = vec![ObservationNode::new(1, 1, 1)];
///
/// let report = Simulation::new(config, initial, observations, Vec::new())
///     .unwrap()
///     .run()
///     .unwrap();
/// assert_eq!(report.observations[0].values(), &[-10.0]);
/// ```
pub struct Simulation {
    backend: Backend,
    width: usize,
    height: usize,
    num_ticks: u64,
    worker_count: usize,
}

impl Simulation {
    /// Validate everything and prepare the engine. No thread is spawned yet.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found in the configuration, the initial
    /// grid, or the node lists.
    pub fn new(
        config: RunConfig,
        initial: EnergyGrid,
        observations: Vec<ObservationNode>,
        inputs: Vec<InputNode>,
    ) -> Result<Self, ConfigError> {
        // Both engines validate in `TickShared::prepare`.
        let worker_count = config.worker_count();
        let backend = if worker_count == 1 {
            Backend::Sequential(SequentialEngine::new(&config, &initial, observations, inputs)?)
        } else {
            Backend::Parallel(TickEngine::with_workers(
                &config,
                &initial,
                observations,
                inputs,
                worker_count,
            )?)
        };
        Ok(Self {
            backend,
            width: config.width,
            height: config.height,
            num_ticks: config.num_ticks,
            worker_count,
        })
    }

    /// Number of partitions the run is split into.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Whether the run uses worker threads.
    pub fn is_parallel(&self) -> bool {
        matches!(self.backend, Backend::Parallel(_))
    }

    /// Execute ticks `0..num_ticks` in order.
    ///
    /// # Errors
    ///
    /// See [`TickEngine::run`]. On [`RunError::Tick`] the error carries the
    /// failing tick index and the partial report.
    pub fn run(self) -> Result<RunReport, RunError> {
        tracing::info!(
            width = self.width,
            height = self.height,
            ticks = self.num_ticks,
            workers = self.worker_count,
            "starting run"
        );
        let result = match self.backend {
            Backend::Sequential(engine) => engine.run(),
            Backend::Parallel(engine) => engine.run(),
        };
        match &result {
            Ok(report) => tracing::info!(
                ticks = report.metrics.ticks_completed,
                total_ms = report.metrics.total_us / 1000,
                mean_tick_us = report.metrics.mean_tick_us,
                "run finished"
            ),
            Err(e) => tracing::warn!(error = %e, "run aborted"),
        }
        result
    }
}
