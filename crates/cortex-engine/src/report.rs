//! What a run hands back to its caller.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use cortex_core::{ObservationSeries, TickError};
use cortex_grid::EnergyGrid;

use crate::config::ConfigError;
use crate::metrics::RunMetrics;
use crate::worker::EngineRun;

/// Results of a run: one series per observation node, timing, and the
/// energies after the last completed tick.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Observation series in the order the nodes were supplied.
    pub observations: Vec<ObservationSeries>,
    /// Aggregate timing.
    pub metrics: RunMetrics,
    /// Grid state after the last completed tick.
    ///
    /// On a failed run the partially written buffer of the failing tick is
    /// not exposed. Slopes are not rolled back after a failure; see
    /// [`SequentialEngine::slopes`](crate::SequentialEngine::slopes).
    pub final_grid: EnergyGrid,
}

impl RunReport {
    /// The series recorded for the node supplied at position `index`.
    pub fn series(&self, index: usize) -> Option<&ObservationSeries> {
        self.observations.get(index)
    }
}

/// Why a run did not complete every tick.
#[derive(Debug)]
pub enum RunError {
    /// The run could not start.
    Config(ConfigError),
    /// A tick failed and the run stopped at the next barrier.
    Tick {
        /// The failing tick, worker, and cause.
        error: TickError,
        /// Everything recorded before the failing tick.
        partial: Box<RunReport>,
    },
    /// A worker thread panicked outside kernel code.
    WorkerPanicked {
        /// Index of the worker's partition.
        worker: usize,
    },
}

impl RunError {
    /// Index of the failed tick, if a tick failed.
    pub fn tick(&self) -> Option<u64> {
        match self {
            Self::Tick { error, .. } => Some(error.tick),
            _ => None,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Tick { error, .. } => write!(f, "{error}"),
            Self::WorkerPanicked { worker } => write!(f, "worker {worker} panicked"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Tick { error, .. } => Some(error),
            Self::WorkerPanicked { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Attach timing to an engine result and split off failures.
pub(crate) fn finish_run(
    run: EngineRun,
    worker_count: usize,
    elapsed: Duration,
    tick_ms: f64,
) -> Result<RunReport, RunError> {
    let report = RunReport {
        observations: run.observations,
        metrics: RunMetrics::new(run.ticks_completed, worker_count, elapsed, tick_ms),
        final_grid: run.final_grid,
    };
    match run.failure {
        None => Ok(report),
        Some(error) => Err(RunError::Tick {
            error,
            partial: Box::new(report),
        }),
    }
}
