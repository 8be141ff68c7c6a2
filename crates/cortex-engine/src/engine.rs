//! Parallel tick engine: one thread per partition, three barriers per tick.
//!
//! [`TickEngine`] spawns its worker pool once per run and joins it at the
//! end. Workers are held at a start gate until the whole pool has been
//! spawned, so a spawn failure never leaves a worker blocked on a barrier
//! that can no longer fill.

use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use cortex_core::{InputNode, ObservationNode};
use cortex_grid::EnergyGrid;

use crate::config::{ConfigError, RunConfig};
use crate::partition::Partition;
use crate::report::{finish_run, RunError, RunReport};
use crate::worker::{EngineRun, TickShared, Worker, WorkerExit};

/// Multi-threaded engine executing a whole run.
pub struct TickEngine {
    shared: Arc<TickShared>,
    partitions: Vec<Partition>,
    tick_ms: f64,
}

impl TickEngine {
    /// Validate the run and partition it across the configured worker count.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from validation or partitioning, e.g.
    /// `TooManyWorkers` when the worker count exceeds the grid width.
    pub fn new(
        config: &RunConfig,
        initial: &EnergyGrid,
        observations: Vec<ObservationNode>,
        inputs: Vec<InputNode>,
    ) -> Result<Self, ConfigError> {
        Self::with_workers(config, initial, observations, inputs, config.worker_count())
    }

    /// Like [`new`](Self::new) with an explicit worker count.
    pub fn with_workers(
        config: &RunConfig,
        initial: &EnergyGrid,
        observations: Vec<ObservationNode>,
        inputs: Vec<InputNode>,
        workers: usize,
    ) -> Result<Self, ConfigError> {
        let (shared, partitions) =
            TickShared::prepare(config, initial, observations, inputs, workers)?;
        Ok(Self {
            shared,
            partitions,
            tick_ms: config.tick_ms,
        })
    }

    /// Number of worker threads the run will use.
    pub fn worker_count(&self) -> usize {
        self.partitions.len()
    }

    /// The fixed column partitions, one per worker.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Spawn the worker pool, run every tick, and join.
    ///
    /// # Errors
    ///
    /// - [`RunError::Config`] with `ThreadSpawnFailed` if the pool could
    ///   not be created (no tick has run).
    /// - [`RunError::Tick`] if a tick failed; the partial report holds
    ///   every tick completed before it.
    /// - [`RunError::WorkerPanicked`] if a worker died outside kernel code.
    pub fn run(self) -> Result<RunReport, RunError> {
        let Self {
            shared,
            partitions,
            tick_ms,
        } = self;
        let worker_count = partitions.len();
        let start = Instant::now();
        let handles = spawn_workers(&shared, partitions)?;
        let run = join_workers(&shared, handles)?;
        finish_run(run, worker_count, start.elapsed(), tick_ms)
    }
}

fn spawn_workers(
    shared: &Arc<TickShared>,
    partitions: Vec<Partition>,
) -> Result<Vec<JoinHandle<Option<WorkerExit>>>, ConfigError> {
    let n = partitions.len();
    let barrier = Arc::new(Barrier::new(n));
    let (go_tx, go_rx) = crossbeam_channel::bounded::<()>(n);

    let mut handles = Vec::with_capacity(n);
    for partition in partitions {
        let index = partition.index();
        let worker = Worker::new(Arc::clone(shared), Arc::clone(&barrier), partition);
        let gate = go_rx.clone();
        let spawned = thread::Builder::new()
            .name(format!("cortex-worker-{index}"))
            .spawn(move || {
                // Disconnected without a token: the pool was cancelled.
                gate.recv().ok()?;
                Some(worker.run())
            });
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                drop(go_tx);
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(ConfigError::ThreadSpawnFailed {
                    reason: format!("worker {index}: {e}"),
                });
            }
        }
    }

    for _ in 0..n {
        // Capacity is `n` and `go_rx` is still held, so this cannot fail.
        let _ = go_tx.send(());
    }
    Ok(handles)
}

fn join_workers(
    shared: &TickShared,
    handles: Vec<JoinHandle<Option<WorkerExit>>>,
) -> Result<EngineRun, RunError> {
    let mut exits = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Some(exit)) => exits.push(exit),
            Ok(None) => {}
            Err(_) => {
                panicked.get_or_insert(index);
            }
        }
    }
    if let Some(worker) = panicked {
        return Err(RunError::WorkerPanicked { worker });
    }
    Ok(EngineRun::collect(shared, exits))
}

impl std::fmt::Debug for TickEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickEngine")
            .field("workers", &self.partitions.len())
            .field("num_ticks", &self.shared.num_ticks)
            .finish()
    }
}
