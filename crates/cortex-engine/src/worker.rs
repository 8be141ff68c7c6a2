//! One worker's tick loop over its partition.
//!
//! Every tick runs the same phase sequence on every worker:
//!
//! ```text
//! Computing   read current, write next + slopes for own columns
//! Barrier A   leader reports progress; all check the abort flag
//! Injecting   add own inputs to next
//! Barrier B
//! Extracting  record own observations from next
//! Barrier C
//! Swapped     flip the local buffer index
//! ```
//!
//! A compute failure sets the shared abort flag before Barrier A. Every
//! worker reads the flag right after Barrier A, so all of them leave the
//! loop at the same checkpoint and no barrier is left waiting.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cortex_core::{
    ComputationError, InputNode, ObservationNode, ObservationSeries, TickError, UpdateFactors,
};
use cortex_grid::{BufferIndex, EnergyGrid, GridPair};
use cortex_kernel::{NodeState, Stencil, StencilScratch};

use crate::barrier::PhaseBarrier;
use crate::config::{validate_nodes, ConfigError, RunConfig};
use crate::partition::{partition, Partition};

/// Run-wide state shared by every worker.
pub(crate) struct TickShared {
    pub(crate) grids: GridPair,
    pub(crate) inputs: Vec<InputNode>,
    pub(crate) stencil: Stencil,
    pub(crate) factors: UpdateFactors,
    pub(crate) detect_non_finite: bool,
    pub(crate) num_ticks: u64,
    pub(crate) progress_interval: u64,
    pub(crate) abort: AtomicBool,
}

impl TickShared {
    /// Validate a run and split it into shared state plus one partition
    /// per worker.
    pub(crate) fn prepare(
        config: &RunConfig,
        initial: &EnergyGrid,
        observations: Vec<ObservationNode>,
        inputs: Vec<InputNode>,
        workers: usize,
    ) -> Result<(Arc<Self>, Vec<Partition>), ConfigError> {
        config.validate()?;
        config.validate_grid(initial)?;
        let shape = initial.shape();
        validate_nodes(shape, config.num_ticks, &observations, &inputs)?;
        let partitions = partition(shape.width(), workers, observations, &inputs)?;
        let shared = Self {
            grids: GridPair::new(initial),
            inputs,
            stencil: config.stencil(),
            factors: config.factors,
            detect_non_finite: config.detect_non_finite,
            num_ticks: config.num_ticks,
            progress_interval: config.progress_interval,
            abort: AtomicBool::new(false),
        };
        Ok((Arc::new(shared), partitions))
    }
}

/// How a single tick ended for one worker.
#[derive(Debug)]
pub(crate) enum TickStatus {
    /// All phases ran and the buffers were swapped.
    Completed,
    /// Another worker failed; this one stopped after Barrier A.
    Aborted,
    /// This worker's compute phase failed.
    Failed(TickError),
}

/// What a worker hands back when its loop ends.
#[derive(Debug)]
pub(crate) struct WorkerExit {
    pub(crate) index: usize,
    pub(crate) ticks_completed: u64,
    pub(crate) observations: Vec<(usize, ObservationNode)>,
    pub(crate) failure: Option<TickError>,
}

/// The combined result of every worker's loop.
#[derive(Debug)]
pub(crate) struct EngineRun {
    pub(crate) ticks_completed: u64,
    pub(crate) observations: Vec<ObservationSeries>,
    pub(crate) final_grid: EnergyGrid,
    pub(crate) failure: Option<TickError>,
}

impl EngineRun {
    /// Merge worker exits: observations back in caller order, the lowest
    /// failing worker's error, and the last fully completed grid.
    pub(crate) fn collect(shared: &TickShared, mut exits: Vec<WorkerExit>) -> Self {
        exits.sort_by_key(|e| e.index);
        let ticks_completed = exits.iter().map(|e| e.ticks_completed).min().unwrap_or(0);
        let failure = exits.iter_mut().find_map(|e| e.failure.take());

        let mut tagged: Vec<(usize, ObservationNode)> =
            exits.into_iter().flat_map(|e| e.observations).collect();
        tagged.sort_by_key(|(i, _)| *i);
        let observations = tagged
            .into_iter()
            .map(|(_, node)| node.into_series())
            .collect();

        let final_grid = shared
            .grids
            .snapshot(BufferIndex::after_ticks(ticks_completed));
        Self {
            ticks_completed,
            observations,
            final_grid,
            failure,
        }
    }
}

pub(crate) struct Worker<B> {
    shared: Arc<TickShared>,
    barrier: B,
    partition: Partition,
    front: BufferIndex,
    scratch: StencilScratch,
}

impl<B: PhaseBarrier> Worker<B> {
    pub(crate) fn new(shared: Arc<TickShared>, barrier: B, partition: Partition) -> Self {
        Self {
            shared,
            barrier,
            partition,
            front: BufferIndex::INITIAL,
            scratch: StencilScratch::new(),
        }
    }

    pub(crate) fn front(&self) -> BufferIndex {
        self.front
    }

    pub(crate) fn shared(&self) -> &Arc<TickShared> {
        &self.shared
    }

    pub(crate) fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Run ticks `0..num_ticks` until done or aborted.
    pub(crate) fn run(mut self) -> WorkerExit {
        let mut ticks_completed = 0;
        let mut failure = None;
        for tick in 0..self.shared.num_ticks {
            match self.execute_tick(tick) {
                TickStatus::Completed => ticks_completed += 1,
                TickStatus::Aborted => break,
                TickStatus::Failed(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        self.finish(ticks_completed, failure)
    }

    pub(crate) fn finish(self, ticks_completed: u64, failure: Option<TickError>) -> WorkerExit {
        WorkerExit {
            index: self.partition.index(),
            ticks_completed,
            observations: self.partition.into_observations(),
            failure,
        }
    }

    /// Run all phases of `tick` for this partition.
    pub(crate) fn execute_tick(&mut self, tick: u64) -> TickStatus {
        let failure = self.compute().err();
        if failure.is_some() {
            self.shared.abort.store(true, Ordering::Relaxed);
        }

        // ── Barrier A ──
        let leader = self.barrier.wait();
        if self.shared.abort.load(Ordering::Relaxed) {
            return match failure {
                Some(kind) => TickStatus::Failed(TickError {
                    tick,
                    worker: self.partition.index(),
                    kind,
                }),
                None => TickStatus::Aborted,
            };
        }
        if leader {
            self.report_progress(tick);
        }

        self.inject(tick);

        // ── Barrier B ──
        self.barrier.wait();

        self.extract(tick);

        // ── Barrier C ──
        self.barrier.wait();

        self.front.flip();
        TickStatus::Completed
    }

    fn compute(&mut self) -> Result<(), ComputationError> {
        let shared = &*self.shared;
        let current = shared.grids.current(self.front);
        let next = shared.grids.next(self.front);
        let slopes = shared.grids.slopes();
        let height = current.shape().height();

        for x in self.partition.columns() {
            for y in 0..height {
                let old = NodeState::new(current.load(x, y), slopes.load(x, y));
                let scratch = &mut self.scratch;
                let evaluated = panic::catch_unwind(AssertUnwindSafe(|| {
                    shared
                        .stencil
                        .evaluate(current, x, y, old, &shared.factors, scratch)
                }));
                let new = match evaluated {
                    Ok(result) => result?,
                    Err(payload) => {
                        return Err(ComputationError::KernelPanicked {
                            x,
                            y,
                            message: panic_message(payload.as_ref()),
                        })
                    }
                };
                if shared.detect_non_finite && !new.is_finite() {
                    let value = if new.value.is_finite() {
                        new.slope
                    } else {
                        new.value
                    };
                    return Err(ComputationError::NonFiniteValue { x, y, value });
                }
                next.store(x, y, new.value);
                slopes.store(x, y, new.slope);
            }
        }
        Ok(())
    }

    fn inject(&self, tick: u64) {
        let next = self.shared.grids.next(self.front);
        for &i in self.partition.input_indices() {
            let input = &self.shared.inputs[i];
            next.add(input.x(), input.y(), input.value_at(tick));
        }
    }

    fn extract(&mut self, tick: u64) {
        let next = self.shared.grids.next(self.front);
        for (_, node) in self.partition.observations_mut() {
            node.record(tick, next.load(node.x(), node.y()));
        }
    }

    fn report_progress(&self, tick: u64) {
        let interval = self.shared.progress_interval;
        if interval > 0 && tick % interval == 0 {
            tracing::debug!(tick, total = self.shared.num_ticks, "tick progress");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
