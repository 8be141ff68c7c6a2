//! Benchmark profiles and utilities for the Cortex simulator.
//!
//! Provides pre-built [`BenchProfile`]s for benchmarking:
//!
//! - [`reference_profile`]: 200x50 grid (10K cells), two sine inputs
//! - [`stress_profile`]: 1000x1000 grid (1M cells) for stress testing
//! - [`seeded_grid`]: deterministic initial energies via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cortex_core::{Energy, InputNode, ObservationNode};
use cortex_engine::{ConfigError, RunConfig, Simulation, ThreadingConfig};
use cortex_grid::{EnergyGrid, GridShape};
use cortex_signal::SineInput;

/// A complete run: configuration, initial grid, and node lists.
#[derive(Clone, Debug)]
pub struct BenchProfile {
    /// Run configuration.
    pub config: RunConfig,
    /// Initial energies.
    pub initial: EnergyGrid,
    /// Observation nodes.
    pub observations: Vec<ObservationNode>,
    /// Input nodes.
    pub inputs: Vec<InputNode>,
}

impl BenchProfile {
    /// Same profile with a different threading setup.
    pub fn with_threading(mut self, threading: ThreadingConfig) -> Self {
        self.config.threading = threading;
        self
    }

    /// Validate and prepare the run.
    pub fn simulation(self) -> Result<Simulation, ConfigError> {
        Simulation::new(self.config, self.initial, self.observations, self.inputs)
    }
}

/// Build a reference benchmark profile: 200x50 grid (10K cells).
///
/// Seeded energies in `[-1, 1)`, a 40 Hz and a 3 Hz tone at tick_ms=1,
/// and one observation on each input cell plus the centre.
pub fn reference_profile(seed: u64, num_ticks: u64) -> BenchProfile {
    let (width, height) = (200, 50);
    let cells = [(50, 25), (150, 25), (100, 25)];
    let inputs = vec![
        SineInput::new(cells[0].0, cells[0].1, 40.0)
            .build()
            .expect("40 Hz at 1 ms ticks is a valid tone"),
        SineInput::new(cells[1].0, cells[1].1, 3.0)
            .build()
            .expect("3 Hz at 1 ms ticks is a valid tone"),
    ];
    build_profile(width, height, num_ticks, seed, &cells, inputs)
}

/// Build a stress benchmark profile: 1000x1000 grid (1M cells).
///
/// Same nodes as [`reference_profile`] at 100x the cell count.
pub fn stress_profile(seed: u64, num_ticks: u64) -> BenchProfile {
    let (width, height) = (1000, 1000);
    let cells = [(250, 500), (750, 500), (500, 500)];
    let inputs = vec![
        SineInput::new(cells[0].0, cells[0].1, 40.0)
            .build()
            .expect("40 Hz at 1 ms ticks is a valid tone"),
        SineInput::new(cells[1].0, cells[1].1, 3.0)
            .build()
            .expect("3 Hz at 1 ms ticks is a valid tone"),
    ];
    build_profile(width, height, num_ticks, seed, &cells, inputs)
}

fn build_profile(
    width: usize,
    height: usize,
    num_ticks: u64,
    seed: u64,
    observed: &[(usize, usize)],
    inputs: Vec<InputNode>,
) -> BenchProfile {
    let capacity = num_ticks as usize;
    BenchProfile {
        config: RunConfig {
            progress_interval: 0,
            ..RunConfig::new(width, height, num_ticks)
        },
        initial: seeded_grid(width, height, seed),
        observations: observed
            .iter()
            .map(|&(x, y)| ObservationNode::new(x, y, capacity))
            .collect(),
        inputs,
    }
}

/// Deterministic initial energies in `[-1, 1)`.
///
/// Uses a simple LCG of the seed so profiles are reproducible across runs.
pub fn seeded_grid(width: usize, height: usize, seed: u64) -> EnergyGrid {
    let shape = GridShape::new(width, height).expect("profile dimensions are non-zero");
    let mut state = seed;
    let cells: Vec<Energy> = (0..shape.cell_count())
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            // Top 53 bits into [0, 1), then onto [-1, 1).
            (state >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
        })
        .collect();
    EnergyGrid::from_cells(shape, cells).expect("cell count matches shape")
}
