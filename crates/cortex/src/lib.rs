//! Cortex: a barrier-synchronised 2-D energy-grid simulator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Cortex sub-crates. For most users, adding `cortex` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cortex::prelude::*;
//!
//! // A 3×3 grid with a single peak in the middle.
//! let initial = EnergyGrid::seeded(3, 3, &[(1, 1, 10.0)]).unwrap();
//!
//! // Watch the peak and feed a 40 Hz tone into a corner.
//! let observations = vec![ObservationNode::new(1, 1, 2)];
//! let inputs = vec![SineInput::new(0, 0, 40.0).build().unwrap()];
//!
//! let config = RunConfig {
//!     threading: ThreadingConfig::fixed(3),
//!     ..RunConfig::new(3, 3, 2)
//! };
//! let report = Simulation::new(config, initial, observations, inputs)
//!     .unwrap()
//!     .run()
//!     .unwrap();
//! assert_eq!(report.metrics.ticks_completed, 2);
//! assert_eq!(report.observations[0].values()[0], -10.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cortex-core` | Energy, nodes, update factors, error kinds |
//! | [`grid`] | `cortex-grid` | Owned and shared grids, double buffering |
//! | [`kernel`] | `cortex-kernel` | Neighbourhood kernels and the node update |
//! | [`engine`] | `cortex-engine` | Configuration, partitioning, tick engines |
//! | [`signal`] | `cortex-signal` | Sine and frame input generation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and error kinds (`cortex-core`).
///
/// Contains [`types::ObservationNode`], [`types::InputNode`],
/// [`types::UpdateFactors`], and the per-cell [`types::ComputationError`].
pub use cortex_core as types;

/// Grid storage (`cortex-grid`).
///
/// [`grid::EnergyGrid`] for seeding and results, [`grid::GridPair`] for the
/// double-buffered state shared by workers during a run.
pub use cortex_grid as grid;

/// Neighbourhood kernels and the node update (`cortex-kernel`).
///
/// The [`kernel::Kernel`] trait is the extension point for custom
/// neighbourhoods.
pub use cortex_kernel as kernel;

/// Tick engines (`cortex-engine`).
///
/// [`engine::Simulation`] picks between [`engine::TickEngine`] and
/// [`engine::SequentialEngine`].
pub use cortex_engine as engine;

/// Input-signal generation (`cortex-signal`).
pub use cortex_signal as signal;

/// Common imports for typical Cortex usage.
///
/// ```rust
/// use cortex::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cortex_core::{Energy, InputNode, ObservationNode, ObservationSeries, UpdateFactors};

    // Errors
    pub use cortex_core::{ComputationError, TickError};
    pub use cortex_engine::{ConfigError, RunError};

    // Grid
    pub use cortex_grid::{EnergyGrid, GridShape};

    // Kernels
    pub use cortex_kernel::{Kernel, KernelKind, KernelSpec, Neighbours};

    // Engine
    pub use cortex_engine::{
        RunConfig, RunMetrics, RunReport, SequentialEngine, Simulation, ThreadingConfig,
        TickEngine,
    };

    // Signals
    pub use cortex_signal::{frame_series, intensity_to_hz, parse_series, SineInput};
}
