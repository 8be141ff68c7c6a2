//! Run configuration, validation, and error types.
//!
//! [`RunConfig`] is the builder-input for a simulation run.
//! [`validate()`](RunConfig::validate) checks every structural invariant
//! before any worker thread is spawned; node lists are checked against the
//! grid by [`validate_nodes()`].

use std::error::Error;
use std::fmt;

use cortex_core::{InputNode, ObservationNode, UpdateFactors};
use cortex_grid::{EnergyGrid, GridError, GridShape};
use cortex_kernel::{KernelKind, KernelSpec, Stencil};

// ── ThreadingConfig ────────────────────────────────────────────────

/// How many worker threads a run uses.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreadingConfig {
    /// Run partitions on worker threads. `false` forces the sequential
    /// engine. Default: `true`.
    pub multithreading: bool,
    /// Scale applied to the hardware parallelism when `worker_count` is
    /// `None`. Default: `1.0`.
    pub thread_factor: f64,
    /// Explicit worker count. `None` = auto-detect.
    pub worker_count: Option<usize>,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            multithreading: true,
            thread_factor: 1.0,
            worker_count: None,
        }
    }
}

impl ThreadingConfig {
    /// Single worker, no threads.
    pub fn sequential() -> Self {
        Self {
            multithreading: false,
            ..Self::default()
        }
    }

    /// Exactly `workers` worker threads.
    pub fn fixed(workers: usize) -> Self {
        Self {
            worker_count: Some(workers),
            ..Self::default()
        }
    }

    /// Resolve the worker count for a grid `width` columns wide.
    ///
    /// Multithreading off yields 1. An explicit count is returned as-is
    /// (range-checked by [`RunConfig::validate`]). Otherwise the hardware
    /// parallelism is scaled by `thread_factor`, rounded, and clamped to
    /// `[1, width]`.
    pub fn resolved_worker_count(&self, width: usize) -> usize {
        if !self.multithreading {
            return 1;
        }
        match self.worker_count {
            Some(n) => n,
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                let scaled = (cpus as f64 * self.thread_factor).round();
                // Saturating float-to-int cast; NaN maps to 0.
                (scaled as usize).clamp(1, width.max(1))
            }
        }
    }
}

// ── NodeKind ───────────────────────────────────────────────────────

/// Which node list a configuration error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// An [`ObservationNode`].
    Observation,
    /// An [`InputNode`].
    Input,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Observation => f.write_str("observation"),
            Self::Input => f.write_str("input"),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected before the first tick.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions are invalid.
    Grid(GridError),
    /// The initial grid does not have the configured dimensions.
    GridShapeMismatch {
        /// Configured `(width, height)`.
        expected: (usize, usize),
        /// Dimensions of the supplied grid.
        actual: (usize, usize),
    },
    /// An explicit worker count of zero.
    ZeroWorkers,
    /// More workers than grid columns.
    TooManyWorkers {
        /// Requested worker count.
        workers: usize,
        /// Grid width.
        width: usize,
    },
    /// An update factor is NaN or infinite.
    InvalidFactor {
        /// Configuration name of the factor.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// `thread_factor` is NaN, infinite, zero, or negative.
    InvalidThreadFactor {
        /// The invalid value.
        value: f64,
    },
    /// `tick_ms` is NaN, infinite, zero, or negative.
    InvalidTickLength {
        /// The invalid value.
        value: f64,
    },
    /// A node lies outside the grid.
    NodeOutOfBounds {
        /// Which list the node came from.
        kind: NodeKind,
        /// Position of the node in its list.
        index: usize,
        /// X coordinate of the node.
        x: usize,
        /// Y coordinate of the node.
        y: usize,
    },
    /// An input node has no samples.
    EmptyInputSeries {
        /// Position of the input in its list.
        index: usize,
    },
    /// An input series contains a NaN or infinite sample.
    NonFiniteInput {
        /// Position of the input in its list.
        index: usize,
        /// Position of the sample within the series.
        sample: usize,
    },
    /// An observation node cannot hold one value per tick.
    ObservationCapacity {
        /// Position of the observation in its list.
        index: usize,
        /// The node's capacity.
        capacity: usize,
        /// Configured tick count.
        ticks: u64,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::GridShapeMismatch { expected, actual } => write!(
                f,
                "initial grid is {}x{}, configured {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::ZeroWorkers => write!(f, "worker_count must be at least 1"),
            Self::TooManyWorkers { workers, width } => {
                write!(f, "{workers} workers exceed grid width {width}")
            }
            Self::InvalidFactor { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            Self::InvalidThreadFactor { value } => {
                write!(f, "thread_factor must be finite and positive, got {value}")
            }
            Self::InvalidTickLength { value } => {
                write!(f, "tick_ms must be finite and positive, got {value}")
            }
            Self::NodeOutOfBounds { kind, index, x, y } => {
                write!(f, "{kind} node {index} at ({x}, {y}) is outside the grid")
            }
            Self::EmptyInputSeries { index } => {
                write!(f, "input node {index} has an empty series")
            }
            Self::NonFiniteInput { index, sample } => {
                write!(f, "input node {index} has a non-finite value at sample {sample}")
            }
            Self::ObservationCapacity {
                index,
                capacity,
                ticks,
            } => write!(
                f,
                "observation node {index} holds {capacity} values, run has {ticks} ticks"
            ),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Everything a run needs besides the initial grid and the node lists.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of grid columns. Default: 200.
    pub width: usize,
    /// Number of grid rows. Default: 50.
    pub height: usize,
    /// Ticks to execute. Default: 1000.
    pub num_ticks: u64,
    /// Simulated milliseconds per tick. Default: 1.0.
    pub tick_ms: f64,
    /// Node-update constants.
    pub factors: UpdateFactors,
    /// Worker thread selection.
    pub threading: ThreadingConfig,
    /// Kernel producing the direct neighbours. Default: [`KernelKind::DirectFour`].
    pub direct_kernel: KernelSpec,
    /// Kernel producing the indirect neighbours. Default: [`KernelKind::DiagonalFour`].
    pub indirect_kernel: KernelSpec,
    /// Abort the run when a computed value or slope is NaN or infinite.
    /// Default: `false`.
    pub detect_non_finite: bool,
    /// Emit a progress event every this many ticks; 0 disables. Default: 100.
    pub progress_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 50,
            num_ticks: 1000,
            tick_ms: 1.0,
            factors: UpdateFactors::default(),
            threading: ThreadingConfig::default(),
            direct_kernel: KernelKind::DirectFour.into(),
            indirect_kernel: KernelKind::DiagonalFour.into(),
            detect_non_finite: false,
            progress_interval: 100,
        }
    }
}

impl RunConfig {
    /// Default configuration for a `width × height` grid.
    pub fn new(width: usize, height: usize, num_ticks: u64) -> Self {
        Self {
            width,
            height,
            num_ticks,
            ..Self::default()
        }
    }

    /// Validated grid dimensions.
    pub fn shape(&self) -> Result<GridShape, ConfigError> {
        Ok(GridShape::new(self.width, self.height)?)
    }

    /// The configured kernel pair.
    pub fn stencil(&self) -> Stencil {
        Stencil::new(self.direct_kernel.clone(), self.indirect_kernel.clone())
    }

    /// Worker count this configuration resolves to.
    pub fn worker_count(&self) -> usize {
        self.threading.resolved_worker_count(self.width)
    }

    /// Check structural invariants. Called before any thread is spawned.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: empty or oversized grid, a
    /// non-finite update factor, a bad `thread_factor` or `tick_ms`, or an
    /// explicit worker count of zero or above the grid width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shape = self.shape()?;
        if let Some((name, value)) = self.factors.first_non_finite() {
            return Err(ConfigError::InvalidFactor { name, value });
        }
        let thread_factor = self.threading.thread_factor;
        if !thread_factor.is_finite() || thread_factor <= 0.0 {
            return Err(ConfigError::InvalidThreadFactor {
                value: thread_factor,
            });
        }
        if !self.tick_ms.is_finite() || self.tick_ms <= 0.0 {
            return Err(ConfigError::InvalidTickLength {
                value: self.tick_ms,
            });
        }
        if self.threading.multithreading {
            match self.threading.worker_count {
                Some(0) => return Err(ConfigError::ZeroWorkers),
                Some(workers) if workers > shape.width() => {
                    return Err(ConfigError::TooManyWorkers {
                        workers,
                        width: shape.width(),
                    })
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Check that `initial` has the configured dimensions.
    pub fn validate_grid(&self, initial: &EnergyGrid) -> Result<(), ConfigError> {
        if (initial.width(), initial.height()) != (self.width, self.height) {
            return Err(ConfigError::GridShapeMismatch {
                expected: (self.width, self.height),
                actual: (initial.width(), initial.height()),
            });
        }
        Ok(())
    }
}

/// Check the node lists against the grid and the tick count.
///
/// # Errors
///
/// Returns the first node that lies outside `shape`, the first input with
/// an empty or non-finite series, or the first observation whose capacity
/// is smaller than `num_ticks`.
pub fn validate_nodes(
    shape: GridShape,
    num_ticks: u64,
    observations: &[ObservationNode],
    inputs: &[InputNode],
) -> Result<(), ConfigError> {
    for (index, node) in observations.iter().enumerate() {
        if !shape.contains(node.x(), node.y()) {
            return Err(ConfigError::NodeOutOfBounds {
                kind: NodeKind::Observation,
                index,
                x: node.x(),
                y: node.y(),
            });
        }
        if (node.capacity() as u64) < num_ticks {
            return Err(ConfigError::ObservationCapacity {
                index,
                capacity: node.capacity(),
                ticks: num_ticks,
            });
        }
    }
    for (index, node) in inputs.iter().enumerate() {
        if !shape.contains(node.x(), node.y()) {
            return Err(ConfigError::NodeOutOfBounds {
                kind: NodeKind::Input,
                index,
                x: node.x(),
                y: node.y(),
            });
        }
        if node.period() == 0 {
            return Err(ConfigError::EmptyInputSeries { index });
        }
        if let Some(sample) = node.series().iter().position(|v| !v.is_finite()) {
            return Err(ConfigError::NonFiniteInput { index, sample });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_kernel::Kernel;

    #[test]
    fn default_config_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stencil().direct().name(), "direct4");
    }

    #[test]
    fn empty_grid_is_rejected() {
        match RunConfig::new(0, 10, 5).validate() {
            Err(ConfigError::Grid(GridError::EmptyGrid { .. })) => {}
            other => panic!("expected Grid(EmptyGrid), got {other:?}"),
        }
    }

    #[test]
    fn non_finite_factor_is_rejected() {
        let mut config = RunConfig::default();
        config.factors.delta_factor = f64::NAN;
        match config.validate() {
            Err(ConfigError::InvalidFactor {
                name: "delta_factor",
                ..
            }) => {}
            other => panic!("expected InvalidFactor, got {other:?}"),
        }
    }

    #[test]
    fn bad_thread_factor_is_rejected() {
        let mut config = RunConfig::default();
        config.threading.thread_factor = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThreadFactor { value: 0.0 })
        );
    }

    #[test]
    fn bad_tick_length_is_rejected() {
        let config = RunConfig {
            tick_ms: -1.0,
            ..RunConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTickLength { value: -1.0 })
        );
    }

    #[test]
    fn more_workers_than_columns_is_rejected() {
        let config = RunConfig {
            threading: ThreadingConfig::fixed(5),
            ..RunConfig::new(4, 4, 1)
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyWorkers {
                workers: 5,
                width: 4
            })
        );
    }

    #[test]
    fn zero_workers_is_rejected() {
        let config = RunConfig {
            threading: ThreadingConfig::fixed(0),
            ..RunConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWorkers));
    }

    #[test]
    fn worker_count_is_ignored_when_sequential() {
        let config = RunConfig {
            threading: ThreadingConfig {
                worker_count: Some(1000),
                ..ThreadingConfig::sequential()
            },
            ..RunConfig::new(4, 4, 1)
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.worker_count(), 1);
    }

    #[test]
    fn auto_worker_count_is_clamped_to_width() {
        let threading = ThreadingConfig {
            thread_factor: 1000.0,
            ..ThreadingConfig::default()
        };
        assert_eq!(threading.resolved_worker_count(3), 3);
        let tiny = ThreadingConfig {
            thread_factor: 1.0e-9,
            ..ThreadingConfig::default()
        };
        assert_eq!(tiny.resolved_worker_count(64), 1);
    }

    #[test]
    fn explicit_worker_count_is_used() {
        assert_eq!(ThreadingConfig::fixed(3).resolved_worker_count(10), 3);
    }

    #[test]
    fn grid_shape_must_match() {
        let config = RunConfig::new(3, 3, 1);
        let grid = EnergyGrid::zeros(3, 4).unwrap();
        assert_eq!(
            config.validate_grid(&grid),
            Err(ConfigError::GridShapeMismatch {
                expected: (3, 3),
                actual: (3, 4)
            })
        );
    }

    #[test]
    fn nodes_are_checked() {
        let shape = GridShape::new(4, 4).unwrap();
        let short = [ObservationNode::new(0, 0, 2)];
        assert_eq!(
            validate_nodes(shape, 3, &short, &[]),
            Err(ConfigError::ObservationCapacity {
                index: 0,
                capacity: 2,
                ticks: 3
            })
        );

        let outside = [InputNode::new(1, 1, vec![1.0]), InputNode::new(4, 0, vec![1.0])];
        assert_eq!(
            validate_nodes(shape, 3, &[], &outside),
            Err(ConfigError::NodeOutOfBounds {
                kind: NodeKind::Input,
                index: 1,
                x: 4,
                y: 0
            })
        );

        let empty = [InputNode::new(0, 0, Vec::new())];
        assert_eq!(
            validate_nodes(shape, 3, &[], &empty),
            Err(ConfigError::EmptyInputSeries { index: 0 })
        );
    }

    #[test]
    fn non_finite_input_samples_are_rejected() {
        let shape = GridShape::new(4, 4).unwrap();
        let inputs = [
            InputNode::new(0, 0, vec![0.5, -0.5]),
            InputNode::new(1, 1, vec![0.0, 1.0, f64::NAN]),
        ];
        assert_eq!(
            validate_nodes(shape, 3, &[], &inputs),
            Err(ConfigError::NonFiniteInput {
                index: 1,
                sample: 2
            })
        );

        let infinite = [InputNode::new(2, 2, vec![f64::NEG_INFINITY])];
        let err = validate_nodes(shape, 3, &[], &infinite).unwrap_err();
        assert_eq!(err.to_string(), "input node 0 has a non-finite value at sample 0");
    }

    #[test]
    fn display_includes_context() {
        let err = ConfigError::NodeOutOfBounds {
            kind: NodeKind::Observation,
            index: 2,
            x: 9,
            y: 1,
        };
        assert_eq!(err.to_string(), "observation node 2 at (9, 1) is outside the grid");
    }
}
