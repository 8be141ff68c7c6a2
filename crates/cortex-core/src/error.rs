//! Error types raised while a tick is executing.
//!
//! Configuration problems are detected before the first tick and live in
//! `cortex-engine`; this module only covers failures that can surface from
//! inside the compute phase of a running tick.

use std::error::Error;
use std::fmt;

/// A failure reported by a kernel or by the node-update step for one cell.
///
/// The built-in kernels and the update function never fail. This kind is
/// reserved for plugin kernels and for opt-in non-finite detection.
///
/// Not `Eq`: [`NonFiniteValue`](Self::NonFiniteValue) may carry a NaN.
#[derive(Clone, Debug, PartialEq)]
pub enum ComputationError {
    /// A kernel could not produce the neighbourhood of a cell.
    KernelFailed {
        /// Name of the failing kernel.
        kernel: String,
        /// X coordinate of the cell being computed.
        x: usize,
        /// Y coordinate of the cell being computed.
        y: usize,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The node update produced a NaN or infinite energy or slope.
    NonFiniteValue {
        /// X coordinate of the cell.
        x: usize,
        /// Y coordinate of the cell.
        y: usize,
        /// The offending value.
        value: f64,
    },
    /// A kernel panicked while gathering the neighbourhood of a cell.
    KernelPanicked {
        /// X coordinate of the cell being computed.
        x: usize,
        /// Y coordinate of the cell being computed.
        y: usize,
        /// The panic message, if it was a string.
        message: String,
    },
}

impl ComputationError {
    /// The `(x, y)` cell the failure was reported for.
    pub fn cell(&self) -> (usize, usize) {
        match self {
            Self::KernelFailed { x, y, .. }
            | Self::NonFiniteValue { x, y, .. }
            | Self::KernelPanicked { x, y, .. } => (*x, *y),
        }
    }
}

impl fmt::Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KernelFailed {
                kernel,
                x,
                y,
                reason,
            } => write!(f, "kernel '{kernel}' failed at ({x}, {y}): {reason}"),
            Self::NonFiniteValue { x, y, value } => {
                write!(f, "non-finite value {value} at ({x}, {y})")
            }
            Self::KernelPanicked { x, y, message } => {
                write!(f, "kernel panicked at ({x}, {y}): {message}")
            }
        }
    }
}

impl Error for ComputationError {}

/// A computation failure tagged with the tick and partition it occurred in.
///
/// Returned by the tick engine to the driver. The run stops issuing ticks
/// once this is raised; state written during the failing tick is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct TickError {
    /// Zero-based index of the tick that failed.
    pub tick: u64,
    /// Index of the partition (worker) that reported the failure.
    pub worker: usize,
    /// The underlying failure.
    pub kind: ComputationError,
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {} failed in worker {}: {}",
            self.tick, self.worker, self.kind
        )
    }
}

impl Error for TickError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_failed_display_names_kernel_and_cell() {
        let err = ComputationError::KernelFailed {
            kernel: "hex6".to_string(),
            x: 3,
            y: 7,
            reason: "malformed offsets".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("hex6"));
        assert!(msg.contains("(3, 7)"));
        assert!(msg.contains("malformed offsets"));
        assert_eq!(err.cell(), (3, 7));
    }

    #[test]
    fn tick_error_chains_source() {
        let err = TickError {
            tick: 12,
            worker: 2,
            kind: ComputationError::NonFiniteValue {
                x: 0,
                y: 1,
                value: f64::NAN,
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("tick 12 failed in worker 2"));
        assert!(err.source().is_some());
    }
}
