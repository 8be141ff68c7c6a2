//! Barrier-synchronised tick engine for Cortex energy grids.
//!
//! A run advances a `width × height` grid of energies tick by tick. The
//! grid is split into contiguous column ranges, one per worker, and every
//! tick runs the same phases on every worker:
//!
//! ```text
//! compute ──▶ Barrier A ──▶ inject ──▶ Barrier B ──▶ extract ──▶ Barrier C ──▶ swap
//! ```
//!
//! - **compute**: kernels + node update read the current buffer and write
//!   the next buffer and the slopes, for the worker's own columns only
//! - **inject**: the worker's input nodes add `series[tick % period]` to
//!   the next buffer
//! - **extract**: the worker's observation nodes record the next buffer
//! - **swap**: every worker flips its local buffer index identically
//!
//! [`Simulation`] is the entry point. It validates a [`RunConfig`] and
//! picks [`TickEngine`] (one thread per partition) or [`SequentialEngine`]
//! (one partition, no barrier waits). Both produce bit-identical results.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod barrier;
pub mod config;
pub mod driver;
pub mod engine;
pub mod metrics;
pub mod partition;
pub mod report;
pub mod sequential;
mod worker;

pub use barrier::{NoopBarrier, PhaseBarrier};
pub use config::{validate_nodes, ConfigError, NodeKind, RunConfig, ThreadingConfig};
pub use driver::Simulation;
pub use engine::TickEngine;
pub use metrics::RunMetrics;
pub use partition::{column_ranges, partition, Partition};
pub use report::{RunError, RunReport};
pub use sequential::SequentialEngine;
