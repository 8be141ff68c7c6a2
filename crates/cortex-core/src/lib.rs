//! Core types and error kinds for the Cortex energy-grid simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! value types shared by every other crate in the workspace: the energy
//! scalar, observation and input nodes, the run-wide update factors, and
//! the computation/tick error kinds reported by the tick engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod factors;
pub mod node;

pub use error::{ComputationError, TickError};
pub use factors::UpdateFactors;
pub use node::{InputNode, ObservationNode, ObservationSeries};

/// Scalar energy level stored per grid cell.
pub type Energy = f64;
