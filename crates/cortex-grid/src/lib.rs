//! Grid storage for Cortex simulations.
//!
//! Energies and slopes live in flat, column-major buffers so that a
//! contiguous range of X columns maps onto a contiguous range of cells.
//!
//! # Architecture
//!
//! ```text
//! EnergyGrid   ←─── owned, plain Vec<f64>: seeding, snapshots, results
//! SharedGrid   ←─── Box<[AtomicU64]>: shared by every worker during a run
//! GridPair     ←─── two SharedGrid energy buffers (current/next) + slopes
//! BufferIndex  ←─── which of the two buffers is "current" this tick
//! ```
//!
//! Workers write only the columns of their own partition and read the
//! current buffer everywhere. Ordering between those reads and writes comes
//! from the engine's barriers, so every cell access uses `Relaxed` atomics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod pingpong;
pub mod shared;

pub use error::GridError;
pub use grid::{EnergyGrid, GridShape};
pub use pingpong::{BufferIndex, GridPair};
pub use shared::SharedGrid;
