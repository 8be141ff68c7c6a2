//! Neighbourhood kernels and the node-update function.
//!
//! A [`Kernel`] gathers the neighbour energies of one cell from the current
//! grid; [`update`] turns a cell's old energy and slope plus its two
//! neighbourhoods into the new energy and slope. [`Stencil`] pairs a
//! direct and an indirect kernel and evaluates both for one cell.
//!
//! # Built-in kernels
//!
//! - [`KernelKind::DirectFour`]: `(x-1,y)`, `(x,y-1)`, `(x,y+1)`, `(x+1,y)`
//! - [`KernelKind::DiagonalFour`]: `(x-1,y-1)`, `(x-1,y+1)`, `(x+1,y-1)`, `(x+1,y+1)`
//!
//! Off-grid neighbours contribute `0`, so both always report 4 values.
//! Other neighbourhoods plug in through [`KernelSpec::Custom`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kernel;
pub mod neighbourhood;
pub mod stencil;
pub mod update;

pub use kernel::{Kernel, KernelKind, KernelSpec, Neighbours};
pub use stencil::{Stencil, StencilScratch};
pub use update::{update, NodeState};
