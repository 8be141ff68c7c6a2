//! Double-buffered energy storage plus the slope grid.
//!
//! [`GridPair`] owns two energy buffers that alternate between the
//! "current" (read-only this tick) and "next" (written this tick) roles,
//! and one slope buffer that is updated in place. Which buffer is current
//! is not stored in the pair: every worker holds its own [`BufferIndex`]
//! and flips it at the same point of every tick, so all workers agree on
//! the roles without sharing a mutable index.
//!
//! The lifecycle per tick is:
//! 1. read `current(front)`, write `next(front)` and `slopes()`
//! 2. inject inputs into `next(front)`
//! 3. extract observations from `next(front)`
//! 4. `front.flip()`: the written buffer becomes current

use cortex_core::Energy;

use crate::grid::{EnergyGrid, GridShape};
use crate::shared::SharedGrid;

/// Selects which of the two energy buffers of a [`GridPair`] is current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferIndex(u8);

impl BufferIndex {
    /// The buffer holding the initial state.
    pub const INITIAL: Self = Self(0);

    /// The index of the other buffer.
    #[inline]
    pub fn other(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Swap roles in place.
    #[inline]
    pub fn flip(&mut self) {
        *self = self.other();
    }

    /// The current buffer after `ticks` completed ticks.
    pub fn after_ticks(ticks: u64) -> Self {
        Self((ticks % 2) as u8)
    }
}

/// Two energy buffers and one slope buffer of identical shape.
///
/// ```text
/// buffers[0]: SharedGrid  ←─── current (even ticks) / next (odd ticks)
/// buffers[1]: SharedGrid  ←─── next (even ticks) / current (odd ticks)
/// slopes:     SharedGrid  ←─── per-cell momentum, updated in place
/// ```
#[derive(Debug)]
pub struct GridPair {
    buffers: [SharedGrid; 2],
    slopes: SharedGrid,
}

impl GridPair {
    /// Start from `initial` energies with zero slopes.
    ///
    /// `initial` becomes the current buffer for [`BufferIndex::INITIAL`];
    /// the other buffer starts zeroed.
    pub fn new(initial: &EnergyGrid) -> Self {
        let shape = initial.shape();
        Self {
            buffers: [SharedGrid::from_grid(initial), SharedGrid::zeros(shape)],
            slopes: SharedGrid::zeros(shape),
        }
    }

    /// All energies and slopes zero.
    pub fn zeroed(shape: GridShape) -> Self {
        Self {
            buffers: [SharedGrid::zeros(shape), SharedGrid::zeros(shape)],
            slopes: SharedGrid::zeros(shape),
        }
    }

    /// Grid dimensions.
    pub fn shape(&self) -> GridShape {
        self.slopes.shape()
    }

    /// The buffer read during the compute phase.
    #[inline]
    pub fn current(&self, front: BufferIndex) -> &SharedGrid {
        &self.buffers[front.0 as usize]
    }

    /// The buffer written during the compute, inject, and extract phases.
    #[inline]
    pub fn next(&self, front: BufferIndex) -> &SharedGrid {
        &self.buffers[front.other().0 as usize]
    }

    /// Per-cell slopes.
    #[inline]
    pub fn slopes(&self) -> &SharedGrid {
        &self.slopes
    }

    /// Reset both energy buffers and the slopes to zero.
    pub fn zero(&self) {
        self.buffers[0].fill(0.0);
        self.buffers[1].fill(0.0);
        self.slopes.fill(0.0);
    }

    /// Owned copy of the current energies.
    pub fn snapshot(&self, front: BufferIndex) -> EnergyGrid {
        self.current(front).to_grid()
    }

    /// Owned copy of the slopes.
    pub fn slope_snapshot(&self) -> EnergyGrid {
        self.slopes.to_grid()
    }

    /// Current energy at `(x, y)`, or `None` outside the grid.
    pub fn energy_at(&self, front: BufferIndex, x: usize, y: usize) -> Option<Energy> {
        self.current(front).get(x, y)
    }
}
