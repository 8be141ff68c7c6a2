//! Energy buffer shared across worker threads.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use cortex_core::Energy;

use crate::grid::{EnergyGrid, GridShape};

/// A `width × height` grid of energies that many threads may access at once.
///
/// Each cell is an `AtomicU64` holding the bit pattern of an `f64`, so
/// values round-trip bit-exactly. All accesses are `Relaxed`: the tick
/// engine guarantees that no cell is written while another thread reads it
/// and publishes writes to readers through its barriers.
pub struct SharedGrid {
    shape: GridShape,
    cells: Box<[AtomicU64]>,
}

impl SharedGrid {
    /// A shared grid with every cell set to zero.
    pub fn zeros(shape: GridShape) -> Self {
        let cells = (0..shape.cell_count())
            .map(|_| AtomicU64::new(0.0f64.to_bits()))
            .collect();
        Self { shape, cells }
    }

    /// Copy an owned grid into shared storage.
    pub fn from_grid(grid: &EnergyGrid) -> Self {
        let cells = grid
            .as_slice()
            .iter()
            .map(|v| AtomicU64::new(v.to_bits()))
            .collect();
        Self {
            shape: grid.shape(),
            cells,
        }
    }

    /// Grid dimensions.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Energy at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Energy> {
        self.shape.checked_index(x, y).map(|i| self.load_index(i))
    }

    /// Energy at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn load(&self, x: usize, y: usize) -> Energy {
        self.load_index(self.shape.index(x, y))
    }

    /// Overwrite the energy at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn store(&self, x: usize, y: usize, value: Energy) {
        self.cells[self.shape.index(x, y)].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Add `delta` to the energy at `(x, y)`.
    ///
    /// Not an atomic read-modify-write: only the thread owning the cell's
    /// column may call this during a tick.
    #[inline]
    pub fn add(&self, x: usize, y: usize, delta: Energy) {
        let i = self.shape.index(x, y);
        let sum = self.load_index(i) + delta;
        self.cells[i].store(sum.to_bits(), Ordering::Relaxed);
    }

    /// Set every cell to `value`.
    pub fn fill(&self, value: Energy) {
        let bits = value.to_bits();
        for cell in self.cells.iter() {
            cell.store(bits, Ordering::Relaxed);
        }
    }

    /// Copy the current contents into an owned grid.
    pub fn to_grid(&self) -> EnergyGrid {
        let cells = (0..self.cells.len()).map(|i| self.load_index(i)).collect();
        EnergyGrid::from_cells(self.shape, cells)
            .expect("shared grid length always matches its shape")
    }

    #[inline]
    fn load_index(&self, i: usize) -> Energy {
        f64::from_bits(self.cells[i].load(Ordering::Relaxed))
    }
}

impl fmt::Debug for SharedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedGrid")
            .field("width", &self.shape.width())
            .field("height", &self.shape.height())
            .finish()
    }
}
