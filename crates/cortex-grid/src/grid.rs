//! Grid dimensions and the owned energy grid.

use cortex_core::Energy;

use crate::error::GridError;

/// Dimensions of a rectangular grid.
///
/// Cells are laid out column-major: `index(x, y) = x * height + y`, so
/// every X column is one contiguous run of `height` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    width: usize,
    height: usize,
}

impl GridShape {
    /// Validate and build a shape.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is zero, or
    /// `Err(GridError::DimensionTooLarge)` if the cell count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        if width.checked_mul(height).is_none() {
            return Err(GridError::DimensionTooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns (X dimension).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (Y dimension).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Flat index of `(x, y)`. Does not bounds-check.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Flat index of `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn checked_index(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| self.index(x, y))
    }

    pub(crate) fn out_of_bounds(&self, x: usize, y: usize) -> GridError {
        GridError::CellOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// An owned `width × height` grid of energies.
///
/// Used to seed a run and to hand snapshots back to the caller. The tick
/// engine itself works on [`SharedGrid`](crate::SharedGrid) buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyGrid {
    shape: GridShape,
    cells: Vec<Energy>,
}

impl EnergyGrid {
    /// A grid with every cell set to zero.
    pub fn zeros(width: usize, height: usize) -> Result<Self, GridError> {
        let shape = GridShape::new(width, height)?;
        Ok(Self {
            shape,
            cells: vec![0.0; shape.cell_count()],
        })
    }

    /// A zero grid with the listed `(x, y, value)` seeds applied.
    ///
    /// Later seeds for the same cell overwrite earlier ones.
    pub fn seeded(
        width: usize,
        height: usize,
        seeds: &[(usize, usize, Energy)],
    ) -> Result<Self, GridError> {
        let mut grid = Self::zeros(width, height)?;
        for &(x, y, value) in seeds {
            grid.set(x, y, value)?;
        }
        Ok(grid)
    }

    /// Wrap an existing column-major buffer.
    pub fn from_cells(shape: GridShape, cells: Vec<Energy>) -> Result<Self, GridError> {
        if cells.len() != shape.cell_count() {
            return Err(GridError::ShapeMismatch {
                expected: shape.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { shape, cells })
    }

    /// Grid dimensions.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.shape.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Energy at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Energy> {
        self.shape.checked_index(x, y).map(|i| self.cells[i])
    }

    /// Overwrite the energy at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: Energy) -> Result<(), GridError> {
        let i = self
            .shape
            .checked_index(x, y)
            .ok_or_else(|| self.shape.out_of_bounds(x, y))?;
        self.cells[i] = value;
        Ok(())
    }

    /// All cells in column-major order.
    pub fn as_slice(&self) -> &[Energy] {
        &self.cells
    }

    /// The `height` cells of column `x`.
    pub fn column(&self, x: usize) -> Option<&[Energy]> {
        (x < self.width()).then(|| {
            let start = self.shape.index(x, 0);
            &self.cells[start..start + self.height()]
        })
    }

    /// Sum of all cell energies.
    pub fn total_energy(&self) -> Energy {
        self.cells.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_rejects_empty() {
        assert_eq!(
            GridShape::new(0, 4),
            Err(GridError::EmptyGrid {
                width: 0,
                height: 4
            })
        );
        assert!(GridShape::new(3, 0).is_err());
    }

    #[test]
    fn shape_rejects_overflow() {
        match GridShape::new(usize::MAX, 2) {
            Err(GridError::DimensionTooLarge { .. }) => {}
            other => panic!("expected DimensionTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn index_is_column_major() {
        let shape = GridShape::new(3, 4).unwrap();
        assert_eq!(shape.index(0, 0), 0);
        assert_eq!(shape.index(0, 3), 3);
        assert_eq!(shape.index(1, 0), 4);
        assert_eq!(shape.index(2, 3), 11);
        assert_eq!(shape.checked_index(3, 0), None);
    }

    #[test]
    fn seeded_sets_only_listed_cells() {
        let grid = EnergyGrid::seeded(3, 3, &[(1, 1, 10.0), (0, 2, -1.0)]).unwrap();
        assert_eq!(grid.get(1, 1), Some(10.0));
        assert_eq!(grid.get(0, 2), Some(-1.0));
        assert_eq!(grid.total_energy(), 9.0);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn seeded_rejects_out_of_bounds_seed() {
        match EnergyGrid::seeded(2, 2, &[(2, 0, 1.0)]) {
            Err(GridError::CellOutOfBounds { x: 2, y: 0, .. }) => {}
            other => panic!("expected CellOutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn column_is_contiguous() {
        let grid = EnergyGrid::seeded(2, 3, &[(1, 0, 1.0), (1, 2, 3.0)]).unwrap();
        assert_eq!(grid.column(1), Some(&[1.0, 0.0, 3.0][..]));
        assert_eq!(grid.column(2), None);
    }

    #[test]
    fn from_cells_checks_length() {
        let shape = GridShape::new(2, 2).unwrap();
        assert!(EnergyGrid::from_cells(shape, vec![0.0; 4]).is_ok());
        assert_eq!(
            EnergyGrid::from_cells(shape, vec![0.0; 3]),
            Err(GridError::ShapeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
