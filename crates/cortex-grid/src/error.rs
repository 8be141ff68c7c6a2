//! Grid-specific error types.

use std::error::Error;
use std::fmt;

/// Errors arising from grid construction or seeding.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells.
    EmptyGrid {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// `width * height` does not fit in `usize`.
    DimensionTooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A seed or lookup coordinate lies outside the grid.
    CellOutOfBounds {
        /// The offending X coordinate.
        x: usize,
        /// The offending Y coordinate.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// A buffer does not have the expected number of cells.
    ShapeMismatch {
        /// Cells implied by the shape.
        expected: usize,
        /// Cells actually provided.
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::DimensionTooLarge { width, height } => {
                write!(f, "grid {width}x{height} overflows the address space")
            }
            Self::CellOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "cell ({x}, {y}) outside {width}x{height} grid"),
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
        }
    }
}

impl Error for GridError {}
