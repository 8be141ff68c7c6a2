//! Offset tables and zero-fill sampling shared by the built-in kernels.

use cortex_core::Energy;
use cortex_grid::SharedGrid;

use crate::kernel::Neighbours;

/// Direct neighbours in output order: W, N, S, E (as `(dx, dy)`).
pub const DIRECT_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Diagonal neighbours in output order: NW, SW, NE, SE (as `(dx, dy)`).
pub const DIAGONAL_OFFSETS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Energy at `(x + dx, y + dy)`, or `0` when that cell is off the grid.
#[inline]
pub fn sample_or_zero(grid: &SharedGrid, x: usize, y: usize, dx: isize, dy: isize) -> Energy {
    match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
        (Some(nx), Some(ny)) => grid.get(nx, ny).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Append one zero-filled sample per offset to `out`.
#[inline]
pub fn gather_offsets(
    grid: &SharedGrid,
    x: usize,
    y: usize,
    offsets: &[(isize, isize)],
    out: &mut Neighbours,
) {
    for &(dx, dy) in offsets {
        out.push(sample_or_zero(grid, x, y, dx, dy));
    }
}
