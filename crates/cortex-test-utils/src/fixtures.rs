//! Reusable kernel test fixtures.
//!
//! - [`FixedKernel`]: reports the same neighbour list for every cell.
//! - [`FailingKernel`]: behaves like a built-in kernel until a chosen cell
//!   has been gathered N times, then fails.
//! - [`NanKernel`]: reports a NaN neighbour at one cell.

use std::sync::atomic::{AtomicUsize, Ordering};

use cortex_core::ComputationError;
use cortex_grid::SharedGrid;
use cortex_kernel::{Kernel, KernelKind, Neighbours};

/// Reports `values` for every cell, ignoring the grid.
///
/// The neighbour count is `values.len()`, so this also exercises
/// variable-size neighbourhoods.
pub struct FixedKernel {
    pub values: Vec<f64>,
}

impl FixedKernel {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl Kernel for FixedKernel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn gather(
        &self,
        _grid: &SharedGrid,
        _x: usize,
        _y: usize,
        out: &mut Neighbours,
    ) -> Result<(), ComputationError> {
        out.extend_from_slice(&self.values);
        Ok(())
    }
}

/// Delegates to `inner` until cell `(x, y)` has been gathered
/// `succeed_times` times, then fails on every later gather of that cell.
///
/// Each cell is gathered once per tick, so `succeed_times = n` makes the
/// run fail during tick `n`.
pub struct FailingKernel {
    inner: KernelKind,
    x: usize,
    y: usize,
    succeed_times: usize,
    calls: AtomicUsize,
}

impl FailingKernel {
    pub fn new(inner: KernelKind, x: usize, y: usize, succeed_times: usize) -> Self {
        Self {
            inner,
            x,
            y,
            succeed_times,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of gathers of the target cell so far, including the failing ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Kernel for FailingKernel {
    fn name(&self) -> &str {
        "failing"
    }

    fn gather(
        &self,
        grid: &SharedGrid,
        x: usize,
        y: usize,
        out: &mut Neighbours,
    ) -> Result<(), ComputationError> {
        if (x, y) == (self.x, self.y) {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n >= self.succeed_times {
                return Err(ComputationError::KernelFailed {
                    kernel: self.name().to_string(),
                    x,
                    y,
                    reason: format!("fixture failure after {} gathers", self.succeed_times),
                });
            }
        }
        self.inner.gather(grid, x, y, out)
    }
}

/// Delegates to `inner` but reports NaN as the first neighbour of `(x, y)`.
pub struct NanKernel {
    inner: KernelKind,
    x: usize,
    y: usize,
}

impl NanKernel {
    pub fn new(inner: KernelKind, x: usize, y: usize) -> Self {
        Self { inner, x, y }
    }
}

impl Kernel for NanKernel {
    fn name(&self) -> &str {
        "nan"
    }

    fn gather(
        &self,
        grid: &SharedGrid,
        x: usize,
        y: usize,
        out: &mut Neighbours,
    ) -> Result<(), ComputationError> {
        self.inner.gather(grid, x, y, out)?;
        if (x, y) == (self.x, self.y) {
            if let Some(first) = out.first_mut() {
                *first = f64::NAN;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_grid::EnergyGrid;

    fn grid() -> SharedGrid {
        SharedGrid::from_grid(&EnergyGrid::zeros(3, 3).unwrap())
    }

    #[test]
    fn failing_kernel_succeeds_then_fails() {
        let kernel = FailingKernel::new(KernelKind::DirectFour, 1, 1, 2);
        let grid = grid();
        let mut out = Neighbours::new();
        assert!(kernel.gather(&grid, 1, 1, &mut out).is_ok());
        assert!(kernel.gather(&grid, 0, 0, &mut out).is_ok());
        assert!(kernel.gather(&grid, 1, 1, &mut out).is_ok());
        match kernel.gather(&grid, 1, 1, &mut out) {
            Err(ComputationError::KernelFailed { x: 1, y: 1, .. }) => {}
            other => panic!("expected KernelFailed, got {other:?}"),
        }
        assert_eq!(kernel.calls(), 3);
    }

    #[test]
    fn fixed_kernel_reports_its_values() {
        let kernel = FixedKernel::new(vec![1.0, 2.0]);
        let mut out = Neighbours::new();
        kernel.gather(&grid(), 2, 2, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn nan_kernel_poisons_one_cell() {
        let kernel = NanKernel::new(KernelKind::DirectFour, 0, 1);
        let grid = grid();
        let mut out = Neighbours::new();
        kernel.gather(&grid, 0, 1, &mut out).unwrap();
        assert!(out[0].is_nan());
        out.clear();
        kernel.gather(&grid, 1, 1, &mut out).unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
