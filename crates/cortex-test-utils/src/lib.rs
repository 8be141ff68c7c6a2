//! Test utilities and fixtures for Cortex development.
//!
//! Provides seeded grid builders and mock [`Kernel`](cortex_kernel::Kernel)
//! implementations for engine and kernel tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use cortex_core::{InputNode, ObservationNode};
use cortex_grid::EnergyGrid;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A single `value` in the middle of an otherwise empty grid.
pub fn peak_grid(width: usize, height: usize, value: f64) -> EnergyGrid {
    EnergyGrid::seeded(width, height, &[(width / 2, height / 2, value)])
        .expect("centre of a non-empty grid is in bounds")
}

/// Every cell set to `10 * x + y + 1`, handy for spotting mixed-up axes.
pub fn numbered_grid(width: usize, height: usize) -> EnergyGrid {
    let mut grid = EnergyGrid::zeros(width, height).expect("non-empty grid");
    for x in 0..width {
        for y in 0..height {
            grid.set(x, y, (10 * x + y) as f64 + 1.0).expect("in bounds");
        }
    }
    grid
}

/// Deterministic pseudo-random energies in `[-1, 1)` derived from `seed`.
pub fn random_grid(width: usize, height: usize, seed: u64) -> EnergyGrid {
    let mut grid = EnergyGrid::zeros(width, height).expect("non-empty grid");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for x in 0..width {
        for y in 0..height {
            grid.set(x, y, rng.random_range(-1.0..1.0)).expect("in bounds");
        }
    }
    grid
}

/// One observation per listed cell, each sized for `ticks`.
pub fn observe(cells: &[(usize, usize)], ticks: usize) -> Vec<ObservationNode> {
    cells
        .iter()
        .map(|&(x, y)| ObservationNode::new(x, y, ticks))
        .collect()
}

/// Observe every cell of a `width × height` grid in column-major order.
pub fn observe_all(width: usize, height: usize, ticks: usize) -> Vec<ObservationNode> {
    (0..width)
        .flat_map(|x| (0..height).map(move |y| ObservationNode::new(x, y, ticks)))
        .collect()
}

/// An input that injects `value` every tick.
pub fn constant_input(x: usize, y: usize, value: f64) -> InputNode {
    InputNode::new(x, y, vec![value])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_grid_is_reproducible() {
        assert_eq!(random_grid(5, 4, 7), random_grid(5, 4, 7));
        assert_ne!(random_grid(5, 4, 7), random_grid(5, 4, 8));
    }

    #[test]
    fn random_grid_stays_in_range() {
        let grid = random_grid(16, 16, 99);
        assert!(grid.as_slice().iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn random_grid_matches_chacha_stream() {
        // Cells are drawn column by column from one ChaCha8 stream.
        let grid = random_grid(2, 3, 11);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for x in 0..2 {
            for y in 0..3 {
                let expected: f64 = rng.random_range(-1.0..1.0);
                assert_eq!(grid.get(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn peak_is_centred() {
        let grid = peak_grid(3, 3, 10.0);
        assert_eq!(grid.get(1, 1), Some(10.0));
        assert_eq!(grid.total_energy(), 10.0);
    }

    #[test]
    fn observe_all_covers_grid() {
        let nodes = observe_all(3, 2, 5);
        assert_eq!(nodes.len(), 6);
        assert_eq!((nodes[3].x(), nodes[3].y()), (1, 1));
        assert!(nodes.iter().all(|n| n.capacity() == 5));
    }
}
