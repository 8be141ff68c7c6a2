//! A direct + indirect kernel pair evaluated together for one cell.

use cortex_core::{ComputationError, UpdateFactors};
use cortex_grid::SharedGrid;

use crate::kernel::{Kernel, KernelKind, KernelSpec, Neighbours};
use crate::update::{update, NodeState};

/// Reusable neighbour buffers, one per worker.
#[derive(Debug, Default)]
pub struct StencilScratch {
    direct: Neighbours,
    indirect: Neighbours,
}

impl StencilScratch {
    /// Empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Neighbours gathered by the last direct-kernel call.
    pub fn direct(&self) -> &[f64] {
        &self.direct
    }

    /// Neighbours gathered by the last indirect-kernel call.
    pub fn indirect(&self) -> &[f64] {
        &self.indirect
    }
}

/// The two kernels that feed the node update.
#[derive(Clone, Debug)]
pub struct Stencil {
    direct: KernelSpec,
    indirect: KernelSpec,
}

impl Default for Stencil {
    fn default() -> Self {
        Self::new(KernelKind::DirectFour, KernelKind::DiagonalFour)
    }
}

impl Stencil {
    /// Pair a direct and an indirect kernel.
    pub fn new(direct: impl Into<KernelSpec>, indirect: impl Into<KernelSpec>) -> Self {
        Self {
            direct: direct.into(),
            indirect: indirect.into(),
        }
    }

    /// The direct-neighbour kernel.
    pub fn direct(&self) -> &KernelSpec {
        &self.direct
    }

    /// The indirect-neighbour kernel.
    pub fn indirect(&self) -> &KernelSpec {
        &self.indirect
    }

    /// Gather both neighbourhoods of `(x, y)` from `current` and apply the
    /// node update to `old`.
    ///
    /// The scratch buffers are cleared before each kernel runs.
    #[inline]
    pub fn evaluate(
        &self,
        current: &SharedGrid,
        x: usize,
        y: usize,
        old: NodeState,
        factors: &UpdateFactors,
        scratch: &mut StencilScratch,
    ) -> Result<NodeState, ComputationError> {
        scratch.direct.clear();
        self.direct.gather(current, x, y, &mut scratch.direct)?;
        scratch.indirect.clear();
        self.indirect.gather(current, x, y, &mut scratch.indirect)?;
        Ok(update(old, &scratch.direct, &scratch.indirect, factors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_grid::EnergyGrid;

    fn peak() -> SharedGrid {
        SharedGrid::from_grid(&EnergyGrid::seeded(3, 3, &[(1, 1, 10.0)]).unwrap())
    }

    #[test]
    fn centre_of_peak_matches_hand_calculation() {
        let grid = peak();
        let mut scratch = StencilScratch::new();
        let next = Stencil::default()
            .evaluate(
                &grid,
                1,
                1,
                NodeState::new(10.0, 0.0),
                &UpdateFactors::default(),
                &mut scratch,
            )
            .unwrap();
        assert_eq!(next, NodeState::new(-10.0, -20.0));
        assert_eq!(scratch.direct(), &[0.0; 4]);
        assert_eq!(scratch.indirect(), &[0.0; 4]);
    }

    #[test]
    fn corner_sees_peak_diagonally() {
        let grid = peak();
        let mut scratch = StencilScratch::new();
        let next = Stencil::default()
            .evaluate(
                &grid,
                0,
                0,
                NodeState::default(),
                &UpdateFactors::default(),
                &mut scratch,
            )
            .unwrap();
        assert_eq!(scratch.indirect(), &[0.0, 0.0, 0.0, 10.0]);
        assert_eq!(next, NodeState::new(2.5, 2.5));
    }

    #[test]
    fn scratch_is_reset_between_cells() {
        let grid = peak();
        let stencil = Stencil::default();
        let mut scratch = StencilScratch::new();
        for (x, y) in [(0, 0), (2, 2), (1, 0)] {
            stencil
                .evaluate(
                    &grid,
                    x,
                    y,
                    NodeState::default(),
                    &UpdateFactors::default(),
                    &mut scratch,
                )
                .unwrap();
            assert_eq!(scratch.direct().len(), 4);
            assert_eq!(scratch.indirect().len(), 4);
        }
    }

    #[test]
    fn kernel_error_propagates() {
        struct Broken;
        impl Kernel for Broken {
            fn name(&self) -> &str {
                "broken"
            }
            fn gather(
                &self,
                _grid: &SharedGrid,
                x: usize,
                y: usize,
                _out: &mut Neighbours,
            ) -> Result<(), ComputationError> {
                Err(ComputationError::KernelFailed {
                    kernel: "broken".into(),
                    x,
                    y,
                    reason: "no data".into(),
                })
            }
        }

        let stencil = Stencil::new(KernelKind::DirectFour, KernelSpec::custom(Broken));
        let result = stencil.evaluate(
            &peak(),
            2,
            1,
            NodeState::default(),
            &UpdateFactors::default(),
            &mut StencilScratch::new(),
        );
        match result {
            Err(ComputationError::KernelFailed { x: 2, y: 1, .. }) => {}
            other => panic!("expected KernelFailed, got {other:?}"),
        }
    }
}
