//! The per-cell node-update function.

use cortex_core::{Energy, UpdateFactors};

/// Energy and slope of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeState {
    /// Energy level.
    pub value: Energy,
    /// Momentum carried between ticks.
    pub slope: Energy,
}

impl NodeState {
    /// Build a state from its parts.
    pub fn new(value: Energy, slope: Energy) -> Self {
        Self { value, slope }
    }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.slope.is_finite()
    }
}

/// Arithmetic mean, `0` for an empty neighbourhood.
#[inline]
fn mean(values: &[Energy]) -> Energy {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<Energy>() / values.len() as Energy
    }
}

/// Advance one cell by one tick.
///
/// ```text
/// mean_direct   = mean(direct)   * direct_weight
/// mean_indirect = mean(indirect) * indirect_weight
/// baseline      = old.value * energy_factor
/// slope_delta   = ((mean_direct - baseline) + (mean_indirect - baseline)) * delta_factor
/// new.slope     = old.slope * slope_factor + slope_delta
/// new.value     = old.value * energy_weight + new.slope * slope_weight
/// ```
///
/// The averages divide by the number of values each kernel produced.
///
/// ```
/// use cortex_core::UpdateFactors;
/// use cortex_kernel::{update, NodeState};
///
/// let next = update(NodeState::new(10.0, 0.0), &[0.0; 4], &[0.0; 4], &UpdateFactors::default());
/// assert_eq!(next, NodeState::new(-10.0, -20.0));
/// ```
#[inline]
pub fn update(
    old: NodeState,
    direct: &[Energy],
    indirect: &[Energy],
    factors: &UpdateFactors,
) -> NodeState {
    let mean_direct = mean(direct) * factors.direct_weight;
    let mean_indirect = mean(indirect) * factors.indirect_weight;
    let baseline = old.value * factors.energy_factor;
    let slope_delta =
        ((mean_direct - baseline) + (mean_indirect - baseline)) * factors.delta_factor;
    let slope = old.slope * factors.slope_factor + slope_delta;
    let value = old.value * factors.energy_weight + slope * factors.slope_weight;
    NodeState { value, slope }
}
