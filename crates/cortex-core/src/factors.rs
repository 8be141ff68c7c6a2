//! Run-wide constants of the node-update function.

/// Weights and factors applied by the node update to every cell.
///
/// All factors default to `1.0`. Values are usually in `(0, 1]`, but larger
/// values are accepted; only non-finite values are rejected at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateFactors {
    /// Multiplier on the mean of the direct (orthogonal) neighbours.
    pub direct_weight: f64,
    /// Multiplier on the mean of the indirect (diagonal) neighbours.
    pub indirect_weight: f64,
    /// Multiplier on the old energy when forming the slope baseline.
    pub energy_factor: f64,
    /// Multiplier on the combined neighbour delta.
    pub delta_factor: f64,
    /// Multiplier on the slope carried over from the previous tick.
    pub slope_factor: f64,
    /// Multiplier on the old energy when forming the new energy.
    pub energy_weight: f64,
    /// Multiplier on the new slope when forming the new energy.
    pub slope_weight: f64,
}

impl Default for UpdateFactors {
    fn default() -> Self {
        Self {
            direct_weight: 1.0,
            indirect_weight: 1.0,
            energy_factor: 1.0,
            delta_factor: 1.0,
            slope_factor: 1.0,
            energy_weight: 1.0,
            slope_weight: 1.0,
        }
    }
}

impl UpdateFactors {
    /// Every factor paired with its configuration name.
    pub fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("direct_weight", self.direct_weight),
            ("indirect_weight", self.indirect_weight),
            ("energy_factor", self.energy_factor),
            ("delta_factor", self.delta_factor),
            ("slope_factor", self.slope_factor),
            ("energy_weight", self.energy_weight),
            ("slope_weight", self.slope_weight),
        ]
    }

    /// The first factor that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        self.named().into_iter().find(|(_, v)| !v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_one() {
        let f = UpdateFactors::default();
        assert!(f.named().iter().all(|&(_, v)| v == 1.0));
        assert_eq!(f.first_non_finite(), None);
    }

    #[test]
    fn first_non_finite_reports_name() {
        let f = UpdateFactors {
            slope_factor: f64::INFINITY,
            ..UpdateFactors::default()
        };
        assert_eq!(f.first_non_finite(), Some(("slope_factor", f64::INFINITY)));
    }
}
