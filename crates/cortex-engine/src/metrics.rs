//! Aggregate timing for a simulation run.

use std::time::Duration;

/// Timing collected over a whole run.
///
/// All durations are in microseconds of wall-clock time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Ticks that ran every phase, including the swap.
    pub ticks_completed: u64,
    /// Number of partitions (worker threads, or 1 when sequential).
    pub worker_count: usize,
    /// Wall-clock time from the first tick to the end of the run.
    pub total_us: u64,
    /// `total_us / ticks_completed`, or 0 when no tick completed.
    pub mean_tick_us: u64,
    /// Simulated time covered: `ticks_completed * tick_ms`.
    pub simulated_ms: f64,
}

impl RunMetrics {
    pub(crate) fn new(
        ticks_completed: u64,
        worker_count: usize,
        elapsed: Duration,
        tick_ms: f64,
    ) -> Self {
        let total_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        Self {
            ticks_completed,
            worker_count,
            total_us,
            mean_tick_us: total_us.checked_div(ticks_completed).unwrap_or(0),
            simulated_ms: ticks_completed as f64 * tick_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.ticks_completed, 0);
        assert_eq!(m.worker_count, 0);
        assert_eq!(m.total_us, 0);
        assert_eq!(m.mean_tick_us, 0);
        assert_eq!(m.simulated_ms, 0.0);
    }

    #[test]
    fn mean_divides_by_ticks() {
        let m = RunMetrics::new(4, 2, Duration::from_micros(1000), 0.5);
        assert_eq!(m.mean_tick_us, 250);
        assert_eq!(m.simulated_ms, 2.0);
    }

    #[test]
    fn zero_ticks_has_zero_mean() {
        let m = RunMetrics::new(0, 1, Duration::from_millis(3), 1.0);
        assert_eq!(m.total_us, 3000);
        assert_eq!(m.mean_tick_us, 0);
    }
}
