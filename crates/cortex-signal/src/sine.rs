//! Sinusoidal input series of minimal period.

use std::f64::consts::TAU;

use cortex_core::{Energy, InputNode};

use crate::error::SignalError;

/// Longest series a generator will produce, in ticks.
pub const MAX_SERIES_TICKS: usize = 1 << 28;

/// Round a tick count and check it against [`MAX_SERIES_TICKS`].
pub(crate) fn bounded_ticks(ticks: f64) -> Result<usize, SignalError> {
    let ticks = ticks.round();
    if !ticks.is_finite() || ticks > MAX_SERIES_TICKS as f64 {
        return Err(SignalError::SeriesTooLong { ticks });
    }
    Ok((ticks as usize).max(1))
}

fn check_tick_ms(tick_ms: f64) -> Result<(), SignalError> {
    if !tick_ms.is_finite() || tick_ms <= 0.0 {
        return Err(SignalError::InvalidTickLength { tick_ms });
    }
    Ok(())
}

/// Number of ticks in one period of a `hz` tone at `tick_ms` milliseconds
/// per tick: `max(1, round(1000 / (hz * tick_ms)))`.
///
/// Frequencies so low that the period exceeds [`MAX_SERIES_TICKS`] are
/// rejected with [`SignalError::SeriesTooLong`].
///
/// ```
/// use cortex_signal::period_length;
///
/// assert_eq!(period_length(10.0, 1.0).unwrap(), 100);
/// assert_eq!(period_length(300.0, 1.0).unwrap(), 3);
/// ```
pub fn period_length(hz: f64, tick_ms: f64) -> Result<usize, SignalError> {
    if !hz.is_finite() || hz <= 0.0 {
        return Err(SignalError::InvalidFrequency { hz });
    }
    check_tick_ms(tick_ms)?;
    bounded_ticks(1000.0 / (hz * tick_ms))
}

/// Exactly one period of `amplitude * sin(2π i / period)`.
///
/// A period of 2 samples or fewer cannot represent the tone; the series is
/// still produced and a warning is logged.
pub fn sine_series(hz: f64, tick_ms: f64, amplitude: Energy) -> Result<Vec<Energy>, SignalError> {
    let period = period_length(hz, tick_ms)?;
    if period <= 2 {
        tracing::warn!(
            hz,
            tick_ms,
            period,
            "frequency too high for tick resolution, signal degraded"
        );
    }
    Ok((0..period).map(|i| sample_at(i, period, amplitude)).collect())
}

/// Sample `i` of a sinusoid whose period is `period` ticks.
#[inline]
pub(crate) fn sample_at(i: usize, period: usize, amplitude: Energy) -> Energy {
    amplitude * (TAU * i as f64 / period as f64).sin()
}

/// Builds an [`InputNode`] carrying one period of a sinusoid.
///
/// Defaults: `tick_ms = 1.0`, `amplitude = 1.0`.
#[derive(Clone, Debug)]
pub struct SineInput {
    x: usize,
    y: usize,
    hz: f64,
    tick_ms: f64,
    amplitude: Energy,
}

impl SineInput {
    /// A `hz` tone injected at `(x, y)`.
    pub fn new(x: usize, y: usize, hz: f64) -> Self {
        Self {
            x,
            y,
            hz,
            tick_ms: 1.0,
            amplitude: 1.0,
        }
    }

    /// Milliseconds of simulated time per tick.
    pub fn tick_ms(mut self, tick_ms: f64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Peak value of the tone.
    pub fn amplitude(mut self, amplitude: Energy) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Generate the series.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `hz` or `tick_ms` is not finite and positive, or if
    /// one period would exceed [`MAX_SERIES_TICKS`].
    pub fn build(self) -> Result<InputNode, SignalError> {
        let series = sine_series(self.hz, self.tick_ms, self.amplitude)?;
        Ok(InputNode::new(self.x, self.y, series))
    }
}
