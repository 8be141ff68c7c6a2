//! Frame sequences: one fixed-duration burst of tone per frequency.
//!
//! An image sequence becomes an input by mapping each frame's pixel
//! intensity to a frequency with [`intensity_to_hz`] and concatenating one
//! frame of that tone per image with [`frame_series`].

use cortex_core::Energy;

use crate::error::SignalError;
use crate::sine::{bounded_ticks, period_length, sample_at, MAX_SERIES_TICKS};

/// Linear map of `intensity ∈ [0, 1]` onto `[min_hz, max_hz]`.
///
/// ```
/// use cortex_signal::intensity_to_hz;
///
/// assert_eq!(intensity_to_hz(0.5, 10.0, 30.0).unwrap(), 20.0);
/// ```
pub fn intensity_to_hz(intensity: f64, min_hz: f64, max_hz: f64) -> Result<f64, SignalError> {
    let band_ok = min_hz.is_finite() && max_hz.is_finite() && min_hz >= 0.0 && min_hz <= max_hz;
    if !band_ok {
        return Err(SignalError::InvalidRange { min_hz, max_hz });
    }
    if !(0.0..=1.0).contains(&intensity) {
        return Err(SignalError::InvalidIntensity { intensity });
    }
    Ok(min_hz + intensity * (max_hz - min_hz))
}

/// Ticks covered by one frame: `max(1, round(frame_ms / tick_ms))`.
///
/// Frames longer than [`MAX_SERIES_TICKS`] are rejected with
/// [`SignalError::SeriesTooLong`].
pub fn ticks_per_frame(frame_ms: f64, tick_ms: f64) -> Result<usize, SignalError> {
    if !frame_ms.is_finite() || frame_ms <= 0.0 {
        return Err(SignalError::InvalidFrameLength { frame_ms });
    }
    if !tick_ms.is_finite() || tick_ms <= 0.0 {
        return Err(SignalError::InvalidTickLength { tick_ms });
    }
    bounded_ticks(frame_ms / tick_ms)
}

/// Concatenate one frame of sinusoid per entry of `frequencies`.
///
/// Each frame starts at phase zero and lasts [`ticks_per_frame`] ticks. A
/// frequency of exactly `0` yields a silent frame. The whole series is
/// bounded by [`MAX_SERIES_TICKS`].
pub fn frame_series(
    frequencies: &[f64],
    frame_ms: f64,
    tick_ms: f64,
    amplitude: Energy,
) -> Result<Vec<Energy>, SignalError> {
    let frame_len = ticks_per_frame(frame_ms, tick_ms)?;
    let total = frame_len
        .checked_mul(frequencies.len())
        .filter(|&total| total <= MAX_SERIES_TICKS)
        .ok_or(SignalError::SeriesTooLong {
            ticks: frame_len as f64 * frequencies.len() as f64,
        })?;
    let mut series = Vec::with_capacity(total);
    for &hz in frequencies {
        if hz == 0.0 {
            series.resize(series.len() + frame_len, 0.0);
            continue;
        }
        let period = period_length(hz, tick_ms)?;
        if period <= 2 {
            tracing::warn!(hz, tick_ms, period, "frame frequency degraded at tick resolution");
        }
        series.extend((0..frame_len).map(|i| sample_at(i % period, period, amplitude)));
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_maps_endpoints() {
        assert_eq!(intensity_to_hz(0.0, 5.0, 50.0).unwrap(), 5.0);
        assert_eq!(intensity_to_hz(1.0, 5.0, 50.0).unwrap(), 50.0);
    }

    #[test]
    fn intensity_out_of_range_is_rejected() {
        assert_eq!(
            intensity_to_hz(1.5, 5.0, 50.0),
            Err(SignalError::InvalidIntensity { intensity: 1.5 })
        );
        assert!(intensity_to_hz(f64::NAN, 5.0, 50.0).is_err());
    }

    #[test]
    fn inverted_band_is_rejected() {
        match intensity_to_hz(0.5, 50.0, 5.0) {
            Err(SignalError::InvalidRange { .. }) => {}
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn frame_length_rounds() {
        assert_eq!(ticks_per_frame(100.0, 1.0).unwrap(), 100);
        assert_eq!(ticks_per_frame(10.0, 3.0).unwrap(), 3);
        assert_eq!(ticks_per_frame(0.1, 1.0).unwrap(), 1);
        assert!(ticks_per_frame(0.0, 1.0).is_err());
    }

    #[test]
    fn oversized_frame_is_rejected() {
        match ticks_per_frame(1e30, 1.0) {
            Err(SignalError::SeriesTooLong { .. }) => {}
            other => panic!("expected SeriesTooLong, got {other:?}"),
        }
        match frame_series(&[10.0, 20.0], 1e30, 1.0, 1.0) {
            Err(SignalError::SeriesTooLong { .. }) => {}
            other => panic!("expected SeriesTooLong, got {other:?}"),
        }
    }

    #[test]
    fn frames_summing_past_the_limit_are_rejected() {
        // Each frame fits on its own; four of them do not.
        let frame_ms = (MAX_SERIES_TICKS / 2) as f64;
        assert_eq!(ticks_per_frame(frame_ms, 1.0).unwrap(), MAX_SERIES_TICKS / 2);
        assert_eq!(
            frame_series(&[0.0; 4], frame_ms, 1.0, 1.0),
            Err(SignalError::SeriesTooLong {
                ticks: (MAX_SERIES_TICKS * 2) as f64
            })
        );
    }

    #[test]
    fn frames_concatenate_in_order() {
        let series = frame_series(&[100.0, 0.0, 250.0], 20.0, 1.0, 1.0).unwrap();
        assert_eq!(series.len(), 60);
        // 100 Hz repeats every 10 ticks within its frame.
        assert_eq!(series[..10], series[10..20]);
        assert!(series[20..40].iter().all(|&v| v == 0.0));
        // 250 Hz has period 4: 0, 1, ~0, -1.
        assert_eq!(series[40], 0.0);
        assert!((series[41] - 1.0).abs() < 1e-12);
        assert!((series[43] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_frequency_list_is_empty_series() {
        assert!(frame_series(&[], 10.0, 1.0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn negative_frequency_is_rejected() {
        assert_eq!(
            frame_series(&[10.0, -3.0], 10.0, 1.0, 1.0),
            Err(SignalError::InvalidFrequency { hz: -3.0 })
        );
    }
}
