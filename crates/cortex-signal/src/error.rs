//! Errors raised while generating input series.

use std::error::Error;
use std::fmt;

/// Invalid parameters passed to a signal generator.
#[derive(Clone, Debug, PartialEq)]
pub enum SignalError {
    /// Frequency is negative, zero where a tone is required, or not finite.
    InvalidFrequency {
        /// The rejected frequency in Hz.
        hz: f64,
    },
    /// Tick length is zero, negative, or not finite.
    InvalidTickLength {
        /// The rejected tick length in milliseconds.
        tick_ms: f64,
    },
    /// Frame duration is zero, negative, or not finite.
    InvalidFrameLength {
        /// The rejected frame length in milliseconds.
        frame_ms: f64,
    },
    /// `min_hz` is greater than `max_hz`, or either bound is invalid.
    InvalidRange {
        /// Lower bound of the band.
        min_hz: f64,
        /// Upper bound of the band.
        max_hz: f64,
    },
    /// Intensity lies outside `[0, 1]`.
    InvalidIntensity {
        /// The rejected intensity.
        intensity: f64,
    },
    /// The requested series would exceed [`MAX_SERIES_TICKS`](crate::MAX_SERIES_TICKS) samples.
    SeriesTooLong {
        /// Requested length in ticks, possibly infinite.
        ticks: f64,
    },
    /// A token in a text series is not a finite number.
    InvalidSample {
        /// One-based line number of the token.
        line: usize,
        /// The offending token.
        token: String,
    },
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrequency { hz } => {
                write!(f, "frequency must be finite and positive, got {hz} Hz")
            }
            Self::InvalidTickLength { tick_ms } => {
                write!(f, "tick length must be finite and positive, got {tick_ms} ms")
            }
            Self::InvalidFrameLength { frame_ms } => {
                write!(f, "frame length must be finite and positive, got {frame_ms} ms")
            }
            Self::InvalidRange { min_hz, max_hz } => {
                write!(f, "invalid frequency band [{min_hz}, {max_hz}] Hz")
            }
            Self::InvalidIntensity { intensity } => {
                write!(f, "intensity {intensity} is outside [0, 1]")
            }
            Self::SeriesTooLong { ticks } => write!(
                f,
                "series of {ticks} ticks exceeds the limit of {} ticks",
                crate::MAX_SERIES_TICKS
            ),
            Self::InvalidSample { line, token } => {
                write!(f, "line {line}: '{token}' is not a finite sample")
            }
        }
    }
}

impl Error for SignalError {}
