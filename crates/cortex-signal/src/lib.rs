//! Input-signal generation for Cortex simulations.
//!
//! Turns frequency descriptions into the scripted series carried by
//! [`InputNode`](cortex_core::InputNode)s:
//!
//! - [`period_length`] / [`sine_series`]: one period of a sinusoid sampled
//!   at the tick resolution
//! - [`intensity_to_hz`]: map a normalised intensity onto a frequency band
//! - [`frame_series`]: one fixed-duration frame of signal per frequency
//! - [`SineInput`]: builder producing an `InputNode` directly
//! - [`parse_series`]: a literal series from delimited text

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frames;
pub mod sine;
pub mod text;

pub use error::SignalError;
pub use frames::{frame_series, intensity_to_hz, ticks_per_frame};
pub use sine::{period_length, sine_series, SineInput, MAX_SERIES_TICKS};
pub use text::parse_series;
