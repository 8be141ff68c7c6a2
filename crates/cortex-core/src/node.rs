//! Observation and input nodes: the data contracts between the tick engine
//! and its collaborators.
//!
//! An [`ObservationNode`] records the energy of one cell every tick. An
//! [`InputNode`] adds a scripted value to one cell every tick, replaying its
//! series once the run outlasts it.

use crate::Energy;

/// A cell whose energy is recorded once per tick.
///
/// Created before the run with a fixed capacity (the number of ticks).
/// `series[t]` is written exactly once, at tick `t`, by the worker that owns
/// column `x`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationNode {
    x: usize,
    y: usize,
    capacity: usize,
    series: Vec<Energy>,
}

impl ObservationNode {
    /// Create an empty observation for cell `(x, y)` able to hold `capacity` ticks.
    pub fn new(x: usize, y: usize, capacity: usize) -> Self {
        Self {
            x,
            y,
            capacity,
            series: Vec::with_capacity(capacity),
        }
    }

    /// X coordinate of the observed cell.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Y coordinate of the observed cell.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Number of ticks this node can record.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values recorded so far, one per completed tick.
    pub fn series(&self) -> &[Energy] {
        &self.series
    }

    /// Record the value observed at `tick`.
    ///
    /// Ticks must be recorded in order starting from zero; values beyond
    /// the capacity are dropped.
    pub fn record(&mut self, tick: u64, value: Energy) {
        if self.series.len() < self.capacity {
            debug_assert_eq!(
                tick as usize,
                self.series.len(),
                "observation ({}, {}) recorded out of order",
                self.x,
                self.y
            );
            self.series.push(value);
        }
    }

    /// Hand the recorded series over to the caller.
    pub fn into_series(self) -> ObservationSeries {
        ObservationSeries {
            x: self.x,
            y: self.y,
            series: self.series,
        }
    }
}

/// The finished time series of one observed cell, as exposed to result sinks.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationSeries {
    /// X coordinate of the observed cell.
    pub x: usize,
    /// Y coordinate of the observed cell.
    pub y: usize,
    /// One energy value per completed tick.
    pub series: Vec<Energy>,
}

impl ObservationSeries {
    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no tick was recorded.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The recorded values in tick order.
    pub fn values(&self) -> &[Energy] {
        &self.series
    }
}

/// A cell receiving an externally scripted additive signal.
///
/// The period is the series length: at tick `t` the injected value is
/// `series[t % period]`.
#[derive(Clone, Debug, PartialEq)]
pub struct InputNode {
    x: usize,
    y: usize,
    series: Vec<Energy>,
}

impl InputNode {
    /// Create an input for cell `(x, y)` replaying `series`.
    pub fn new(x: usize, y: usize, series: Vec<Energy>) -> Self {
        Self { x, y, series }
    }

    /// X coordinate of the target cell.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Y coordinate of the target cell.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Number of samples before the series repeats.
    pub fn period(&self) -> usize {
        self.series.len()
    }

    /// The full scripted series.
    pub fn series(&self) -> &[Energy] {
        &self.series
    }

    /// The value to inject at `tick`. An empty series injects nothing.
    pub fn value_at(&self, tick: u64) -> Energy {
        let period = self.series.len() as u64;
        tick.checked_rem(period)
            .map_or(0.0, |i| self.series[i as usize])
    }
}
