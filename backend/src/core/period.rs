//! Period (quarter) management for the simulation
//!
//! The simulation advances in whole quarters. Each quarter is one trading
//! period followed by billing, depreciation, payroll and restocking.

use serde::{Deserialize, Serialize};

/// Counts quarters from 1 up to a fixed total
///
/// # Example
/// ```
/// use hatchery_simulator_core::PeriodClock;
///
/// let mut clock = PeriodClock::new(2);
/// assert_eq!(clock.current_period(), 0);
///
/// assert_eq!(clock.advance(), Some(1));
/// assert_eq!(clock.advance(), Some(2));
/// assert!(clock.is_last_period());
/// assert_eq!(clock.advance(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodClock {
    /// Current quarter (1-indexed, 0 before the first quarter starts)
    current_period: u32,
    /// Number of quarters the simulation runs for
    total_periods: u32,
}

impl PeriodClock {
    /// Create a new clock for `total_periods` quarters
    ///
    /// # Panics
    /// Panics if `total_periods` is zero
    pub fn new(total_periods: u32) -> Self {
        assert!(total_periods > 0, "total_periods must be positive");
        Self {
            current_period: 0,
            total_periods,
        }
    }

    /// Move to the next quarter
    ///
    /// Returns the new quarter number, or `None` once every quarter has run.
    pub fn advance(&mut self) -> Option<u32> {
        if self.is_exhausted() {
            return None;
        }
        self.current_period += 1;
        Some(self.current_period)
    }

    /// Current quarter (0 before the first `advance`)
    pub fn current_period(&self) -> u32 {
        self.current_period
    }

    /// Total number of quarters configured
    pub fn total_periods(&self) -> u32 {
        self.total_periods
    }

    /// Quarters not yet started
    pub fn remaining(&self) -> u32 {
        self.total_periods - self.current_period
    }

    /// True while running the final configured quarter
    pub fn is_last_period(&self) -> bool {
        self.current_period == self.total_periods
    }

    /// True when no further quarter can start
    pub fn is_exhausted(&self) -> bool {
        self.current_period >= self.total_periods
    }
}
