//! # Tidal Reference
//!
//! A [`TidalReference`] holds the two extrema that bound one tidal half-cycle and
//! the constants derived from them. It is built once per pair of extrema and is
//! read-only afterwards; every query borrows it.

use crate::{error::TideError, Extremum};
use serde::Serialize;

/// Proportional height change of each of the six intervals, in twelfths.
pub const TWELFTHS: [u32; 6] = [1, 2, 3, 3, 2, 1];

/// Twelfths already reached at the start of each interval (prefix sums of [`TWELFTHS`]).
pub const CUMULATIVE: [u32; 6] = [0, 1, 3, 6, 9, 11];

/// Number of equal time intervals in a half-cycle.
pub const INTERVALS: usize = 6;

/// Whether the water rises (low → high) or falls (high → low) over the half-cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Rising,
    Falling,
}

/// Immutable description of one tidal half-cycle.
///
/// # Example
/// ```
/// use tide_twelfths_lib::{ClockTime, Direction, Extremum, TidalReference};
///
/// let reference = TidalReference::new(
///     Extremum { time: ClockTime::new(3, 0), height_m: 1.20 },
///     Extremum { time: ClockTime::new(9, 0), height_m: 6.80 },
/// )
/// .unwrap();
///
/// assert_eq!(reference.half_period_minutes(), 360);
/// assert_eq!(reference.twelfth_minutes(), 60.0);
/// assert_eq!(reference.direction(), Direction::Rising);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TidalReference {
    first: Extremum,
    second: Extremum,
    half_period_minutes: i32,
    twelfth_minutes: f64,
    height_range: f64,
    direction: Direction,
}

impl TidalReference {
    /// Derive the half-cycle constants from two extrema given in chronological order.
    ///
    /// The order is not checked: a second extremum earlier than the first gives a
    /// negative half period, and queries then run backwards in time.
    ///
    /// # Errors
    /// - [`TideError::DegenerateRange`] when both heights are equal
    /// - [`TideError::DegenerateDuration`] when both times are equal
    pub fn new(first: Extremum, second: Extremum) -> Result<Self, TideError> {
        let height_range = second.height_m - first.height_m;
        if height_range == 0.0 {
            return Err(TideError::DegenerateRange {
                height_m: first.height_m,
            });
        }

        let half_period_minutes = first.time.minutes_until(second.time);
        if half_period_minutes == 0 {
            return Err(TideError::DegenerateDuration { time: first.time });
        }

        let direction = if height_range < 0.0 {
            Direction::Falling
        } else {
            Direction::Rising
        };

        Ok(TidalReference {
            first,
            second,
            half_period_minutes,
            twelfth_minutes: half_period_minutes as f64 / INTERVALS as f64,
            height_range,
            direction,
        })
    }

    pub fn first(&self) -> Extremum {
        self.first
    }

    pub fn second(&self) -> Extremum {
        self.second
    }

    /// Signed duration of the half-cycle in minutes.
    pub fn half_period_minutes(&self) -> i32 {
        self.half_period_minutes
    }

    /// Duration of one of the six intervals ("rate unit"), in minutes.
    pub fn twelfth_minutes(&self) -> f64 {
        self.twelfth_minutes
    }

    /// Signed height change from the first to the second extremum.
    pub fn height_range(&self) -> f64 {
        self.height_range
    }

    /// Signed height of one twelfth of the range.
    pub fn twelfth_height(&self) -> f64 {
        self.height_range / 12.0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The extremum that is the high water of this half-cycle.
    pub fn high_water(&self) -> Extremum {
        match self.direction {
            Direction::Rising => self.second,
            Direction::Falling => self.first,
        }
    }

    /// The extremum that is the low water of this half-cycle.
    pub fn low_water(&self) -> Extremum {
        match self.direction {
            Direction::Rising => self.first,
            Direction::Falling => self.second,
        }
    }

    /// Height reached after `progress` twelfths of the range (0.0 ..= 12.0).
    ///
    /// Both ends are returned exactly, without floating-point drift.
    pub fn height_for_progress(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            self.first.height_m
        } else if progress >= 12.0 {
            self.second.height_m
        } else {
            self.first.height_m + progress / 12.0 * self.height_range
        }
    }
}

/// Cumulative progress in twelfths reached at interval boundary `0..=6`.
pub fn boundary_progress(boundary: usize) -> u32 {
    if boundary >= INTERVALS {
        12
    } else {
        CUMULATIVE[boundary]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClockTime;

    fn extremum(hour: i32, minute: i32, height_m: f64) -> Extremum {
        Extremum {
            time: ClockTime::new(hour, minute),
            height_m,
        }
    }

    #[test]
    fn test_cumulative_is_prefix_sum_of_twelfths() {
        let mut sum = 0;
        for i in 0..INTERVALS {
            assert_eq!(CUMULATIVE[i], sum);
            sum += TWELFTHS[i];
        }
        assert_eq!(sum, 12);
    }

    #[test]
    fn test_rising_reference() {
        let r = TidalReference::new(extremum(3, 0, 1.2), extremum(9, 0, 6.8)).unwrap();
        assert_eq!(r.half_period_minutes(), 360);
        assert_eq!(r.twelfth_minutes(), 60.0);
        assert!((r.height_range() - 5.6).abs() < 1e-12);
        assert_eq!(r.direction(), Direction::Rising);
        assert_eq!(r.low_water().height_m, 1.2);
        assert_eq!(r.high_water().height_m, 6.8);
    }

    #[test]
    fn test_falling_reference() {
        let r = TidalReference::new(extremum(10, 12, 5.4), extremum(16, 30, 0.9)).unwrap();
        assert_eq!(r.half_period_minutes(), 378);
        assert_eq!(r.twelfth_minutes(), 63.0);
        assert_eq!(r.direction(), Direction::Falling);
        assert!(r.twelfth_height() < 0.0);
        assert_eq!(r.high_water().time, ClockTime::new(10, 12));
        assert_eq!(r.low_water().time, ClockTime::new(16, 30));
    }

    #[test]
    fn test_reversed_times_are_not_rejected() {
        let r = TidalReference::new(extremum(9, 0, 1.0), extremum(3, 0, 5.0)).unwrap();
        assert_eq!(r.half_period_minutes(), -360);
        assert_eq!(r.twelfth_minutes(), -60.0);
    }

    #[test]
    fn test_degenerate_range_is_rejected() {
        let err = TidalReference::new(extremum(3, 0, 2.0), extremum(9, 0, 2.0)).unwrap_err();
        assert_eq!(err, TideError::DegenerateRange { height_m: 2.0 });
    }

    #[test]
    fn test_degenerate_duration_is_rejected() {
        let err = TidalReference::new(extremum(3, 0, 1.0), extremum(3, 0, 4.0)).unwrap_err();
        assert!(matches!(err, TideError::DegenerateDuration { .. }));
    }

    #[test]
    fn test_height_for_progress_ends_are_exact() {
        let r = TidalReference::new(extremum(0, 10, 0.37), extremum(6, 23, 4.91)).unwrap();
        assert_eq!(r.height_for_progress(0.0), 0.37);
        assert_eq!(r.height_for_progress(12.0), 4.91);
    }

    #[test]
    fn test_boundary_progress() {
        let values: Vec<u32> = (0..=INTERVALS).map(boundary_progress).collect();
        assert_eq!(values, vec![0, 1, 3, 6, 9, 11, 12]);
    }
}
