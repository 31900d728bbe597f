//! # Rule-of-Twelfths Tide Calculator Library
//!
//! This library estimates intermediate tide heights and times between two known,
//! consecutive tidal extrema (a low water and a high water, in either order).
//!
//! ## The Rule of Twelfths
//!
//! Mariners approximate one tidal half-cycle by splitting it into six equal time
//! intervals. The water level changes by 1, 2, 3, 3, 2 and 1 twelfths of the total
//! range over those intervals:
//!
//! ```text
//! interval   1    2    3    4    5    6
//! weight    1/12 2/12 3/12 3/12 2/12 1/12
//! reached   1/12 3/12 6/12 9/12 11/12 12/12
//! ```
//!
//! Inside an interval the level is assumed to change linearly, which gives a
//! continuous, monotonic, piecewise-linear curve from the first extremum to the
//! second one.
//!
//! ## Data Flow
//! 1. **Reference**: two observed extrema build an immutable [`reference::TidalReference`]
//! 2. **Session**: the reference and the seasonal clock offset form a [`session::Session`]
//! 3. **Queries**: every time or height typed by the user is answered by the
//!    [`interpolator::TideInterpolator`] as a pure function of the reference
//!
//! ## Core Types
//!
//! The library exports two primary value types:
//! - [`ClockTime`]: a wall-clock time of day with minute resolution
//! - [`Extremum`]: one observed high or low water (time + height)

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod error;
pub mod input;
pub mod interpolator;
pub mod logging;
pub mod reference;
pub mod renderer;
pub mod session;

pub use error::{ErrorKind, TideError};
pub use interpolator::{build_reference, height_at, time_at, TideInterpolator};
pub use reference::{Direction, TidalReference};
pub use session::{Season, Session};

/// A wall-clock time of day with minute resolution.
///
/// The minute field is always normalized into `0..60`. The hour field is NOT
/// wrapped modulo 24: adding minutes across midnight yields an hour of 24 or
/// more, and subtracting across midnight yields a negative hour. Arithmetic is
/// plain minute-of-day arithmetic without any calendar.
///
/// # Example
/// ```
/// use tide_twelfths_lib::ClockTime;
///
/// let low_water = ClockTime::new(3, 0);
/// let later = low_water.add_minutes(185);
///
/// assert_eq!(later, ClockTime::new(6, 5));
/// assert_eq!(low_water.minutes_until(later), 185);
/// assert_eq!(later.to_string(), "06h05");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    /// Hours (not wrapped at 24)
    pub hour: i32,
    /// Minutes, always in `0..60`
    pub minute: i32,
}

impl ClockTime {
    /// Build a time from an hour and a minute count.
    ///
    /// Minutes outside `0..60` are carried into the hour, so
    /// `ClockTime::new(2, 75)` is `03h15`.
    pub fn new(hour: i32, minute: i32) -> Self {
        Self::from_minutes(hour * 60 + minute)
    }

    /// Build a time from a signed count of minutes since 00h00.
    pub fn from_minutes(total: i32) -> Self {
        ClockTime {
            hour: total.div_euclid(60),
            minute: total.rem_euclid(60),
        }
    }

    /// Minutes elapsed since 00h00 of the same (unwrapped) day.
    pub fn total_minutes(&self) -> i32 {
        self.hour * 60 + self.minute
    }

    /// Return a new time shifted by a signed number of minutes.
    pub fn add_minutes(&self, minutes: i32) -> Self {
        Self::from_minutes(self.total_minutes() + minutes)
    }

    /// Signed minute difference from `self` to `other` (`other - self`).
    ///
    /// No wrap-around: `23h00` to `01h00` is -1320 minutes, not +120.
    pub fn minutes_until(&self, other: ClockTime) -> i32 {
        (other.hour - self.hour) * 60 + (other.minute - self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}h{:02}", self.hour, self.minute)
    }
}

impl From<chrono::NaiveTime> for ClockTime {
    fn from(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        ClockTime::new(time.hour() as i32, time.minute() as i32)
    }
}

/// One observed tidal extremum: the time and height of a high or low water.
///
/// Heights are in metres above chart datum; negative heights are allowed.
///
/// # Example
/// ```
/// use tide_twelfths_lib::{ClockTime, Extremum};
///
/// let low = Extremum { time: ClockTime::new(3, 0), height_m: 1.20 };
/// assert_eq!(low.time.hour, 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// Time of the extremum
    pub time: ClockTime,
    /// Height in metres
    pub height_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_are_normalized() {
        let t = ClockTime::new(2, 75);
        assert_eq!(t.hour, 3);
        assert_eq!(t.minute, 15);

        let t = ClockTime::new(3, -10);
        assert_eq!(t, ClockTime::new(2, 50));
    }

    #[test]
    fn test_add_minutes_does_not_wrap_midnight() {
        let t = ClockTime::new(23, 30).add_minutes(45);
        assert_eq!(t.hour, 24);
        assert_eq!(t.minute, 15);
        assert_eq!(t.to_string(), "24h15");
    }

    #[test]
    fn test_add_negative_minutes() {
        let t = ClockTime::new(6, 10).add_minutes(-20);
        assert_eq!(t, ClockTime::new(5, 50));
        assert!((0..60).contains(&t.minute));
    }

    #[test]
    fn test_minutes_until_is_signed() {
        let a = ClockTime::new(3, 0);
        let b = ClockTime::new(9, 15);
        assert_eq!(a.minutes_until(b), 375);
        assert_eq!(b.minutes_until(a), -375);
        assert_eq!(ClockTime::new(23, 0).minutes_until(ClockTime::new(1, 0)), -1320);
    }

    #[test]
    fn test_from_naive_time() {
        let naive = chrono::NaiveTime::from_hms_opt(14, 7, 59).unwrap();
        assert_eq!(ClockTime::from(naive), ClockTime::new(14, 7));
    }
}
