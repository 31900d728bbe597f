//! # Rule-of-Twelfths Interpolation
//!
//! This module answers the two dual questions asked about a tidal half-cycle:
//!
//! - **time → height**: how high is the water at a given clock time?
//! - **height → time**: at what clock time does the water reach a given height?
//!
//! ## Forward Interpolation
//! The elapsed time since the first extremum is expressed in intervals
//! (`0.0 ..= 6.0`). The integer part selects one of the six intervals and the
//! fractional part is the linear position inside it:
//!
//! ```text
//! progress = CUMULATIVE[i] + TWELFTHS[i] * fraction      (0 ..= 12 twelfths)
//! height   = h1 + progress / 12 * (h2 - h1)
//! ```
//!
//! ## Inverse Interpolation
//! The height is first expressed in twelfths of the range. The whole number of
//! twelfths selects the first interval whose cumulative span contains it; the
//! linear segment of that interval is then inverted and the elapsed time is
//! rounded to the nearest minute. Because of that rounding the inverse is only
//! approximate: `height_at(time_at(m))` lands within one minute's worth of
//! water movement of `m`.
//!
//! ## Seasonal Offset
//! Extrema are read from tide tables published in standard (winter) time. A
//! signed offset in minutes is subtracted from a queried time before
//! interpolating, and added to a computed time afterwards.

use crate::{
    error::TideError,
    reference::{TidalReference, CUMULATIVE, INTERVALS, TWELFTHS},
    ClockTime, Extremum,
};
use tracing::trace;

/// Progress values this close to 0 or 12 twelfths are snapped onto the bound.
const PROGRESS_EPSILON: f64 = 1e-9;

/// Stateless query engine over one [`TidalReference`].
///
/// # Example
/// ```
/// use tide_twelfths_lib::{build_reference, ClockTime, TideInterpolator};
///
/// let reference = build_reference(ClockTime::new(3, 0), 1.20, ClockTime::new(9, 0), 6.80).unwrap();
/// let interpolator = TideInterpolator::new(&reference);
///
/// let height = interpolator.height_at(ClockTime::new(6, 0), 0).unwrap();
/// assert!((height - 4.00).abs() < 1e-9);
///
/// let time = interpolator.time_at(4.00, 0).unwrap();
/// assert_eq!(time, ClockTime::new(6, 0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TideInterpolator<'a> {
    reference: &'a TidalReference,
}

impl<'a> TideInterpolator<'a> {
    pub fn new(reference: &'a TidalReference) -> Self {
        TideInterpolator { reference }
    }

    pub fn reference(&self) -> &'a TidalReference {
        self.reference
    }

    /// Estimated height at `query`, a clock time shifted by `offset_minutes`.
    ///
    /// # Errors
    /// [`TideError::QueryOutOfRange`] when the shifted time falls outside the
    /// half-cycle.
    pub fn height_at(&self, query: ClockTime, offset_minutes: i32) -> Result<f64, TideError> {
        let delta = self.elapsed_intervals(query, offset_minutes);
        if !(0.0..=INTERVALS as f64).contains(&delta) {
            return Err(TideError::QueryOutOfRange {
                time: query,
                start: self.reference.first().time.add_minutes(offset_minutes),
                end: self.reference.second().time.add_minutes(offset_minutes),
            });
        }

        // delta == 6 is the end of the last interval, not a seventh one
        let index = (delta.floor() as usize).min(INTERVALS - 1);
        let fraction = delta - index as f64;
        let progress = CUMULATIVE[index] as f64 + TWELFTHS[index] as f64 * fraction;
        let height = self.reference.height_for_progress(progress);

        trace!(%query, offset_minutes, delta, index, progress, height, "height query");
        Ok(height)
    }

    /// Estimated clock time at which the water reaches `height_m`, shifted by
    /// `offset_minutes`.
    ///
    /// # Errors
    /// [`TideError::HeightOutOfRange`] when the height lies outside the range
    /// spanned by the two extrema.
    pub fn time_at(&self, height_m: f64, offset_minutes: i32) -> Result<ClockTime, TideError> {
        let progress = self.progress_for_height(height_m);
        if !(0.0..=12.0).contains(&progress) {
            return Err(TideError::HeightOutOfRange {
                height_m,
                low_m: self.reference.low_water().height_m,
                high_m: self.reference.high_water().height_m,
            });
        }

        let whole = progress.floor() as u32;
        // Only progress == 12 matches no span; it closes the last interval.
        let index = (0..INTERVALS)
            .find(|&i| CUMULATIVE[i] <= whole && whole < CUMULATIVE[i] + TWELFTHS[i])
            .unwrap_or(INTERVALS - 1);

        let intervals =
            index as f64 + (progress - CUMULATIVE[index] as f64) / TWELFTHS[index] as f64;
        let elapsed = (intervals * self.reference.twelfth_minutes()).round() as i32;
        let time = self
            .reference
            .first()
            .time
            .add_minutes(elapsed + offset_minutes);

        trace!(height_m, offset_minutes, progress, index, elapsed, %time, "time query");
        Ok(time)
    }

    /// Signed number of intervals elapsed between the first extremum and the
    /// shifted query time.
    fn elapsed_intervals(&self, query: ClockTime, offset_minutes: i32) -> f64 {
        let elapsed = self.reference.first().time.minutes_until(query) - offset_minutes;
        // A single division keeps both ends of the half-cycle exact (0 and 6).
        INTERVALS as f64 * elapsed as f64 / self.reference.half_period_minutes() as f64
    }

    /// Height expressed in twelfths of the range above the first extremum.
    fn progress_for_height(&self, height_m: f64) -> f64 {
        let first = self.reference.first().height_m;
        if height_m == first {
            return 0.0;
        }
        if height_m == self.reference.second().height_m {
            return 12.0;
        }

        let progress = 12.0 * (height_m - first) / self.reference.height_range();
        if progress.abs() < PROGRESS_EPSILON {
            0.0
        } else if (progress - 12.0).abs() < PROGRESS_EPSILON {
            12.0
        } else {
            progress
        }
    }
}

/// Build the reference of one half-cycle from its two extrema.
///
/// # Errors
/// A construction error when the heights or the times are equal.
pub fn build_reference(
    t1: ClockTime,
    h1: f64,
    t2: ClockTime,
    h2: f64,
) -> Result<TidalReference, TideError> {
    TidalReference::new(
        Extremum {
            time: t1,
            height_m: h1,
        },
        Extremum {
            time: t2,
            height_m: h2,
        },
    )
}

/// Estimated height at a clock time. See [`TideInterpolator::height_at`].
pub fn height_at(
    reference: &TidalReference,
    query: ClockTime,
    offset_minutes: i32,
) -> Result<f64, TideError> {
    TideInterpolator::new(reference).height_at(query, offset_minutes)
}

/// Estimated clock time for a height. See [`TideInterpolator::time_at`].
pub fn time_at(
    reference: &TidalReference,
    height_m: f64,
    offset_minutes: i32,
) -> Result<ClockTime, TideError> {
    TideInterpolator::new(reference).time_at(height_m, offset_minutes)
}
