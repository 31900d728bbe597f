//! # Calculator Session
//!
//! A [`Session`] is the context the interactive loop owns: the active tidal
//! reference and the seasonal clock offset. Every query goes through it, so no
//! state lives outside the value the caller holds.

use crate::{
    error::TideError,
    interpolator::TideInterpolator,
    reference::{boundary_progress, TidalReference, INTERVALS, TWELFTHS},
    ClockTime,
};
use serde::Serialize;
use tracing::{debug, info};

/// Default summer-time shift in minutes.
pub const DEFAULT_SUMMER_OFFSET_MINUTES: i32 = 60;

/// Clock convention of the times typed and printed during a session.
///
/// Tide tables are published in standard time; in summer the local clock runs
/// ahead, so queries are shifted by the summer offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Summer,
}

impl Season {
    /// Recognize a season keyword (English or French, case-insensitive).
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "été" | "ete" | "summer" => Some(Season::Summer),
            "hiver" | "winter" => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Summer => "summer",
        }
    }
}

/// Answer to a time → height query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HeightEstimate {
    pub time: ClockTime,
    pub height_m: f64,
    pub season: Season,
}

/// Answer to a height → time query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeEstimate {
    pub height_m: f64,
    pub time: ClockTime,
    pub season: Season,
}

/// One boundary of the six rule-of-twelfths intervals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TableRow {
    /// Boundary index, 0 (first extremum) to 6 (second extremum)
    pub boundary: usize,
    /// Twelfths of the range reached at this boundary
    pub twelfths: u32,
    /// Clock time of the boundary in the session's season
    pub time: ClockTime,
    /// Height at the boundary
    pub height_m: f64,
    /// Height change over the interval ending here (0 for the first row)
    pub change_m: f64,
}

/// The active reference plus the seasonal clock offset.
///
/// # Example
/// ```
/// use tide_twelfths_lib::{build_reference, ClockTime, Season, Session};
///
/// let reference = build_reference(ClockTime::new(3, 0), 1.20, ClockTime::new(9, 0), 6.80).unwrap();
/// let mut session = Session::new(reference, Season::Winter);
///
/// let winter = session.height_at(ClockTime::new(6, 0)).unwrap();
/// session.set_season(Season::Summer);
/// let summer = session.height_at(ClockTime::new(7, 0)).unwrap();
///
/// assert_eq!(winter.height_m, summer.height_m);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    reference: TidalReference,
    season: Season,
    summer_offset_minutes: i32,
}

impl Session {
    pub fn new(reference: TidalReference, season: Season) -> Self {
        Self::with_summer_offset(reference, season, DEFAULT_SUMMER_OFFSET_MINUTES)
    }

    pub fn with_summer_offset(
        reference: TidalReference,
        season: Season,
        summer_offset_minutes: i32,
    ) -> Self {
        info!(
            first = %reference.first().time,
            second = %reference.second().time,
            direction = ?reference.direction(),
            season = season.as_str(),
            "session started"
        );
        Session {
            reference,
            season,
            summer_offset_minutes,
        }
    }

    pub fn reference(&self) -> &TidalReference {
        &self.reference
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn set_season(&mut self, season: Season) {
        if self.season != season {
            info!(from = self.season.as_str(), to = season.as_str(), "season changed");
        }
        self.season = season;
    }

    /// Offset in minutes between the session clock and the tide-table clock.
    pub fn offset_minutes(&self) -> i32 {
        match self.season {
            Season::Winter => 0,
            Season::Summer => self.summer_offset_minutes,
        }
    }

    pub fn height_at(&self, time: ClockTime) -> Result<HeightEstimate, TideError> {
        let height_m = self.interpolator().height_at(time, self.offset_minutes())?;
        debug!(%time, height_m, season = self.season.as_str(), "height estimated");
        Ok(HeightEstimate {
            time,
            height_m,
            season: self.season,
        })
    }

    pub fn time_at(&self, height_m: f64) -> Result<TimeEstimate, TideError> {
        let time = self.interpolator().time_at(height_m, self.offset_minutes())?;
        debug!(height_m, %time, season = self.season.as_str(), "time estimated");
        Ok(TimeEstimate {
            height_m,
            time,
            season: self.season,
        })
    }

    /// Time and height at each of the seven interval boundaries.
    pub fn twelfths_table(&self) -> Vec<TableRow> {
        let first = self.reference.first().time;
        (0..=INTERVALS)
            .map(|boundary| {
                let elapsed = (boundary as f64 * self.reference.twelfth_minutes()).round() as i32;
                let change_m = match boundary {
                    0 => 0.0,
                    b => TWELFTHS[b - 1] as f64 * self.reference.twelfth_height(),
                };
                TableRow {
                    boundary,
                    twelfths: boundary_progress(boundary),
                    time: first.add_minutes(elapsed + self.offset_minutes()),
                    height_m: self
                        .reference
                        .height_for_progress(boundary_progress(boundary) as f64),
                    change_m,
                }
            })
            .collect()
    }

    /// `points` evenly spaced estimates from the first to the second extremum.
    ///
    /// Fewer than two points yields the two extrema.
    pub fn curve(&self, points: usize) -> Vec<HeightEstimate> {
        let points = points.max(2);
        let half_period = self.reference.half_period_minutes() as f64;
        let first = self.reference.first().time.add_minutes(self.offset_minutes());

        (0..points)
            .filter_map(|i| {
                let elapsed = (i as f64 * half_period / (points - 1) as f64).round() as i32;
                self.height_at(first.add_minutes(elapsed)).ok()
            })
            .collect()
    }

    fn interpolator(&self) -> TideInterpolator<'_> {
        TideInterpolator::new(&self.reference)
    }
}
