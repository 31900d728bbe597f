//! # Rule-of-Twelfths Property Tests
//!
//! These tests check the calculator's guarantees over several half-cycles at
//! once: rising and falling tides, half periods that are not a whole number of
//! minutes per interval, and negative heights. They complement the example-based
//! unit tests living next to each module.

use tide_twelfths_lib::{
    build_reference, height_at, time_at, ClockTime, ErrorKind, TidalReference,
};

/// Half-cycles covering both directions and awkward durations.
fn references() -> Vec<TidalReference> {
    vec![
        // Rising, 360 min
        build_reference(ClockTime::new(3, 0), 1.20, ClockTime::new(9, 0), 6.80).unwrap(),
        // Falling, 378 min
        build_reference(ClockTime::new(10, 12), 5.40, ClockTime::new(16, 30), 0.90).unwrap(),
        // Rising, 375 min: 62.5 min per interval
        build_reference(ClockTime::new(4, 47), 0.85, ClockTime::new(11, 2), 4.37).unwrap(),
        // Falling below chart datum, 386 min
        build_reference(ClockTime::new(14, 5), 0.40, ClockTime::new(20, 31), -1.10).unwrap(),
    ]
}

/// Largest height change produced by half a minute of rounding.
fn half_minute_tolerance(reference: &TidalReference) -> f64 {
    let steepest_per_minute = 3.0 * reference.twelfth_height().abs() / reference.twelfth_minutes().abs();
    0.5 * steepest_per_minute + 1e-9
}

/// Test that both extrema are returned exactly by the forward query.
#[test]
fn extrema_heights_are_exact() {
    for r in references() {
        assert_eq!(
            height_at(&r, r.first().time, 0).unwrap(),
            r.first().height_m,
            "first extremum of {r:?}"
        );
        assert_eq!(
            height_at(&r, r.second().time, 0).unwrap(),
            r.second().height_m,
            "second extremum of {r:?}"
        );
    }
}

/// Test that heights never move against the tide between the two extrema.
#[test]
fn heights_are_monotonic_over_the_half_cycle() {
    for r in references() {
        let rising = r.height_range() > 0.0;
        let mut previous = r.first().height_m;

        for minute in 0..=r.half_period_minutes() {
            let time = r.first().time.add_minutes(minute);
            let h = height_at(&r, time, 0).unwrap();
            if rising {
                assert!(h >= previous, "{time}: {h} dropped below {previous}");
            } else {
                assert!(h <= previous, "{time}: {h} rose above {previous}");
            }
            previous = h;
        }
    }
}

/// Test that the inverse query stays inside the half-cycle and agrees with
/// the forward query to within the minute rounding.
#[test]
fn inverse_is_approximate_within_a_minute() {
    for r in references() {
        let tolerance = half_minute_tolerance(&r);

        for k in 1..200 {
            let m = r.first().height_m + r.height_range() * k as f64 / 200.0;
            let t = time_at(&r, m, 0).unwrap();

            let elapsed = r.first().time.minutes_until(t);
            assert!(
                (0..=r.half_period_minutes()).contains(&elapsed),
                "{m} m answered {t}, outside the half-cycle"
            );

            let back = height_at(&r, t, 0).unwrap();
            assert!(
                (back - m).abs() <= tolerance,
                "{m} m -> {t} -> {back} m (tolerance {tolerance})"
            );
        }
    }
}

/// Test that the extrema heights map back to the extrema times.
#[test]
fn extrema_times_are_exact() {
    for r in references() {
        assert_eq!(time_at(&r, r.first().height_m, 0).unwrap(), r.first().time);
        assert_eq!(time_at(&r, r.second().height_m, 0).unwrap(), r.second().time);
    }
}

/// Test that heights beyond either extremum are rejected, never clamped.
#[test]
fn heights_outside_the_range_are_rejected() {
    for r in references() {
        let low = r.low_water().height_m;
        let high = r.high_water().height_m;

        for m in [low - 1.0, low - 0.01, high + 0.01, high + 1.0] {
            let err = time_at(&r, m, 0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::HeightOutOfRange, "{m} m");
        }
    }
}

/// Test that times beyond either extremum are rejected, never extrapolated.
#[test]
fn times_outside_the_half_cycle_are_rejected() {
    for r in references() {
        for time in [r.first().time.add_minutes(-1), r.second().time.add_minutes(1)] {
            let err = height_at(&r, time, 0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::QueryOutOfRange, "{time}");
        }
    }
}

/// Test the worked example: low water 03h00 1.20 m, high water 09h00 6.80 m.
#[test]
fn worked_example() {
    let r = build_reference(ClockTime::new(3, 0), 1.20, ClockTime::new(9, 0), 6.80).unwrap();

    let h = height_at(&r, ClockTime::new(6, 0), 0).unwrap();
    assert!((h - 4.00).abs() < 1e-9, "height at 06h00 was {h}");
    assert_eq!(time_at(&r, 4.00, 0).unwrap(), ClockTime::new(6, 0));

    // one hour of summer time shifts the query by one hour
    assert_eq!(height_at(&r, ClockTime::new(7, 0), 60).unwrap(), h);
}

/// Test that an offset shifts every answer by exactly the offset.
#[test]
fn offset_shifts_answers() {
    for r in references() {
        for k in 1..12 {
            let m = r.first().height_m + r.height_range() * k as f64 / 12.0;
            let winter = time_at(&r, m, 0).unwrap();
            let summer = time_at(&r, m, 60).unwrap();
            assert_eq!(winter.minutes_until(summer), 60);
        }
    }
}

#[cfg(test)]
mod performance_tests {
    use super::*;
    use std::time::Instant;

    /// Test that queries are cheap enough for an interactive loop.
    #[test]
    fn many_queries_are_fast() {
        let r = references().remove(0);
        let start = Instant::now();

        for i in 0..10_000 {
            let minute = i % (r.half_period_minutes() + 1);
            let h = height_at(&r, r.first().time.add_minutes(minute), 0).unwrap();
            let _ = time_at(&r, h, 0).unwrap();
        }

        let duration = start.elapsed();
        assert!(
            duration.as_millis() < 1000,
            "10,000 query pairs took too long: {:?}",
            duration
        );
    }
}
