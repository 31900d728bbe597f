//! # Text Rendering
//!
//! This module turns references and answers into the text printed by the
//! calculator: the extrema banner, one-line answers, the table of the six
//! intervals and an ASCII curve of the half-cycle. Every function returns a
//! `String` so the binary decides where it goes and tests can inspect it.

use crate::{
    reference::{Direction, TidalReference, INTERVALS},
    session::{HeightEstimate, Season, TableRow, TimeEstimate},
    Extremum,
};
use serde::Serialize;

/// Width reserved on the left of the chart for height labels and the axis.
const Y_AXIS_WIDTH: usize = 7;

/// Format a height in metres with the configured number of decimals
pub fn format_height(height_m: f64, precision: usize) -> String {
    format!("{:.*} m", precision, height_m)
}

fn season_label(season: Season) -> &'static str {
    match season {
        Season::Winter => "winter time",
        Season::Summer => "summer time",
    }
}

/// The two extrema, labelled high and low water according to the direction.
pub fn format_extrema(reference: &TidalReference, precision: usize) -> String {
    let (first_label, second_label) = match reference.direction() {
        Direction::Falling => ("High water", "Low water"),
        Direction::Rising => ("Low water", "High water"),
    };

    let line = |label: &str, extremum: Extremum| {
        format!(
            "{:<11} {}  {:>width$}",
            format!("{label}:"),
            extremum.time,
            format_height(extremum.height_m, precision),
            width = precision + 6
        )
    };

    format!(
        "{}\n{}",
        line(first_label, reference.first()),
        line(second_label, reference.second())
    )
}

/// Interval duration and per-twelfth height change of the half-cycle.
pub fn format_summary(reference: &TidalReference, precision: usize) -> String {
    format!(
        "Interval: {:.1} min  twelfth: {:.*} m  ({})",
        reference.twelfth_minutes().abs(),
        precision + 1,
        reference.twelfth_height().abs(),
        match reference.direction() {
            Direction::Rising => "rising",
            Direction::Falling => "falling",
        }
    )
}

pub fn format_height_answer(estimate: &HeightEstimate, precision: usize) -> String {
    format!(
        "tide height at {} ({}): {}",
        estimate.time,
        season_label(estimate.season),
        format_height(estimate.height_m, precision)
    )
}

pub fn format_time_answer(estimate: &TimeEstimate, precision: usize) -> String {
    format!(
        "tide time at {}: {} ({})",
        format_height(estimate.height_m, precision),
        estimate.time,
        season_label(estimate.season)
    )
}

/// Table of the seven interval boundaries.
pub fn format_table(rows: &[TableRow], precision: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:>5}  {:>8}  {:>w$}  {:>w$}\n",
        "#",
        "time",
        "twelfths",
        "height",
        "change",
        w = precision + 6
    ));
    for row in rows {
        let change = if row.boundary == 0 {
            String::new()
        } else {
            format!("{:+.*}", precision, row.change_m)
        };
        out.push_str(&format!(
            "{:>4}  {}  {:>5}/12  {:>w$.p$}  {:>w$}\n",
            row.boundary,
            row.time,
            row.twelfths,
            row.height_m,
            change,
            w = precision + 6,
            p = precision
        ));
    }
    out
}

/// Pick a label step that gives a handful of height labels for the range.
fn label_step(range_m: f64) -> f64 {
    if range_m > 4.0 {
        1.0
    } else if range_m > 1.0 {
        0.5
    } else {
        0.1
    }
}

/// ASCII curve of the half-cycle from sampled estimates.
///
/// Heights go up the rows, time goes right along the columns; `|` marks below
/// the plot show the six interval boundaries.
pub fn draw_ascii(reference: &TidalReference, curve: &[HeightEstimate], rows: usize) -> String {
    let rows = rows.max(2);
    let columns = curve.len();
    if columns == 0 {
        return String::new();
    }

    let min_m = reference.low_water().height_m;
    let max_m = reference.high_water().height_m;

    let height_to_row = |height_m: f64| {
        let normalized = (height_m - min_m) / (max_m - min_m);
        (((1.0 - normalized) * (rows as f64 - 1.0)).round().max(0.0) as usize).min(rows - 1)
    };

    let mut grid = vec![vec![' '; columns + Y_AXIS_WIDTH]; rows];
    for line in grid.iter_mut() {
        line[Y_AXIS_WIDTH - 1] = '│';
    }

    // Y-axis labels
    let step = label_step(max_m - min_m);
    let first = (min_m / step).ceil();
    let last = ((max_m + 1e-9) / step).floor();
    if first <= last {
        // at most one label per row
        let stride = ((last - first + 1.0) / rows as f64).ceil().max(1.0) as usize;
        for k in (first as i64..=last as i64).step_by(stride) {
            let label_m = k as f64 * step;
            let row = height_to_row(label_m);
            let label = format!("{:>width$.1}", label_m, width = Y_AXIS_WIDTH - 2);
            for (i, ch) in label.chars().take(Y_AXIS_WIDTH - 2).enumerate() {
                grid[row][i] = ch;
            }
        }
    }

    for (column, estimate) in curve.iter().enumerate() {
        let row = height_to_row(estimate.height_m);
        grid[row][column + Y_AXIS_WIDTH] = '•';
    }

    let mut out = String::new();
    for line in grid {
        out.push_str(line.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    // Interval boundary markers below the chart
    let padding = " ".repeat(Y_AXIS_WIDTH);
    let mut markers = vec![' '; columns];
    for boundary in 0..=INTERVALS {
        let column = ((boundary * (columns - 1)) as f64 / INTERVALS as f64).round() as usize;
        markers[column.min(columns - 1)] = '|';
    }
    out.push_str(&padding);
    out.push_str(&markers.into_iter().collect::<String>());
    out.push('\n');

    // Start and end times
    let start = curve[0].time.to_string();
    let end = curve[columns - 1].time.to_string();
    let gap = columns.saturating_sub(start.len() + end.len()).max(1);
    out.push_str(&format!("{padding}{start}{}{end}\n", " ".repeat(gap)));

    out
}

/// Serialize an answer for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Command summary for the interactive loop.
pub fn help_text() -> &'static str {
    "Enter one or more words per line:
  06h30         height of the tide at that time
  3.80          time at which the tide reaches that height
  now           height of the tide at the current local time
  été | summer  times are in summer time (tide table + offset)
  hiver | winter  times are in tide-table (winter) time
  table         times and heights of the six intervals
  chart         ASCII curve of the half-cycle
  help          this summary
  . | quit      leave"
}
