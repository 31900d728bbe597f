//! # Interactive Input Parsing
//!
//! The calculator reads whitespace-separated words. Each word is classified into
//! a [`Token`]: a command keyword, a clock time (`06h30`, `6H30`) or a height in
//! metres (`3.8`, `3,80`, `3.8m`). Time tokens are tried before heights, so
//! `6h30` is never misread as a number.
//!
//! Parsing never panics: anything unreadable becomes
//! [`TideError::MalformedInput`] and the interactive loop keeps going.

use crate::{error::TideError, session::Season, ClockTime};

/// One classified word of interactive input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    /// End the session (`.`, `q`, `quit`, `exit`)
    Quit,
    /// Show the command summary
    Help,
    /// Print the table of the six intervals
    Table,
    /// Draw the ASCII curve of the half-cycle
    Chart,
    /// Ask for the height at the current local time
    Now,
    /// Switch the clock offset (`été`, `summer`, `hiver`, `winter`)
    Season(Season),
    /// Ask for the height at this time
    Time(ClockTime),
    /// Ask for the time of this height
    Height(f64),
}

/// Classify one word of interactive input.
///
/// # Example
/// ```
/// use tide_twelfths_lib::input::{classify, Token};
/// use tide_twelfths_lib::ClockTime;
///
/// assert_eq!(classify("6h30").unwrap(), Token::Time(ClockTime::new(6, 30)));
/// assert_eq!(classify("3,80").unwrap(), Token::Height(3.8));
/// assert!(classify("banana").is_err());
/// ```
pub fn classify(word: &str) -> Result<Token, TideError> {
    let word = word.trim();
    let keyword = word.to_lowercase();

    match keyword.as_str() {
        "." | "q" | "quit" | "exit" => return Ok(Token::Quit),
        "help" | "?" => return Ok(Token::Help),
        "table" => return Ok(Token::Table),
        "chart" | "curve" => return Ok(Token::Chart),
        "now" | "maintenant" => return Ok(Token::Now),
        _ => {}
    }

    if let Some(season) = Season::from_keyword(&keyword) {
        return Ok(Token::Season(season));
    }

    if looks_like_time(word) {
        return parse_clock_time(word).map(Token::Time);
    }

    parse_height(word)
        .map(Token::Height)
        .map_err(|_| TideError::malformed(word, "expected a time (06h30), a height (3.80) or a command"))
}

/// Parse an `HHhMM` clock time. Hours must be in `0..24` and minutes in `0..60`.
pub fn parse_clock_time(token: &str) -> Result<ClockTime, TideError> {
    let token = token.trim();
    let (hours, minutes) = token
        .split_once(|c: char| c == 'h' || c == 'H')
        .ok_or_else(|| TideError::malformed(token, "expected a time such as 06h30"))?;

    if !is_digits(hours) || !is_digits(minutes) {
        return Err(TideError::malformed(token, "expected a time such as 06h30"));
    }

    let hour: i32 = hours
        .parse()
        .map_err(|_| TideError::malformed(token, "hour is too large"))?;
    let minute: i32 = minutes
        .parse()
        .map_err(|_| TideError::malformed(token, "minute is too large"))?;

    if !(0..24).contains(&hour) {
        return Err(TideError::malformed(token, "hour must be between 0 and 23"));
    }
    if !(0..60).contains(&minute) {
        return Err(TideError::malformed(token, "minute must be between 0 and 59"));
    }

    Ok(ClockTime::new(hour, minute))
}

/// Parse a height in metres: a decimal number with an optional `m` suffix and
/// either `.` or `,` as decimal separator.
pub fn parse_height(token: &str) -> Result<f64, TideError> {
    let token = token.trim();
    let number = token.strip_suffix('m').unwrap_or(token).replace(',', ".");

    let height: f64 = number
        .parse()
        .map_err(|_| TideError::malformed(token, "expected a height such as 3.80"))?;

    if !height.is_finite() {
        return Err(TideError::malformed(token, "height must be a finite number"));
    }
    Ok(height)
}

/// Current local wall-clock time, for the `now` command.
pub fn local_now() -> ClockTime {
    ClockTime::from(chrono::Local::now().time())
}

fn looks_like_time(word: &str) -> bool {
    word.contains(|c: char| c == 'h' || c == 'H') && word.starts_with(|c: char| c.is_ascii_digit())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
