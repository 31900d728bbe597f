//! End-to-end use of the library API: build a reference from parsed words,
//! open a session, and answer a stream of mixed queries.

use pretty_assertions::assert_eq;
use tide_twelfths_lib::{
    config::Config,
    input::{classify, parse_clock_time, parse_height, Token},
    renderer, ClockTime, ErrorKind, Extremum, Season, Session, TidalReference,
};

fn falling_session() -> Session {
    let high = Extremum {
        time: parse_clock_time("10h12").unwrap(),
        height_m: parse_height("5,40").unwrap(),
    };
    let low = Extremum {
        time: parse_clock_time("16h30").unwrap(),
        height_m: parse_height("0.90m").unwrap(),
    };
    Session::new(TidalReference::new(high, low).unwrap(), Season::Winter)
}

#[test]
fn stream_of_queries() {
    let mut session = falling_session();
    let mut answers = Vec::new();

    for word in "13h21 3.15 été 14h21 3.15 hiver 17h00 9".split_whitespace() {
        match classify(word).unwrap() {
            Token::Season(season) => session.set_season(season),
            Token::Time(time) => answers.push(
                session
                    .height_at(time)
                    .map(|e| renderer::format_height_answer(&e, 2))
                    .map_err(|e| e.kind()),
            ),
            Token::Height(height) => answers.push(
                session
                    .time_at(height)
                    .map(|e| renderer::format_time_answer(&e, 2))
                    .map_err(|e| e.kind()),
            ),
            other => panic!("unexpected token {other:?}"),
        }
    }

    assert_eq!(
        answers,
        vec![
            // three intervals of 63 min after high water: half the range
            Ok("tide height at 13h21 (winter time): 3.15 m".to_string()),
            Ok("tide time at 3.15 m: 13h21 (winter time)".to_string()),
            Ok("tide height at 14h21 (summer time): 3.15 m".to_string()),
            Ok("tide time at 3.15 m: 14h21 (summer time)".to_string()),
            Err(ErrorKind::QueryOutOfRange),
            Err(ErrorKind::HeightOutOfRange),
        ]
    );
}

#[test]
fn session_honours_configured_summer_offset() {
    let config: Config = toml::from_str(
        r#"
[session]
summer_time = true
summer_offset_minutes = 120
"#,
    )
    .unwrap();

    let reference = *falling_session().reference();
    let session = Session::with_summer_offset(
        reference,
        if config.session.summer_time {
            Season::Summer
        } else {
            Season::Winter
        },
        config.session.summer_offset_minutes,
    );

    assert_eq!(session.time_at(5.40).unwrap().time, ClockTime::new(12, 12));
    assert_eq!(session.time_at(0.90).unwrap().time, ClockTime::new(18, 30));
}

#[test]
fn degenerate_reference_is_a_construction_error() {
    let a = Extremum {
        time: ClockTime::new(3, 0),
        height_m: 2.5,
    };
    let b = Extremum {
        time: ClockTime::new(9, 0),
        height_m: 2.5,
    };
    let err = TidalReference::new(a, b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Construction);
}
