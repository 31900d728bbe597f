//! # Tide Calculator Entry Point
//!
//! This binary reads two consecutive tidal extrema (from the command line or
//! from prompts), prints the half-cycle summary, then answers queries until the
//! user quits:
//!
//! - a time such as `06h30` asks for the height of the tide at that time
//! - a height such as `3.80` asks for the time the tide reaches it
//! - `été`/`summer` and `hiver`/`winter` switch the clock offset
//!
//! Rejected queries are reported and the loop keeps going; only a degenerate
//! pair of extrema ends the program with an error.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use clap::Parser;
use rustyline::{error::ReadlineError, DefaultEditor};
use serde_json::json;
use std::path::PathBuf;
use tide_twelfths_lib::{
    config::{Config, DEFAULT_CONFIG_FILE},
    input::{self, Token},
    logging, renderer, ClockTime, Extremum, Season, Session, TidalReference, TideError,
};
use tracing::{debug, error, info};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tide-twelfths")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// The two extrema as four words: TIME1 HEIGHT1 TIME2 HEIGHT2 (e.g. 03h00 1.20 09h00 6.80)
    #[arg(value_name = "EXTREMA")]
    extrema: Vec<String>,

    /// Path to the TOML configuration file
    #[arg(short, long, env = "TIDE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Start in summer time
    #[arg(long)]
    summer: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TIDE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print answers as JSON lines
    #[arg(long)]
    json: bool,

    /// Answer these queries and exit instead of starting the prompt
    #[arg(short, long = "query", value_name = "QUERY")]
    queries: Vec<String>,
}

/// How answers are printed
#[derive(Clone, Copy, Debug)]
pub(crate) struct Output {
    pub precision: usize,
    pub json: bool,
    pub chart_rows: usize,
    pub chart_columns: usize,
}

impl Output {
    fn from_config(config: &Config, json: bool) -> Self {
        Output {
            precision: config.display.precision,
            json,
            chart_rows: config.display.chart_rows,
            chart_columns: config.display.chart_columns,
        }
    }
}

/// Result of handling one word of input
#[derive(Debug, PartialEq)]
pub(crate) enum Reply {
    Text(String),
    Rejected(TideError),
    Quit,
}

/// Classify and answer one word against the session.
pub(crate) fn handle_word(session: &mut Session, word: &str, output: &Output) -> Reply {
    let token = match input::classify(word) {
        Ok(token) => token,
        Err(e) => return Reply::Rejected(e),
    };
    debug!(word, ?token, "token");

    match token {
        Token::Quit => Reply::Quit,
        Token::Help => Reply::Text(renderer::help_text().to_string()),
        Token::Season(season) => {
            session.set_season(season);
            Reply::Text(match season {
                Season::Summer => format!(
                    "summer time: tide table + {} min",
                    session.offset_minutes()
                ),
                Season::Winter => "winter time: tide table time".to_string(),
            })
        }
        Token::Table => {
            let rows = session.twelfths_table();
            if output.json {
                Reply::Text(renderer::to_json(&rows))
            } else {
                Reply::Text(renderer::format_table(&rows, output.precision))
            }
        }
        Token::Chart => Reply::Text(renderer::draw_ascii(
            session.reference(),
            &session.curve(output.chart_columns),
            output.chart_rows,
        )),
        Token::Now => answer_height(session, input::local_now(), output),
        Token::Time(time) => answer_height(session, time, output),
        Token::Height(height_m) => match session.time_at(height_m) {
            Ok(estimate) if output.json => Reply::Text(renderer::to_json(&estimate)),
            Ok(estimate) => Reply::Text(renderer::format_time_answer(&estimate, output.precision)),
            Err(e) => Reply::Rejected(e),
        },
    }
}

fn answer_height(session: &Session, time: ClockTime, output: &Output) -> Reply {
    match session.height_at(time) {
        Ok(estimate) if output.json => Reply::Text(renderer::to_json(&estimate)),
        Ok(estimate) => Reply::Text(renderer::format_height_answer(&estimate, output.precision)),
        Err(e) => Reply::Rejected(e),
    }
}

/// Print a reply; returns `false` when the session should end.
fn emit(reply: Reply, word: &str, output: &Output) -> bool {
    match reply {
        Reply::Text(text) => {
            println!("{}", text.trim_end());
            true
        }
        Reply::Rejected(e) => {
            logging::log_rejected_input(&e, word);
            if output.json {
                println!("{}", json!({ "input": word, "error": e.to_string() }));
            } else {
                eprintln!("error: {e}");
            }
            true
        }
        Reply::Quit => false,
    }
}

/// Build the reference from four command-line words.
pub(crate) fn reference_from_words(words: &[String]) -> anyhow::Result<TidalReference> {
    let [t1, h1, t2, h2] = words else {
        bail!(
            "expected four words TIME1 HEIGHT1 TIME2 HEIGHT2, got {}",
            words.len()
        );
    };

    let first = Extremum {
        time: input::parse_clock_time(t1)?,
        height_m: input::parse_height(h1)?,
    };
    let second = Extremum {
        time: input::parse_clock_time(t2)?,
        height_m: input::parse_height(h2)?,
    };

    TidalReference::new(first, second).context("cannot build a tidal reference")
}

/// Ask for a value until it parses; `None` when input is closed.
fn prompt_until<T>(
    editor: &mut DefaultEditor,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, TideError>,
) -> anyhow::Result<Option<T>> {
    loop {
        match editor.readline(prompt) {
            Ok(line) => match parse(line.trim()) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => eprintln!("error: {e}"),
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(e) => bail!("failed to read input: {e}"),
        }
    }
}

/// Prompt for the two extrema.
fn prompt_reference(editor: &mut DefaultEditor) -> anyhow::Result<TidalReference> {
    let mut extrema = Vec::with_capacity(2);
    for n in 1..=2 {
        let time = prompt_until(editor, &format!("Time {n}: "), input::parse_clock_time)?;
        let height = match time {
            Some(_) => prompt_until(editor, &format!("Height {n}: "), input::parse_height)?,
            None => None,
        };
        match (time, height) {
            (Some(time), Some(height_m)) => extrema.push(Extremum { time, height_m }),
            _ => bail!("input closed before both extrema were entered"),
        }
    }

    TidalReference::new(extrema[0], extrema[1]).context("cannot build a tidal reference")
}

/// Interactive loop: every whitespace-separated word is one query.
fn run_repl(
    editor: &mut DefaultEditor,
    session: &mut Session,
    prompt: &str,
    output: &Output,
) -> anyhow::Result<()> {
    loop {
        match editor.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                for word in line.split_whitespace() {
                    let reply = handle_word(session, word, output);
                    if !emit(reply, word, output) {
                        return Ok(());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => bail!("failed to read input: {e}"),
        }
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_from_path(&args.config);
    logging::init_tracing(args.log_level.as_deref().unwrap_or(&config.log_level));
    let output = Output::from_config(&config, args.json);

    let mut editor = DefaultEditor::new().context("failed to initialize line editor")?;
    let history = config.repl.history_file.as_str();
    if !history.is_empty() {
        let _ = editor.load_history(history);
    }

    let reference = match args.extrema.len() {
        0 => prompt_reference(&mut editor),
        _ => reference_from_words(&args.extrema),
    }
    .inspect_err(|e| error!(error = %e, "no usable tidal reference"))?;

    if !output.json {
        println!();
        println!("{}", renderer::format_extrema(&reference, output.precision));
        println!("{}", renderer::format_summary(&reference, output.precision));
        println!();
    }

    let season = if args.summer || config.session.summer_time {
        Season::Summer
    } else {
        Season::Winter
    };
    let mut session =
        Session::with_summer_offset(reference, season, config.session.summer_offset_minutes);

    if !args.queries.is_empty() {
        info!(count = args.queries.len(), "answering queries from the command line");
        for word in args.queries.iter().flat_map(|q| q.split_whitespace()) {
            if !emit(handle_word(&mut session, word, &output), word, &output) {
                break;
            }
        }
        return Ok(());
    }

    run_repl(&mut editor, &mut session, &config.repl.prompt, &output)?;

    if !history.is_empty() {
        let _ = editor.save_history(history);
    }
    Ok(())
}
