//! Logging utilities for the tide calculator.
//!
//! Logs are structured `tracing` events written to stderr, so they never mix
//! with the answers printed on stdout.

use crate::error::TideError;
use tracing::warn;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn init_tracing(log_level: &str) {
    let filter = resolve_filter(std::env::var("RUST_LOG").ok(), log_level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_filter(env_filter: Option<String>, log_level: &str) -> String {
    match env_filter {
        Some(val) if !val.trim().is_empty() => val,
        _ => log_level.to_string(),
    }
}

/// Log a rejected query with the word that caused it
pub fn log_rejected_input(error: &TideError, input: &str) {
    warn!(
        error = %error,
        kind = ?error.kind(),
        input = input,
        "Query rejected"
    );
}
