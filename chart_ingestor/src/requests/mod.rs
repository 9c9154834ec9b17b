//! Chart generation workflows: the single-chart fetcher and the
//! multi-timeframe orchestrator built on top of it.

pub mod chart;
pub mod multi_timeframe;

use thiserror::Error;

use crate::io::sink::SinkError;

/// strftime pattern used in generated file names (millisecond resolution).
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";

/// Errors that abort a whole run.
///
/// Remote-call failures never show up here; they are recorded per timeframe
/// in the [`RunReport`](crate::models::summary::RunReport).
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The ticker was empty after trimming.
    #[error("No ticker provided")]
    EmptyTicker,

    /// An image or the run summary could not be stored.
    #[error("orchestration failed: {0}")]
    Persistence(#[from] SinkError),
}

/// Replaces anything outside `[A-Za-z0-9._-]` with `_` so caller-supplied
/// tickers and symbols cannot escape the output directory.
pub fn file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .replace("..", "__")
}
