//! Aggregated results of one orchestration run.
//!
//! [`RunReport`] is what the caller gets back, images included. [`RunSummary`]
//! is the projection persisted to disk: the same metadata with the image
//! payloads stripped, so archived summaries stay small and only reference the
//! stored PNG files.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{
    chart::{ChartFailure, ChartImage},
    symbol::ExchangeSymbol,
    timeframe::Timeframe,
};

/// Number of charts a fully successful run produces.
pub const EXPECTED_CHARTS: usize = Timeframe::ALL.len();

/// Full result of one run, returned to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub ticker: String,
    pub symbol: ExchangeSymbol,
    pub timestamp: DateTime<Local>,
    /// Stored charts keyed by slot label (`1h`, `1D`, `1W`), in slot order.
    pub charts: IndexMap<String, ChartImage>,
    pub errors: Vec<ChartFailure>,
    pub success_count: usize,
    pub error_count: usize,
    /// True only when every slot produced a chart.
    pub success: bool,
    /// Where the [`RunSummary`] for this run was written.
    pub summary_path: PathBuf,
}

impl RunReport {
    /// Assembles a report and derives the counters from `charts` and `errors`.
    pub fn new(
        ticker: String,
        symbol: ExchangeSymbol,
        timestamp: DateTime<Local>,
        charts: IndexMap<String, ChartImage>,
        errors: Vec<ChartFailure>,
    ) -> Self {
        let success_count = charts.len();
        let error_count = errors.len();
        Self {
            ticker,
            symbol,
            timestamp,
            charts,
            errors,
            success_count,
            error_count,
            success: success_count >= EXPECTED_CHARTS,
            summary_path: PathBuf::new(),
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from(self)
    }
}

/// Chart metadata kept in the persisted summary. Never carries image bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub description: String,
    pub interval: String,
    pub local_path: PathBuf,
    pub size_kb: f64,
    pub indicators: Vec<String>,
    pub bars_back: u32,
    pub extended_hours: bool,
    pub api_version: String,
}

impl From<&ChartImage> for ChartSummary {
    fn from(image: &ChartImage) -> Self {
        Self {
            description: image.description.clone(),
            interval: image.interval.clone(),
            local_path: image.local_path.clone(),
            size_kb: image.size_kb,
            indicators: image.indicators.clone(),
            bars_back: image.bars_back,
            extended_hours: image.extended_hours,
            api_version: image.api_version.clone(),
        }
    }
}

/// Persisted record of one run. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticker: String,
    pub symbol: ExchangeSymbol,
    pub timestamp: DateTime<Local>,
    pub success: bool,
    pub success_count: usize,
    pub error_count: usize,
    pub charts: IndexMap<String, ChartSummary>,
    pub errors: Vec<ChartFailure>,
}

impl From<&RunReport> for RunSummary {
    fn from(report: &RunReport) -> Self {
        Self {
            ticker: report.ticker.clone(),
            symbol: report.symbol.clone(),
            timestamp: report.timestamp,
            success: report.success,
            success_count: report.success_count,
            error_count: report.error_count,
            charts: report
                .charts
                .iter()
                .map(|(k, v)| (k.clone(), ChartSummary::from(v)))
                .collect(),
            errors: report.errors.clone(),
        }
    }
}
