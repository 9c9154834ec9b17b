//! Hourly, daily and weekly charts for one ticker.
//!
//! [`ChartOrchestrator::run`] resolves the ticker, drives
//! [`fetch_chart`](crate::requests::chart::fetch_chart) once per
//! [`Timeframe`] slot, retries the hourly slot once with its alternate interval
//! encoding, aggregates the outcomes into a [`RunReport`] and persists the
//! matching [`RunSummary`](crate::models::summary::RunSummary).
//!
//! A failed timeframe never stops the others. Only storage failures abort a
//! run, as [`OrchestrationError::Persistence`].

use std::{path::Path, sync::Arc};

use chrono::Local;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::{
    config::ServiceConfig,
    errors::Error,
    io::{FileSink, sink::ChartSink},
    models::{
        chart::{ChartFailure, ChartResult},
        request_params::ChartRequest,
        summary::{EXPECTED_CHARTS, RunReport},
        symbol::{ExchangeSymbol, SymbolMap, normalize_ticker},
        timeframe::Timeframe,
    },
    providers::{ChartProvider, chart_img::ChartImgProvider},
    requests::{FILE_TIMESTAMP_FORMAT, OrchestrationError, chart::fetch_chart, file_component},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorOptions {
    /// Drive the three slots concurrently instead of one after another.
    /// Report order stays hourly, daily, weekly either way.
    pub concurrent: bool,
}

pub struct ChartOrchestrator {
    provider: Arc<dyn ChartProvider>,
    sink: Arc<dyn ChartSink>,
    symbols: SymbolMap,
    options: OrchestratorOptions,
}

impl ChartOrchestrator {
    pub fn new(
        provider: Arc<dyn ChartProvider>,
        sink: Arc<dyn ChartSink>,
        symbols: SymbolMap,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            provider,
            sink,
            symbols,
            options,
        }
    }

    /// Wires the production chart-img provider and a [`FileSink`] from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, Error> {
        let provider = ChartImgProvider::new(&config.api)?;
        let sink = FileSink::new(&config.output.dir);
        Ok(Self::new(
            Arc::new(provider),
            Arc::new(sink),
            config.symbols.clone(),
            config.orchestrator,
        ))
    }

    pub fn output_dir(&self) -> &Path {
        self.sink.output_dir()
    }

    /// Generates all three charts for `ticker` and writes the run summary.
    pub async fn run(&self, ticker: &str) -> Result<RunReport, OrchestrationError> {
        let ticker = normalize_ticker(ticker);
        if ticker.is_empty() {
            return Err(OrchestrationError::EmptyTicker);
        }

        let symbol = self.symbols.resolve(&ticker);
        let timestamp = Local::now();
        info!("Generating charts for ticker {} -> {}", ticker, symbol);

        let outcomes = if self.options.concurrent {
            let (hourly, daily, weekly) = tokio::join!(
                self.run_slot(Timeframe::Hourly, &symbol),
                self.run_slot(Timeframe::Daily, &symbol),
                self.run_slot(Timeframe::Weekly, &symbol),
            );
            vec![hourly?, daily?, weekly?]
        } else {
            let mut outcomes = Vec::with_capacity(EXPECTED_CHARTS);
            for timeframe in Timeframe::ALL {
                outcomes.push(self.run_slot(timeframe, &symbol).await?);
            }
            outcomes
        };

        let mut charts = IndexMap::new();
        let mut errors = Vec::new();
        for (timeframe, outcome) in Timeframe::ALL.into_iter().zip(outcomes) {
            match outcome {
                ChartResult::Success(image) => {
                    charts.insert(timeframe.label().to_string(), image);
                }
                ChartResult::Failure(failure) => errors.push(failure),
            }
        }

        let mut report = RunReport::new(ticker, symbol, timestamp, charts, errors);

        let file_name = format!(
            "{}_summary_{}.json",
            file_component(&report.ticker),
            timestamp.format(FILE_TIMESTAMP_FORMAT)
        );
        report.summary_path = self
            .sink
            .write_summary(&file_name, &report.summary())
            .await?;

        info!(
            "Chart generation complete. Success: {}/{}. Summary: {}",
            report.success_count,
            EXPECTED_CHARTS,
            report.summary_path.display()
        );

        Ok(report)
    }

    /// Tries each interval of the slot in order until one succeeds. A slot that
    /// exhausts its attempts yields one failure labelled with the slot, holding
    /// the last attempt's error.
    async fn run_slot(
        &self,
        timeframe: Timeframe,
        symbol: &ExchangeSymbol,
    ) -> Result<ChartResult, OrchestrationError> {
        let mut failure = ChartFailure {
            interval: timeframe.label().to_string(),
            error: String::new(),
            details: None,
            attempted_intervals: Vec::new(),
        };

        for (attempt, interval) in timeframe.attempts().enumerate() {
            if attempt > 0 {
                info!(
                    "Trying alternative {} interval format '{}'",
                    timeframe, interval
                );
            }

            let request = ChartRequest::build(symbol.clone(), interval, timeframe.bars_back());
            failure.attempted_intervals.push(interval.to_string());

            match fetch_chart(
                self.provider.as_ref(),
                self.sink.as_ref(),
                &request,
                timeframe.description(),
            )
            .await?
            {
                ChartResult::Success(image) => return Ok(ChartResult::Success(image)),
                ChartResult::Failure(last) => {
                    failure.error = last.error;
                    failure.details = last.details;
                }
            }
        }

        Ok(ChartResult::Failure(failure))
    }
}
