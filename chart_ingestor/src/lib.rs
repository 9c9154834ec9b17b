//! Chart ingestion core for the chart webhook service.
//!
//! Resolves a ticker to an exchange-qualified symbol, asks a remote charting
//! API for hourly, daily and weekly images with a fixed indicator set, stores
//! the images plus a JSON run summary on disk, and hands the aggregated
//! [`RunReport`](models::summary::RunReport) back to the caller.

pub mod config;
pub mod errors;
pub mod io;
pub mod models;
pub mod providers;
pub mod requests;

pub use config::ServiceConfig;
pub use models::summary::{RunReport, RunSummary};
pub use requests::multi_timeframe::{ChartOrchestrator, OrchestratorOptions};
