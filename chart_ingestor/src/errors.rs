use thiserror::Error;

use crate::{io::sink::SinkError, providers::ProviderInitError};

/// The unified error type for loading and building the `chart_ingestor` service.
#[derive(Debug, Error)]
pub enum Error {
    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] shared_utils::config::ConfigError),

    /// The chart provider could not be constructed.
    #[error("Provider error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error originating from the chart sink (e.g., output directory not writable).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}
