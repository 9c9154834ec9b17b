//! HTTP front end for the chart ingestor.
//!
//! Exposes the webhook (`POST /generate-charts`), a browser preview
//! (`GET /test/{ticker}`) and a health probe over axum.

pub mod html;
pub mod routes;
pub mod telemetry;

use std::{path::PathBuf, sync::Arc};

use chart_ingestor::{ChartOrchestrator, ServiceConfig, errors::Error, io::FileSink};

pub use routes::{extract_ticker, router};

/// Shared by every request handler.
pub struct AppState {
    pub orchestrator: Arc<ChartOrchestrator>,
    pub api_key_configured: bool,
    pub output_dir: PathBuf,
}

impl AppState {
    pub fn new(orchestrator: Arc<ChartOrchestrator>, api_key_configured: bool) -> Self {
        let output_dir = orchestrator.output_dir().to_path_buf();
        Self {
            orchestrator,
            api_key_configured,
            output_dir,
        }
    }

    /// Creates the output directory and builds the production orchestrator
    /// from `config`.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, Error> {
        FileSink::new(&config.output.dir).ensure_dir().await?;
        let orchestrator = ChartOrchestrator::from_config(config)?;
        Ok(Self::new(
            Arc::new(orchestrator),
            config.api_key_configured(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_config_creates_the_output_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = ServiceConfig::default();
        config.output.dir = dir.path().join("charts").join("nested");

        let state = AppState::from_config(&config).await.unwrap();

        assert!(config.output.dir.is_dir());
        assert_eq!(state.output_dir, config.output.dir);
        assert!(!state.api_key_configured);
    }

    #[tokio::test]
    async fn unusable_output_directory_is_a_sink_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("charts");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let mut config = ServiceConfig::default();
        config.output.dir = blocker;

        let err = AppState::from_config(&config).await.err().unwrap();
        assert!(matches!(err, Error::Sink(_)));
    }
}
