//! Provider abstraction for remote chart rendering services.
//!
//! This module defines the [`ChartProvider`] trait, the single capability the
//! rest of the crate needs from a charting backend: turn a [`ChartRequest`]
//! into image bytes. The production implementation is
//! [`chart_img::ChartImgProvider`]; tests substitute deterministic fakes.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`Arc<dyn ChartProvider>`) so the orchestrator can be built once and shared
//! between request handlers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use chart_ingestor::models::{chart::ChartPayload, request_params::ChartRequest};
//! use chart_ingestor::providers::{ChartProvider, ProviderError};
//!
//! struct BlankProvider;
//!
//! #[async_trait]
//! impl ChartProvider for BlankProvider {
//!     async fn fetch_chart(
//!         &self,
//!         _request: &ChartRequest,
//!     ) -> Result<ChartPayload, ProviderError> {
//!         Ok(ChartPayload(vec![0x89, b'P', b'N', b'G']))
//!     }
//! }
//! ```

pub mod chart_img;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{chart::ChartPayload, request_params::ChartRequest};

/// Trait for fetching a rendered chart from a remote service.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    /// Requests one chart image.
    ///
    /// # Returns
    ///
    /// * `Ok(ChartPayload)` - The raw image bytes.
    /// * `Err(ProviderError)` - Transport failure or a non-success response.
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<ChartPayload, ProviderError>;

    /// Version tag of the remote API, recorded with every stored chart.
    fn api_version(&self) -> &str {
        "unknown"
    }
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    /// API key contains invalid characters.
    #[error("Invalid API key format: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
}

/// Errors that can occur within a `ChartProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API answered with a non-success status.
    #[error("chart API error: {status}")]
    Api { status: u16, body: String },
}

impl ProviderError {
    /// Extra detail worth surfacing next to the error message, such as the
    /// response body of a rejected request.
    pub fn details(&self) -> Option<String> {
        match self {
            ProviderError::Api { body, .. } if !body.is_empty() => Some(body.clone()),
            _ => None,
        }
    }
}
