//! Outcome of a single chart fetch.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::request_params::ImageFormat;

/// Raw image bytes returned by a provider for one successful request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartPayload(pub Vec<u8>);

impl ChartPayload {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A chart that was fetched and stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartImage {
    /// Interval actually requested (for the hourly slot this may be the fallback `60`).
    pub interval: String,
    pub description: String,
    /// Image bytes, standard base64.
    pub base64_image: String,
    pub format: ImageFormat,
    /// Where the image was written.
    pub local_path: PathBuf,
    pub size_bytes: u64,
    pub size_kb: f64,
    pub indicators: Vec<String>,
    pub bars_back: u32,
    pub extended_hours: bool,
    /// Remote API version that rendered the image.
    pub api_version: String,
}

/// A chart that could not be produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFailure {
    /// Slot label or requested interval.
    pub interval: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Every interval tried before giving up.
    #[serde(default)]
    pub attempted_intervals: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartResult {
    Success(ChartImage),
    Failure(ChartFailure),
}

/// Size in KiB as reported in summaries.
pub fn size_kb(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}
