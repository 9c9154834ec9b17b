use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::summary::RunSummary;

#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the destination failed (e.g. directory missing, disk full).
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A summary could not be serialized.
    #[error("Failed to serialize run summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for chart images and run summaries.
///
/// Writes never replace an existing entry: two runs that pick the same name
/// both end up stored, and the returned path tells the caller where.
#[async_trait]
pub trait ChartSink: Send + Sync {
    /// Directory (or logical location) the sink writes into.
    fn output_dir(&self) -> &Path;

    /// Stores one chart image and returns where it was written.
    async fn write_image(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError>;

    /// Stores a run summary and returns where it was written.
    async fn write_summary(
        &self,
        file_name: &str,
        summary: &RunSummary,
    ) -> Result<PathBuf, SinkError>;
}
