use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    io::sink::{ChartSink, SinkError},
    models::summary::RunSummary,
};

/// Give up after this many name collisions for one write.
const MAX_NAME_SUFFIX: u32 = 1000;

/// Writes images and summaries as flat files into one directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the output directory (and parents) if needed.
    pub async fn ensure_dir(&self) -> Result<(), SinkError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SinkError::Io {
                path: self.dir.clone(),
                source,
            })
    }

    /// Creates `file_name` in the output directory, appending `_1`, `_2`, ...
    /// to the stem if a file with that name already exists.
    async fn write_new(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        self.ensure_dir().await?;

        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = name.extension().map(|e| e.to_string_lossy().into_owned());

        for n in 0..MAX_NAME_SUFFIX {
            let candidate = match (n, &ext) {
                (0, _) => file_name.to_string(),
                (n, Some(ext)) => format!("{stem}_{n}.{ext}"),
                (n, None) => format!("{stem}_{n}"),
            };
            let path = self.dir.join(candidate);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(SinkError::Io { path, source }),
            };

            if let Err(source) = file.write_all(bytes).await {
                return Err(SinkError::Io { path, source });
            }
            if let Err(source) = file.flush().await {
                return Err(SinkError::Io { path, source });
            }
            return Ok(path);
        }

        Err(SinkError::Io {
            path: self.dir.join(file_name),
            source: std::io::Error::new(
                ErrorKind::AlreadyExists,
                "no free file name after repeated collisions",
            ),
        })
    }
}

#[async_trait]
impl ChartSink for FileSink {
    fn output_dir(&self) -> &Path {
        &self.dir
    }

    async fn write_image(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        self.write_new(file_name, bytes).await
    }

    async fn write_summary(
        &self,
        file_name: &str,
        summary: &RunSummary,
    ) -> Result<PathBuf, SinkError> {
        let json = serde_json::to_vec_pretty(summary)?;
        self.write_new(file_name, &json).await
    }
}
