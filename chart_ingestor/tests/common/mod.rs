#![allow(dead_code)]

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chart_ingestor::{
    ChartOrchestrator, OrchestratorOptions,
    io::FileSink,
    models::{chart::ChartPayload, request_params::ChartRequest, symbol::SymbolMap},
    providers::{ChartProvider, ProviderError},
};
use tempfile::TempDir;

/// Bytes returned for every successful fake request.
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-chart";

/// Deterministic stand-in for the charting API.
///
/// Fails every interval listed in `failing` with a 500 and succeeds otherwise.
/// Requested intervals are recorded in call order.
#[derive(Default)]
pub struct FakeProvider {
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn always_ok() -> Self {
        Self::default()
    }

    pub fn failing(intervals: &[&str]) -> Self {
        Self {
            failing: intervals.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChartProvider for FakeProvider {
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<ChartPayload, ProviderError> {
        self.calls.lock().unwrap().push(request.interval.clone());
        if self.failing.contains(&request.interval) {
            Err(ProviderError::Api {
                status: 500,
                body: format!("cannot render {}", request.interval),
            })
        } else {
            Ok(ChartPayload(FAKE_PNG.to_vec()))
        }
    }
}

pub struct TestRig {
    pub _dir: TempDir, // keep alive for the life of the test
    pub provider: Arc<FakeProvider>,
    pub orchestrator: ChartOrchestrator,
}

impl TestRig {
    pub fn output_dir(&self) -> &Path {
        self._dir.path()
    }
}

pub fn setup(provider: FakeProvider) -> TestRig {
    setup_with(provider, OrchestratorOptions::default())
}

pub fn setup_with(provider: FakeProvider, options: OrchestratorOptions) -> TestRig {
    let dir = TempDir::new().expect("tempdir");
    let provider = Arc::new(provider);
    let orchestrator = ChartOrchestrator::new(
        provider.clone(),
        Arc::new(FileSink::new(dir.path())),
        SymbolMap::default(),
        options,
    );
    TestRig {
        _dir: dir,
        provider,
        orchestrator,
    }
}

pub fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|e| e.expect("dir entry").path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect();
    files.sort();
    files
}
