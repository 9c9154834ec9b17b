#![allow(dead_code)]

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use chart_ingestor::{
    ChartOrchestrator, OrchestratorOptions,
    io::FileSink,
    models::{chart::ChartPayload, request_params::ChartRequest, symbol::SymbolMap},
    providers::{ChartProvider, ProviderError},
};
use chart_webhook::{AppState, router};
use tempfile::TempDir;

pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-chart";

/// Fails the listed intervals with a 500, succeeds for everything else.
pub struct FakeProvider {
    failing: HashSet<String>,
}

impl FakeProvider {
    pub fn always_ok() -> Self {
        Self::failing(&[])
    }

    pub fn failing(intervals: &[&str]) -> Self {
        Self {
            failing: intervals.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ChartProvider for FakeProvider {
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<ChartPayload, ProviderError> {
        if self.failing.contains(&request.interval) {
            Err(ProviderError::Api {
                status: 500,
                body: "render failed".into(),
            })
        } else {
            Ok(ChartPayload(FAKE_PNG.to_vec()))
        }
    }
}

/// A running webhook service on a random local port.
pub struct TestServer {
    pub _dir: TempDir,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn output_dir(&self) -> &std::path::Path {
        self._dir.path()
    }
}

pub async fn spawn(provider: FakeProvider) -> TestServer {
    let dir = TempDir::new().expect("tempdir");
    spawn_with_output(provider, dir, None).await
}

/// Like [`spawn`], but stores into `output` (inside `dir`) when given.
pub async fn spawn_with_output(
    provider: FakeProvider,
    dir: TempDir,
    output: Option<std::path::PathBuf>,
) -> TestServer {
    let output = output.unwrap_or_else(|| dir.path().to_path_buf());
    let orchestrator = ChartOrchestrator::new(
        Arc::new(provider),
        Arc::new(FileSink::new(output)),
        SymbolMap::default(),
        OrchestratorOptions::default(),
    );
    let state = Arc::new(AppState::new(Arc::new(orchestrator), true));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.expect("serve");
    });

    TestServer {
        _dir: dir,
        base_url: format!("http://{addr}"),
        client: reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client"),
    }
}
