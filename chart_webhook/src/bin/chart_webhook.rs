use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chart_ingestor::ServiceConfig;
use chart_webhook::{AppState, router, telemetry::init_tracing};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser)]
#[command(version, about = "Chart-IMG webhook service")]
struct Cli {
    /// Path to the TOML config file; built-in defaults are used when omitted
    #[arg(short, long, value_name = "FILE", env = "CHART_WEBHOOK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the HTTP service
    Serve {
        /// Listen address, overrides `[server] bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Generate the charts for one ticker and print the run summary as JSON
    Generate { ticker: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ServiceConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(config.logging.file()).context("opening log file")?;

    if !config.api_key_configured() {
        warn!("CHART_IMG_API_KEY is not set; chart requests will be rejected by the API");
    }

    let state = AppState::from_config(&config).await?;

    match cli.cmd {
        Cmd::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("binding {bind}"))?;
            let addr = listener.local_addr()?;

            info!("Chart-IMG webhook service listening on {addr}");
            info!("Webhook URL:  http://{addr}/generate-charts");
            info!("Test URL:     http://{addr}/test/NVDA");
            info!("Health check: http://{addr}/health");
            info!("Output dir:   {}", state.output_dir.display());

            axum::serve(listener, router(Arc::new(state))).await?;
        }
        Cmd::Generate { ticker } => {
            let report = state.orchestrator.run(&ticker).await?;
            println!("{}", serde_json::to_string_pretty(&report.summary())?);
        }
    }

    Ok(())
}
