//! Service configuration.
//!
//! Loaded from an optional TOML file where every section and field has a
//! default, then overlaid with environment variables. The API key is only ever
//! taken from the environment and is held as a [`SecretString`].
//!
//! ```toml
//! [api]
//! url = "https://api.chart-img.com/v2/tradingview/advanced-chart"
//! timeout_secs = 30
//!
//! [output]
//! dir = "chart-img-outputs"
//!
//! [server]
//! bind = "0.0.0.0:5002"
//!
//! [orchestrator]
//! concurrent = false
//!
//! [logging]
//! # empty string disables the log file
//! file = "chart_service.log"
//!
//! [symbols]
//! default_exchange = "NASDAQ"
//! [symbols.overrides]
//! "BRK.B" = "NYSE:BRK.B"
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use secrecy::SecretString;
use serde::Deserialize;
use shared_utils::{config::load_toml_file, env::get_optional_env_var};

use crate::{
    errors::Error,
    models::symbol::SymbolMap,
    providers::chart_img::{API_KEY_ENV, DEFAULT_API_URL},
    requests::multi_timeframe::OrchestratorOptions,
};

/// Overrides `[output] dir`.
pub const OUTPUT_DIR_ENV: &str = "CHART_IMG_OUTPUT_DIR";

pub const DEFAULT_OUTPUT_DIR: &str = "chart-img-outputs";
pub const DEFAULT_BIND: &str = "0.0.0.0:5002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "chart_service.log";

/// Top-level configuration of the chart webhook service.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
    pub orchestrator: OrchestratorOptions,
    pub symbols: SymbolMap,
    pub logging: LoggingConfig,
}

/// Remote charting API settings.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub url: String,
    /// Upper bound for one chart request, connect to last byte.
    pub timeout_secs: u64,
    /// Filled from `CHART_IMG_API_KEY`, never from the file.
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving chart images and run summaries.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log lines are appended here in addition to stderr.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl LoggingConfig {
    /// The log file path, or `None` when file logging is switched off.
    pub fn file(&self) -> Option<&Path> {
        (!self.file.as_os_str().is_empty()).then_some(self.file.as_path())
    }
}

impl ServiceConfig {
    /// Reads the TOML file at `path` (defaults when `None`) and applies the
    /// environment overlay.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => load_toml_file::<ServiceConfig>(path)?,
            None => ServiceConfig::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parses configuration from a TOML string without touching the environment.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Picks up `CHART_IMG_API_KEY` and `CHART_IMG_OUTPUT_DIR`.
    pub fn apply_env(&mut self) {
        if let Some(key) = get_optional_env_var(API_KEY_ENV) {
            self.api.api_key = Some(SecretString::new(key.into()));
        }
        if let Some(dir) = get_optional_env_var(OUTPUT_DIR_ENV) {
            self.output.dir = PathBuf::from(dir);
        }
    }

    pub fn api_key_configured(&self) -> bool {
        self.api.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.api.url, DEFAULT_API_URL);
        assert_eq!(cfg.api.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.output.dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(cfg.server.bind, DEFAULT_BIND);
        assert!(!cfg.orchestrator.concurrent);
        assert_eq!(cfg.symbols, SymbolMap::default());
        assert_eq!(cfg.logging.file(), Some(Path::new(DEFAULT_LOG_FILE)));
        assert!(!cfg.api_key_configured());
    }

    #[test]
    fn empty_log_file_disables_file_logging() {
        let cfg = ServiceConfig::from_toml_str("[logging]\nfile = \"\"").unwrap();
        assert_eq!(cfg.logging.file(), None);
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ServiceConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = ServiceConfig::from_toml_str(
            r#"
            [api]
            url = "http://127.0.0.1:9999/chart"
            timeout_secs = 5

            [output]
            dir = "/var/charts"

            [orchestrator]
            concurrent = true

            [symbols.overrides]
            "BRK.B" = "NYSE:BRK.B"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api.url, "http://127.0.0.1:9999/chart");
        assert_eq!(cfg.api.timeout_secs, 5);
        assert_eq!(cfg.output.dir, PathBuf::from("/var/charts"));
        assert_eq!(cfg.server.bind, DEFAULT_BIND);
        assert!(cfg.orchestrator.concurrent);
        assert_eq!(cfg.symbols.resolve("brk.b").as_str(), "NYSE:BRK.B");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(ServiceConfig::from_toml_str("[api]\napi_key = \"leak\"").is_err());
        assert!(ServiceConfig::from_toml_str("[nope]\nx = 1").is_err());
    }

    #[test]
    #[serial]
    fn environment_supplies_key_and_output_dir() {
        unsafe {
            std::env::set_var(API_KEY_ENV, "secret-key");
            std::env::set_var(OUTPUT_DIR_ENV, "/tmp/chart-env-dir");
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ndir = \"from-file\"").unwrap();
        let cfg = ServiceConfig::load(Some(file.path()));

        unsafe {
            std::env::remove_var(API_KEY_ENV);
            std::env::remove_var(OUTPUT_DIR_ENV);
        }

        let cfg = cfg.unwrap();
        assert!(cfg.api_key_configured());
        assert_eq!(
            cfg.api.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("secret-key".to_string())
        );
        assert_eq!(cfg.output.dir, PathBuf::from("/tmp/chart-env-dir"));
    }

    #[test]
    #[serial]
    fn missing_environment_leaves_key_unset() {
        unsafe {
            std::env::remove_var(API_KEY_ENV);
            std::env::remove_var(OUTPUT_DIR_ENV);
        }
        let cfg = ServiceConfig::load(None).unwrap();
        assert!(!cfg.api_key_configured());
        assert_eq!(cfg.output.dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let mut cfg = ServiceConfig::default();
        cfg.api.api_key = Some(SecretString::new("top-secret".into()));
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("top-secret"));
    }
}
