use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::{
    config::ApiConfig,
    models::{chart::ChartPayload, request_params::ChartRequest},
    providers::{
        ChartProvider, ProviderError, ProviderInitError, chart_img::params::ChartImgPayload,
    },
};

pub const DEFAULT_API_URL: &str = "https://api.chart-img.com/v2/tradingview/advanced-chart";

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CHART_IMG_API_KEY";

/// Tag recorded on every chart fetched through this provider.
pub const API_VERSION: &str = "v2";

pub struct ChartImgProvider {
    client: Client,
    url: String,
}

impl ChartImgProvider {
    /// Creates a provider from the `[api]` configuration.
    ///
    /// The request timeout applies to the whole round trip. Without an API key
    /// the client is still built, but the remote service will reject requests.
    pub fn new(config: &ApiConfig) -> Result<Self, ProviderInitError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key.expose_secret())?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl ChartProvider for ChartImgProvider {
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<ChartPayload, ProviderError> {
        debug!(
            "POST {} symbol={} interval={} bars_back={}",
            self.url, request.symbol, request.interval, request.bars_back
        );

        let response = self
            .client
            .post(&self.url)
            .json(&ChartImgPayload::from(request))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(ChartPayload(bytes.to_vec()))
    }

    fn api_version(&self) -> &str {
        API_VERSION
    }
}
