use serde::{Deserialize, Serialize};

use crate::models::{
    indicator::{Study, standard_studies},
    symbol::ExchangeSymbol,
};

/// Colour scheme of the rendered chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
}

/// Image encoding returned by the charting API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
        }
    }
}

/// Rendering options sent with every chart request.
///
/// The [`Default`] value is the service's fixed rendering policy: a large dark
/// canvas with the extended session requested and all chrome visible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
    pub format: ImageFormat,
    /// Ask for pre/post market bars.
    pub extended_hours: bool,
    /// Session name sent alongside `extended_hours`; the API honours either.
    pub session: String,
    pub hide_legend: bool,
    pub hide_side_toolbar: bool,
    pub hide_volume: bool,
    pub allow_symbol_change: bool,
    /// Whether the remote service should keep its own copy of the image.
    pub save_image: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1600,
            theme: Theme::Dark,
            format: ImageFormat::Png,
            extended_hours: true,
            session: "extended".to_string(),
            hide_legend: false,
            hide_side_toolbar: false,
            hide_volume: false,
            allow_symbol_change: false,
            save_image: false,
        }
    }
}

/// One chart to be requested from the charting API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Exchange-qualified symbol (e.g. `NASDAQ:NVDA`).
    pub symbol: ExchangeSymbol,

    /// Interval in the API's encoding (e.g. `1h`, `60`, `1D`, `1W`).
    pub interval: String,

    /// Number of historical bars to include.
    pub bars_back: u32,

    /// Indicators drawn on the chart.
    pub studies: Vec<Study>,

    pub render: RenderOptions,
}

impl ChartRequest {
    /// Builds the request for one timeframe with the standard studies and
    /// rendering options. Deterministic and infallible.
    pub fn build(symbol: ExchangeSymbol, interval: impl Into<String>, bars_back: u32) -> Self {
        Self {
            symbol,
            interval: interval.into(),
            bars_back,
            studies: standard_studies(),
            render: RenderOptions::default(),
        }
    }

    /// Study names in request order.
    pub fn indicator_names(&self) -> Vec<String> {
        self.studies.iter().map(|s| s.name.clone()).collect()
    }
}
