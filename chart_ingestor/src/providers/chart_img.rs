//! [chart-img](https://chart-img.com) v2 advanced-chart API.

pub mod params;
pub mod provider;

pub use params::ChartImgPayload;
pub use provider::{API_KEY_ENV, API_KEY_HEADER, API_VERSION, ChartImgProvider, DEFAULT_API_URL};
