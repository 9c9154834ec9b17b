pub mod chart;
pub mod indicator;
pub mod request_params;
pub mod summary;
pub mod symbol;
pub mod timeframe;
