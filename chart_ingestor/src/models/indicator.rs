//! The fixed technical-indicator policy attached to every chart.
//!
//! Every timeframe of every run carries the same studies, in the same order:
//! volume, three moving averages, Bollinger Bands, RSI, MACD and a stochastic
//! oscillator. This is policy rather than something callers can tune.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named indicator with its input parameters, in the shape the charting
/// API expects (`{"name": ..., "forceOverlay": ..., "inputs": {...}}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_overlay: Option<bool>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: IndexMap<String, Value>,
}

impl Study {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            force_overlay: None,
            inputs: IndexMap::new(),
        }
    }

    pub fn overlay(mut self) -> Self {
        self.force_overlay = Some(true);
        self
    }

    pub fn input(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.to_string(), value.into());
        self
    }
}

pub const VOLUME: &str = "Volume";
pub const MOVING_AVERAGE: &str = "Moving Average";
pub const BOLLINGER_BANDS: &str = "Bollinger Bands";
pub const RSI: &str = "Relative Strength Index";
pub const MACD: &str = "MACD";
pub const STOCHASTIC: &str = "Stochastic";

/// Moving average lengths drawn on every chart.
pub const MOVING_AVERAGE_LENGTHS: [u32; 3] = [20, 50, 200];

/// The standard study list.
pub fn standard_studies() -> Vec<Study> {
    let mut studies = vec![Study::new(VOLUME).overlay()];

    studies.extend(
        MOVING_AVERAGE_LENGTHS
            .iter()
            .map(|len| Study::new(MOVING_AVERAGE).input("length", *len)),
    );

    studies.push(
        Study::new(BOLLINGER_BANDS)
            .input("length", 20)
            .input("mult", 2.0),
    );
    studies.push(Study::new(RSI).input("length", 14));
    studies.push(
        Study::new(MACD)
            .input("fast_length", 12)
            .input("slow_length", 26)
            .input("signal_length", 9),
    );
    studies.push(
        Study::new(STOCHASTIC)
            .input("k", 14)
            .input("d", 3)
            .input("smooth", 3),
    );

    studies
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_list_is_ordered_and_complete() {
        let names: Vec<_> = standard_studies().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                VOLUME,
                MOVING_AVERAGE,
                MOVING_AVERAGE,
                MOVING_AVERAGE,
                BOLLINGER_BANDS,
                RSI,
                MACD,
                STOCHASTIC,
            ]
        );
    }

    #[test]
    fn studies_serialize_in_api_shape() {
        let value = serde_json::to_value(standard_studies()).unwrap();
        assert_eq!(value[0], json!({"name": "Volume", "forceOverlay": true}));
        assert_eq!(value[1], json!({"name": "Moving Average", "inputs": {"length": 20}}));
        assert_eq!(value[3]["inputs"]["length"], json!(200));
        assert_eq!(
            value[4],
            json!({"name": "Bollinger Bands", "inputs": {"length": 20, "mult": 2.0}})
        );
        assert_eq!(
            value[6]["inputs"],
            json!({"fast_length": 12, "slow_length": 26, "signal_length": 9})
        );
        assert_eq!(value[7]["inputs"], json!({"k": 14, "d": 3, "smooth": 3}));
    }

    #[test]
    fn list_is_stable_across_calls() {
        assert_eq!(standard_studies(), standard_studies());
    }
}
