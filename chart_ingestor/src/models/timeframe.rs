use std::fmt;

use serde::{Deserialize, Serialize};

/// The three chart slots produced for every run, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Hourly,
    Daily,
    Weekly,
}

impl Timeframe {
    /// All slots in the order they are processed and reported.
    pub const ALL: [Timeframe; 3] = [Timeframe::Hourly, Timeframe::Daily, Timeframe::Weekly];

    /// Key under which the slot appears in reports and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Hourly => "1h",
            Timeframe::Daily => "1D",
            Timeframe::Weekly => "1W",
        }
    }

    /// Interval string sent to the charting API on the first attempt.
    pub fn interval(self) -> &'static str {
        self.label()
    }

    /// Alternate encoding of the same interval, tried once if the first
    /// attempt fails. Only the hourly slot has one.
    pub fn fallback_interval(self) -> Option<&'static str> {
        match self {
            Timeframe::Hourly => Some("60"),
            Timeframe::Daily | Timeframe::Weekly => None,
        }
    }

    /// Every interval that may be requested for this slot, in attempt order.
    pub fn attempts(self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.interval()).chain(self.fallback_interval())
    }

    /// Number of historical bars requested.
    pub fn bars_back(self) -> u32 {
        match self {
            // one week of hourly bars
            Timeframe::Hourly => 168,
            // three months
            Timeframe::Daily => 90,
            // one year
            Timeframe::Weekly => 52,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Timeframe::Hourly => "1h chart with 1 week history",
            Timeframe::Daily => "Daily chart with 3 months history",
            Timeframe::Weekly => "Weekly chart with 1 year history",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
