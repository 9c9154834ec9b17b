//! Ticker to exchange-qualified symbol resolution.
//!
//! The remote charting API expects TradingView style symbols (`EXCHANGE:TICKER`).
//! Callers usually send a bare ticker, so [`SymbolMap::resolve`] maps it using a
//! built-in table of known US listings, optional overrides from configuration,
//! and finally a default exchange.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Exchange used when a ticker is not found in any table.
pub const DEFAULT_EXCHANGE: &str = "NASDAQ";

/// Separator between exchange and ticker.
pub const EXCHANGE_SEPARATOR: char = ':';

/// Built-in ticker table, grouped the way the service is used in practice.
const KNOWN_SYMBOLS: &[(&str, &str)] = &[
    // Technology stocks
    ("AAPL", "NASDAQ:AAPL"),
    ("MSFT", "NASDAQ:MSFT"),
    ("GOOGL", "NASDAQ:GOOGL"),
    ("AMZN", "NASDAQ:AMZN"),
    ("NVDA", "NASDAQ:NVDA"),
    ("META", "NASDAQ:META"),
    ("TSLA", "NASDAQ:TSLA"),
    ("AMD", "NASDAQ:AMD"),
    ("INTC", "NASDAQ:INTC"),
    ("NFLX", "NASDAQ:NFLX"),
    ("PLTR", "NYSE:PLTR"),
    ("COIN", "NASDAQ:COIN"),
    // Commodity ETFs
    ("GLD", "AMEX:GLD"),
    ("SLV", "AMEX:SLV"),
    ("COPX", "AMEX:COPX"),
    ("USO", "AMEX:USO"),
    ("UNG", "AMEX:UNG"),
    ("CORN", "AMEX:CORN"),
    ("WEAT", "AMEX:WEAT"),
    // Broad-market ETFs
    ("SPY", "AMEX:SPY"),
    ("QQQ", "NASDAQ:QQQ"),
    ("DIA", "AMEX:DIA"),
    ("IWM", "AMEX:IWM"),
    ("VXX", "AMEX:VXX"),
    ("TLT", "NASDAQ:TLT"),
    ("GDX", "AMEX:GDX"),
];

/// A symbol in `EXCHANGE:TICKER` form, as accepted by the charting API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeSymbol(String);

impl ExchangeSymbol {
    /// Wraps an already qualified symbol without validation.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbol with the exchange separator replaced, safe for file names
    /// (e.g. `NASDAQ:NVDA` -> `NASDAQ_NVDA`).
    pub fn file_stem(&self) -> String {
        self.0.replace(EXCHANGE_SEPARATOR, "_")
    }
}

impl fmt::Display for ExchangeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExchangeSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lookup table used to qualify bare tickers.
///
/// The built-in table is always consulted; `overrides` (from the `[symbols]`
/// config section) take precedence over it. Keys are matched after the same
/// normalization applied to the input ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymbolMap {
    /// Exchange prefix applied to tickers found in neither table.
    pub default_exchange: String,
    /// Extra or replacement mappings, ticker -> `EXCHANGE:TICKER`.
    pub overrides: IndexMap<String, String>,
}

impl Default for SymbolMap {
    fn default() -> Self {
        Self {
            default_exchange: DEFAULT_EXCHANGE.to_string(),
            overrides: IndexMap::new(),
        }
    }
}

impl SymbolMap {
    /// Resolves a caller-supplied ticker into an exchange-qualified symbol.
    ///
    /// Never fails: unknown tickers fall back to the default exchange with a
    /// warning.
    pub fn resolve(&self, ticker: &str) -> ExchangeSymbol {
        let ticker = normalize_ticker(ticker);

        if ticker.contains(EXCHANGE_SEPARATOR) {
            return ExchangeSymbol(ticker);
        }

        if let Some(symbol) = self.lookup(&ticker) {
            return ExchangeSymbol(symbol);
        }

        warn!(
            "Unknown ticker {}, defaulting to {}",
            ticker, self.default_exchange
        );
        ExchangeSymbol(format!(
            "{}{}{}",
            self.default_exchange, EXCHANGE_SEPARATOR, ticker
        ))
    }

    /// Returns the mapped symbol for a normalized ticker, if one is known.
    pub fn lookup(&self, ticker: &str) -> Option<String> {
        self.overrides
            .iter()
            .find(|(k, _)| normalize_ticker(k) == ticker)
            .map(|(_, v)| v.trim().to_uppercase())
            .or_else(|| {
                KNOWN_SYMBOLS
                    .iter()
                    .find(|(k, _)| *k == ticker)
                    .map(|(_, v)| v.to_string())
            })
    }
}

/// Resolves a ticker using only the built-in table and [`DEFAULT_EXCHANGE`].
pub fn resolve(ticker: &str) -> ExchangeSymbol {
    SymbolMap::default().resolve(ticker)
}

/// Trim + uppercase, the canonical form for lookups and file names.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}
