use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One OHLCV candle for a fixed interval, as delivered by the market data
/// collector. Never mutated once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
    /// Number of trades aggregated into this bar.
    #[serde(default)]
    pub trade_count: u64,
    /// Volume-weighted average price.
    #[serde(default)]
    pub vwap: f64,
}

/// Bars for a single symbol/timeframe, strictly ascending by timestamp.
///
/// Derefs to `[Bar]`, so analysis code takes plain slices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BarSeries(Vec<Bar>);

impl BarSeries {
    /// Validate ordering. Rejects out-of-order and duplicate timestamps.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        for (i, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(Error::InvalidSeries(format!(
                    "bar {} at {} does not follow bar {} at {}",
                    i + 1,
                    pair[1].timestamp,
                    i,
                    pair[0].timestamp
                )));
            }
        }
        Ok(Self(bars))
    }

    pub fn into_inner(self) -> Vec<Bar> {
        self.0
    }
}

impl Deref for BarSeries {
    type Target = [Bar];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<Bar>> for BarSeries {
    type Error = Error;

    fn try_from(bars: Vec<Bar>) -> Result<Self> {
        Self::new(bars)
    }
}

/// Discrete recommendation emitted by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for SignalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalAction::Buy => write!(f, "BUY"),
            SignalAction::Sell => write!(f, "SELL"),
            SignalAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// Output of one strategy evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub strategy_name: String,
    pub action: SignalAction,
    /// Reference price. Only meaningful for BUY and SELL; 0.0 on HOLD.
    pub price: f64,
    pub reason: String,
}

impl TradeSignal {
    pub fn buy(strategy_name: impl Into<String>, price: f64, reason: impl Into<String>) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            action: SignalAction::Buy,
            price,
            reason: reason.into(),
        }
    }

    pub fn sell(strategy_name: impl Into<String>, price: f64, reason: impl Into<String>) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            action: SignalAction::Sell,
            price,
            reason: reason.into(),
        }
    }

    pub fn hold(strategy_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            action: SignalAction::Hold,
            price: 0.0,
            reason: reason.into(),
        }
    }
}

/// Overall market classification, derived from the trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl std::fmt::Display for MarketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketState::Bullish => write!(f, "bullish"),
            MarketState::Bearish => write!(f, "bearish"),
            MarketState::Neutral => write!(f, "neutral"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_at(secs: i64, close: f64) -> Bar {
        Bar {
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
            timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
            trade_count: 1,
            vwap: close,
        }
    }

    #[test]
    fn series_accepts_ascending_bars() {
        let series = BarSeries::new(vec![bar_at(60, 1.0), bar_at(120, 2.0), bar_at(180, 3.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last().unwrap().close, 3.0);
    }

    #[test]
    fn series_rejects_duplicate_timestamp() {
        let err = BarSeries::new(vec![bar_at(60, 1.0), bar_at(60, 2.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidSeries(_)));
    }

    #[test]
    fn series_rejects_descending_timestamps() {
        assert!(BarSeries::new(vec![bar_at(120, 1.0), bar_at(60, 2.0)]).is_err());
    }

    #[test]
    fn empty_series_is_valid() {
        assert!(BarSeries::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn bar_deserializes_without_optional_fields() {
        let json = r#"{"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10.0,
                       "timestamp":"2024-01-01T00:00:00Z"}"#;
        let bar: Bar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.trade_count, 0);
        assert_eq!(bar.vwap, 0.0);
    }

    #[test]
    fn signal_action_serializes_uppercase() {
        let signal = TradeSignal::hold("SimpleMA", "no crossover");
        let json = serde_json::to_string(&signal).unwrap();
        assert!(json.contains("\"HOLD\""), "{json}");
        assert_eq!(signal.price, 0.0);
    }
}
