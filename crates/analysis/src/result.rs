use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use common::{Error, MarketState, Result, TradeSignal};

use crate::indicators::{Band, IndicatorValue, MacdSeries};
use crate::trend::Trend;

/// Reserved key holding the trend label.
pub const TREND_KEY: &str = "trend";
/// Reserved key holding support levels.
pub const SUPPORT_KEY: &str = "support";
/// Reserved key holding resistance levels.
pub const RESISTANCE_KEY: &str = "resistance";

pub const RESERVED_KEYS: [&str; 3] = [TREND_KEY, SUPPORT_KEY, RESISTANCE_KEY];

/// Output of one `AnalysisEngine::analyze` call.
///
/// Indicators keep their configured order. `strategy_signals` stays empty
/// until the strategy layer fills it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub timestamp: DateTime<Utc>,
    pub market_state: MarketState,
    pub indicators: IndexMap<String, IndicatorValue>,
    pub strategy_signals: Vec<TradeSignal>,
}

impl AnalysisResult {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            market_state: MarketState::Neutral,
            indicators: IndexMap::new(),
            strategy_signals: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&IndicatorValue> {
        self.indicators
            .get(name)
            .ok_or_else(|| Error::IndicatorUnavailable { name: name.to_string() })
    }

    /// Scalar trajectory stored under `name`.
    pub fn line(&self, name: &str) -> Result<&[f64]> {
        match self.get(name)? {
            IndicatorValue::Line(values) => Ok(values),
            _ => Err(malformed(name, "line")),
        }
    }

    pub fn macd(&self, name: &str) -> Result<&MacdSeries> {
        match self.get(name)? {
            IndicatorValue::Macd(series) => Ok(series),
            _ => Err(malformed(name, "macd")),
        }
    }

    pub fn bands(&self, name: &str) -> Result<&[Band]> {
        match self.get(name)? {
            IndicatorValue::Bands(bands) => Ok(bands),
            _ => Err(malformed(name, "bands")),
        }
    }

    pub fn trend(&self) -> Result<Trend> {
        match self.get(TREND_KEY)? {
            IndicatorValue::Trend(trend) => Ok(*trend),
            _ => Err(malformed(TREND_KEY, "trend")),
        }
    }

    pub fn support_levels(&self) -> Result<&[f64]> {
        self.levels(SUPPORT_KEY)
    }

    pub fn resistance_levels(&self) -> Result<&[f64]> {
        self.levels(RESISTANCE_KEY)
    }

    fn levels(&self, key: &str) -> Result<&[f64]> {
        match self.get(key)? {
            IndicatorValue::Levels(levels) => Ok(levels),
            _ => Err(malformed(key, "levels")),
        }
    }
}

fn malformed(name: &str, expected: &'static str) -> Error {
    Error::MalformedIndicator {
        name: name.to_string(),
        expected,
    }
}
