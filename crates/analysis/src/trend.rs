use serde::Serialize;

use common::{Bar, MarketState, Result};

use crate::indicators::SimpleMovingAverage;

/// Direction reported by `TrendAnalyzer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "Uptrend"),
            Trend::Downtrend => write!(f, "Downtrend"),
            Trend::Neutral => write!(f, "Neutral"),
        }
    }
}

impl From<Trend> for MarketState {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Uptrend => MarketState::Bullish,
            Trend::Downtrend => MarketState::Bearish,
            Trend::Neutral => MarketState::Neutral,
        }
    }
}

/// Compares a short and a long SMA of closing prices.
///
/// `short < long` is the usual setup but is not enforced.
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    short: SimpleMovingAverage,
    long: SimpleMovingAverage,
}

impl TrendAnalyzer {
    pub fn new(short_period: usize, long_period: usize) -> Self {
        Self {
            short: SimpleMovingAverage::new(short_period),
            long: SimpleMovingAverage::new(long_period),
        }
    }

    pub fn analyze_trend(&self, bars: &[Bar]) -> Result<Trend> {
        let short = self.short.latest(bars)?;
        let long = self.long.latest(bars)?;

        Ok(if short > long {
            Trend::Uptrend
        } else if short < long {
            Trend::Downtrend
        } else {
            Trend::Neutral
        })
    }
}
