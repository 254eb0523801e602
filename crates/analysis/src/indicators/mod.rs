//! Indicator trait and the closed set of values indicators produce.
//!
//! Indicators are pure functions: bar history in, trajectory out. A
//! trajectory is trimmed to the indicator's valid range, so its last point
//! always corresponds to the last bar and point `j` to bar `lookback + j`.

pub mod atr;
pub mod bollinger;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use atr::AverageTrueRange;
pub use bollinger::{Band, BollingerBands};
pub use macd::{Macd, MacdSeries};
pub use rsi::RelativeStrengthIndex;
pub use sma::SimpleMovingAverage;

use serde::Serialize;

use common::{Bar, Result};

use crate::trend::Trend;

/// All indicator implementations must satisfy this trait.
pub trait Indicator: Send + Sync {
    /// Key under which the output is stored in an `AnalysisResult`.
    fn name(&self) -> &str;

    /// Compute the indicator over the full bar sequence (oldest first).
    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorValue>;
}

/// A computed indicator output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IndicatorValue {
    /// Scalar trajectory: SMA, RSI, ATR.
    Line(Vec<f64>),
    /// Bollinger envelope, one band per point.
    Bands(Vec<Band>),
    Macd(MacdSeries),
    Trend(Trend),
    /// Support or resistance prices, ascending.
    Levels(Vec<f64>),
}

impl IndicatorValue {
    /// Variant name, used in malformed-value errors.
    pub fn kind(&self) -> &'static str {
        match self {
            IndicatorValue::Line(_) => "line",
            IndicatorValue::Bands(_) => "bands",
            IndicatorValue::Macd(_) => "macd",
            IndicatorValue::Trend(_) => "trend",
            IndicatorValue::Levels(_) => "levels",
        }
    }
}

/// Exponential moving average, seeded with the first value.
pub(crate) fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    for (i, &value) in values.iter().enumerate() {
        if i == 0 {
            out.push(value);
        } else {
            out.push(value * k + out[i - 1] * (1.0 - k));
        }
    }
    out
}

pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

#[cfg(test)]
pub(crate) mod test_bars {
    use chrono::DateTime;
    use common::Bar;

    pub fn from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 1.0,
                timestamp: DateTime::from_timestamp(1_700_000_000 + i as i64 * 60, 0).unwrap(),
                trade_count: 1,
                vwap: c,
            })
            .collect()
    }

    pub fn from_hlc(rows: &[(f64, f64, f64)]) -> Vec<Bar> {
        rows.iter()
            .enumerate()
            .map(|(i, &(high, low, close))| Bar {
                open: close,
                high,
                low,
                close,
                volume: 1.0,
                timestamp: DateTime::from_timestamp(1_700_000_000 + i as i64 * 60, 0).unwrap(),
                trade_count: 1,
                vwap: close,
            })
            .collect()
    }
}
