use serde::Serialize;

use common::{Bar, Error, Result};

use super::{closes, ema, Indicator, IndicatorValue};

pub fn macd_name(fast: usize, slow: usize, signal: usize) -> String {
    format!("MACD({fast},{slow},{signal})")
}

/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// MACD line = EMA(fast) − EMA(slow) over the slow EMA's valid range
/// (bars `slow - 1` onwards), signal = EMA(signal) of that line,
/// histogram = MACD − signal. Needs at least `slow` bars.
#[derive(Debug, Clone)]
pub struct Macd {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    name: String,
}

/// MACD trajectories, aligned point for point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be less than slow period");
        Self {
            fast,
            slow,
            signal,
            name: macd_name(fast, slow, signal),
        }
    }

    pub fn series(&self, bars: &[Bar]) -> Result<MacdSeries> {
        if bars.len() < self.slow {
            return Err(Error::insufficient(&self.name, self.slow, bars.len()));
        }

        let closes = closes(bars);
        let fast_ema = ema(&closes, self.fast);
        let slow_ema = ema(&closes, self.slow);

        let macd: Vec<f64> = (self.slow - 1..closes.len())
            .map(|i| fast_ema[i] - slow_ema[i])
            .collect();
        let signal = ema(&macd, self.signal);
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        Ok(MacdSeries {
            macd,
            signal,
            histogram,
        })
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorValue> {
        self.series(bars).map(IndicatorValue::Macd)
    }
}
