use common::{Bar, Error, Result};

use super::{Indicator, IndicatorValue};

/// Key under which `SimpleMovingAverage(period)` stores its output.
pub fn sma_name(period: usize) -> String {
    format!("SMA{period}")
}

/// Simple moving average of closing prices.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    pub period: usize,
    name: String,
}

impl SimpleMovingAverage {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: sma_name(period),
        }
    }

    /// Mean of each `period`-bar window, oldest first.
    /// Needs at least `period` bars.
    pub fn series(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        if bars.len() < self.period {
            return Err(Error::insufficient(&self.name, self.period, bars.len()));
        }
        let divisor = self.period as f64;
        Ok(bars
            .windows(self.period)
            .map(|w| w.iter().map(|b| b.close).sum::<f64>() / divisor)
            .collect())
    }

    /// Mean of the last `period` closes.
    pub fn latest(&self, bars: &[Bar]) -> Result<f64> {
        if bars.len() < self.period {
            return Err(Error::insufficient(&self.name, self.period, bars.len()));
        }
        let tail = &bars[bars.len() - self.period..];
        Ok(tail.iter().map(|b| b.close).sum::<f64>() / self.period as f64)
    }
}

impl Indicator for SimpleMovingAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorValue> {
        self.series(bars).map(IndicatorValue::Line)
    }
}
