use common::{Bar, Error, Result};

use super::{Indicator, IndicatorValue};

pub fn rsi_name(period: usize) -> String {
    format!("RSI({period})")
}

/// RSI (Relative Strength Index) indicator.
///
/// Uses Wilder's smoothed moving average (same as TradingView / standard RSI).
/// Needs at least `period + 1` bars. The first point covers the initial
/// `period` changes; every later bar adds one smoothed point.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    pub period: usize,
    name: String,
}

impl RelativeStrengthIndex {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: rsi_name(period),
        }
    }

    pub fn series(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        if bars.len() < self.period + 1 {
            return Err(Error::insufficient(&self.name, self.period + 1, bars.len()));
        }

        let period = self.period as f64;
        let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();
        let initial = &changes[..self.period];

        let mut avg_gain = initial.iter().filter(|&&c| c > 0.0).sum::<f64>() / period;
        let mut avg_loss = initial.iter().filter(|&&c| c < 0.0).map(|c| c.abs()).sum::<f64>() / period;

        let mut out = Vec::with_capacity(changes.len() - self.period + 1);
        out.push(rsi_value(avg_gain, avg_loss));

        for &change in &changes[self.period..] {
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { change.abs() } else { 0.0 };
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            out.push(rsi_value(avg_gain, avg_loss));
        }

        Ok(out)
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

impl Indicator for RelativeStrengthIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorValue> {
        self.series(bars).map(IndicatorValue::Line)
    }
}
