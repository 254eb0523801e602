use common::{Bar, Error, Result};

use super::{Indicator, IndicatorValue};

pub fn atr_name(period: usize) -> String {
    format!("ATR({period})")
}

/// Average True Range with Wilder smoothing.
///
/// True range starts at bar 1 (it needs a previous close). The first point
/// is the mean of the first `period` true ranges.
#[derive(Debug, Clone)]
pub struct AverageTrueRange {
    pub period: usize,
    name: String,
}

impl AverageTrueRange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: atr_name(period),
        }
    }

    pub fn series(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        if bars.len() < self.period + 1 {
            return Err(Error::insufficient(&self.name, self.period + 1, bars.len()));
        }

        let true_ranges: Vec<f64> = bars.windows(2).map(|w| true_range(&w[1], w[0].close)).collect();
        let period = self.period as f64;

        let mut atr = true_ranges[..self.period].iter().sum::<f64>() / period;
        let mut out = Vec::with_capacity(true_ranges.len() - self.period + 1);
        out.push(atr);
        for &tr in &true_ranges[self.period..] {
            atr = (atr * (period - 1.0) + tr) / period;
            out.push(atr);
        }
        Ok(out)
    }
}

fn true_range(bar: &Bar, prev_close: f64) -> f64 {
    let hl = bar.high - bar.low;
    let hc = (bar.high - prev_close).abs();
    let lc = (bar.low - prev_close).abs();
    hl.max(hc).max(lc)
}

impl Indicator for AverageTrueRange {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorValue> {
        self.series(bars).map(IndicatorValue::Line)
    }
}
