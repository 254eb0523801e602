//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Uses population stddev (divide by N).

use serde::Serialize;

use common::{Bar, Error, Result};

use super::{Indicator, IndicatorValue};

pub fn bollinger_name(period: usize, k: f64) -> String {
    format!("BB({period},{k:?})")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Band {
    /// Distance from middle to either outer band.
    pub fn half_width(&self) -> f64 {
        self.upper - self.middle
    }
}

#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub period: usize,
    pub k: f64,
    name: String,
}

impl BollingerBands {
    pub fn new(period: usize, k: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(k.is_finite() && k >= 0.0, "Bollinger multiplier must be finite and non-negative");
        Self {
            period,
            k,
            name: bollinger_name(period, k),
        }
    }

    pub fn series(&self, bars: &[Bar]) -> Result<Vec<Band>> {
        if bars.len() < self.period {
            return Err(Error::insufficient(&self.name, self.period, bars.len()));
        }

        let n = self.period as f64;
        Ok(bars
            .windows(self.period)
            .map(|window| {
                let middle = window.iter().map(|b| b.close).sum::<f64>() / n;
                let variance = window
                    .iter()
                    .map(|b| {
                        let diff = b.close - middle;
                        diff * diff
                    })
                    .sum::<f64>()
                    / n;
                let stddev = variance.sqrt();
                Band {
                    upper: middle + self.k * stddev,
                    middle,
                    lower: middle - self.k * stddev,
                }
            })
            .collect())
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorValue> {
        self.series(bars).map(IndicatorValue::Bands)
    }
}
