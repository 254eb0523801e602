use tracing::warn;

use analysis::indicators::macd::macd_name;
use analysis::AnalysisResult;
use common::{Bar, TradeSignal};

use crate::crossover::{detect, Crossover};
use crate::Strategy;

/// MACD line versus signal line crossover.
#[derive(Debug, Clone)]
pub struct MacdStrategy {
    name: String,
    indicator: String,
}

impl MacdStrategy {
    pub const DEFAULT_NAME: &'static str = "MACD";

    /// Reads the `MACD(fast,slow,signal)` indicator output.
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            indicator: macd_name(fast, slow, signal),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }
}

impl Default for MacdStrategy {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Strategy for MacdStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, bars: &[Bar], analysis: &AnalysisResult) -> TradeSignal {
        let series = match analysis.macd(&self.indicator) {
            Ok(series) => series,
            Err(e) => {
                warn!(strategy = %self.name, error = %e, "MACD unavailable");
                return TradeSignal::hold(&self.name, format!("MACD unavailable: {e}"));
            }
        };
        let Some(last) = bars.last() else {
            return TradeSignal::hold(&self.name, "no bars to price a signal");
        };

        match detect(&series.macd, &series.signal) {
            None => TradeSignal::hold(&self.name, "insufficient MACD history for a crossover"),
            Some(Crossover::Above) => {
                TradeSignal::buy(&self.name, last.close, "MACD line crossed above signal line")
            }
            Some(Crossover::Below) => {
                TradeSignal::sell(&self.name, last.close, "MACD line crossed below signal line")
            }
            Some(Crossover::Neither) => TradeSignal::hold(&self.name, "no MACD crossover"),
        }
    }
}
