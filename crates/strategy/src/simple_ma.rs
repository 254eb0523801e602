use tracing::warn;

use analysis::indicators::sma::sma_name;
use analysis::AnalysisResult;
use common::{Bar, TradeSignal};

use crate::crossover::{detect, Crossover};
use crate::Strategy;

/// Short/long SMA crossover.
///
/// Reads the `SMA{short}` and `SMA{long}` trajectories from the analysis, so
/// both periods must be configured as indicators on the engine.
#[derive(Debug, Clone)]
pub struct SimpleMaStrategy {
    name: String,
    pub short_period: usize,
    pub long_period: usize,
}

impl SimpleMaStrategy {
    pub const DEFAULT_NAME: &'static str = "SimpleMA";

    pub fn new(short_period: usize, long_period: usize) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            short_period,
            long_period,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Strategy for SimpleMaStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, bars: &[Bar], analysis: &AnalysisResult) -> TradeSignal {
        let short_key = sma_name(self.short_period);
        let long_key = sma_name(self.long_period);

        let short = match analysis.line(&short_key) {
            Ok(line) => line,
            Err(e) => {
                warn!(strategy = %self.name, error = %e, "Short MA unavailable");
                return TradeSignal::hold(&self.name, format!("short MA unavailable: {e}"));
            }
        };
        let long = match analysis.line(&long_key) {
            Ok(line) => line,
            Err(e) => {
                warn!(strategy = %self.name, error = %e, "Long MA unavailable");
                return TradeSignal::hold(&self.name, format!("long MA unavailable: {e}"));
            }
        };
        let Some(last) = bars.last() else {
            return TradeSignal::hold(&self.name, "no bars to price a signal");
        };

        match detect(short, long) {
            None => TradeSignal::hold(&self.name, "insufficient MA history for a crossover"),
            Some(Crossover::Above) => TradeSignal::buy(
                &self.name,
                last.close,
                format!("{short_key} crossed above {long_key}"),
            ),
            Some(Crossover::Below) => TradeSignal::sell(
                &self.name,
                last.close,
                format!("{short_key} crossed below {long_key}"),
            ),
            Some(Crossover::Neither) => TradeSignal::hold(&self.name, "no MA crossover"),
        }
    }
}
