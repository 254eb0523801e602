use std::collections::HashSet;

use tracing::{debug, info};

use analysis::AnalysisResult;
use common::{Bar, Error, Result, TradeSignal};

use crate::composite::{weighted_vote, CompositeStrategy, Weights, DEFAULT_THRESHOLD};
use crate::config::{weights_for, StrategyFileConfig};
use crate::registry::build_strategy;
use crate::Strategy;

/// Holds the configured strategies and runs them against one analysis.
///
/// Signals come back in configuration order. When a weight table is set the
/// service can also fold them into a single consensus signal.
pub struct StrategyService {
    strategies: Vec<Box<dyn Strategy>>,
    consensus: Option<(Weights, f64)>,
}

impl StrategyService {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self {
            strategies,
            consensus: None,
        }
    }

    /// Build from config. A `[composite]` section enables `consensus`.
    ///
    /// Weights are keyed by strategy name, so two entries resolving to the
    /// same name are rejected.
    pub fn from_config(file_cfg: &StrategyFileConfig) -> Result<Self> {
        let mut strategies = Vec::with_capacity(file_cfg.strategies.len());
        let mut seen = HashSet::new();
        for cfg in &file_cfg.strategies {
            let strategy = build_strategy(cfg)?;
            if !seen.insert(strategy.name().to_string()) {
                return Err(Error::Config(format!(
                    "duplicate strategy name '{}'; set a distinct `name` per entry",
                    strategy.name()
                )));
            }
            info!(name = %strategy.name(), weight = cfg.weight, "Registered strategy");
            strategies.push(strategy);
        }

        let mut service = Self::new(strategies);
        if let Some(composite) = &file_cfg.composite {
            let names: Vec<String> = service.names().into_iter().map(String::from).collect();
            service = service.with_weights(weights_for(&names, &file_cfg.strategies), composite.threshold);
        }
        Ok(service)
    }

    pub fn with_weights(mut self, weights: Weights, threshold: f64) -> Self {
        self.consensus = Some((weights, threshold));
        self
    }

    pub fn with_default_weights(self, weights: Weights) -> Self {
        self.with_weights(weights, DEFAULT_THRESHOLD)
    }

    pub fn add_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// One signal per strategy, in configuration order.
    pub fn evaluate_strategies(&self, bars: &[Bar], analysis: &AnalysisResult) -> Vec<TradeSignal> {
        self.strategies
            .iter()
            .map(|strategy| {
                let signal = strategy.evaluate(bars, analysis);
                debug!(
                    strategy = %signal.strategy_name,
                    action = %signal.action,
                    reason = %signal.reason,
                    "Strategy evaluated"
                );
                signal
            })
            .collect()
    }

    /// Evaluate and store the signals on the analysis result.
    pub fn evaluate_into(&self, bars: &[Bar], analysis: &mut AnalysisResult) {
        analysis.strategy_signals = self.evaluate_strategies(bars, analysis);
    }

    /// Weighted vote over `signals`. `None` when no weight table is set.
    pub fn consensus(&self, bars: &[Bar], signals: &[TradeSignal]) -> Option<TradeSignal> {
        let (weights, threshold) = self.consensus.as_ref()?;
        let signal = weighted_vote(CompositeStrategy::NAME, signals, weights, *threshold, bars);
        info!(action = %signal.action, price = signal.price, reason = %signal.reason, "Consensus signal");
        Some(signal)
    }

    /// Move the strategies into a `CompositeStrategy` using `weights`.
    pub fn into_composite(self, weights: Weights) -> CompositeStrategy {
        let threshold = self.consensus.map(|(_, t)| t).unwrap_or(DEFAULT_THRESHOLD);
        CompositeStrategy::new(self.strategies, weights).with_threshold(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{analysis_with, bars};
    use crate::{MacdStrategy, SimpleMaStrategy};
    use analysis::{IndicatorValue, MacdSeries};
    use common::SignalAction;

    fn crossing_analysis() -> AnalysisResult {
        analysis_with(vec![
            ("SMA2", IndicatorValue::Line(vec![1.0, 3.0])),
            ("SMA5", IndicatorValue::Line(vec![2.0, 2.0])),
            (
                "MACD(12,26,9)",
                IndicatorValue::Macd(MacdSeries {
                    macd: vec![0.1, 0.2],
                    signal: vec![0.0, 0.1],
                    histogram: vec![0.1, 0.1],
                }),
            ),
        ])
    }

    fn service() -> StrategyService {
        StrategyService::new(vec![
            Box::new(SimpleMaStrategy::new(2, 5)),
            Box::new(MacdStrategy::default()),
        ])
    }

    #[test]
    fn signals_follow_configuration_order() {
        let signals = service().evaluate_strategies(&bars(&[5.0]), &crossing_analysis());
        let names: Vec<&str> = signals.iter().map(|s| s.strategy_name.as_str()).collect();
        assert_eq!(names, vec!["SimpleMA", "MACD"]);
        assert_eq!(signals[0].action, SignalAction::Buy);
        assert_eq!(signals[1].action, SignalAction::Hold);
    }

    #[test]
    fn evaluate_into_fills_result() {
        let mut analysis = crossing_analysis();
        service().evaluate_into(&bars(&[5.0]), &mut analysis);
        assert_eq!(analysis.strategy_signals.len(), 2);
    }

    #[test]
    fn consensus_needs_weights() {
        let svc = service();
        let signals = svc.evaluate_strategies(&bars(&[5.0]), &crossing_analysis());
        assert!(svc.consensus(&bars(&[5.0]), &signals).is_none());
    }

    #[test]
    fn consensus_uses_configured_weights() {
        let weights: Weights = [("SimpleMA".to_string(), 0.8), ("MACD".to_string(), 0.2)].into();
        let svc = service().with_default_weights(weights);
        let bars = bars(&[5.0]);
        let signals = svc.evaluate_strategies(&bars, &crossing_analysis());
        let consensus = svc.consensus(&bars, &signals).unwrap();
        assert_eq!(consensus.action, SignalAction::Buy);
        assert_eq!(consensus.strategy_name, "Composite");
        assert_eq!(consensus.price, 5.0);
    }

    #[test]
    fn add_strategy_appends() {
        let mut svc = StrategyService::new(vec![]);
        svc.add_strategy(Box::new(MacdStrategy::default()));
        svc.add_strategy(Box::new(SimpleMaStrategy::new(2, 5).with_name("MA 2/5")));
        assert_eq!(svc.names(), vec!["MACD", "MA 2/5"]);
    }

    #[test]
    fn composite_from_service_holds_on_split_vote() {
        let weights: Weights = [("SimpleMA".to_string(), 0.5), ("MACD".to_string(), 0.5)].into();
        let bars = bars(&[5.0]);
        let analysis = crossing_analysis();
        let composite = service().into_composite(weights);
        let signal = composite.evaluate(&bars, &analysis);
        assert_eq!(signal.action, SignalAction::Hold);
    }

    #[test]
    fn builds_from_config_with_composite() {
        let cfg = StrategyFileConfig::parse(
            r#"
            [[strategy]]
            type = "simple_ma"
            weight = 3.0
            [strategy.params]
            short = 2
            long = 5

            [[strategy]]
            type = "macd"
            weight = 1.0

            [composite]
            threshold = 0.7
            "#,
        )
        .unwrap();
        let svc = StrategyService::from_config(&cfg).unwrap();
        let bars = bars(&[5.0]);
        let signals = svc.evaluate_strategies(&bars, &crossing_analysis());
        // buy score 3/4 = 0.75 > 0.7
        assert_eq!(svc.consensus(&bars, &signals).unwrap().action, SignalAction::Buy);
    }

    #[test]
    fn rejects_entries_sharing_a_default_name() {
        let cfg = StrategyFileConfig::parse(
            r#"
            [[strategy]]
            type = "simple_ma"
            weight = 3.0
            [strategy.params]
            short = 2
            long = 5

            [[strategy]]
            type = "simple_ma"
            weight = 1.0
            [strategy.params]
            short = 3
            long = 8

            [composite]
            "#,
        )
        .unwrap();
        let err = StrategyService::from_config(&cfg).err().unwrap();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("SimpleMA")));
    }

    #[test]
    fn named_entries_keep_their_own_weights() {
        let cfg = StrategyFileConfig::parse(
            r#"
            [[strategy]]
            type = "simple_ma"
            name = "MA 2/5"
            weight = 3.0
            [strategy.params]
            short = 2
            long = 5

            [[strategy]]
            type = "simple_ma"
            name = "MA 3/8"
            weight = 1.0
            [strategy.params]
            short = 3
            long = 8

            [composite]
            "#,
        )
        .unwrap();
        let svc = StrategyService::from_config(&cfg).unwrap();
        let bars = bars(&[5.0]);
        // SMA3/SMA8 are absent, so "MA 3/8" holds while "MA 2/5" buys.
        let signals = svc.evaluate_strategies(&bars, &crossing_analysis());
        let actions: Vec<SignalAction> = signals.iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![SignalAction::Buy, SignalAction::Hold]);
        // buy score 3/4 = 0.75 > 0.6
        assert_eq!(svc.consensus(&bars, &signals).unwrap().action, SignalAction::Buy);
    }
}
