use std::collections::HashMap;

use tracing::debug;

use analysis::AnalysisResult;
use common::{Bar, SignalAction, TradeSignal};

use crate::Strategy;

/// Per-strategy vote weight, keyed by strategy name. Missing names weigh 0.
pub type Weights = HashMap<String, f64>;

/// Normalized score a bucket must exceed to win the vote.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Weighted vote over child strategies.
pub struct CompositeStrategy {
    strategies: Vec<Box<dyn Strategy>>,
    weights: Weights,
    threshold: f64,
}

impl CompositeStrategy {
    pub const NAME: &'static str = "Composite";

    pub fn new(strategies: Vec<Box<dyn Strategy>>, weights: Weights) -> Self {
        Self {
            strategies,
            weights,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Strategy for CompositeStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, bars: &[Bar], analysis: &AnalysisResult) -> TradeSignal {
        let signals: Vec<TradeSignal> = self
            .strategies
            .iter()
            .map(|s| s.evaluate(bars, analysis))
            .collect();
        weighted_vote(Self::NAME, &signals, &self.weights, self.threshold, bars)
    }
}

/// Combine `signals` into one.
///
/// Each signal's weight goes to the bucket matching its action (HOLD adds to
/// neither). Both buckets are divided by the total weight of all signals, so
/// abstaining strategies still dilute the vote.
pub fn weighted_vote(
    name: &str,
    signals: &[TradeSignal],
    weights: &Weights,
    threshold: f64,
    bars: &[Bar],
) -> TradeSignal {
    let mut buy_score = 0.0;
    let mut sell_score = 0.0;
    let mut total_weight = 0.0;

    for signal in signals {
        let weight = weights.get(&signal.strategy_name).copied().unwrap_or(0.0);
        total_weight += weight;
        match signal.action {
            SignalAction::Buy => buy_score += weight,
            SignalAction::Sell => sell_score += weight,
            SignalAction::Hold => {}
        }
    }

    if total_weight <= 0.0 {
        return TradeSignal::hold(name, "no weighted strategies voted");
    }
    buy_score /= total_weight;
    sell_score /= total_weight;
    debug!(buy_score, sell_score, threshold, "Composite vote");

    let Some(last) = bars.last() else {
        return TradeSignal::hold(name, "no bars to price a signal");
    };

    if buy_score > threshold {
        TradeSignal::buy(name, last.close, format!("weighted buy score {buy_score:.2} above {threshold}"))
    } else if sell_score > threshold {
        TradeSignal::sell(name, last.close, format!("weighted sell score {sell_score:.2} above {threshold}"))
    } else {
        TradeSignal::hold(
            name,
            format!("no clear signal (buy {buy_score:.2}, sell {sell_score:.2})"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{analysis_with, bars};

    /// Always votes the same way.
    struct Fixed {
        name: &'static str,
        action: SignalAction,
    }

    impl Strategy for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn evaluate(&self, bars: &[Bar], _analysis: &AnalysisResult) -> TradeSignal {
            let price = bars.last().map(|b| b.close).unwrap_or_default();
            match self.action {
                SignalAction::Buy => TradeSignal::buy(self.name, price, "fixed"),
                SignalAction::Sell => TradeSignal::sell(self.name, price, "fixed"),
                SignalAction::Hold => TradeSignal::hold(self.name, "fixed"),
            }
        }
    }

    fn composite(votes: &[(&'static str, SignalAction, f64)]) -> CompositeStrategy {
        let strategies: Vec<Box<dyn Strategy>> = votes
            .iter()
            .map(|&(name, action, _)| Box::new(Fixed { name, action }) as Box<dyn Strategy>)
            .collect();
        let weights = votes.iter().map(|&(name, _, w)| (name.to_string(), w)).collect();
        CompositeStrategy::new(strategies, weights)
    }

    #[test]
    fn half_weight_buy_is_hold() {
        let c = composite(&[("A", SignalAction::Buy, 0.5), ("B", SignalAction::Hold, 0.5)]);
        let signal = c.evaluate(&bars(&[10.0]), &analysis_with(vec![]));
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.strategy_name, "Composite");
    }

    #[test]
    fn dominant_buy_wins() {
        let c = composite(&[("A", SignalAction::Buy, 0.7), ("B", SignalAction::Hold, 0.3)]);
        let signal = c.evaluate(&bars(&[10.0, 11.0]), &analysis_with(vec![]));
        assert_eq!(signal.action, SignalAction::Buy);
        assert_eq!(signal.price, 11.0);
    }

    #[test]
    fn dominant_sell_wins() {
        let c = composite(&[
            ("A", SignalAction::Sell, 2.0),
            ("B", SignalAction::Sell, 1.0),
            ("C", SignalAction::Buy, 1.0),
        ]);
        let signal = c.evaluate(&bars(&[10.0]), &analysis_with(vec![]));
        assert_eq!(signal.action, SignalAction::Sell);
        assert_eq!(signal.price, 10.0);
    }

    #[test]
    fn exactly_at_threshold_is_hold() {
        let c = composite(&[("A", SignalAction::Buy, 0.6), ("B", SignalAction::Sell, 0.4)]);
        let signal = c.evaluate(&bars(&[10.0]), &analysis_with(vec![]));
        assert_eq!(signal.action, SignalAction::Hold);
    }

    #[test]
    fn zero_weight_vote_is_ignored() {
        let c = composite(&[("A", SignalAction::Buy, 1.0), ("B", SignalAction::Sell, 0.0)]);
        let signal = c.evaluate(&bars(&[10.0]), &analysis_with(vec![]));
        assert_eq!(signal.action, SignalAction::Buy);
    }

    #[test]
    fn zero_total_weight_is_hold() {
        let c = composite(&[("A", SignalAction::Buy, 0.0)]);
        let signal = c.evaluate(&bars(&[10.0]), &analysis_with(vec![]));
        assert_eq!(signal.action, SignalAction::Hold);
    }

    #[test]
    fn custom_threshold() {
        let c = composite(&[("A", SignalAction::Buy, 0.5), ("B", SignalAction::Hold, 0.5)]).with_threshold(0.4);
        let signal = c.evaluate(&bars(&[10.0]), &analysis_with(vec![]));
        assert_eq!(signal.action, SignalAction::Buy);
    }
}
