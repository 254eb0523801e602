pub mod composite;
pub mod config;
mod crossover;
pub mod macd;
pub mod registry;
pub mod service;
pub mod simple_ma;

pub use composite::{weighted_vote, CompositeStrategy, Weights, DEFAULT_THRESHOLD};
pub use config::{CompositeConfig, StrategyConfig, StrategyFileConfig};
pub use macd::MacdStrategy;
pub use registry::build_strategy;
pub use service::StrategyService;
pub use simple_ma::SimpleMaStrategy;

use analysis::AnalysisResult;
use common::{Bar, TradeSignal};

/// All strategy implementations must satisfy this trait.
pub trait Strategy: Send + Sync {
    /// Instance name; used in signals and as the key for composite weights.
    fn name(&self) -> &str;

    /// Evaluate the latest analysis and emit exactly one signal.
    ///
    /// Missing or malformed indicator data yields HOLD, never an error.
    fn evaluate(&self, bars: &[Bar], analysis: &AnalysisResult) -> TradeSignal;
}
