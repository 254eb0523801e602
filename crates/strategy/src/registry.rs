use std::collections::HashMap;

use common::{Error, Result};

use crate::config::StrategyConfig;
use crate::{MacdStrategy, SimpleMaStrategy, Strategy};

/// Build one strategy from its config entry.
pub fn build_strategy(cfg: &StrategyConfig) -> Result<Box<dyn Strategy>> {
    match cfg.strategy_type.as_str() {
        "simple_ma" => {
            let short = param_usize(&cfg.params, "short", 10)?;
            let long = param_usize(&cfg.params, "long", 30)?;
            let name = cfg.resolved_name(SimpleMaStrategy::DEFAULT_NAME);
            Ok(Box::new(SimpleMaStrategy::new(short, long).with_name(name)))
        }
        "macd" => {
            let fast = param_usize(&cfg.params, "fast", 12)?;
            let slow = param_usize(&cfg.params, "slow", 26)?;
            let signal = param_usize(&cfg.params, "signal", 9)?;
            let name = cfg.resolved_name(MacdStrategy::DEFAULT_NAME);
            Ok(Box::new(MacdStrategy::new(fast, slow, signal).with_name(name)))
        }
        other => Err(Error::Config(format!("unknown strategy type '{other}'"))),
    }
}

fn param_usize(params: &HashMap<String, toml::Value>, key: &str, default: usize) -> Result<usize> {
    match params.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_integer()
            .and_then(|v| usize::try_from(v).ok())
            .filter(|&v| v > 0)
            .ok_or_else(|| Error::Config(format!("parameter '{key}' must be a positive integer, got {value}"))),
    }
}
