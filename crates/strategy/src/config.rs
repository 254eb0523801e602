use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use common::{Error, Result};

use crate::composite::{Weights, DEFAULT_THRESHOLD};

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// type = "simple_ma"
/// name = "SimpleMA"
/// weight = 0.5
///
/// [strategy.params]
/// short = 10
/// long = 30
///
/// [composite]
/// threshold = 0.6
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy", default)]
    pub strategies: Vec<StrategyConfig>,
    /// Enables the weighted consensus signal when present.
    #[serde(default)]
    pub composite: Option<CompositeConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Strategy type identifier: "simple_ma" or "macd".
    #[serde(rename = "type")]
    pub strategy_type: String,
    /// Instance name shown in signals; defaults to the strategy's own name.
    #[serde(default)]
    pub name: Option<String>,
    /// Vote weight in the composite signal.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Strategy-specific parameters.
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompositeConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_weight() -> f64 {
    1.0
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl StrategyFileConfig {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read strategy config at '{path}': {e}")))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content)?;
        for s in &cfg.strategies {
            if !(s.weight.is_finite() && s.weight >= 0.0) {
                return Err(Error::Config(format!(
                    "strategy '{}' has invalid weight {}",
                    s.strategy_type, s.weight
                )));
            }
        }
        if let Some(composite) = &cfg.composite {
            if !composite.threshold.is_finite() {
                return Err(Error::Config(format!(
                    "composite threshold must be finite, got {}",
                    composite.threshold
                )));
            }
        }
        Ok(cfg)
    }
}

impl StrategyConfig {
    /// Name the built strategy will report.
    pub fn resolved_name(&self, default: &str) -> String {
        self.name.clone().unwrap_or_else(|| default.to_string())
    }
}

/// Weight table keyed by resolved strategy names.
pub(crate) fn weights_for(names: &[String], configs: &[StrategyConfig]) -> Weights {
    names
        .iter()
        .zip(configs)
        .map(|(name, cfg)| (name.clone(), cfg.weight))
        .collect()
}
