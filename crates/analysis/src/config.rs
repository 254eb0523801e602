use serde::{Deserialize, Serialize};

use common::{Error, Result};

use crate::indicators::{
    AverageTrueRange, BollingerBands, Indicator, Macd, RelativeStrengthIndex, SimpleMovingAverage,
};

/// Analysis config file (TOML).
///
/// Example `config/analysis.toml`:
/// ```toml
/// [[indicator]]
/// type = "sma"
/// period = 10
///
/// [[indicator]]
/// type = "macd"
/// fast = 12
/// slow = 26
/// signal = 9
///
/// [trend]
/// short = 10
/// long = 30
///
/// [levels]
/// window = 5
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Indicators in evaluation order.
    #[serde(rename = "indicator", default)]
    pub indicators: Vec<IndicatorConfig>,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub levels: LevelsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorConfig {
    Sma { period: usize },
    Rsi { period: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    Bollinger { period: usize, k: f64 },
    Atr { period: usize },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrendConfig {
    pub short: usize,
    pub long: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { short: 10, long: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelsConfig {
    pub window: usize,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            indicators: vec![
                IndicatorConfig::Sma { period: 10 },
                IndicatorConfig::Sma { period: 30 },
                IndicatorConfig::Rsi { period: 14 },
                IndicatorConfig::Macd { fast: 12, slow: 26, signal: 9 },
                IndicatorConfig::Bollinger { period: 20, k: 2.0 },
                IndicatorConfig::Atr { period: 14 },
            ],
            trend: TrendConfig::default(),
            levels: LevelsConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read analysis config at '{path}': {e}")))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject parameters the indicator constructors would panic on.
    pub fn validate(&self) -> Result<()> {
        for indicator in &self.indicators {
            indicator.validate()?;
        }
        if self.trend.short == 0 || self.trend.long == 0 {
            return Err(Error::Config("trend periods must be >= 1".into()));
        }
        if self.levels.window == 0 {
            return Err(Error::Config("levels window must be >= 1".into()));
        }
        Ok(())
    }
}

impl IndicatorConfig {
    fn validate(&self) -> Result<()> {
        match *self {
            IndicatorConfig::Sma { period }
            | IndicatorConfig::Rsi { period }
            | IndicatorConfig::Atr { period } => {
                if period == 0 {
                    return Err(Error::Config(format!("{self:?}: period must be >= 1")));
                }
            }
            IndicatorConfig::Macd { fast, slow, signal } => {
                if fast == 0 || signal == 0 || fast >= slow {
                    return Err(Error::Config(format!(
                        "{self:?}: need fast >= 1, signal >= 1 and fast < slow"
                    )));
                }
            }
            IndicatorConfig::Bollinger { period, k } => {
                if period == 0 || !k.is_finite() || k < 0.0 {
                    return Err(Error::Config(format!(
                        "{self:?}: need period >= 1 and a finite, non-negative k"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Box<dyn Indicator> {
        match *self {
            IndicatorConfig::Sma { period } => Box::new(SimpleMovingAverage::new(period)),
            IndicatorConfig::Rsi { period } => Box::new(RelativeStrengthIndex::new(period)),
            IndicatorConfig::Macd { fast, slow, signal } => Box::new(Macd::new(fast, slow, signal)),
            IndicatorConfig::Bollinger { period, k } => Box::new(BollingerBands::new(period, k)),
            IndicatorConfig::Atr { period } => Box::new(AverageTrueRange::new(period)),
        }
    }
}
