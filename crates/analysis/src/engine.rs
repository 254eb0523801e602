use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use common::{Bar, Error, MarketState, Result};

use crate::config::AnalysisConfig;
use crate::indicators::{Indicator, IndicatorValue};
use crate::levels::SupportResistanceAnalyzer;
use crate::result::{AnalysisResult, RESERVED_KEYS, RESISTANCE_KEY, SUPPORT_KEY, TREND_KEY};
use crate::trend::TrendAnalyzer;

/// Runs the configured indicators and both analyzers over a bar series.
///
/// Configuration is fixed at construction; the engine keeps no state between
/// calls and may be shared across threads.
pub struct AnalysisEngine {
    indicators: Vec<Box<dyn Indicator>>,
    trend: TrendAnalyzer,
    levels: SupportResistanceAnalyzer,
}

impl AnalysisEngine {
    /// Fails if two indicators share a name or one uses a reserved key.
    pub fn new(
        indicators: Vec<Box<dyn Indicator>>,
        trend: TrendAnalyzer,
        levels: SupportResistanceAnalyzer,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for indicator in &indicators {
            let name = indicator.name();
            if RESERVED_KEYS.contains(&name) || !seen.insert(name.to_string()) {
                return Err(Error::DuplicateIndicator(name.to_string()));
            }
        }
        Ok(Self {
            indicators,
            trend,
            levels,
        })
    }

    pub fn from_config(cfg: &AnalysisConfig) -> Result<Self> {
        cfg.validate()?;
        let indicators = cfg.indicators.iter().map(|c| c.build()).collect();
        let engine = Self::new(
            indicators,
            TrendAnalyzer::new(cfg.trend.short, cfg.trend.long),
            SupportResistanceAnalyzer::new(cfg.levels.window),
        )?;
        info!(
            indicators = ?engine.indicator_names(),
            trend_short = cfg.trend.short,
            trend_long = cfg.trend.long,
            window = cfg.levels.window,
            "Built analysis engine"
        );
        Ok(engine)
    }

    /// Indicator names in evaluation order.
    pub fn indicator_names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    pub fn analyze(&self, bars: &[Bar]) -> Result<AnalysisResult> {
        self.analyze_at(bars, Utc::now())
    }

    /// Same as `analyze`, stamping the result with `timestamp`.
    pub fn analyze_at(&self, bars: &[Bar], timestamp: DateTime<Utc>) -> Result<AnalysisResult> {
        debug!(bars = bars.len(), "Running analysis");
        let mut result = AnalysisResult::new(timestamp);

        for indicator in &self.indicators {
            let value = indicator.calculate(bars)?;
            debug!(name = indicator.name(), kind = value.kind(), "Indicator computed");
            result.indicators.insert(indicator.name().to_string(), value);
        }

        let trend = self.trend.analyze_trend(bars)?;
        result.indicators.insert(TREND_KEY.to_string(), IndicatorValue::Trend(trend));

        let levels = self.levels.find_levels(bars);
        let (support_count, resistance_count) = (levels.support.len(), levels.resistance.len());
        result
            .indicators
            .insert(SUPPORT_KEY.to_string(), IndicatorValue::Levels(levels.support));
        result
            .indicators
            .insert(RESISTANCE_KEY.to_string(), IndicatorValue::Levels(levels.resistance));

        result.market_state = MarketState::from(trend);

        info!(
            bars = bars.len(),
            indicators = self.indicators.len(),
            trend = %trend,
            market_state = %result.market_state,
            supports = support_count,
            resistances = resistance_count,
            "Analysis complete"
        );
        Ok(result)
    }
}
