pub mod config;
pub mod engine;
pub mod indicators;
pub mod levels;
pub mod result;
pub mod trend;

pub use config::{AnalysisConfig, IndicatorConfig};
pub use engine::AnalysisEngine;
pub use indicators::{
    AverageTrueRange, Band, BollingerBands, Indicator, IndicatorValue, Macd, MacdSeries,
    RelativeStrengthIndex, SimpleMovingAverage,
};
pub use levels::{Levels, SupportResistanceAnalyzer};
pub use result::AnalysisResult;
pub use trend::{Trend, TrendAnalyzer};
