use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Insufficient data for {indicator}: need {required} bars, got {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error("Indicator '{name}' is not available")]
    IndicatorUnavailable { name: String },

    #[error("Indicator '{name}' is not a {expected} value")]
    MalformedIndicator { name: String, expected: &'static str },

    #[error("Invalid bar series: {0}")]
    InvalidSeries(String),

    #[error("Duplicate indicator name: {0}")]
    DuplicateIndicator(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn insufficient(indicator: impl Into<String>, required: usize, available: usize) -> Self {
        Error::InsufficientData {
            indicator: indicator.into(),
            required,
            available,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
