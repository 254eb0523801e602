use crate::{Error, Result};

/// Process configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the bar series to analyze.
    pub bars_path: String,

    /// Indicator and analyzer settings (TOML).
    pub analysis_config_path: String,

    /// Strategy list and weights (TOML).
    pub strategy_config_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Loads `.env` if present. Fails on any missing required variable.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Ok(Config {
            bars_path: required_env("BARS_PATH")?,
            analysis_config_path: optional_env("ANALYSIS_CONFIG_PATH")
                .unwrap_or_else(|| "config/analysis.toml".to_string()),
            strategy_config_path: optional_env("STRATEGY_CONFIG_PATH")
                .unwrap_or_else(|| "config/strategies.toml".to_string()),
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        Error::Config(format!(
            "Required environment variable '{key}' is not set. Check your .env file."
        ))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
