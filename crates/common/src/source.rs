use std::path::PathBuf;

use tracing::debug;

use crate::{Bar, BarSeries, Result};

/// Supplier of historical bars.
///
/// The analysis pipeline never fetches data itself; callers load a series
/// through a source and hand the slice to the engine.
pub trait BarSource: Send + Sync {
    fn load(&self) -> Result<BarSeries>;
}

/// Reads a JSON array of bars from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BarSource for JsonFileSource {
    fn load(&self) -> Result<BarSeries> {
        let content = std::fs::read_to_string(&self.path)?;
        let bars: Vec<Bar> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), bars = bars.len(), "Loaded bar file");
        BarSeries::new(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ethsignal-{}-{name}", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_ordered_bars() {
        let path = write_temp(
            "ok.json",
            r#"[
              {"open":1,"high":2,"low":0.5,"close":1.5,"volume":10,"timestamp":"2024-01-01T00:00:00Z","trade_count":3,"vwap":1.4},
              {"open":1.5,"high":2.5,"low":1,"close":2,"volume":12,"timestamp":"2024-01-01T00:01:00Z","trade_count":4,"vwap":1.9}
            ]"#,
        );
        let series = JsonFileSource::new(&path).load().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].trade_count, 4);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_unordered_file() {
        let path = write_temp(
            "bad.json",
            r#"[
              {"open":1,"high":2,"low":0.5,"close":1.5,"volume":10,"timestamp":"2024-01-01T00:01:00Z"},
              {"open":1.5,"high":2.5,"low":1,"close":2,"volume":12,"timestamp":"2024-01-01T00:00:00Z"}
            ]"#,
        );
        let err = JsonFileSource::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::InvalidSeries(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JsonFileSource::new("/nonexistent/bars.json").load().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
