use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use analysis::{AnalysisConfig, AnalysisEngine, AnalysisResult};
use common::{BarSource, Config, JsonFileSource, Result, TradeSignal};
use strategy::{StrategyFileConfig, StrategyService};

/// What one run prints to stdout.
#[derive(Serialize)]
struct Report<'a> {
    bars: usize,
    analysis: &'a AnalysisResult,
    consensus: Option<TradeSignal>,
}

fn main() -> ExitCode {
    // ── Logging ──────────────────────────────────────────────────────────────
    // Logs go to stderr so stdout stays a clean JSON report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "ethsignal failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;
    info!(bars = %cfg.bars_path, "ethsignal starting");

    let analysis_cfg = if Path::new(&cfg.analysis_config_path).exists() {
        AnalysisConfig::load(&cfg.analysis_config_path)?
    } else {
        warn!(path = %cfg.analysis_config_path, "Analysis config not found, using defaults");
        AnalysisConfig::default()
    };
    let strategy_cfg = StrategyFileConfig::load(&cfg.strategy_config_path)?;

    // ── Pipeline ──────────────────────────────────────────────────────────────
    let engine = AnalysisEngine::from_config(&analysis_cfg)?;
    let service = StrategyService::from_config(&strategy_cfg)?;

    let bars = JsonFileSource::new(&cfg.bars_path).load()?;
    let mut analysis = engine.analyze(&bars)?;
    service.evaluate_into(&bars, &mut analysis);
    let consensus = service.consensus(&bars, &analysis.strategy_signals);

    for signal in &analysis.strategy_signals {
        info!(
            strategy = %signal.strategy_name,
            action = %signal.action,
            price = signal.price,
            reason = %signal.reason,
            "Signal"
        );
    }

    // ── Output ────────────────────────────────────────────────────────────────
    let report = Report {
        bars: bars.len(),
        analysis: &analysis,
        consensus,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
