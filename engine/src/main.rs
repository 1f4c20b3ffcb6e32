// Engine command-line entry point: CSV history in, indicator JSON out.
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::EngineSettings;
use engine::data::csv_parser::CsvBarParser;
use engine::data::market_data::prepare_history;
use engine::{IndicatorEngine, PriceSeries};
use shared::models::IndicatorSpec;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Compute technical indicators over a CSV price history")]
struct Cli {
    /// CSV file with date,open,high,low,close[,volume] columns
    #[arg(long)]
    csv: PathBuf,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated indicator identifiers (e.g. "sma_20,rsi,macd")
    #[arg(short, long, value_delimiter = ',')]
    indicators: Vec<String>,

    /// Evaluate indicators on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };
    let requests: Vec<IndicatorSpec> = if cli.indicators.is_empty() {
        settings.indicators.clone()
    } else {
        cli.indicators.iter().map(|id| IndicatorSpec::new(id.as_str())).collect()
    };

    let bars = CsvBarParser::load_bars_from_csv(&cli.csv, settings.delimiter_byte()?)
        .with_context(|| format!("Cannot load bars from '{}'", cli.csv.display()))?;
    let series = PriceSeries::new(prepare_history(bars, settings.max_bars))
        .with_context(|| format!("Cannot build price series from '{}'", cli.csv.display()))?;
    info!(
        bars = series.len(),
        from = %series.first_date(),
        to = %series.last_date(),
        requested = requests.len(),
        "Evaluating indicators"
    );

    let engine = IndicatorEngine::new(settings.build_registry()?);
    let report = if cli.parallel || settings.parallel {
        engine.evaluate_report_parallel(&series, &requests)
    } else {
        engine.evaluate_report(&series, &requests)
    };

    let omitted: Vec<serde_json::Value> = report
        .failures
        .iter()
        .map(|f| serde_json::json!({ "identifier": f.identifier, "reason": f.error.to_string() }))
        .collect();
    let output = serde_json::json!({ "results": report.results, "omitted": omitted });

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}
