mod csv_loader;

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trend_core::{TrendAnalyzer, TrendConfig};

#[derive(Parser)]
#[command(name = "trend_cli")]
#[command(about = "Classify primary and secondary trend from a CSV of close prices")]
struct Cli {
    /// CSV file with a header row
    csv: PathBuf,
    /// Long moving average window
    #[arg(short, long)]
    long_window: Option<usize>,
    /// Short moving average window
    #[arg(short, long)]
    short_window: Option<usize>,
    /// JSON file with trend config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Price column to analyze
    #[arg(long, default_value = "close")]
    column: String,
    /// Also report moving average and regression slopes
    #[arg(long)]
    slopes: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn init_logger() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trend_cli=info,trend_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<TrendConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            TrendConfig::from_json_str(&content)?
        }
        None => TrendConfig::default(),
    };
    if let Some(long_window) = cli.long_window {
        config.long_window = long_window;
    }
    if let Some(short_window) = cli.short_window {
        config.short_window = short_window;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    let analyzer = TrendAnalyzer::new(load_config(&cli)?)?;

    let file = File::open(&cli.csv).with_context(|| format!("opening {}", cli.csv.display()))?;
    let prices = csv_loader::load_prices(file, &cli.column)
        .with_context(|| format!("loading {}", cli.csv.display()))?;
    info!(file = %cli.csv.display(), count = prices.len(), "prices loaded");

    let report = analyzer.analyze(&prices)?;
    let slopes = if cli.slopes {
        Some(analyzer.slopes(&prices)?)
    } else {
        None
    };

    if cli.json {
        let mut out = json!({ "trend": report });
        if let Some(slopes) = slopes {
            out["slopes"] = json!(slopes);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let config = analyzer.config();
        println!(
            "primary trend:   {} (MA{} = {:.4})",
            report.primary_trend, config.long_window, report.last_ma_long
        );
        println!(
            "secondary trend: {} (MA{} = {:.4})",
            report.secondary_trend, config.short_window, report.last_ma_short
        );
        if let Some(slopes) = slopes {
            println!("long MA slope:    {}", slopes.long_ma_slope);
            println!("short MA slope:   {}", slopes.short_ma_slope);
            println!("regression slope: {}", slopes.regression_slope);
        }
    }

    Ok(())
}
