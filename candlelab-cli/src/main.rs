//! CandleLab CLI: analyze a candle series and size trades.
//!
//! Commands:
//! - `analyze`: run every analyzer over a CSV candle series and print the
//!   assembled arbitration context (or the raw bundle as JSON)
//! - `risk`: size a trade from entry/stop and report daily-limit status
//! - `decide`: parse an arbiter reply from stdin into a normalized decision

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use candlelab_core::config::AnalysisConfig;
use candlelab_core::context::DecisionRecord;
use candlelab_core::data::load_csv;
use candlelab_core::engine::MarketAnalyzer;
use candlelab_core::risk::RiskManager;

#[derive(Parser)]
#[command(
    name = "candlelab",
    about = "CandleLab — market-structure classification over OHLCV series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV candle series and print the arbitration context.
    Analyze {
        /// Path to a CSV file with columns timestamp,open,high,low,close,volume.
        csv: PathBuf,

        /// Instrument symbol the series belongs to.
        #[arg(long, default_value = "XAUUSD")]
        symbol: String,

        /// Path to a TOML analysis config. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// How many trailing bars to include in the market-data section.
        #[arg(long, default_value_t = 20)]
        tail: usize,

        /// Free-form news context appended to the document.
        #[arg(long)]
        news: Option<String>,

        /// Print the analysis bundle as JSON instead of the text context.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Size a trade and report daily-limit status.
    Risk {
        /// Entry price.
        #[arg(long)]
        entry: f64,

        /// Stop-loss price.
        #[arg(long)]
        stoploss: f64,

        /// Instrument symbol (decides the contract size).
        #[arg(long, default_value = "XAUUSD")]
        symbol: String,

        /// Path to a TOML analysis config (its [risk] section applies).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Parse an arbiter reply from stdin and print the normalized decision.
    Decide,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            csv,
            symbol,
            config,
            tail,
            news,
            json,
        } => run_analyze(csv, &symbol, config, tail, news.as_deref(), json),
        Commands::Risk {
            entry,
            stoploss,
            symbol,
            config,
        } => run_risk(entry, stoploss, &symbol, config),
        Commands::Decide => run_decide(),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        None => Ok(AnalysisConfig::default()),
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
        }
    }
}

fn run_analyze(
    csv: PathBuf,
    symbol: &str,
    config: Option<PathBuf>,
    tail: usize,
    news: Option<&str>,
    json: bool,
) -> Result<()> {
    let cfg = load_config(config)?;
    let candles = load_csv(&csv).with_context(|| format!("loading {}", csv.display()))?;

    let analyzer = MarketAnalyzer::new(cfg);
    let (bundle, context) = analyzer.build_context(symbol, &candles, tail, news);

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        println!("{context}");
    }
    Ok(())
}

fn run_risk(entry: f64, stoploss: f64, symbol: &str, config: Option<PathBuf>) -> Result<()> {
    let cfg = load_config(config)?;
    let manager = RiskManager::new(cfg.risk);

    let risk = manager.calculate_lot_size(entry, stoploss, symbol);
    println!("Entry: {entry:.2}  Stop: {stoploss:.2}  Symbol: {symbol}");
    println!("Lot size: {:.2}", risk.lot_size);
    println!("Risk: ${:.2} ({:.2}% of capital)", risk.risk_amount, risk.risk_percent);
    if let Some(warning) = &risk.warning {
        println!("Warning: {warning}");
    }

    let (can_trade, status) = manager.check_daily_limit();
    println!("Daily limit: {status}");
    if !can_trade {
        std::process::exit(1);
    }
    Ok(())
}

fn run_decide() -> Result<()> {
    let mut text = String::new();
    std::io::Read::read_to_string(&mut std::io::stdin(), &mut text)
        .context("reading arbiter reply from stdin")?;
    let record = DecisionRecord::parse(&text);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
