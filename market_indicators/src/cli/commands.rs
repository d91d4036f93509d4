use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily prices and technical indicators for one ticker")]
pub struct Cli {
    /// Path to a TOML config file (defaults to $MARKET_INDICATORS_CONFIG, then built-in defaults)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Ticker symbol (e.g. "AAPL")
    pub ticker: String,
}
