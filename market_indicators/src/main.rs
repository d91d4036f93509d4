use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use market_indicators::{
    Config, StockPriceTool, ToolResult,
    cli::{commands::Cli, params::normalize_ticker},
    config::load_config_path,
    providers::yahoo::YahooProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(ticker) = normalize_ticker(&cli.ticker) else {
        bail!("ticker must not be empty");
    };

    let config = match &cli.config {
        Some(path) => load_config_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env().context("loading config from environment")?,
    };

    let provider =
        YahooProvider::with_config(&config.provider).context("building Yahoo provider")?;
    let result = StockPriceTool::with_config(provider, &config)
        .get_stock_prices(&ticker)
        .await;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(match result {
        ToolResult::Success(_) => ExitCode::SUCCESS,
        ToolResult::Failure(_) => ExitCode::FAILURE,
    })
}
