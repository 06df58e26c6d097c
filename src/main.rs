//! TON Price Bot entry point.
//!
//! Wires the price-resolution pipeline to the Telegram dispatcher.
//!
//! Environment variables (also read from `.env`):
//! - `BOT_TOKEN` (required): Telegram bot token
//! - `REQUEST_TIMEOUT_SECS` (optional, default: 10): upstream API timeout
//! - `RUST_LOG` (optional, default: info): log filter

mod bot;
mod cli;
mod rates;

use crate::cli::BotArgs;
use crate::rates::binance_spot::MarketClient;
use crate::rates::service::RateService;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use teloxide::Bot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = BotArgs::parse();
    let timeout = Duration::from_secs(args.request_timeout_secs);

    // The spot adapters tolerate a missing market client and just report
    // unavailable, so init failure degrades the chain instead of aborting.
    let market = match MarketClient::new(timeout) {
        Ok(client) => {
            info!("Binance market client initialized");
            Some(client)
        }
        Err(err) => {
            warn!("Binance market client init failed: {err:#}");
            None
        }
    };

    let service = Arc::new(RateService::new(market, timeout)?);
    let bot = Bot::new(args.bot_token);

    info!("TON Price Bot started");
    bot::run(bot, service).await;
    info!("TON Price Bot stopped");

    Ok(())
}
