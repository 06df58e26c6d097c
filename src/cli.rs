//! CLI argument parsing with environment variable fallbacks.

use clap::Parser;

/// TON Price Bot - Telegram assistant quoting the TON/RUB rate from
/// P2P Binance, Spot Binance and CoinGecko.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct BotArgs {
    /// Telegram bot token
    #[arg(long = "bot-token", env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Per-request timeout for upstream price APIs, in seconds
    #[arg(
        long = "request-timeout",
        env = "REQUEST_TIMEOUT_SECS",
        default_value = "10"
    )]
    pub request_timeout_secs: u64,
}
