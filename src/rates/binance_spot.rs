//! Binance spot-market ticker source.

use crate::rates::{CurrencyPair, PriceQuote, RateSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

const SPOT_API_URL: &str = "https://api.binance.com";

/// Thin REST client for the Binance spot API, constructed once at startup
/// and injected into the adapters that need it.
#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    base: Url,
}

impl MarketClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(SPOT_API_URL, timeout)
    }

    pub fn with_base_url(base: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build spot HTTP client")?,
            base: Url::parse(base).context("Invalid spot API URL")?,
        })
    }

    /// Latest traded price for a symbol, e.g. "TONUSDT".
    pub async fn ticker_price(&self, symbol: &str) -> Result<f64> {
        let mut url = self
            .base
            .join("/api/v3/ticker/price")
            .context("Invalid ticker path")?;
        url.query_pairs_mut().append_pair("symbol", symbol);

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Ticker request for {symbol} failed"))?
            .error_for_status()
            .context("Non-success status from ticker endpoint")?;

        let ticker: Ticker = response
            .json()
            .await
            .context("Failed to parse ticker response")?;

        ticker
            .price
            .trim()
            .parse::<f64>()
            .with_context(|| format!("Unparseable ticker price for {symbol}: {:?}", ticker.price))
    }
}

// {"symbol":"TONUSDT","price":"2.91400000"}
#[derive(Debug, Deserialize)]
struct Ticker {
    price: String,
}

/// Spot-ticker adapter for one fixed symbol. The market client is optional:
/// when startup could not build it, every fetch reports unavailable.
pub struct BinanceSpot {
    market: Option<MarketClient>,
    symbol: &'static str,
    pair: CurrencyPair,
}

impl BinanceSpot {
    pub fn new(market: Option<MarketClient>, symbol: &'static str, pair: CurrencyPair) -> Self {
        Self {
            market,
            symbol,
            pair,
        }
    }
}

#[async_trait]
impl RateSource for BinanceSpot {
    fn name(&self) -> &'static str {
        "Spot Binance"
    }

    async fn fetch(&self) -> Result<PriceQuote> {
        let market = self
            .market
            .as_ref()
            .context("Spot market client not initialized")?;

        let price = market.ticker_price(self.symbol).await?;
        let quote = PriceQuote::new(price, self.pair)?;
        tracing::info!("Spot Binance {}: {}", self.symbol, quote.value());
        Ok(quote)
    }
}
