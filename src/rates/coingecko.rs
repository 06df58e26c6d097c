//! CoinGecko price source for USDT/RUB.

use crate::rates::{PriceQuote, RateSource, USDT_RUB};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::time::Duration;

const SIMPLE_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
const ASSET_ID: &str = "tether";
const VS_CURRENCY: &str = "rub";

/// Last-resort source: CoinGecko's aggregated tether price in rubles.
pub struct CoinGecko {
    client: Client,
    base: Url,
}

impl CoinGecko {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(SIMPLE_PRICE_URL, timeout)
    }

    /// Same adapter against a custom endpoint (used by tests).
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build CoinGecko HTTP client")?,
            base: Url::parse(url).context("Invalid CoinGecko URL")?,
        })
    }
}

#[async_trait]
impl RateSource for CoinGecko {
    fn name(&self) -> &'static str {
        "CoinGecko"
    }

    async fn fetch(&self) -> Result<PriceQuote> {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("ids", ASSET_ID)
            .append_pair("vs_currencies", VS_CURRENCY);

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .context("CoinGecko request failed")?
            .error_for_status()
            .context("CoinGecko API error")?;

        // {"tether": {"rub": 97.25}}
        let data: HashMap<String, HashMap<String, f64>> = response
            .json()
            .await
            .context("Failed to parse CoinGecko response")?;

        let price = data
            .get(ASSET_ID)
            .and_then(|currencies| currencies.get(VS_CURRENCY))
            .copied()
            .with_context(|| format!("{ASSET_ID}.{VS_CURRENCY} missing from CoinGecko response"))?;

        tracing::info!("CoinGecko {ASSET_ID}/{VS_CURRENCY}: {price}");
        PriceQuote::new(price, USDT_RUB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn adapter_for(server: &MockServer) -> CoinGecko {
        CoinGecko::with_url(&format!("{}/simple/price", server.uri()), TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn fetches_tether_rub_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "tether"))
            .and(query_param("vs_currencies", "rub"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"tether": {"rub": 97.31}})),
            )
            .mount(&server)
            .await;

        let quote = adapter_for(&server).fetch().await.unwrap();
        assert_eq!(quote.value(), 97.31);
        assert_eq!(quote.pair(), USDT_RUB);
    }

    #[tokio::test]
    async fn missing_key_path_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"tether": {"usd": 1.0}})),
            )
            .mount(&server)
            .await;

        assert!(adapter_for(&server).fetch().await.is_err());
    }

    #[tokio::test]
    async fn rate_limit_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        assert!(adapter_for(&server).fetch().await.is_err());
    }
}
