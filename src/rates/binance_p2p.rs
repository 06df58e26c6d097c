//! Binance P2P order-book source for USDT/RUB.

use crate::rates::aggregate::{self, RawOffer};
use crate::rates::{PriceQuote, RateSource, USDT_RUB};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

const P2P_SEARCH_URL: &str = "https://p2p.binance.com/bapi/c2c/v2/friendly/c2c/adv/search";

/// One page of sell-side ads is enough for the trimmed average.
const PAGE_ROWS: u32 = 20;

/// Fetches a page of active USDT/RUB sell offers from the Binance P2P
/// marketplace and averages the cheapest ones.
pub struct BinanceP2p {
    client: Client,
    search_url: Url,
}

impl BinanceP2p {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(P2P_SEARCH_URL, timeout)
    }

    /// Same adapter against a custom endpoint (used by tests).
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build P2P HTTP client")?,
            search_url: Url::parse(url).context("Invalid P2P search URL")?,
        })
    }

    fn search_request() -> SearchRequest {
        SearchRequest {
            pro_merchant_ads: false,
            page: 1,
            rows: PAGE_ROWS,
            pay_types: vec![],
            countries: vec![],
            publisher_type: None,
            fiat: "RUB",
            trade_type: "BUY",
            asset: "USDT",
            trans_amount: "",
        }
    }
}

#[async_trait]
impl RateSource for BinanceP2p {
    fn name(&self) -> &'static str {
        "P2P Binance"
    }

    async fn fetch(&self) -> Result<PriceQuote> {
        let response = self
            .client
            .post(self.search_url.clone())
            .json(&Self::search_request())
            .send()
            .await
            .context("P2P search request failed")?
            .error_for_status()
            .context("Non-success status from P2P search")?;

        let body: SearchResponse = response
            .json()
            .await
            .context("Failed to parse P2P search response")?;

        anyhow::ensure!(body.success, "P2P search reported failure");

        let ads = body.data.unwrap_or_default();
        anyhow::ensure!(!ads.is_empty(), "P2P search returned no offers");

        let offers: Vec<RawOffer> = ads
            .into_iter()
            .filter_map(|entry| entry.adv)
            .map(|adv| RawOffer {
                price: adv.price,
                surplus_amount: adv.surplus_amount,
                has_trade_methods: !adv.trade_methods.is_empty(),
            })
            .collect();

        let average =
            aggregate::average_best(&offers).context("No valid P2P offers after filtering")?;

        tracing::info!(
            "P2P Binance: {} offers on page, average of best: {average}",
            offers.len()
        );
        PriceQuote::new(average, USDT_RUB)
    }
}

/// Fixed search body: first page of active RUB buy-side ads for USDT,
/// no payment-method or country filters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    pro_merchant_ads: bool,
    page: u32,
    rows: u32,
    pay_types: Vec<&'static str>,
    countries: Vec<&'static str>,
    publisher_type: Option<&'static str>,
    fiat: &'static str,
    trade_type: &'static str,
    asset: &'static str,
    trans_amount: &'static str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    success: bool,
    // null or absent when the marketplace has nothing to show
    #[serde(default)]
    data: Option<Vec<AdEntry>>,
}

#[derive(Debug, Deserialize)]
struct AdEntry {
    #[serde(default)]
    adv: Option<Ad>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ad {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    surplus_amount: Option<f64>,
    // Only presence matters; the method records themselves are not used.
    #[serde(default)]
    trade_methods: Vec<Value>,
}

/// The P2P API encodes numbers as strings ("97.50"); accept either form and
/// map anything unparseable to `None` so a single bad ad is skipped, not a
/// page-level failure.
fn de_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => Ok(s.trim().parse::<f64>().ok()),
        Some(other) => Err(de::Error::custom(format!(
            "expected number or string, got: {other}"
        ))),
    }
}
