//! Multi-source price resolution for the TON/RUB quote.
//!
//! Three upstream sources sit behind the [`RateSource`] trait and are tried
//! in a fixed priority order by [`resolver::FallbackResolver`];
//! [`service::RateService`] combines the resolved USDT/RUB leg with the
//! TON/USDT spot leg into the quote the bot renders.

pub mod aggregate;
pub mod binance_p2p;
pub mod binance_spot;
pub mod coingecko;
pub mod resolver;
pub mod service;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

/// A fixed base/quote symbol pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyPair {
    pub base: &'static str,
    pub quote: &'static str,
}

pub const USDT_RUB: CurrencyPair = CurrencyPair {
    base: "USDT",
    quote: "RUB",
};

pub const TON_USDT: CurrencyPair = CurrencyPair {
    base: "TON",
    quote: "USDT",
};

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A single resolved price. The value is always strictly positive and
/// finite; adapters report anything else as unavailable instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    value: f64,
    pair: CurrencyPair,
}

impl PriceQuote {
    pub fn new(value: f64, pair: CurrencyPair) -> Result<Self> {
        anyhow::ensure!(
            value.is_finite() && value > 0.0,
            "invalid {pair} price: {value}"
        );
        Ok(Self { value, pair })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }
}

/// A quote tagged with the source that produced it. Only the resolver
/// constructs these, so a source label never exists without a price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcedQuote {
    pub quote: PriceQuote,
    pub source: &'static str,
}

/// One upstream price source: a single bounded request per call, no internal
/// retries. Any `Err` means "unavailable" and only advances the fallback
/// chain.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Display name used in logs and the resolved quote label.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<PriceQuote>;
}
