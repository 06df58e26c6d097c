//! TON quote assembly and amount conversion.

use crate::rates::binance_p2p::BinanceP2p;
use crate::rates::binance_spot::{BinanceSpot, MarketClient};
use crate::rates::coingecko::CoinGecko;
use crate::rates::resolver::FallbackResolver;
use crate::rates::{RateSource, TON_USDT, USDT_RUB};
use anyhow::Result;
use std::time::Duration;
use thiserror::Error;

/// A fully resolved TON→RUB quote. Either all legs are present or the whole
/// quote is absent; partial numbers are never handed out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonQuote {
    /// 1 TON in rubles (= ton_usdt × usdt_rub).
    pub ton_rub: f64,
    pub usdt_rub: f64,
    pub ton_usdt: f64,
    /// Which source satisfied the USDT/RUB leg.
    pub source: &'static str,
}

/// Result of converting a user-supplied TON amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub total_rub: f64,
    pub quote: TonQuote,
}

/// Rejected conversion amount. Kept separate from data unavailability so the
/// bot can answer with a usage hint instead of "try again later".
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("amount must be strictly positive")]
    NotPositive,
}

/// Parse a conversion amount: a finite, strictly positive number.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;
    if !amount.is_finite() {
        return Err(AmountError::NotANumber(trimmed.to_string()));
    }
    if amount <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    Ok(amount)
}

/// Entry point the bot talks to: resolves the USDT/RUB leg through the
/// fallback chain and the TON/USDT leg from the spot market.
pub struct RateService {
    usdt_rub: FallbackResolver,
    ton_usdt: Box<dyn RateSource>,
}

impl RateService {
    /// Wire up the production sources in their priority order:
    /// P2P Binance, then Spot Binance, then CoinGecko.
    pub fn new(market: Option<MarketClient>, timeout: Duration) -> Result<Self> {
        let usdt_rub = FallbackResolver::new(vec![
            Box::new(BinanceP2p::new(timeout)?),
            Box::new(BinanceSpot::new(market.clone(), "USDTRUB", USDT_RUB)),
            Box::new(CoinGecko::new(timeout)?),
        ]);
        let ton_usdt = Box::new(BinanceSpot::new(market, "TONUSDT", TON_USDT));
        Ok(Self::from_parts(usdt_rub, ton_usdt))
    }

    pub fn from_parts(usdt_rub: FallbackResolver, ton_usdt: Box<dyn RateSource>) -> Self {
        Self { usdt_rub, ton_usdt }
    }

    /// Resolve both legs and combine them. `None` when either leg is
    /// unavailable.
    pub async fn ton_quote(&self) -> Option<TonQuote> {
        let fiat = self.usdt_rub.resolve().await?;
        let ton = match self.ton_usdt.fetch().await {
            Ok(quote) => quote,
            Err(err) => {
                tracing::warn!("TON/USDT unavailable: {err:#}");
                return None;
            }
        };

        Some(TonQuote {
            ton_rub: ton.value() * fiat.quote.value(),
            usdt_rub: fiat.quote.value(),
            ton_usdt: ton.value(),
            source: fiat.source,
        })
    }

    /// Convert `amount` TON (already validated) into rubles at the current
    /// quote.
    pub async fn convert(&self, amount: f64) -> Option<Conversion> {
        let quote = self.ton_quote().await?;
        Some(Conversion {
            amount,
            total_rub: amount * quote.ton_rub,
            quote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::PriceQuote;
    use async_trait::async_trait;

    struct StaticSource {
        name: &'static str,
        price: Option<f64>,
        pair: crate::rates::CurrencyPair,
    }

    #[async_trait]
    impl RateSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> Result<PriceQuote> {
            match self.price {
                Some(value) => PriceQuote::new(value, self.pair),
                None => anyhow::bail!("down"),
            }
        }
    }

    fn service(usdt_rub: Option<f64>, ton_usdt: Option<f64>) -> RateService {
        let resolver = FallbackResolver::new(vec![Box::new(StaticSource {
            name: "P2P Binance",
            price: usdt_rub,
            pair: USDT_RUB,
        })]);
        RateService::from_parts(
            resolver,
            Box::new(StaticSource {
                name: "Spot Binance",
                price: ton_usdt,
                pair: TON_USDT,
            }),
        )
    }

    #[tokio::test]
    async fn combines_both_legs() {
        let quote = service(Some(100.0), Some(3.0025)).ton_quote().await.unwrap();
        assert!((quote.ton_rub - 300.25).abs() < 1e-9);
        assert_eq!(quote.usdt_rub, 100.0);
        assert_eq!(quote.ton_usdt, 3.0025);
        assert_eq!(quote.source, "P2P Binance");
    }

    #[tokio::test]
    async fn missing_fiat_leg_means_no_quote() {
        assert!(service(None, Some(3.0)).ton_quote().await.is_none());
    }

    #[tokio::test]
    async fn missing_ton_leg_means_no_quote() {
        assert!(service(Some(100.0), None).ton_quote().await.is_none());
    }

    #[tokio::test]
    async fn converts_amounts_at_the_unit_price() {
        let conversion = service(Some(100.0), Some(3.0025))
            .convert(5.5)
            .await
            .unwrap();
        assert!((conversion.total_rub - 1651.375).abs() < 1e-9);
        assert_eq!(conversion.amount, 5.5);
    }

    #[test]
    fn amount_validation() {
        assert_eq!(parse_amount("5.5"), Ok(5.5));
        assert_eq!(parse_amount(" 10 "), Ok(10.0));
        assert_eq!(parse_amount("0"), Err(AmountError::NotPositive));
        assert_eq!(parse_amount("-3"), Err(AmountError::NotPositive));
        assert_eq!(
            parse_amount("abc"),
            Err(AmountError::NotANumber("abc".to_string()))
        );
        assert_eq!(
            parse_amount("NaN"),
            Err(AmountError::NotANumber("NaN".to_string()))
        );
        assert_eq!(
            parse_amount("inf"),
            Err(AmountError::NotANumber("inf".to_string()))
        );
    }
}
