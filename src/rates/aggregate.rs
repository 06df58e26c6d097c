//! Trimmed-mean aggregation over order-book offers.

/// How many of the cheapest offers feed the average.
const TOP_OFFERS: usize = 5;

/// One raw advertisement from an order-book page. Numeric fields stay
/// optional: upstream sends them as strings and sometimes omits them.
#[derive(Debug, Clone, Default)]
pub struct RawOffer {
    pub price: Option<f64>,
    pub surplus_amount: Option<f64>,
    pub has_trade_methods: bool,
}

impl RawOffer {
    /// An offer counts only when the seller has remaining liquidity, at
    /// least one trade method is attached, and the price parsed positive.
    fn valid_price(&self) -> Option<f64> {
        let price = self.price?;
        let surplus = self.surplus_amount?;
        (surplus > 0.0 && self.has_trade_methods && price > 0.0).then_some(price)
    }
}

/// Mean of the lowest-priced valid offers, rounded to 2 decimals.
/// `None` when nothing valid remains.
pub fn average_best(offers: &[RawOffer]) -> Option<f64> {
    let mut prices: Vec<f64> = offers.iter().filter_map(RawOffer::valid_price).collect();
    if prices.is_empty() {
        return None;
    }

    prices.sort_by(|a, b| a.total_cmp(b));
    let top = &prices[..prices.len().min(TOP_OFFERS)];
    let mean = top.iter().sum::<f64>() / top.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(price: f64, surplus: f64) -> RawOffer {
        RawOffer {
            price: Some(price),
            surplus_amount: Some(surplus),
            has_trade_methods: true,
        }
    }

    #[test]
    fn averages_the_five_cheapest() {
        let offers: Vec<RawOffer> = [97.5, 96.0, 98.0, 99.0, 96.5, 120.0, 150.0]
            .into_iter()
            .map(|p| offer(p, 1000.0))
            .collect();

        // (96.0 + 96.5 + 97.5 + 98.0 + 99.0) / 5 = 97.4; the 120/150
        // outliers never enter the subset.
        assert_eq!(average_best(&offers), Some(97.4));
    }

    #[test]
    fn takes_all_offers_when_fewer_than_five() {
        let offers = vec![offer(90.0, 1.0), offer(100.0, 1.0)];
        assert_eq!(average_best(&offers), Some(95.0));
    }

    #[test]
    fn rounds_to_two_decimals() {
        let offers = vec![offer(97.123, 1.0), offer(97.126, 1.0), offer(97.129, 1.0)];
        assert_eq!(average_best(&offers), Some(97.13));
    }

    #[test]
    fn filters_out_unusable_offers() {
        let offers = vec![
            offer(50.0, 0.0), // sold out
            RawOffer {
                price: Some(60.0),
                surplus_amount: Some(10.0),
                has_trade_methods: false,
            },
            RawOffer {
                price: None,
                surplus_amount: Some(10.0),
                has_trade_methods: true,
            },
            offer(-5.0, 10.0), // nonsense price
            offer(97.0, 10.0), // the only one that counts
        ];
        assert_eq!(average_best(&offers), Some(97.0));
    }

    #[test]
    fn empty_and_fully_filtered_lists_are_unavailable() {
        assert_eq!(average_best(&[]), None);
        assert_eq!(average_best(&[offer(97.0, 0.0)]), None);
    }
}
