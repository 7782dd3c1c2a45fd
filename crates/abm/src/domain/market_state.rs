//! Market State
//!
//! Unit price, remaining free stock and the configured price-change rate.
//! Stock is drawn down as buys execute; price settles once per iteration.

use super::Decision;
use rust_decimal::Decimal;

/// Decimal places kept on the unit price after each settlement
pub const PRICE_DP: u32 = 12;

/// Net fractional price change for a set of decisions:
/// `(buys - sells) * rate`
pub fn aggregate_delta<'a, I>(decisions: I, price_change_rate: Decimal) -> Decimal
where
    I: IntoIterator<Item = &'a Decision>,
{
    let net: i64 = decisions.into_iter().map(Decision::direction).sum();
    Decimal::from(net) * price_change_rate
}

/// Shared market state
#[derive(Debug, Clone, PartialEq)]
pub struct MarketState {
    price: Decimal,
    previous_price: Decimal,
    free_stock: u64,
    price_change_rate: Decimal,
    last_delta: Decimal,
}

impl MarketState {
    pub fn new(price: Decimal, free_stock: u64, price_change_rate: Decimal) -> Self {
        Self {
            price,
            previous_price: price,
            free_stock,
            price_change_rate,
            last_delta: Decimal::ZERO,
        }
    }

    /// Current unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Price before the last settlement
    pub fn previous_price(&self) -> Decimal {
        self.previous_price
    }

    pub fn free_stock(&self) -> u64 {
        self.free_stock
    }

    pub fn price_change_rate(&self) -> Decimal {
        self.price_change_rate
    }

    /// Fractional change applied by the last settlement (0 before the first)
    pub fn last_delta(&self) -> Decimal {
        self.last_delta
    }

    /// Whether any unit is left for policies to consider buying
    pub fn stock_available(&self) -> bool {
        self.free_stock > 0
    }

    /// Record one executed buy against free stock, floored at zero
    pub fn take_stock(&mut self) {
        self.free_stock = self.free_stock.saturating_sub(1);
    }

    /// Settle the iteration: `price <- price * (1 + delta)`.
    ///
    /// A multiplier at or below zero, or a product that no longer fits, would
    /// break `price > 0`; the price is then held at the smallest positive
    /// tick or the previous value respectively.
    pub fn settle(&mut self, delta: Decimal) -> Decimal {
        self.previous_price = self.price;
        self.last_delta = delta;

        let factor = Decimal::ONE + delta;
        let next = match self.price.checked_mul(factor) {
            Some(p) => p.round_dp(PRICE_DP),
            None => {
                log::warn!(
                    "price update overflowed (price={}, delta={}), holding price",
                    self.price,
                    delta
                );
                self.price
            }
        };

        self.price = if next > Decimal::ZERO {
            next
        } else {
            log::warn!(
                "net sell pressure {} would drive price to {}, flooring at one tick",
                delta,
                next
            );
            Decimal::new(1, PRICE_DP)
        };
        self.price
    }
}
