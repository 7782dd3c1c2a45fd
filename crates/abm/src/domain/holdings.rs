//! Agent holdings
//!
//! Cash balance and unit inventory of a single agent. Mutations refuse
//! anything that would take either below zero.

use rust_decimal::Decimal;

/// Balance and inventory of one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holdings {
    /// Cash balance, never negative
    pub balance: Decimal,
    /// Units held, never negative
    pub inventory: u64,
}

impl Holdings {
    /// Starting holdings: the given balance and an empty inventory
    pub fn new(balance: Decimal) -> Self {
        Self {
            balance,
            inventory: 0,
        }
    }

    /// Whether one unit at `price` is affordable
    pub fn can_afford(&self, price: Decimal) -> bool {
        self.balance >= price
    }

    /// Whether there is at least one unit to sell
    pub fn has_inventory(&self) -> bool {
        self.inventory >= 1
    }

    /// Take one unit, paying `price`. Returns false (untouched) if unaffordable.
    pub fn try_buy(&mut self, price: Decimal) -> bool {
        if !self.can_afford(price) {
            return false;
        }
        self.balance -= price;
        self.inventory += 1;
        true
    }

    /// Give up one unit, receiving `price`. Returns false (untouched) if empty
    /// or if the balance cannot represent the proceeds.
    pub fn try_sell(&mut self, price: Decimal) -> bool {
        if !self.has_inventory() {
            return false;
        }
        let Some(balance) = self.balance.checked_add(price) else {
            return false;
        };
        self.inventory -= 1;
        self.balance = balance;
        true
    }
}
