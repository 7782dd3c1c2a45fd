//! Optimizer Trader
//!
//! Aims to finish the run flat (zero inventory) with as much cash as possible.
//!
//! Rules, first match wins:
//! 1. Inventory >= iterations left after this one: forced sell (liquidation)
//! 2. Price rose by at least the threshold: sell into the rise
//! 3. Price fell by at least the threshold: buy the dip
//! 4. Flat: sell if holding anything, otherwise skip

use super::{DecisionPolicy, MarketView};
use crate::domain::{Decision, Holdings, PolicyKind};
use rand::RngCore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Minimum absolute fractional move treated as a rise or fall
    pub threshold: Decimal,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            threshold: dec!(0.0001),
        }
    }
}

/// End-game aware optimizer policy (deterministic, draws nothing)
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Not enough iterations left to unwind later, one unit per iteration
    fn must_liquidate(view: &MarketView, holdings: &Holdings) -> bool {
        holdings.inventory >= view.remaining_after()
    }
}

impl DecisionPolicy for Optimizer {
    fn decide(
        &mut self,
        view: &MarketView,
        holdings: &Holdings,
        _rng: &mut dyn RngCore,
    ) -> Decision {
        if Self::must_liquidate(view, holdings) {
            return Decision::Sell;
        }

        if view.price_delta >= self.config.threshold {
            Decision::Sell
        } else if view.price_delta <= -self.config.threshold {
            Decision::Buy
        } else if holdings.has_inventory() {
            Decision::Sell
        } else {
            Decision::Skip
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Optimizer
    }
}
