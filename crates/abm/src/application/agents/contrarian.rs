//! Contrarian Trader
//!
//! Bets on overreaction correction.
//! Role: Dampens falls by buying into dips.
//!
//! Strategy:
//! - If the last settlement fell by at least the threshold, buy with high probability
//! - Otherwise (flat or rising), sell with low probability

use super::{DecisionPolicy, MarketView};
use crate::domain::{Decision, Holdings, PolicyKind};
use rand::{Rng, RngCore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for contrarian trader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrarianConfig {
    /// Minimum fractional fall (as a positive number) that counts as a dip
    pub threshold: Decimal,
    /// Probability of buying into a dip
    pub buy_probability: f64,
    /// Probability of selling otherwise
    pub sell_probability: f64,
}

impl Default for ContrarianConfig {
    fn default() -> Self {
        Self {
            threshold: dec!(0.0001),
            buy_probability: 0.75,
            sell_probability: 0.20,
        }
    }
}

/// Contrarian policy
#[derive(Debug, Clone)]
pub struct Contrarian {
    config: ContrarianConfig,
}

impl Contrarian {
    pub fn new(config: ContrarianConfig) -> Self {
        Self { config }
    }

    fn is_dip(&self, price_delta: Decimal) -> bool {
        price_delta <= -self.config.threshold
    }
}

impl DecisionPolicy for Contrarian {
    fn decide(
        &mut self,
        view: &MarketView,
        _holdings: &Holdings,
        rng: &mut dyn RngCore,
    ) -> Decision {
        let draw = rng.r#gen::<f64>();

        if self.is_dip(view.price_delta) {
            if draw < self.config.buy_probability {
                return Decision::Buy;
            }
            return Decision::Skip;
        }

        if draw < self.config.sell_probability {
            Decision::Sell
        } else {
            Decision::Skip
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Contrarian
    }
}
