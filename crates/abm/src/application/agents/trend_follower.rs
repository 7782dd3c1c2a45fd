//! Trend Follower
//!
//! Bets on trend continuation.
//! Role: Amplifies rises, creates positive feedback loops.
//!
//! Strategy:
//! - If the last settlement rose by at least the threshold, buy with high probability
//! - Otherwise (flat or falling), sell with low probability

use super::{DecisionPolicy, MarketView};
use crate::domain::{Decision, Holdings, PolicyKind};
use rand::{Rng, RngCore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for trend follower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendFollowerConfig {
    /// Minimum fractional rise that counts as an uptrend
    pub threshold: Decimal,
    /// Probability of buying in an uptrend
    pub buy_probability: f64,
    /// Probability of selling otherwise
    pub sell_probability: f64,
}

impl Default for TrendFollowerConfig {
    fn default() -> Self {
        Self {
            threshold: dec!(0.0001), // 0.01%
            buy_probability: 0.75,
            sell_probability: 0.20,
        }
    }
}

/// Trend following policy
#[derive(Debug, Clone)]
pub struct TrendFollower {
    config: TrendFollowerConfig,
}

impl TrendFollower {
    pub fn new(config: TrendFollowerConfig) -> Self {
        Self { config }
    }
}

impl DecisionPolicy for TrendFollower {
    fn decide(
        &mut self,
        view: &MarketView,
        _holdings: &Holdings,
        rng: &mut dyn RngCore,
    ) -> Decision {
        let draw = rng.r#gen::<f64>();

        if view.price_delta >= self.config.threshold {
            if draw < self.config.buy_probability {
                Decision::Buy
            } else {
                Decision::Skip
            }
        } else if draw < self.config.sell_probability {
            Decision::Sell
        } else {
            Decision::Skip
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::TrendFollowing
    }
}
