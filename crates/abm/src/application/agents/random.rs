//! Random Trader
//!
//! Buys, sells or abstains with equal probability, ignoring the trend.
//! Role: Baseline order flow that the trend-driven policies react to.

use super::{DecisionPolicy, MarketView};
use crate::domain::{Decision, Holdings, PolicyKind};
use rand::{Rng, RngCore};

/// Uniform random policy
#[derive(Debug, Clone, Default)]
pub struct RandomTrader;

impl RandomTrader {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionPolicy for RandomTrader {
    fn decide(
        &mut self,
        _view: &MarketView,
        _holdings: &Holdings,
        rng: &mut dyn RngCore,
    ) -> Decision {
        match rng.gen_range(0..3u8) {
            0 => Decision::Buy,
            1 => Decision::Sell,
            _ => Decision::Skip,
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }
}
