//! Decision Policy
//!
//! Core trait every behavioral policy implements, and the market
//! observables handed to it each iteration.

use super::{
    Contrarian, ContrarianConfig, Optimizer, OptimizerConfig, RandomTrader, TrendFollower,
    TrendFollowerConfig,
};
use crate::domain::{Decision, Holdings, PolicyKind};
use rand::RngCore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What an agent observes when it is activated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketView {
    /// Unit price, fixed for the whole iteration
    pub price: Decimal,
    /// Fractional price change settled at the end of the previous iteration
    pub price_delta: Decimal,
    /// Whether free stock remains at the moment this agent acts
    pub stock_available: bool,
    /// Zero-based iteration index
    pub iteration: u64,
    /// Configured number of iterations
    pub total_iterations: u64,
}

impl MarketView {
    /// Iterations left after the current one
    pub fn remaining_after(&self) -> u64 {
        self.total_iterations.saturating_sub(self.iteration + 1)
    }
}

/// Core trait for decision policies
///
/// A policy returns the agent's intent; the agent's executor turns it into
/// the decision that actually happened. Every random draw goes through the
/// lent `rng` so a seeded run is reproducible.
pub trait DecisionPolicy: Send + Sync {
    fn decide(
        &mut self,
        view: &MarketView,
        holdings: &Holdings,
        rng: &mut dyn RngCore,
    ) -> Decision;

    /// Policy variant (for reports and metrics)
    fn kind(&self) -> PolicyKind;
}

/// Tuning for every policy variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub trend: TrendFollowerConfig,
    pub contrarian: ContrarianConfig,
    pub optimizer: OptimizerConfig,
}

impl PolicyConfig {
    /// Build a fresh policy of the given kind
    pub fn build(&self, kind: PolicyKind) -> Box<dyn DecisionPolicy> {
        match kind {
            PolicyKind::Random => Box::new(RandomTrader::new()),
            PolicyKind::TrendFollowing => Box::new(TrendFollower::new(self.trend.clone())),
            PolicyKind::Contrarian => Box::new(Contrarian::new(self.contrarian.clone())),
            PolicyKind::Optimizer => Box::new(Optimizer::new(self.optimizer.clone())),
        }
    }
}
