//! Simulation configuration

use crate::application::agents::PolicyConfig;
use crate::domain::PolicyKind;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for a market run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Number of random agents
    pub random_agents: u64,
    /// Number of trend-following agents
    pub trend_agents: u64,
    /// Number of contrarian agents
    pub contrarian_agents: u64,
    /// Number of optimizer agents
    pub optimizer_agents: u64,
    /// Units of free stock at the start
    pub total_stock: u64,
    /// Number of iterations to simulate
    pub iterations: u64,
    /// Unit price at the start
    pub initial_price: Decimal,
    /// Starting balance of every agent
    pub initial_balance: Decimal,
    /// Fractional price move per buy or sell
    pub price_change_rate: Decimal,
    /// Random seed for determinism (entropy if unset)
    pub seed: Option<u64>,
    /// Per-policy tuning
    pub policies: PolicyConfig,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            random_agents: 51,
            trend_agents: 24,
            contrarian_agents: 24,
            optimizer_agents: 1,
            total_stock: 100_000,
            iterations: 1000,
            initial_price: dec!(200.00),
            initial_balance: dec!(1000.00),
            price_change_rate: dec!(0.0005), // 0.05% per unit
            seed: None,
            policies: PolicyConfig::default(),
        }
    }
}

impl MarketConfig {
    /// Configured head count for one policy kind
    pub fn agents_of(&self, kind: PolicyKind) -> u64 {
        match kind {
            PolicyKind::Random => self.random_agents,
            PolicyKind::TrendFollowing => self.trend_agents,
            PolicyKind::Contrarian => self.contrarian_agents,
            PolicyKind::Optimizer => self.optimizer_agents,
        }
    }

    pub fn total_agents(&self) -> u64 {
        PolicyKind::ALL.iter().map(|k| self.agents_of(*k)).sum()
    }

    /// Same configuration with no agents, for hand-built populations
    pub fn without_agents(mut self) -> Self {
        self.random_agents = 0;
        self.trend_agents = 0;
        self.contrarian_agents = 0;
        self.optimizer_agents = 0;
        self
    }
}
