//! Simulation metrics aggregated over a run

use crate::domain::{Decision, PolicyKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count of each decision outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTally {
    pub buys: u64,
    pub sells: u64,
    pub skips: u64,
}

impl DecisionTally {
    pub fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Buy => self.buys += 1,
            Decision::Sell => self.sells += 1,
            Decision::Skip => self.skips += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.buys + self.sells + self.skips
    }

    /// Buys minus sells
    pub fn net_flow(&self) -> i64 {
        self.buys as i64 - self.sells as i64
    }
}

/// Totals over every iteration run so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Iterations processed
    pub iterations_run: u64,
    /// All decisions
    pub decisions: DecisionTally,
    /// Decisions by policy kind
    pub decisions_by_kind: BTreeMap<PolicyKind, DecisionTally>,
    /// Lowest settled price (initial price included)
    pub min_price: Decimal,
    /// Highest settled price (initial price included)
    pub max_price: Decimal,
    /// Price after the last settlement
    pub final_price: Decimal,
}

impl SimulationMetrics {
    pub fn starting_at(price: Decimal) -> Self {
        Self {
            min_price: price,
            max_price: price,
            final_price: price,
            ..Default::default()
        }
    }

    pub fn record_decision(&mut self, kind: PolicyKind, decision: Decision) {
        self.decisions.record(decision);
        self.decisions_by_kind
            .entry(kind)
            .or_default()
            .record(decision);
    }

    pub fn record_settlement(&mut self, price: Decimal) {
        self.iterations_run += 1;
        self.min_price = self.min_price.min(price);
        self.max_price = self.max_price.max(price);
        self.final_price = price;
    }
}
