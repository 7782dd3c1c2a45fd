//! Final market report
//!
//! Final unit price, then balance and inventory of every agent in id order.

use bazaar_abm::{AgentSnapshot, MarketCoordinator, SimulationMetrics};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

const SEPARATOR: &str = "********************************************************************";

/// Read-only summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub final_price: Decimal,
    pub free_stock: u64,
    pub metrics: SimulationMetrics,
    pub agents: Vec<AgentSnapshot>,
}

impl FinalReport {
    pub fn from_market(market: &MarketCoordinator) -> Self {
        Self {
            final_price: market.price(),
            free_stock: market.state().free_stock(),
            metrics: market.metrics().clone(),
            agents: market.snapshots(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final unit price: {:.2}", self.final_price.round_dp(2))?;
        for agent in &self.agents {
            writeln!(
                f,
                "Final balance of agent {} ({}): {:.2}",
                agent.id,
                agent.kind.label(),
                agent.balance.round_dp(2)
            )?;
            writeln!(
                f,
                "Final inventory of agent {} ({}): {} units",
                agent.id,
                agent.kind.label(),
                agent.inventory
            )?;
            writeln!(f, "{}", SEPARATOR)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_abm::{AgentId, PolicyKind};
    use rust_decimal_macros::dec;

    fn report() -> FinalReport {
        FinalReport {
            final_price: dec!(200.1049),
            free_stock: 99_999,
            metrics: SimulationMetrics::default(),
            agents: vec![
                AgentSnapshot {
                    id: AgentId::new(0),
                    kind: PolicyKind::Random,
                    balance: dec!(800),
                    inventory: 1,
                },
                AgentSnapshot {
                    id: AgentId::new(1),
                    kind: PolicyKind::Optimizer,
                    balance: dec!(1000.456),
                    inventory: 0,
                },
            ],
        }
    }

    #[test]
    fn test_text_format() {
        let text = report().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Final unit price: 200.10");
        assert_eq!(lines[1], "Final balance of agent 0 (Random): 800.00");
        assert_eq!(lines[2], "Final inventory of agent 0 (Random): 1 units");
        assert_eq!(lines[3], SEPARATOR);
        assert_eq!(lines[4], "Final balance of agent 1 (Optimizer): 1000.46");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_json_lists_agents() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["agents"].as_array().unwrap().len(), 2);
        assert_eq!(value["agents"][1]["kind"], "Optimizer");
        assert_eq!(value["free_stock"], 99_999);
    }
}
