//! Agent
//!
//! Identity, holdings and the transaction executor. An agent consults its
//! policy for an intent and then executes it against its own holdings;
//! refused trades never fail, they become [`Decision::Skip`].

use super::{DecisionPolicy, MarketView};
use crate::domain::{Decision, Holdings, PolicyKind};
use rand::RngCore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier for an agent, assigned contiguously at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u64);

impl AgentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of an agent for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub kind: PolicyKind,
    pub balance: Decimal,
    pub inventory: u64,
}

/// A trading agent bound to one policy for its lifetime
pub struct Agent {
    id: AgentId,
    holdings: Holdings,
    policy: Box<dyn DecisionPolicy>,
}

impl Agent {
    pub fn new(id: AgentId, balance: Decimal, policy: Box<dyn DecisionPolicy>) -> Self {
        Self {
            id,
            holdings: Holdings::new(balance),
            policy,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn balance(&self) -> Decimal {
        self.holdings.balance
    }

    pub fn inventory(&self) -> u64 {
        self.holdings.inventory
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            kind: self.kind(),
            balance: self.holdings.balance,
            inventory: self.holdings.inventory,
        }
    }

    /// Consult the policy and execute its intent.
    ///
    /// The returned decision is what actually happened, so a refused buy or
    /// sell comes back as `Skip`.
    pub fn act(&mut self, view: &MarketView, rng: &mut dyn RngCore) -> Decision {
        let intent = self.policy.decide(view, &self.holdings, rng);
        match intent {
            Decision::Buy => self.buy(view.price, view.stock_available),
            Decision::Sell => self.sell(view.price),
            Decision::Skip => self.skip(),
        }
    }

    /// Buy one unit at `price` if stock is available and the agent can pay
    pub fn buy(&mut self, price: Decimal, stock_available: bool) -> Decision {
        if !stock_available {
            log::debug!("agent {}: no free stock left, skipping buy", self.id);
            return Decision::Skip;
        }

        if self.holdings.try_buy(price) {
            log::debug!(
                "agent {}: bought 1 @ {:.2} (balance={:.2}, inventory={})",
                self.id,
                price,
                self.holdings.balance,
                self.holdings.inventory
            );
            Decision::Buy
        } else {
            log::debug!(
                "agent {}: balance {:.2} below price {:.2}, skipping buy",
                self.id,
                self.holdings.balance,
                price
            );
            Decision::Skip
        }
    }

    /// Sell one unit at `price` if the agent holds any
    pub fn sell(&mut self, price: Decimal) -> Decision {
        if self.holdings.try_sell(price) {
            log::debug!(
                "agent {}: sold 1 @ {:.2} (balance={:.2}, inventory={})",
                self.id,
                price,
                self.holdings.balance,
                self.holdings.inventory
            );
            Decision::Sell
        } else {
            log::debug!("agent {}: empty inventory, skipping sell", self.id);
            Decision::Skip
        }
    }

    /// Abstain this iteration
    pub fn skip(&self) -> Decision {
        log::debug!("agent {}: skips", self.id);
        Decision::Skip
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("holdings", &self.holdings)
            .finish()
    }
}
