//! Decisions and policy kinds
//!
//! The tagged outcome of one agent acting in one iteration, and the closed
//! set of behavioral policies an agent can follow.

use serde::{Deserialize, Serialize};

/// Outcome of one agent's action in one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Bought one unit at the iteration price
    Buy,
    /// Sold one unit at the iteration price
    Sell,
    /// Abstained (or an attempted trade was refused)
    Skip,
}

impl Decision {
    /// Signed contribution to net order flow: +1 buy, -1 sell, 0 skip
    pub fn direction(&self) -> i64 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
            Self::Skip => 0,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Skip => "skip",
        };
        f.write_str(label)
    }
}

/// Behavioral policy an agent follows for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyKind {
    Random,
    TrendFollowing,
    Contrarian,
    Optimizer,
}

impl PolicyKind {
    /// All kinds, in agent creation order
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Random,
        PolicyKind::TrendFollowing,
        PolicyKind::Contrarian,
        PolicyKind::Optimizer,
    ];

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::TrendFollowing => "Trend-following",
            Self::Contrarian => "Contrarian",
            Self::Optimizer => "Optimizer",
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
