//! Agent-Based Model (ABM) of price formation
//!
//! A single-commodity market populated by agents with fixed behavioral
//! policies. Each iteration every agent observes the price and its last
//! move, then buys, sells or abstains; net order flow moves the price.

pub mod application;
pub mod domain;
pub mod error;

// Re-export key types at crate root
pub use application::agents;
pub use application::agents::{Agent, AgentId, AgentSnapshot, DecisionPolicy, MarketView};
pub use application::simulation::{
    DecisionTally, IterationReport, MarketConfig, MarketCoordinator, SimulationMetrics,
    SimulationPhase,
};
pub use domain::{Decision, Holdings, MarketState, PolicyKind, aggregate_delta};
pub use error::{Result, SimError};
