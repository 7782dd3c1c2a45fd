//! Application layer: Use cases and orchestration
//!
//! Contains:
//! - **agents**: Agents, the transaction executor and the decision policies
//! - **simulation**: MarketCoordinator that runs the iteration loop

pub mod agents;
pub mod simulation;
