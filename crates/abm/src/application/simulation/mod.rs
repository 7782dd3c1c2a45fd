//! Simulation Framework
//!
//! Provides the iteration loop and coordination for running the market.
//!
//! # Architecture
//!
//! The coordinator, once per iteration:
//! - Shuffles the agent activation order
//! - Lets every agent decide and execute against a frozen price
//! - Draws free stock down as buys execute
//! - Settles the price once from net order flow
//! - Collects metrics

mod config;
mod coordinator;
mod metrics;

pub use config::MarketConfig;
pub use coordinator::{IterationReport, MarketCoordinator, SimulationPhase};
pub use metrics::{DecisionTally, SimulationMetrics};
