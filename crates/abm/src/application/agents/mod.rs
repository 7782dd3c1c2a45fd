//! Agent Framework
//!
//! Agents, the transaction executor and the decision policies they follow.
//!
//! # Policy Types
//!
//! - **RandomTrader**: Buys, sells or skips uniformly at random
//! - **TrendFollower**: Buys after a rise (amplifies trends)
//! - **Contrarian**: Buys after a fall (dampens trends)
//! - **Optimizer**: Trades against the last move and liquidates before the end

mod agent;
mod policy;

pub use agent::{Agent, AgentId, AgentSnapshot};
pub use policy::{DecisionPolicy, MarketView, PolicyConfig};

// Policy implementations
pub mod contrarian;
pub mod optimizer;
pub mod random;
pub mod trend_follower;

// Re-export policy types and configs
pub use contrarian::{Contrarian, ContrarianConfig};
pub use optimizer::{Optimizer, OptimizerConfig};
pub use random::RandomTrader;
pub use trend_follower::{TrendFollower, TrendFollowerConfig};
