//! Domain layer: Pure business logic and value objects

mod decision;
mod holdings;
mod market_state;

pub use decision::{Decision, PolicyKind};
pub use holdings::Holdings;
pub use market_state::{MarketState, PRICE_DP, aggregate_delta};
