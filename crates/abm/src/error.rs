use thiserror::Error;

/// Hard failures surfaced by the simulation engine.
///
/// Refused trades (no funds, no inventory, no stock) are not errors; they
/// degrade to [`Decision::Skip`](crate::Decision::Skip).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
