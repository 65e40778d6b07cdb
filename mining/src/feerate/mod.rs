//! Fee estimation from the fee rates of recently mined transactions.

mod estimator;
mod slot;

pub use estimator::{FeeEstimator, FeeEstimatorConfig};
pub use slot::FeeEstimatorSlot;

/// Fee rate in base units per 1000 bytes
pub type FeeRate = u64;
