//! The block manager funnels every chain-mutating operation through a single worker thread
//! and reacts to chain notifications to keep the mempool, the fee estimator and the
//! external event feed consistent with the canonical chain.

pub mod config;
pub mod errors;
pub mod header_state;
pub mod interfaces;
pub mod manager;
pub mod messages;
pub mod progress;
pub mod reactor;
mod worker;

#[cfg(test)]
pub(crate) mod testutils;

pub use config::Config;
pub use errors::{BlockManagerError, BlockManagerResult};
pub use manager::{BlockManager, BlockManagerProxy};
pub use messages::ProcessBlockResponse;
