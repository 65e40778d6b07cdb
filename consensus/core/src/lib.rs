pub mod api;
pub mod block;
pub mod blockstatus;
pub mod config;
pub mod errors;
pub mod flags;
pub mod header;
pub mod network;
pub mod notify;
pub mod tx;

/// Main-chain height of a block in the DAG
pub type BlockHeight = u64;
