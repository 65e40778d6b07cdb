use crate::feerate::FeeRate;
use quarry_consensus_core::{
    tx::{Transaction, TransactionId},
    BlockHeight,
};
use std::sync::Arc;

/// A transaction accepted into the pool, along with its admission metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDescriptor {
    pub tx: Arc<Transaction>,
    /// Unix time in milliseconds at which the transaction was admitted
    pub added: u64,
    /// Main-chain height when the transaction was admitted
    pub height: BlockHeight,
    pub fee: u64,
    /// Serialized size in bytes
    pub size: u64,
}

impl TxDescriptor {
    pub fn new(tx: Arc<Transaction>, added: u64, height: BlockHeight, fee: u64, size: u64) -> Self {
        Self { tx, added, height, fee, size }
    }

    pub fn id(&self) -> TransactionId {
        self.tx.id()
    }

    /// Fee rate in base units per 1000 bytes
    pub fn fee_rate(&self) -> FeeRate {
        if self.size == 0 {
            return 0;
        }
        self.fee.saturating_mul(1000) / self.size
    }
}
