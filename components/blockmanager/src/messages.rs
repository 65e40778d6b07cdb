use crate::errors::{BlockManagerError, BlockManagerResult};
use crossbeam_channel::Sender;
use quarry_consensus_core::{block::Block, blockstatus::BlockStatus, flags::BehaviorFlags, tx::Transaction};
use quarry_mining::{TxAdmissionOptions, TxDescriptor};
use std::sync::Arc;

/// The outcome of a block submitted to the block manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBlockResponse {
    pub is_orphan: bool,
    pub error: Option<BlockManagerError>,
    /// Set when a locally submitted block was rejected because its parents are no longer valid tips
    pub is_tips_expired: bool,
}

impl ProcessBlockResponse {
    pub fn accepted(status: BlockStatus) -> Self {
        Self { is_orphan: status.is_orphan(), error: None, is_tips_expired: false }
    }

    pub fn rejected(error: BlockManagerError) -> Self {
        let is_tips_expired = matches!(error, BlockManagerError::TipsExpired(..));
        Self { is_orphan: false, error: Some(error), is_tips_expired }
    }

    /// Converts into a result holding the orphan status
    pub fn into_result(self) -> BlockManagerResult<bool> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.is_orphan),
        }
    }
}

pub type ProcessTransactionResponse = BlockManagerResult<Vec<TxDescriptor>>;

/// A request envelope along with its single-use reply slot
pub enum BlockManagerMessage {
    ProcessBlock { block: Arc<Block>, flags: BehaviorFlags, reply: Sender<ProcessBlockResponse> },
    ProcessTransaction { tx: Arc<Transaction>, options: TxAdmissionOptions, reply: Sender<ProcessTransactionResponse> },
    IsCurrent { reply: Sender<bool> },
}

impl BlockManagerMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            BlockManagerMessage::ProcessBlock { .. } => "process-block",
            BlockManagerMessage::ProcessTransaction { .. } => "process-transaction",
            BlockManagerMessage::IsCurrent { .. } => "is-current",
        }
    }
}
