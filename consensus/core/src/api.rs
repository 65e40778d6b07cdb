use crate::{
    block::Block, blockstatus::BlockStatus, errors::block::RuleResult, flags::BehaviorFlags, notify::ChainNotification, BlockHeight,
};
use quarry_hashes::Hash;
use std::sync::Arc;

/// Receives every chain notification, synchronously, on the thread which mutated the chain
pub type ChainNotificationCallback = Arc<dyn Fn(ChainNotification) + Send + Sync>;

/// A point-in-time view of the best DAG tip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTipSnapshot {
    pub hash: Hash,
    pub main_height: BlockHeight,
}

/// Abstracts the chain state store and its validation rules.
///
/// Implementations are not required to be safe for concurrent mutation: callers must funnel
/// all calls to [`ChainStore::process_block`] through a single worker.
pub trait ChainStore: Send + Sync {
    /// Validates the block and, if it passes, inserts it into the DAG or into the orphan pool
    fn process_block(&self, block: Arc<Block>, flags: BehaviorFlags) -> RuleResult<BlockStatus>;

    fn best_tip_snapshot(&self) -> BestTipSnapshot;

    /// Verifies that `parents` are still tips of a valid sub main chain
    fn check_sub_main_chain_tip(&self, parents: &[Hash]) -> RuleResult<()>;

    /// Registers the notification callback
    fn subscribe(&self, callback: ChainNotificationCallback);

    fn disable_checkpoints(&self, disable: bool);
}

pub type DynChainStore = Arc<dyn ChainStore>;
