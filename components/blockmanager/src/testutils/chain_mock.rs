use super::{OverlapDetector, OverlapGuard};
use parking_lot::Mutex;
use quarry_consensus_core::{
    api::{BestTipSnapshot, ChainNotificationCallback, ChainStore},
    block::Block,
    blockstatus::BlockStatus,
    errors::block::{RuleError, RuleResult},
    flags::BehaviorFlags,
    notify::{BlockAcceptedNotification, BlockConnectedNotification, ChainNotification},
};
use quarry_hashes::Hash;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

/// A chain store recording the calls made into it and asserting they never overlap.
///
/// A processed block is accepted unless an outcome was set for it. Accepted blocks emit a
/// `BlockAccepted` notification, followed by `BlockConnected` when not an orphan.
pub(crate) struct ChainStoreMock {
    detector: Arc<OverlapDetector>,
    best: Mutex<BestTipSnapshot>,
    callback: Mutex<Option<ChainNotificationCallback>>,
    outcomes: Mutex<HashMap<Hash, RuleResult<BlockStatus>>>,
    expired_tips: Mutex<HashSet<Hash>>,
    panicking: Mutex<HashSet<Hash>>,
    processed: Mutex<Vec<Hash>>,
    checkpoints_disabled: Mutex<Option<bool>>,
    linger: Duration,
}

impl ChainStoreMock {
    pub(crate) fn new(detector: Arc<OverlapDetector>, best: BestTipSnapshot) -> Self {
        Self {
            detector,
            best: Mutex::new(best),
            callback: Mutex::new(None),
            outcomes: Mutex::new(HashMap::new()),
            expired_tips: Mutex::new(HashSet::new()),
            panicking: Mutex::new(HashSet::new()),
            processed: Mutex::new(Vec::new()),
            checkpoints_disabled: Mutex::new(None),
            linger: Duration::ZERO,
        }
    }

    pub(crate) fn with_linger(mut self, linger: Duration) -> Self {
        self.linger = linger;
        self
    }

    pub(crate) fn set_outcome(&self, hash: Hash, outcome: RuleResult<BlockStatus>) {
        self.outcomes.lock().insert(hash, outcome);
    }

    /// Blocks referencing `tip` as a parent fail the sub main chain tip check
    pub(crate) fn expire_tip(&self, tip: Hash) {
        self.expired_tips.lock().insert(tip);
    }

    pub(crate) fn panic_on(&self, hash: Hash) {
        self.panicking.lock().insert(hash);
    }

    pub(crate) fn processed(&self) -> Vec<Hash> {
        self.processed.lock().clone()
    }

    pub(crate) fn checkpoints_disabled(&self) -> Option<bool> {
        *self.checkpoints_disabled.lock()
    }

    pub(crate) fn is_subscribed(&self) -> bool {
        self.callback.lock().is_some()
    }

    /// Pushes a notification to the subscriber as the chain store would
    pub(crate) fn notify(&self, notification: ChainNotification) {
        let callback = self.callback.lock().clone();
        if let Some(callback) = callback {
            callback(notification);
        }
    }

    fn enter(&self, call: String) -> OverlapGuard {
        let guard = self.detector.enter(call);
        guard.linger(self.linger);
        guard
    }
}

impl ChainStore for ChainStoreMock {
    fn process_block(&self, block: Arc<Block>, flags: BehaviorFlags) -> RuleResult<BlockStatus> {
        let hash = block.hash();
        let _guard = self.enter(format!("process_block {}", hash));
        self.processed.lock().push(hash);
        if self.panicking.lock().contains(&hash) {
            panic!("chain store failure on block {}", hash);
        }

        let outcome = self.outcomes.lock().get(&hash).cloned().unwrap_or(Ok(BlockStatus::StatusAccepted));
        let status = outcome?;
        self.notify(ChainNotification::BlockAccepted(BlockAcceptedNotification { block: block.clone(), flags }));
        if !status.is_orphan() {
            {
                let mut best = self.best.lock();
                if block.height() >= best.main_height {
                    *best = BestTipSnapshot { hash, main_height: block.height() };
                }
            }
            if !block.is_header_only() {
                self.notify(ChainNotification::BlockConnected(BlockConnectedNotification { block, fee_estimator_eligible: true }));
            }
        }
        Ok(status)
    }

    fn best_tip_snapshot(&self) -> BestTipSnapshot {
        *self.best.lock()
    }

    fn check_sub_main_chain_tip(&self, parents: &[Hash]) -> RuleResult<()> {
        let _guard = self.enter(format!("check_sub_main_chain_tip {:?}", parents));
        let expired = self.expired_tips.lock();
        if parents.iter().any(|parent| expired.contains(parent)) {
            return Err(RuleError::NotSubMainChainTip(parents.to_vec()));
        }
        Ok(())
    }

    fn subscribe(&self, callback: ChainNotificationCallback) {
        *self.callback.lock() = Some(callback);
    }

    fn disable_checkpoints(&self, disable: bool) {
        *self.checkpoints_disabled.lock() = Some(disable);
    }
}
