use crate::{
    interfaces::{DynEventFeed, DynPeerService},
    progress::BlockProgressLogger,
};
use parking_lot::Mutex;
use quarry_consensus_core::{
    api::ChainNotificationCallback,
    flags::BehaviorFlags,
    notify::{
        BlockAcceptedNotification, BlockConnectedNotification, BlockDisconnectedNotification, ChainNotification,
        ReorganizationNotification,
    },
};
use quarry_core::{debug, time::unix_now, trace, warn};
use quarry_mining::DynTxManager;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Reacts to chain notifications by updating the mempool, the fee estimator, the peers
/// and the external event feed.
///
/// Invoked synchronously by the chain store, so in practice on the block manager worker thread.
/// Handlers tolerate a redelivered notification.
pub struct NotificationReactor {
    tx_manager: DynTxManager,
    peer: DynPeerService,
    event_feed: DynEventFeed,
    progress_logger: Mutex<BlockProgressLogger>,
    /// Unix time in milliseconds of the last block received from a peer
    last_progress_time: AtomicU64,
}

impl NotificationReactor {
    pub fn new(tx_manager: DynTxManager, peer: DynPeerService, event_feed: DynEventFeed) -> Self {
        Self {
            tx_manager,
            peer,
            event_feed,
            progress_logger: Mutex::new(BlockProgressLogger::new("Processed")),
            last_progress_time: AtomicU64::new(0),
        }
    }

    /// Wraps the reactor into a callback for [`quarry_consensus_core::api::ChainStore::subscribe`]
    pub fn callback(self: &Arc<Self>) -> ChainNotificationCallback {
        let reactor = self.clone();
        Arc::new(move |notification| reactor.handle(notification))
    }

    pub fn last_progress_time(&self) -> u64 {
        self.last_progress_time.load(Ordering::Relaxed)
    }

    pub fn handle(&self, notification: ChainNotification) {
        trace!("Chain {} notification", notification.event_name());
        match notification {
            ChainNotification::BlockAccepted(notification) => self.on_block_accepted(notification),
            ChainNotification::BlockConnected(notification) => self.on_block_connected(notification),
            ChainNotification::BlockDisconnected(notification) => self.on_block_disconnected(notification),
            ChainNotification::Reorganization(notification) => self.on_reorganization(notification),
        }
    }

    fn on_block_accepted(&self, notification: BlockAcceptedNotification) {
        let block = notification.block;
        if notification.flags.contains(BehaviorFlags::P2P_ADD) {
            self.progress_logger.lock().log_block_height(&block);
            self.last_progress_time.store(unix_now(), Ordering::Relaxed);
        }
        self.event_feed.block_accepted(&block);

        // Peers which are current already know about the block
        if !self.peer.is_current() {
            trace!("we are not current");
            return;
        }
        trace!("we are current, can do relay");
        self.peer.relay_inventory(block.header.clone());
    }

    fn on_block_connected(&self, notification: BlockConnectedNotification) {
        let block = notification.block;
        if block.is_header_only() {
            warn!("Chain connected notification for block {} carries no transactions, dropping it", block.hash());
            return;
        }

        // Transactions depending on a confirmed one stay in the pool since they are still valid
        let mut accepted = Vec::new();
        for tx in block.non_coinbase_transactions() {
            let id = tx.id();
            self.tx_manager.remove_transaction(tx, false);
            self.tx_manager.remove_double_spends(tx);
            self.tx_manager.remove_orphan(&id);
            self.event_feed.transaction_confirmed(tx);
            accepted.extend(self.tx_manager.process_orphans(&id));
        }
        if !accepted.is_empty() {
            self.peer.announce_new_transactions(&accepted);
        }

        if notification.fee_estimator_eligible {
            if let Some(fee_estimator) = self.tx_manager.fee_estimator() {
                if let Err(err) = fee_estimator.register_block(&block) {
                    warn!("Fee estimator entered an invalid state ({}), replacing it with a fresh one", err);
                    self.tx_manager.reset_default_fee_estimator();
                }
            }
        }

        self.event_feed.block_connected(&block);
    }

    fn on_block_disconnected(&self, notification: BlockDisconnectedNotification) {
        let block = notification.block;
        if let Some(fee_estimator) = self.tx_manager.fee_estimator() {
            if let Err(err) = fee_estimator.rollback(block.hash()) {
                debug!("Fee estimator rollback of block {} skipped: {}", block.hash(), err);
            }
        }
        self.event_feed.block_disconnected(&block);
    }

    fn on_reorganization(&self, notification: ReorganizationNotification) {
        trace!(
            "Chain reorganization notification: {} block(s) detached, new block {} at order {}",
            notification.old_blocks.len(),
            notification.new_block,
            notification.new_order
        );
        self.event_feed.on_reorganization(&notification);
    }
}
