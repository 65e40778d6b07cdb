pub(crate) mod chain_mock;
pub(crate) mod feed_mock;
pub(crate) mod mempool_mock;
pub(crate) mod peer_mock;

use parking_lot::Mutex;
use quarry_consensus_core::{
    block::Block,
    header::Header,
    tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput},
    BlockHeight,
};
use quarry_hashes::Hash;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

/// Detects overlapping calls into collaborators which must only ever be called by one thread at a time
#[derive(Default)]
pub(crate) struct OverlapDetector {
    in_flight: AtomicUsize,
    overlaps: AtomicUsize,
    /// Calls in the order they entered
    journal: Mutex<Vec<String>>,
}

impl OverlapDetector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn enter(self: &Arc<Self>, call: String) -> OverlapGuard {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        self.journal.lock().push(call);
        OverlapGuard(self.clone())
    }

    pub(crate) fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    pub(crate) fn journal(&self) -> Vec<String> {
        self.journal.lock().clone()
    }
}

pub(crate) struct OverlapGuard(Arc<OverlapDetector>);

impl OverlapGuard {
    /// Keeps the call in flight a little longer so that overlapping callers would be caught
    pub(crate) fn linger(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl Drop for OverlapGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

pub(crate) fn coinbase(height: BlockHeight) -> Transaction {
    Transaction::new(0, vec![], vec![TransactionOutput::new(50_000, height.to_le_bytes().to_vec())], 0)
}

/// A transaction spending output `index` of each listed transaction
pub(crate) fn spend(spent: &[(TransactionId, u32)], value: u64) -> Transaction {
    let inputs = spent.iter().map(|&(id, index)| TransactionInput::new(TransactionOutpoint::new(id, index), vec![], 0)).collect();
    Transaction::new(0, inputs, vec![TransactionOutput::new(value, vec![0x51]), TransactionOutput::new(1, vec![0x52])], 0)
}

pub(crate) fn block_at(height: BlockHeight, parents: Vec<Hash>, txs: Vec<Transaction>) -> Block {
    let mut transactions = vec![coinbase(height)];
    transactions.extend(txs);
    Block::new(Header::new(1, parents, height * 1000, height, 0), transactions)
}

/// A transaction id which no mock pool or chain knows about, usable as a funding source
pub(crate) fn funding_id(seed: u64) -> TransactionId {
    Hash::from_u64_word(0xF0F0_0000 + seed)
}

/// The mocked collaborators of a block manager, sharing a single overlap detector
pub(crate) struct TestContext {
    pub(crate) detector: Arc<OverlapDetector>,
    pub(crate) chain: Arc<chain_mock::ChainStoreMock>,
    pub(crate) tx_manager: Arc<mempool_mock::TxManagerMock>,
    pub(crate) peer: Arc<peer_mock::PeerServiceMock>,
    pub(crate) feed: Arc<feed_mock::EventFeedMock>,
}

impl TestContext {
    pub(crate) fn new(best: quarry_consensus_core::api::BestTipSnapshot) -> Self {
        Self::with_linger(best, Duration::ZERO)
    }

    /// Chain store calls stay in flight for `linger`, widening the window for overlap detection
    pub(crate) fn with_linger(best: quarry_consensus_core::api::BestTipSnapshot, linger: Duration) -> Self {
        let detector = OverlapDetector::new();
        let chain = Arc::new(chain_mock::ChainStoreMock::new(detector.clone(), best).with_linger(linger));
        let fee_estimator = quarry_mining::feerate::FeeEstimatorSlot::default();
        let tx_manager = Arc::new(mempool_mock::TxManagerMock::new(detector.clone(), fee_estimator));
        Self { detector, chain, tx_manager, peer: Arc::new(peer_mock::PeerServiceMock::new(true)), feed: Default::default() }
    }

    pub(crate) fn reactor(&self) -> Arc<crate::reactor::NotificationReactor> {
        Arc::new(crate::reactor::NotificationReactor::new(self.tx_manager.clone(), self.peer.clone(), self.feed.clone()))
    }

    pub(crate) fn block_manager(
        &self,
        config: crate::config::Config,
        params: quarry_consensus_core::config::params::Params,
    ) -> Arc<crate::manager::BlockManager> {
        Arc::new(crate::manager::BlockManager::new(
            config,
            params,
            self.chain.clone(),
            self.tx_manager.clone(),
            self.peer.clone(),
            self.feed.clone(),
        ))
    }
}

/// Polls `condition` until it holds, failing the test after a few seconds
pub(crate) fn wait_until(condition: impl Fn() -> bool) {
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(std::time::Instant::now() < deadline, "condition was not met in time");
        thread::sleep(Duration::from_millis(1));
    }
}
