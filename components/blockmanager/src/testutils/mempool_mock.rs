use super::OverlapDetector;
use parking_lot::Mutex;
use quarry_consensus_core::tx::{Transaction, TransactionId, TransactionOutpoint};
use quarry_mining::{
    errors::{MempoolResult, MempoolRuleError},
    feerate::{FeeEstimator, FeeEstimatorSlot},
    TxAdmissionOptions, TxDescriptor, TxManager,
};
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

pub(crate) const MOCK_TX_FEE: u64 = 500;
pub(crate) const MOCK_TX_SIZE: u64 = 250;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MempoolCall {
    Remove(TransactionId),
    RemoveDoubleSpends(TransactionId),
    RemoveOrphan(TransactionId),
    ProcessOrphans(TransactionId),
    Prune,
}

#[derive(Default)]
struct Pools {
    pool: HashMap<TransactionId, TxDescriptor>,
    spent: HashMap<TransactionOutpoint, TransactionId>,
    orphans: HashMap<TransactionId, Arc<Transaction>>,
    /// Transactions whose outputs can be spent without being in the pool
    known: HashSet<TransactionId>,
}

impl Pools {
    fn is_orphan(&self, tx: &Transaction) -> bool {
        tx.outpoints().any(|outpoint| {
            !self.known.contains(&outpoint.transaction_id) && !self.pool.contains_key(&outpoint.transaction_id)
        })
    }

    fn insert(&mut self, tx: Arc<Transaction>) -> TxDescriptor {
        let descriptor = TxDescriptor::new(tx.clone(), 0, 0, MOCK_TX_FEE, MOCK_TX_SIZE);
        for outpoint in tx.outpoints() {
            self.spent.insert(outpoint, tx.id());
        }
        self.pool.insert(tx.id(), descriptor.clone());
        descriptor
    }

    fn remove(&mut self, id: &TransactionId, remove_redeemers: bool) {
        let Some(descriptor) = self.pool.remove(id) else { return };
        for outpoint in descriptor.tx.outpoints() {
            if self.spent.get(&outpoint) == Some(id) {
                self.spent.remove(&outpoint);
            }
        }
        if remove_redeemers {
            let redeemers: Vec<TransactionId> =
                self.spent.iter().filter(|(outpoint, _)| outpoint.transaction_id == *id).map(|(_, redeemer)| *redeemer).collect();
            for redeemer in redeemers {
                self.remove(&redeemer, true);
            }
        }
    }

    /// Admits every orphan unlocked by `accepted`, recursively
    fn promote_orphans(&mut self, accepted: TransactionId) -> Vec<TxDescriptor> {
        let mut promoted = Vec::new();
        let mut queue = vec![accepted];
        while let Some(parent) = queue.pop() {
            let mut unlocked: Vec<Arc<Transaction>> = self
                .orphans
                .values()
                .filter(|orphan| orphan.outpoints().any(|outpoint| outpoint.transaction_id == parent))
                .filter(|orphan| !self.is_orphan(orphan))
                .cloned()
                .collect();
            unlocked.sort_by_key(|orphan| orphan.id());
            for orphan in unlocked {
                self.orphans.remove(&orphan.id());
                queue.push(orphan.id());
                promoted.push(self.insert(orphan));
            }
        }
        promoted
    }
}

/// A transaction pool with an orphan pool and outpoint based double-spend detection
pub(crate) struct TxManagerMock {
    detector: Arc<OverlapDetector>,
    pools: Mutex<Pools>,
    calls: Mutex<Vec<MempoolCall>>,
    fee_estimator: FeeEstimatorSlot,
    fee_estimator_resets: AtomicUsize,
    panicking: Mutex<HashSet<TransactionId>>,
}

impl TxManagerMock {
    pub(crate) fn new(detector: Arc<OverlapDetector>, fee_estimator: FeeEstimatorSlot) -> Self {
        Self {
            detector,
            pools: Mutex::new(Pools::default()),
            calls: Mutex::new(Vec::new()),
            fee_estimator,
            fee_estimator_resets: AtomicUsize::new(0),
            panicking: Mutex::new(HashSet::new()),
        }
    }

    /// Makes the outputs of `id` spendable, as if it was confirmed
    pub(crate) fn add_known(&self, id: TransactionId) {
        self.pools.lock().known.insert(id);
    }

    /// Inserts `tx` directly into the pool, bypassing admission
    pub(crate) fn insert(&self, tx: Transaction) {
        self.pools.lock().insert(Arc::new(tx));
    }

    pub(crate) fn panic_on(&self, id: TransactionId) {
        self.panicking.lock().insert(id);
    }

    pub(crate) fn contains(&self, id: &TransactionId) -> bool {
        self.pools.lock().pool.contains_key(id)
    }

    pub(crate) fn contains_orphan(&self, id: &TransactionId) -> bool {
        self.pools.lock().orphans.contains_key(id)
    }

    pub(crate) fn calls(&self) -> Vec<MempoolCall> {
        self.calls.lock().clone()
    }

    pub(crate) fn fee_estimator_resets(&self) -> usize {
        self.fee_estimator_resets.load(Ordering::SeqCst)
    }
}

impl TxManager for TxManagerMock {
    fn process_transaction(&self, tx: Arc<Transaction>, options: TxAdmissionOptions) -> MempoolResult<Vec<TxDescriptor>> {
        let id = tx.id();
        let _guard = self.detector.enter(format!("process_transaction {}", id));
        if self.panicking.lock().contains(&id) {
            panic!("mempool failure on transaction {}", id);
        }
        if tx.is_coinbase() {
            return Err(MempoolRuleError::RejectCoinbase(id));
        }

        let mut pools = self.pools.lock();
        if pools.pool.contains_key(&id) {
            return Err(MempoolRuleError::RejectDuplicate(id));
        }
        for outpoint in tx.outpoints() {
            if let Some(spender) = pools.spent.get(&outpoint) {
                return Err(MempoolRuleError::RejectDoubleSpendInMempool(outpoint, *spender));
            }
        }
        if pools.is_orphan(&tx) {
            if !options.allow_orphans {
                return Err(MempoolRuleError::RejectDisallowedOrphan(id));
            }
            if pools.orphans.contains_key(&id) {
                return Err(MempoolRuleError::RejectDuplicateOrphan(id));
            }
            pools.orphans.insert(id, tx);
            return Ok(vec![]);
        }

        let descriptor = pools.insert(tx);
        if let Some(fee_estimator) = self.fee_estimator.load() {
            let _ = fee_estimator.observe_transaction(&descriptor);
        }
        let mut accepted = vec![descriptor];
        accepted.extend(pools.promote_orphans(id));
        Ok(accepted)
    }

    fn remove_transaction(&self, tx: &Transaction, remove_redeemers: bool) {
        self.calls.lock().push(MempoolCall::Remove(tx.id()));
        self.pools.lock().remove(&tx.id(), remove_redeemers);
    }

    fn remove_double_spends(&self, tx: &Transaction) {
        self.calls.lock().push(MempoolCall::RemoveDoubleSpends(tx.id()));
        let mut pools = self.pools.lock();
        let conflicting: Vec<TransactionId> =
            tx.outpoints().filter_map(|outpoint| pools.spent.get(&outpoint).copied()).filter(|spender| *spender != tx.id()).collect();
        for spender in conflicting {
            pools.remove(&spender, true);
        }
    }

    fn remove_orphan(&self, transaction_id: &TransactionId) {
        self.calls.lock().push(MempoolCall::RemoveOrphan(*transaction_id));
        self.pools.lock().orphans.remove(transaction_id);
    }

    fn process_orphans(&self, accepted: &TransactionId) -> Vec<TxDescriptor> {
        self.calls.lock().push(MempoolCall::ProcessOrphans(*accepted));
        let mut pools = self.pools.lock();
        pools.known.insert(*accepted);
        pools.promote_orphans(*accepted)
    }

    fn prune_expired_transactions(&self) {
        self.calls.lock().push(MempoolCall::Prune);
    }

    fn fee_estimator(&self) -> Option<Arc<FeeEstimator>> {
        self.fee_estimator.load()
    }

    fn reset_default_fee_estimator(&self) {
        self.fee_estimator_resets.fetch_add(1, Ordering::SeqCst);
        self.fee_estimator.reset_default();
    }
}
