use crate::{errors::MempoolResult, feerate::FeeEstimator, model::tx_descriptor::TxDescriptor};
use quarry_consensus_core::tx::{Transaction, TransactionId};
use std::sync::Arc;

/// Caller-provided policy for admitting a single transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxAdmissionOptions {
    /// Keep the transaction in the orphan pool if some of its inputs are unknown
    pub allow_orphans: bool,
    /// Apply the free/low-fee transaction rate limiter
    pub rate_limit: bool,
    /// Skip the absurd-fee check
    pub allow_high_fees: bool,
}

impl TxAdmissionOptions {
    pub fn new(allow_orphans: bool, rate_limit: bool, allow_high_fees: bool) -> Self {
        Self { allow_orphans, rate_limit, allow_high_fees }
    }
}

/// The verb-set of the transaction pool used by the block manager.
///
/// The pool itself decides validity, ordering and eviction.
pub trait TxManager: Send + Sync {
    /// Validates and inserts `tx`. Returns the descriptors of all transactions accepted
    /// as a result, i.e. `tx` itself followed by any orphans it unlocked. An orphaned `tx`
    /// yields an empty list.
    fn process_transaction(&self, tx: Arc<Transaction>, options: TxAdmissionOptions) -> MempoolResult<Vec<TxDescriptor>>;

    fn remove_transaction(&self, tx: &Transaction, remove_redeemers: bool);

    /// Removes all pool transactions spending an outpoint also spent by `tx`, and their redeemers
    fn remove_double_spends(&self, tx: &Transaction);

    fn remove_orphan(&self, transaction_id: &TransactionId);

    /// Moves orphans which became admissible once `accepted` is known into the pool
    fn process_orphans(&self, accepted: &TransactionId) -> Vec<TxDescriptor>;

    /// Evicts transactions invalidated by the new chain height (expired lock times and similar)
    fn prune_expired_transactions(&self);

    fn fee_estimator(&self) -> Option<Arc<FeeEstimator>>;

    /// Discards the current fee estimator, if any, and installs a freshly initialized one
    fn reset_default_fee_estimator(&self);
}

pub type DynTxManager = Arc<dyn TxManager>;
