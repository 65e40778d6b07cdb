use crate::feerate::FeeRate;
use quarry_consensus_core::{
    tx::{TransactionId, TransactionOutpoint},
    BlockHeight,
};
use quarry_hashes::Hash;
use thiserror::Error;

/// A rejection issued by the transaction manager
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MempoolRuleError {
    #[error("transaction {0} is already in the mempool")]
    RejectDuplicate(TransactionId),

    #[error("output {0} already spent by transaction {1} in the memory pool")]
    RejectDoubleSpendInMempool(TransactionOutpoint, TransactionId),

    #[error("transaction {0} is an orphan where orphan is disallowed")]
    RejectDisallowedOrphan(TransactionId),

    #[error("orphan transaction {0} is already in the orphan pool")]
    RejectDuplicateOrphan(TransactionId),

    #[error("transaction {0} has insufficient priority ({1} < {2})")]
    RejectInsufficientFee(TransactionId, u64, u64),

    #[error("transaction {0} has {1} fees which is above the allowed max of {2}")]
    RejectHighFee(TransactionId, u64, u64),

    #[error("transaction {0} has been rejected by the rate limiter due to low fees")]
    RejectRateLimited(TransactionId),

    #[error("transaction {0} is a coinbase and cannot be admitted to the mempool")]
    RejectCoinbase(TransactionId),

    #[error("number of transactions in mempool ({0}) has reached the maximum allowed ({1})")]
    RejectMempoolIsFull(usize, usize),

    #[error("transaction {0} is not standard: {1}")]
    RejectNonStandard(TransactionId, String),
}

pub type MempoolResult<T> = std::result::Result<T, MempoolRuleError>;

/// An internal inconsistency of the fee estimator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeEstimatorError {
    #[error("intermediate block not recorded; current height is {0}; new height is {1}")]
    NonConsecutiveBlock(BlockHeight, BlockHeight),

    #[error("block {0} is not among the {1} most recently registered blocks")]
    RollbackUnavailable(Hash, usize),

    #[error("not enough blocks have been observed ({0} < {1})")]
    NotEnoughData(usize, usize),

    #[error("cannot estimate fee for {0} blocks, supported range is 1..={1}")]
    InvalidTarget(usize, usize),

    #[error("fee rate {0} is not a valid observation")]
    InvalidFeeRate(FeeRate),
}

pub type FeeEstimatorResult<T> = std::result::Result<T, FeeEstimatorError>;
