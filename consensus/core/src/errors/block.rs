use crate::{tx::TransactionId, BlockHeight};
use quarry_hashes::Hash;
use thiserror::Error;

/// A rejection issued by the chain store while validating or linking blocks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("block {0} already exists")]
    DuplicateBlock(Hash),

    #[error("block {0} has no parents")]
    NoParents(Hash),

    #[error("block {0} has no transactions")]
    NoTransactions(Hash),

    #[error("first transaction of block {0} is not a coinbase")]
    FirstTxNotCoinbase(Hash),

    #[error("transaction {1} of block {0} is invalid: {2}")]
    InvalidTransaction(Hash, TransactionId, String),

    #[error("block at layer {0} does not match checkpoint hash {1}")]
    CheckpointMismatch(BlockHeight, Hash),

    #[error("parents {0:?} are not tips of a valid sub main chain")]
    NotSubMainChainTip(Vec<Hash>),

    #[error("block {0} is invalid: {1}")]
    BadBlock(Hash, String),
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
