use quarry_consensus_core::errors::block::RuleError;
use quarry_core::service::ServiceError;
use quarry_mining::errors::MempoolRuleError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockManagerError {
    /// The parents of a locally submitted block no longer form a valid sub main chain tip
    #[error("the tips of block {0} are expired: {1}")]
    TipsExpired(quarry_hashes::Hash, RuleError),

    #[error(transparent)]
    BlockRule(#[from] RuleError),

    #[error(transparent)]
    Mempool(#[from] MempoolRuleError),

    #[error("{0} panicked: {1}")]
    ValidatorPanic(&'static str, String),

    /// The request was never serviced, the worker exited first
    #[error("the {0} request was dropped before a reply was sent")]
    ReplyDropped(&'static str),

    /// The caller-side deadline elapsed. The outcome of the request is unknown.
    #[error("no reply within {0:?}, outcome unknown")]
    Timeout(Duration),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type BlockManagerResult<T> = std::result::Result<T, BlockManagerError>;
