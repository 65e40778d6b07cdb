use super::FeeRate;
use crate::{
    errors::{FeeEstimatorError, FeeEstimatorResult},
    model::tx_descriptor::TxDescriptor,
};
use parking_lot::Mutex;
use quarry_consensus_core::{block::Block, tx::TransactionId, BlockHeight};
use quarry_hashes::Hash;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_MAX_ROLLBACK: usize = 2;
pub const DEFAULT_MIN_REGISTERED_BLOCKS: usize = 3;
pub const DEFAULT_MAX_CONFIRMATION_WINDOW: usize = 25;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimatorConfig {
    /// How many of the most recently registered blocks can be rolled back
    pub max_rollback: usize,
    /// Estimates are refused until this many blocks were registered
    pub min_registered_blocks: usize,
    /// How many registered blocks are retained as estimation history
    pub max_confirmation_window: usize,
}

impl Default for FeeEstimatorConfig {
    fn default() -> Self {
        Self {
            max_rollback: DEFAULT_MAX_ROLLBACK,
            min_registered_blocks: DEFAULT_MIN_REGISTERED_BLOCKS,
            max_confirmation_window: DEFAULT_MAX_CONFIRMATION_WINDOW,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ObservedTransaction {
    id: TransactionId,
    fee_rate: FeeRate,
}

#[derive(Debug)]
struct RegisteredBlock {
    hash: Hash,
    height: BlockHeight,
    mined: Vec<ObservedTransaction>,
}

#[derive(Default)]
struct Inner {
    last_known_height: Option<BlockHeight>,
    observed: HashMap<TransactionId, ObservedTransaction>,
    registered: VecDeque<RegisteredBlock>,
}

/// Estimates fee rates from transactions observed entering the pool and later mined.
///
/// Registered blocks must be consecutive by main-chain height. A violation is reported as
/// [`FeeEstimatorError::NonConsecutiveBlock`] and leaves the estimator in a state which
/// should be discarded by the owner.
pub struct FeeEstimator {
    config: FeeEstimatorConfig,
    inner: Mutex<Inner>,
}

impl Default for FeeEstimator {
    fn default() -> Self {
        Self::new(FeeEstimatorConfig::default())
    }
}

impl FeeEstimator {
    pub fn new(config: FeeEstimatorConfig) -> Self {
        Self { config, inner: Mutex::new(Inner::default()) }
    }

    /// Records a transaction admitted into the pool so its fee rate can be accounted once mined
    pub fn observe_transaction(&self, descriptor: &TxDescriptor) -> FeeEstimatorResult<()> {
        let fee_rate = descriptor.fee_rate();
        if fee_rate == 0 {
            return Err(FeeEstimatorError::InvalidFeeRate(fee_rate));
        }
        let observed = ObservedTransaction { id: descriptor.id(), fee_rate };
        self.inner.lock().observed.entry(observed.id).or_insert(observed);
        Ok(())
    }

    /// Registers a block connected to the main chain. Observed transactions mined by the
    /// block move into its confirmation record.
    pub fn register_block(&self, block: &Block) -> FeeEstimatorResult<()> {
        let mut inner = self.inner.lock();
        let height = block.height();
        if let Some(last) = inner.last_known_height {
            if last.checked_add(1) != Some(height) {
                return Err(FeeEstimatorError::NonConsecutiveBlock(last, height));
            }
        }

        let mined = block.non_coinbase_transactions().iter().filter_map(|tx| inner.observed.remove(&tx.id())).collect();
        inner.registered.push_back(RegisteredBlock { hash: block.hash(), height, mined });
        while inner.registered.len() > self.config.max_confirmation_window {
            inner.registered.pop_front();
        }
        inner.last_known_height = Some(height);
        Ok(())
    }

    /// Unregisters `hash` and every block registered after it. Only the `max_rollback` most
    /// recent blocks can be rolled back. Their mined transactions return to the observed set.
    pub fn rollback(&self, hash: Hash) -> FeeEstimatorResult<()> {
        let mut inner = self.inner.lock();
        let depth = inner.registered.iter().rev().take(self.config.max_rollback).position(|block| block.hash == hash);
        let Some(depth) = depth else {
            return Err(FeeEstimatorError::RollbackUnavailable(hash, self.config.max_rollback));
        };

        for _ in 0..=depth {
            let Some(block) = inner.registered.pop_back() else { break };
            inner.last_known_height = block.height.checked_sub(1);
            for tx in block.mined {
                inner.observed.insert(tx.id, tx);
            }
        }
        Ok(())
    }

    /// Returns the median fee rate of the transactions mined within the last `num_blocks` registered blocks
    pub fn estimate_fee(&self, num_blocks: usize) -> FeeEstimatorResult<FeeRate> {
        let max_target = self.config.max_confirmation_window;
        if num_blocks == 0 || num_blocks > max_target {
            return Err(FeeEstimatorError::InvalidTarget(num_blocks, max_target));
        }

        let inner = self.inner.lock();
        if inner.registered.len() < self.config.min_registered_blocks {
            return Err(FeeEstimatorError::NotEnoughData(inner.registered.len(), self.config.min_registered_blocks));
        }

        let mut rates: Vec<FeeRate> =
            inner.registered.iter().rev().take(num_blocks).flat_map(|block| block.mined.iter().map(|tx| tx.fee_rate)).collect();
        if rates.is_empty() {
            return Err(FeeEstimatorError::NotEnoughData(0, 1));
        }
        rates.sort_unstable();
        Ok(rates[rates.len() / 2])
    }

    pub fn last_known_height(&self) -> Option<BlockHeight> {
        self.inner.lock().last_known_height
    }

    pub fn registered_block_count(&self) -> usize {
        self.inner.lock().registered.len()
    }

    pub fn observed_transaction_count(&self) -> usize {
        self.inner.lock().observed.len()
    }
}
