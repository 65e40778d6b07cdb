//! Notifications pushed by the chain store whenever its state changes.
//!
//! Every variant is delivered synchronously on the thread that caused the change.

use crate::{block::Block, flags::BehaviorFlags};
use quarry_hashes::Hash;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum ChainNotification {
    BlockAccepted(BlockAcceptedNotification),
    BlockConnected(BlockConnectedNotification),
    BlockDisconnected(BlockDisconnectedNotification),
    Reorganization(ReorganizationNotification),
}

impl ChainNotification {
    pub fn event_name(&self) -> &'static str {
        match self {
            ChainNotification::BlockAccepted(_) => "block-accepted",
            ChainNotification::BlockConnected(_) => "block-connected",
            ChainNotification::BlockDisconnected(_) => "block-disconnected",
            ChainNotification::Reorganization(_) => "reorganization",
        }
    }
}

/// A block was accepted into the DAG
#[derive(Debug, Clone)]
pub struct BlockAcceptedNotification {
    pub block: Arc<Block>,
    pub flags: BehaviorFlags,
}

/// A block was connected to the main chain
#[derive(Debug, Clone)]
pub struct BlockConnectedNotification {
    pub block: Arc<Block>,
    /// Whether the block should be registered with the fee estimator
    pub fee_estimator_eligible: bool,
}

/// A block was disconnected from the main chain
#[derive(Debug, Clone)]
pub struct BlockDisconnectedNotification {
    pub block: Arc<Block>,
}

/// The main chain switched to another branch
#[derive(Debug, Clone)]
pub struct ReorganizationNotification {
    pub old_blocks: Vec<Hash>,
    pub new_block: Hash,
    pub new_order: u64,
}
