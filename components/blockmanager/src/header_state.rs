//! Checkpoint bookkeeping for headers-first synchronization.

use quarry_consensus_core::{
    api::BestTipSnapshot,
    config::params::{Checkpoint, Params},
    BlockHeight,
};
use quarry_core::info;
use quarry_hashes::Hash;
use std::collections::VecDeque;

/// A header linked into the chain of headers between checkpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderNode {
    pub height: BlockHeight,
    pub hash: Hash,
}

/// Returns the checkpoint following `layer`, i.e. the one with the lowest layer strictly
/// above it. Returns `None` if checkpoints are disabled, if there are none for the network,
/// or if `layer` is at or past the final checkpoint.
pub fn find_next_header_checkpoint(params: &Params, disable_checkpoints: bool, layer: BlockHeight) -> Option<Checkpoint> {
    if disable_checkpoints {
        return None;
    }
    let checkpoints = params.checkpoints();
    let final_checkpoint = checkpoints.last()?;
    if layer >= final_checkpoint.layer {
        return None;
    }

    let mut next = final_checkpoint;
    for checkpoint in checkpoints.iter().rev().skip(1) {
        if layer >= checkpoint.layer {
            break;
        }
        next = checkpoint;
    }
    Some(*next)
}

/// Headers-first state. Owned by the block manager worker.
#[derive(Clone, Debug, Default)]
pub struct HeaderState {
    headers_first_mode: bool,
    header_list: VecDeque<HeaderNode>,
    next_checkpoint: Option<Checkpoint>,
}

impl HeaderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial state for the current best tip
    pub fn from_best_tip(params: &Params, disable_checkpoints: bool, best: BestTipSnapshot) -> Self {
        let mut state = Self::new();
        if disable_checkpoints {
            info!("Checkpoints are disabled");
            return state;
        }
        state.next_checkpoint = find_next_header_checkpoint(params, disable_checkpoints, best.main_height);
        if state.next_checkpoint.is_some() {
            state.reset(best.hash, best.main_height);
        }
        state
    }

    /// Leaves headers-first mode. When a checkpoint is still ahead, the header list is seeded
    /// with the newest known block so the next received header can be linked against it.
    pub fn reset(&mut self, newest_hash: Hash, newest_height: BlockHeight) {
        self.headers_first_mode = false;
        self.header_list.clear();

        if self.next_checkpoint.is_some() {
            self.header_list.push_back(HeaderNode { height: newest_height, hash: newest_hash });
        }
    }

    pub fn headers_first_mode(&self) -> bool {
        self.headers_first_mode
    }

    pub fn header_list(&self) -> &VecDeque<HeaderNode> {
        &self.header_list
    }

    pub fn next_checkpoint(&self) -> Option<&Checkpoint> {
        self.next_checkpoint.as_ref()
    }
}
