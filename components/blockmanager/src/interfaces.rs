//! Collaborators of the block manager, specified at their interface boundary.

use quarry_consensus_core::{block::Block, header::Header, notify::ReorganizationNotification, tx::Transaction};
use quarry_mining::TxDescriptor;
use std::sync::Arc;

/// The peer-to-peer layer as seen by the block manager
pub trait PeerService: Send + Sync {
    /// Whether the node believes it is synced with its peers
    fn is_current(&self) -> bool;

    /// Announces a block to the connected peers
    fn relay_inventory(&self, header: Arc<Header>);

    /// Announces a batch of transactions newly accepted to the mempool
    fn announce_new_transactions(&self, accepted: &[TxDescriptor]);
}

pub type DynPeerService = Arc<dyn PeerService>;

/// External subscribers of chain events
pub trait EventFeed: Send + Sync {
    fn block_accepted(&self, block: &Block);

    fn block_connected(&self, block: &Block);

    fn block_disconnected(&self, block: &Block);

    fn transaction_confirmed(&self, tx: &Transaction);

    fn on_reorganization(&self, _notification: &ReorganizationNotification) {}

    fn shutdown(&self);
}

pub type DynEventFeed = Arc<dyn EventFeed>;
