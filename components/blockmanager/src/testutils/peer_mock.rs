use crate::interfaces::PeerService;
use parking_lot::Mutex;
use quarry_consensus_core::{header::Header, tx::TransactionId};
use quarry_hashes::Hash;
use quarry_mining::TxDescriptor;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Default)]
pub(crate) struct PeerServiceMock {
    is_current: AtomicBool,
    relayed: Mutex<Vec<Hash>>,
    announced: Mutex<Vec<Vec<TransactionId>>>,
}

impl PeerServiceMock {
    pub(crate) fn new(is_current: bool) -> Self {
        Self { is_current: AtomicBool::new(is_current), ..Default::default() }
    }

    pub(crate) fn set_current(&self, is_current: bool) {
        self.is_current.store(is_current, Ordering::SeqCst);
    }

    pub(crate) fn relayed(&self) -> Vec<Hash> {
        self.relayed.lock().clone()
    }

    pub(crate) fn announced(&self) -> Vec<Vec<TransactionId>> {
        self.announced.lock().clone()
    }
}

impl PeerService for PeerServiceMock {
    fn is_current(&self) -> bool {
        self.is_current.load(Ordering::SeqCst)
    }

    fn relay_inventory(&self, header: Arc<Header>) {
        self.relayed.lock().push(header.hash);
    }

    fn announce_new_transactions(&self, accepted: &[TxDescriptor]) {
        self.announced.lock().push(accepted.iter().map(|descriptor| descriptor.id()).collect());
    }
}
