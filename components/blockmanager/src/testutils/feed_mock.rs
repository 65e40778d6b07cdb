use crate::interfaces::EventFeed;
use parking_lot::Mutex;
use quarry_consensus_core::{
    block::Block,
    notify::ReorganizationNotification,
    tx::{Transaction, TransactionId},
};
use quarry_hashes::Hash;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FeedEvent {
    Accepted(Hash),
    Connected(Hash),
    Disconnected(Hash),
    Confirmed(TransactionId),
    Reorganization(Hash),
    Shutdown,
}

#[derive(Default)]
pub(crate) struct EventFeedMock {
    events: Mutex<Vec<FeedEvent>>,
}

impl EventFeedMock {
    pub(crate) fn events(&self) -> Vec<FeedEvent> {
        self.events.lock().clone()
    }

    pub(crate) fn confirmed(&self) -> Vec<TransactionId> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                FeedEvent::Confirmed(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl EventFeed for EventFeedMock {
    fn block_accepted(&self, block: &Block) {
        self.events.lock().push(FeedEvent::Accepted(block.hash()));
    }

    fn block_connected(&self, block: &Block) {
        self.events.lock().push(FeedEvent::Connected(block.hash()));
    }

    fn block_disconnected(&self, block: &Block) {
        self.events.lock().push(FeedEvent::Disconnected(block.hash()));
    }

    fn transaction_confirmed(&self, tx: &Transaction) {
        self.events.lock().push(FeedEvent::Confirmed(tx.id()));
    }

    fn on_reorganization(&self, notification: &ReorganizationNotification) {
        self.events.lock().push(FeedEvent::Reorganization(notification.new_block));
    }

    fn shutdown(&self) {
        self.events.lock().push(FeedEvent::Shutdown);
    }
}
