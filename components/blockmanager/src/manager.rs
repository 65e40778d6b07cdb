use crate::{
    config::Config,
    errors::{BlockManagerError, BlockManagerResult},
    header_state::HeaderState,
    interfaces::{DynEventFeed, DynPeerService},
    messages::{BlockManagerMessage, ProcessBlockResponse},
    reactor::NotificationReactor,
    worker::Worker,
};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use parking_lot::Mutex;
use quarry_consensus_core::{
    api::DynChainStore, block::Block, config::params::Params, flags::BehaviorFlags, tx::Transaction,
};
use quarry_core::{
    error, info,
    panic::catch_panic,
    service::{Service, ServiceError, ServiceResult, ServiceState},
    trace,
};
use quarry_mining::{DynTxManager, TxAdmissionOptions, TxDescriptor};
use quarry_utils::triggers::SingleTrigger;
use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

pub const SERVICE_IDENT: &str = "block-manager";

/// Funnels block processing, transaction admission and sync-status queries through a single
/// worker thread, the only one allowed to call into the chain store for mutations.
///
/// Every call blocks its caller, never the worker, until the reply arrives. Requests are served
/// in arrival order. The request queue is bounded, so a flood of producers blocks instead of
/// dropping requests.
pub struct BlockManager {
    params: Params,
    event_feed: DynEventFeed,
    reactor: Arc<NotificationReactor>,

    sender: Sender<BlockManagerMessage>,
    /// Dropped on stop, which closes the quit channel
    quit: Mutex<Option<Sender<()>>>,
    /// Handed over to the worker thread on start
    worker: Mutex<Option<Worker>>,
    handle: Mutex<Option<JoinHandle<()>>>,

    state: ServiceState,
    stopped: SingleTrigger,
}

impl BlockManager {
    /// Builds the block manager and subscribes its notification reactor to `chain`.
    /// Call [`Service::start`] to begin serving requests.
    pub fn new(
        config: Config,
        params: Params,
        chain: DynChainStore,
        tx_manager: DynTxManager,
        peer: DynPeerService,
        event_feed: DynEventFeed,
    ) -> Self {
        let best = chain.best_tip_snapshot();
        chain.disable_checkpoints(config.disable_checkpoints);
        let header_state = HeaderState::from_best_tip(&params, config.disable_checkpoints, best);

        let reactor = Arc::new(NotificationReactor::new(tx_manager.clone(), peer.clone(), event_feed.clone()));
        chain.subscribe(reactor.callback());

        let (sender, receiver) = bounded(config.queue_capacity());
        let (quit_sender, quit_receiver) = bounded(1);
        let worker = Worker::new(chain, tx_manager, peer, receiver, quit_receiver, header_state);

        Self {
            params,
            event_feed,
            reactor,
            sender,
            quit: Mutex::new(Some(quit_sender)),
            worker: Mutex::new(Some(worker)),
            handle: Mutex::new(None),
            state: ServiceState::new(),
            stopped: SingleTrigger::new(),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Unix time in milliseconds at which a block was last received from a peer, 0 if never
    pub fn last_progress_time(&self) -> u64 {
        self.reactor.last_progress_time()
    }

    /// Submits `block` to the chain store and waits for the outcome.
    ///
    /// Blocks flagged [`BehaviorFlags::RPC_ADD`] are first checked to still extend a valid sub
    /// main chain tip. A failed check is reported with `is_tips_expired` set.
    pub fn process_block(&self, block: Arc<Block>, flags: BehaviorFlags) -> ProcessBlockResponse {
        let (reply, response) = bounded(1);
        let msg = BlockManagerMessage::ProcessBlock { block, flags, reply };
        match self.submit(msg).and_then(|kind| Self::await_reply(kind, &response)) {
            Ok(response) => response,
            Err(err) => ProcessBlockResponse::rejected(err),
        }
    }

    /// Like [`Self::process_block`] but gives up after `timeout`. A timeout means the outcome is
    /// unknown: the request may still be served later. A timeout too large to be represented
    /// as a deadline waits indefinitely.
    pub fn process_block_with_timeout(&self, block: Arc<Block>, flags: BehaviorFlags, timeout: Duration) -> ProcessBlockResponse {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.process_block(block, flags);
        };
        let (reply, response) = bounded(1);
        let msg = BlockManagerMessage::ProcessBlock { block, flags, reply };
        let kind = msg.kind();

        if let Err(err) = self.sender.send_timeout(msg, timeout) {
            let err = match err {
                SendTimeoutError::Timeout(_) => BlockManagerError::Timeout(timeout),
                SendTimeoutError::Disconnected(_) => BlockManagerError::ReplyDropped(kind),
            };
            return ProcessBlockResponse::rejected(err);
        }
        match response.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(response) => response,
            Err(RecvTimeoutError::Timeout) => ProcessBlockResponse::rejected(BlockManagerError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => ProcessBlockResponse::rejected(BlockManagerError::ReplyDropped(kind)),
        }
    }

    /// Submits `tx` to the transaction manager. Returns the descriptors of the transactions
    /// accepted as a result, which is empty if `tx` was kept as an orphan.
    pub fn process_transaction(&self, tx: Arc<Transaction>, options: TxAdmissionOptions) -> BlockManagerResult<Vec<TxDescriptor>> {
        let (reply, response) = bounded(1);
        let kind = self.submit(BlockManagerMessage::ProcessTransaction { tx, options, reply })?;
        Self::await_reply(kind, &response)?
    }

    /// Whether the node believes it is synced with its peers, answered in order with the other requests
    pub fn is_current(&self) -> bool {
        let (reply, response) = bounded(1);
        match self.submit(BlockManagerMessage::IsCurrent { reply }).and_then(|kind| Self::await_reply(kind, &response)) {
            Ok(is_current) => is_current,
            Err(err) => {
                trace!("is-current request failed: {}", err);
                false
            }
        }
    }

    fn submit(&self, msg: BlockManagerMessage) -> BlockManagerResult<&'static str> {
        let kind = msg.kind();
        self.sender.send(msg).map_err(|_| BlockManagerError::ReplyDropped(kind))?;
        Ok(kind)
    }

    #[cfg(test)]
    fn queued(&self) -> usize {
        self.sender.len()
    }

    fn await_reply<T>(kind: &'static str, response: &Receiver<T>) -> BlockManagerResult<T> {
        response.recv().map_err(|_| BlockManagerError::ReplyDropped(kind))
    }
}

impl BlockManager {
    fn worker_spawned(&self, spawned: io::Result<JoinHandle<()>>) -> ServiceResult<()> {
        match spawned {
            Ok(handle) => {
                *self.handle.lock() = Some(handle);
                info!("Block manager started");
                Ok(())
            }
            Err(err) => {
                // The worker never ran, so nothing else will fire the stopped signal
                error!("Failed to spawn the block manager worker: {}", err);
                self.stopped.trigger.trigger();
                Err(ServiceError::Failed(SERVICE_IDENT, err.to_string()))
            }
        }
    }
}

impl Service for BlockManager {
    fn ident(&self) -> &'static str {
        SERVICE_IDENT
    }

    fn start(&self) -> ServiceResult<()> {
        self.state.begin_start(SERVICE_IDENT)?;
        let worker = self.worker.lock().take().ok_or(ServiceError::AlreadyStarted(SERVICE_IDENT))?;

        trace!("Starting block manager");
        let stopped = self.stopped.trigger.clone();
        let spawned = thread::Builder::new().name(SERVICE_IDENT.to_string()).spawn(move || {
            if let Err(msg) = catch_panic(|| worker.run()) {
                error!("Block manager worker panicked: {}", msg);
            }
            stopped.trigger();
        });
        self.worker_spawned(spawned)
    }

    fn stop(&self) -> ServiceResult<()> {
        self.state.begin_stop(SERVICE_IDENT)?;
        info!("Block manager shutting down");
        drop(self.quit.lock().take());
        self.event_feed.shutdown();
        self.wait_for_stop();
        Ok(())
    }

    fn wait_for_stop(&self) {
        if !self.state.is_started() {
            return;
        }
        trace!("Waiting for the block manager to stop...");
        self.stopped.wait();
        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
        info!("Block manager stopped");
    }
}

/// Async proxy for the block manager. Each call runs on the blocking thread pool of the
/// current tokio runtime.
#[derive(Clone)]
pub struct BlockManagerProxy {
    inner: Arc<BlockManager>,
}

impl BlockManagerProxy {
    pub fn new(inner: Arc<BlockManager>) -> Self {
        Self { inner }
    }

    pub async fn process_block(self, block: Arc<Block>, flags: BehaviorFlags) -> ProcessBlockResponse {
        tokio::task::spawn_blocking(move || self.inner.process_block(block, flags))
            .await
            .unwrap_or_else(|_| ProcessBlockResponse::rejected(BlockManagerError::ReplyDropped("process-block")))
    }

    pub async fn process_transaction(self, tx: Arc<Transaction>, options: TxAdmissionOptions) -> BlockManagerResult<Vec<TxDescriptor>> {
        tokio::task::spawn_blocking(move || self.inner.process_transaction(tx, options))
            .await
            .unwrap_or(Err(BlockManagerError::ReplyDropped("process-transaction")))
    }

    pub async fn is_current(self) -> bool {
        tokio::task::spawn_blocking(move || self.inner.is_current()).await.unwrap_or(false)
    }
}
