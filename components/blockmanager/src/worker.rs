use crate::{
    errors::BlockManagerError,
    header_state::HeaderState,
    interfaces::DynPeerService,
    messages::{BlockManagerMessage, ProcessBlockResponse, ProcessTransactionResponse},
};
use crossbeam_channel::{select, Receiver, TryRecvError};
use quarry_consensus_core::{api::DynChainStore, block::Block, flags::BehaviorFlags, tx::Transaction};
use quarry_core::{debug, error, panic::catch_panic, time::Stopwatch, trace};
use quarry_mining::{DynTxManager, TxAdmissionOptions};
use std::{sync::Arc, time::Duration};

/// Block processing taking longer than this is reported
const SLOW_BLOCK_THRESHOLD: Duration = Duration::from_secs(1);

/// The single owner of all chain-mutating calls. Serves requests one at a time in arrival order.
pub(crate) struct Worker {
    chain: DynChainStore,
    tx_manager: DynTxManager,
    peer: DynPeerService,
    receiver: Receiver<BlockManagerMessage>,
    quit: Receiver<()>,
    header_state: HeaderState,
}

impl Worker {
    pub(crate) fn new(
        chain: DynChainStore,
        tx_manager: DynTxManager,
        peer: DynPeerService,
        receiver: Receiver<BlockManagerMessage>,
        quit: Receiver<()>,
        header_state: HeaderState,
    ) -> Self {
        Self { chain, tx_manager, peer, receiver, quit, header_state }
    }

    #[cfg(test)]
    pub(crate) fn header_state(&self) -> &HeaderState {
        &self.header_state
    }

    /// Runs until the quit channel fires or is closed
    pub(crate) fn run(self) {
        if let Some(checkpoint) = self.header_state.next_checkpoint() {
            debug!("Block handler started, next checkpoint at layer {} ({})", checkpoint.layer, checkpoint.hash);
        }
        loop {
            // Shutdown takes precedence over pending requests
            if !matches!(self.quit.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }
            select! {
                recv(self.receiver) -> msg => match msg {
                    Ok(msg) => self.handle(msg),
                    Err(_) => break,
                },
                recv(self.quit) -> _ => break,
            }
        }
        trace!("Block manager quit received, exiting the block handler");

        // Releasing pending envelopes makes their callers observe a dropped reply instead of waiting forever
        let dropped = self.receiver.try_iter().count();
        if dropped > 0 {
            debug!("Block manager dropped {} pending request(s) on shutdown", dropped);
        }
        trace!("Block handler done");
    }

    fn handle(&self, msg: BlockManagerMessage) {
        trace!("Block manager received a {} request", msg.kind());
        match msg {
            BlockManagerMessage::ProcessBlock { block, flags, reply } => {
                let _ = reply.send(self.process_block(block, flags));
            }
            BlockManagerMessage::ProcessTransaction { tx, options, reply } => {
                let _ = reply.send(self.process_transaction(tx, options));
            }
            BlockManagerMessage::IsCurrent { reply } => {
                let is_current = catch_panic(|| self.peer.is_current()).unwrap_or_else(|msg| {
                    error!("peer service panicked while answering is-current: {}", msg);
                    false
                });
                let _ = reply.send(is_current);
            }
        }
    }

    fn process_block(&self, block: Arc<Block>, flags: BehaviorFlags) -> ProcessBlockResponse {
        let _sw = Stopwatch::new("process block", SLOW_BLOCK_THRESHOLD).with_subject(block.hash());
        let outcome = catch_panic(|| {
            if flags.contains(BehaviorFlags::RPC_ADD) {
                if let Err(err) = self.chain.check_sub_main_chain_tip(block.parents()) {
                    return ProcessBlockResponse::rejected(BlockManagerError::TipsExpired(block.hash(), err));
                }
            }

            match self.chain.process_block(block.clone(), flags) {
                Ok(status) => {
                    if !status.is_orphan() {
                        self.tx_manager.prune_expired_transactions();
                    }
                    ProcessBlockResponse::accepted(status)
                }
                Err(err) => ProcessBlockResponse::rejected(err.into()),
            }
        });
        outcome.unwrap_or_else(|msg| {
            error!("chain store panicked while processing block {}: {}", block.hash(), msg);
            ProcessBlockResponse::rejected(BlockManagerError::ValidatorPanic("chain store", msg))
        })
    }

    fn process_transaction(&self, tx: Arc<Transaction>, options: TxAdmissionOptions) -> ProcessTransactionResponse {
        let id = tx.id();
        match catch_panic(|| self.tx_manager.process_transaction(tx, options)) {
            Ok(result) => result.map_err(BlockManagerError::from),
            Err(msg) => {
                error!("transaction manager panicked while processing transaction {}: {}", id, msg);
                Err(BlockManagerError::ValidatorPanic("transaction manager", msg))
            }
        }
    }
}
