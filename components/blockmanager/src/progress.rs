use quarry_consensus_core::block::Block;
use quarry_core::info;
use std::time::{Duration, Instant};

pub const LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Aggregates processed blocks and periodically logs a summary line
pub struct BlockProgressLogger {
    progress_action: &'static str,
    received_blocks: u64,
    received_txs: u64,
    last_log_time: Instant,
}

impl BlockProgressLogger {
    pub fn new(progress_action: &'static str) -> Self {
        Self { progress_action, received_blocks: 0, received_txs: 0, last_log_time: Instant::now() }
    }

    /// Counts `block` and logs once at least [`LOG_INTERVAL`] passed since the previous line.
    /// Returns whether a line was logged.
    pub fn log_block_height(&mut self, block: &Block) -> bool {
        self.log_block_height_at(block, Instant::now())
    }

    pub(crate) fn log_block_height_at(&mut self, block: &Block, now: Instant) -> bool {
        self.received_blocks += 1;
        self.received_txs += block.transactions.len() as u64;

        let elapsed = now.saturating_duration_since(self.last_log_time);
        if elapsed < LOG_INTERVAL {
            return false;
        }

        // Truncated to 10ms for readability
        let elapsed = Duration::from_millis(elapsed.as_millis() as u64 / 10 * 10);
        info!(
            "{} {} {} in the last {:.2?} ({} {}, height {}, timestamp {})",
            self.progress_action,
            self.received_blocks,
            plural(self.received_blocks, "block", "blocks"),
            elapsed,
            self.received_txs,
            plural(self.received_txs, "transaction", "transactions"),
            block.height(),
            block.header.timestamp,
        );

        self.received_blocks = 0;
        self.received_txs = 0;
        self.last_log_time = now;
        true
    }

    pub fn pending(&self) -> (u64, u64) {
        (self.received_blocks, self.received_txs)
    }
}

fn plural(count: u64, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
