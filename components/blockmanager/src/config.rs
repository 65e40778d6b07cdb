use serde::Deserialize;

pub const DEFAULT_MAX_PEERS: usize = 50;

/// Block manager settings
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Expected peer concurrency. The request queue holds up to three requests per peer.
    pub max_peers: usize,
    pub disable_checkpoints: bool,
}

impl Config {
    pub fn new(max_peers: usize, disable_checkpoints: bool) -> Self {
        Self { max_peers, disable_checkpoints }
    }

    /// Capacity of the request queue. Producers block once it is full.
    pub fn queue_capacity(&self) -> usize {
        self.max_peers.saturating_mul(3).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { max_peers: DEFAULT_MAX_PEERS, disable_checkpoints: false }
    }
}
