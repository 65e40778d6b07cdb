use crate::{network::NetworkType, BlockHeight};
use quarry_hashes::Hash;
use serde::{Deserialize, Serialize};

/// A known-good block at a fixed main-chain layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub layer: BlockHeight,
    pub hash: Hash,
}

impl Checkpoint {
    pub const fn new(layer: BlockHeight, hash: Hash) -> Self {
        Self { layer, hash }
    }
}

/// Network parameters. Read-only once the node is running.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UnsortedParams")]
pub struct Params {
    pub net: NetworkType,
    /// Checkpoints ordered by ascending layer
    checkpoints: Vec<Checkpoint>,
}

impl Params {
    pub fn new(net: NetworkType) -> Self {
        Self { net, checkpoints: Vec::new() }
    }

    /// Replaces the checkpoint list. The list is kept sorted by ascending layer.
    pub fn with_checkpoints(mut self, mut checkpoints: Vec<Checkpoint>) -> Self {
        checkpoints.sort_by_key(|checkpoint| checkpoint.layer);
        self.checkpoints = checkpoints;
        self
    }

    pub fn name(&self) -> &'static str {
        self.net.name()
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn final_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }
}

/// Deserialized form of [`Params`], checkpoints in any order
#[derive(Deserialize)]
struct UnsortedParams {
    net: NetworkType,
    #[serde(default)]
    checkpoints: Vec<Checkpoint>,
}

impl From<UnsortedParams> for Params {
    fn from(params: UnsortedParams) -> Self {
        Self::new(params.net).with_checkpoints(params.checkpoints)
    }
}

impl From<NetworkType> for Params {
    fn from(net: NetworkType) -> Self {
        Self::new(net)
    }
}
