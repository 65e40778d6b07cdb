use crate::BlockHeight;
use quarry_hashes::{BlockHash, Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Cached hash
    pub hash: Hash,
    pub version: u16,
    pub parents: Vec<Hash>,
    pub timestamp: u64,
    /// The main-chain height this block claims
    pub height: BlockHeight,
    pub nonce: u64,
}

impl Header {
    pub fn new(version: u16, parents: Vec<Hash>, timestamp: u64, height: BlockHeight, nonce: u64) -> Self {
        let mut header = Self { hash: Default::default(), version, parents, timestamp, height, nonce };
        header.finalize();
        header
    }

    /// Recomputes the cached hash. Must be called after any field is mutated.
    pub fn finalize(&mut self) {
        let mut hasher = BlockHash::new();
        hasher.update(self.version.to_le_bytes()).update((self.parents.len() as u64).to_le_bytes());
        for parent in self.parents.iter() {
            hasher.update(parent);
        }
        hasher.update(self.timestamp.to_le_bytes()).update(self.height.to_le_bytes()).update(self.nonce.to_le_bytes());
        self.hash = hasher.finalize();
    }
}
