use serde::{Deserialize, Serialize};

/// The outcome of a successful block acceptance by the chain store
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum BlockStatus {
    /// The block was connected to the DAG
    StatusAccepted,

    /// Some of the block parents are unknown, so it was kept aside in the orphan pool
    StatusOrphan,
}

impl BlockStatus {
    pub fn is_orphan(self) -> bool {
        self == Self::StatusOrphan
    }
}
