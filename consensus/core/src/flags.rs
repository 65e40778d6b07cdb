use bitflags::bitflags;

bitflags! {
    /// Flags altering how the chain store processes a block
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BehaviorFlags: u32 {
        /// Skip checks already known to pass, e.g. blocks before the final checkpoint
        const FAST_ADD = 1 << 0;
        /// Skip the proof of work check
        const NO_POW_CHECK = 1 << 1;
        /// Validate without mutating the chain state
        const DRY_RUN = 1 << 2;
        /// The block arrived through peer propagation
        const P2P_ADD = 1 << 3;
        /// The block was submitted locally through RPC
        const RPC_ADD = 1 << 4;
    }
}

impl BehaviorFlags {
    pub const NONE: Self = Self::empty();
}
