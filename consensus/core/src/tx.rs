use quarry_hashes::{Hash, Hasher};
use std::fmt::{Display, Formatter};

/// Represents the ID of a transaction
pub type TransactionId = Hash;

/// Represents a transaction outpoint
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, PartialOrd, Ord)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}

/// Represents a transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Vec<u8>,
    pub sequence: u64,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Vec<u8>, sequence: u64) -> Self {
        Self { previous_outpoint, signature_script, sequence }
    }
}

/// Represents a transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: Vec<u8>,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: Vec<u8>) -> Self {
        Self { value, script_public_key }
    }
}

/// Represents a transaction. A transaction without inputs is a coinbase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: u16,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u64,

    // A field that is used to cache the transaction ID.
    // Always use the corresponding self.id() instead of accessing this field directly
    id: TransactionId,
}

impl Transaction {
    pub fn new(version: u16, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u64) -> Self {
        let mut tx = Self { version, inputs, outputs, lock_time, id: Default::default() };
        tx.finalize();
        tx
    }

    /// Recompute and finalize the tx id based on updated tx fields
    pub fn finalize(&mut self) {
        let mut hasher = quarry_hashes::TransactionId::new();
        hasher.update(self.version.to_le_bytes()).update((self.inputs.len() as u64).to_le_bytes());
        for input in self.inputs.iter() {
            hasher
                .update(input.previous_outpoint.transaction_id)
                .update(input.previous_outpoint.index.to_le_bytes())
                .update((input.signature_script.len() as u64).to_le_bytes())
                .update(&input.signature_script)
                .update(input.sequence.to_le_bytes());
        }
        hasher.update((self.outputs.len() as u64).to_le_bytes());
        for output in self.outputs.iter() {
            hasher
                .update(output.value.to_le_bytes())
                .update((output.script_public_key.len() as u64).to_le_bytes())
                .update(&output.script_public_key);
        }
        hasher.update(self.lock_time.to_le_bytes());
        self.id = hasher.finalize();
    }

    #[inline(always)]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn outpoints(&self) -> impl Iterator<Item = TransactionOutpoint> + '_ {
        self.inputs.iter().map(|input| input.previous_outpoint)
    }

    pub fn total_output_value(&self) -> u64 {
        self.outputs.iter().map(|output| output.value).sum()
    }
}
