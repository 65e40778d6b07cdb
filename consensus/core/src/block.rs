use crate::{header::Header, tx::Transaction, BlockHeight};
use quarry_hashes::Hash;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Block {
    pub header: Arc<Header>,
    pub transactions: Arc<Vec<Transaction>>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header: Arc::new(header), transactions: Arc::new(transactions) }
    }

    pub fn from_header(header: Header) -> Self {
        Self { header: Arc::new(header), transactions: Arc::new(Vec::new()) }
    }

    pub fn is_header_only(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn hash(&self) -> Hash {
        self.header.hash
    }

    pub fn parents(&self) -> &[Hash] {
        &self.header.parents
    }

    pub fn height(&self) -> BlockHeight {
        self.header.height
    }

    /// Non-coinbase transactions, i.e., all but the first one
    pub fn non_coinbase_transactions(&self) -> &[Transaction] {
        self.transactions.get(1..).unwrap_or_default()
    }
}
