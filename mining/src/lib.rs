pub mod errors;
pub mod feerate;
pub mod manager;
pub mod model;

pub use manager::{DynTxManager, TxAdmissionOptions, TxManager};
pub use model::tx_descriptor::TxDescriptor;
