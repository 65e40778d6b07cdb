pub mod tx_descriptor;
