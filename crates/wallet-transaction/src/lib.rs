//! Transaction building, signing, and serialization.
//!
//! Provides the Transaction type with inputs and outputs, BIP-143-style
//! signature hash computation, the P2PKH signing template, and a
//! one-shot builder that assembles and signs a payment transaction
//! from UTXOs.

pub mod builder;
pub mod input;
pub mod output;
pub mod sighash;
pub mod template;
pub mod transaction;

mod error;
pub use builder::{create_tx, create_tx_with_wif, OpReturnData, PayToAddress, Utxo};
pub use error::TransactionError;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use transaction::Transaction;
