//! Script templates for signing transaction inputs.
//!
//! Provides the `UnlockingScriptTemplate` trait and a P2PKH
//! implementation for producing unlocking scripts during signing.

pub mod p2pkh;

use wallet_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

/// Trait for script templates that produce unlocking scripts.
///
/// A signing strategy implements this trait. The `sign` method receives
/// the full transaction and the input index, computes the appropriate
/// signature hash, signs it, and returns the unlocking script.
pub trait UnlockingScriptTemplate {
    /// Produce an unlocking script for the given input.
    fn sign(&self, tx: &Transaction, input_index: u32) -> Result<Script, TransactionError>;

    /// Estimate the byte length of the unlocking script, for size
    /// accounting before the actual signature exists.
    fn estimate_length(&self, tx: &Transaction, input_index: u32) -> u32;
}
