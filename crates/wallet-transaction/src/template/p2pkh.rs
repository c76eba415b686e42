//! Pay-to-Public-Key-Hash (P2PKH) signing template.
//!
//! Creates standard P2PKH locking scripts and the `<sig> <pubkey>`
//! unlocking scripts that spend them.

use wallet_primitives::ec::PrivateKey;
use wallet_script::{Address, Script};

use crate::sighash::SIGHASH_ALL_FORKID;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Create a P2PKH locking script from an address.
///
/// Produces `OP_DUP OP_HASH160 <20-byte pubkey hash> OP_EQUALVERIFY
/// OP_CHECKSIG`.
pub fn lock(address: &Address) -> Script {
    Script::p2pkh_lock(address)
}

/// Create a P2PKH unlocker for signing transaction inputs.
///
/// `sighash_flag` defaults to `SIGHASH_ALL_FORKID` (0x41) when `None`.
pub fn unlock(private_key: PrivateKey, sighash_flag: Option<u32>) -> P2pkhUnlocker {
    P2pkhUnlocker {
        private_key,
        sighash_flag: sighash_flag.unwrap_or(SIGHASH_ALL_FORKID),
    }
}

/// P2PKH signing template holding a private key and sighash flag.
///
/// Implements `UnlockingScriptTemplate` to produce unlocking scripts of
/// the form `<DER_signature || sighash_byte> <pubkey>`, where the public
/// key serialization honors the key's compression flag.
pub struct P2pkhUnlocker {
    private_key: PrivateKey,
    sighash_flag: u32,
}

impl UnlockingScriptTemplate for P2pkhUnlocker {
    /// Sign the specified input and produce the unlocking script.
    ///
    /// Computes the BIP-143-style signature hash for the input, signs it
    /// with RFC6979 deterministic ECDSA, and builds the unlocking
    /// script. Any failure aborts without producing a partial script.
    fn sign(&self, tx: &Transaction, input_index: u32) -> Result<Script, TransactionError> {
        let idx = input_index as usize;

        if idx >= tx.inputs.len() {
            return Err(TransactionError::SigningError(format!(
                "input index {} out of range (tx has {} inputs)",
                idx,
                tx.inputs.len()
            )));
        }

        if tx.inputs[idx].source_tx_output().is_none() {
            return Err(TransactionError::SigningError(
                "missing source output on input (no previous tx info)".to_string(),
            ));
        }

        let sig_hash = tx.calc_input_signature_hash(idx, self.sighash_flag)?;
        let signature = self.private_key.sign(&sig_hash)?;

        // DER signature with the sighash flag byte appended.
        let der_sig = signature.to_der();
        let mut sig_buf = Vec::with_capacity(der_sig.len() + 1);
        sig_buf.extend_from_slice(&der_sig);
        sig_buf.push(self.sighash_flag as u8);

        let pub_key_bytes = self.private_key.pub_key_bytes();

        let mut script = Script::new();
        script.append_push_data(&sig_buf)?;
        script.append_push_data(&pub_key_bytes)?;

        Ok(script)
    }

    /// Estimate the byte length of a P2PKH unlocking script.
    ///
    /// 1 (push len) + ~72 (DER sig + sighash byte) + 1 (push len) +
    /// 33 (compressed pubkey) is approximately 106 bytes.
    fn estimate_length(&self, _tx: &Transaction, _input_index: u32) -> u32 {
        106
    }
}
