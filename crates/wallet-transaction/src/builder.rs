//! One-shot transaction builder.
//!
//! Assembles and signs a complete payment transaction from UTXOs,
//! payment destinations, and optional data carrier payloads, using a
//! single private key for every input. Fee accounting is the caller's
//! responsibility: the implied fee is the input total minus the output
//! total.

use wallet_primitives::ec::PrivateKey;
use wallet_script::{Address, Script};

use crate::sighash::SIGHASH_ALL_FORKID;
use crate::template::p2pkh;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::TransactionError;

/// An unspent transaction output to be consumed as an input.
#[derive(Clone, Debug)]
pub struct Utxo {
    /// Hex txid of the transaction holding the output (display order).
    pub tx_id: String,
    /// Index of the output within that transaction.
    pub vout: u32,
    /// Hex locking script of the output.
    pub script_pub_key: String,
    /// Value of the output in satoshis.
    pub satoshis: u64,
}

/// A payment destination: an address and an amount.
#[derive(Clone, Debug)]
pub struct PayToAddress {
    /// Base58Check destination address.
    pub address: String,
    /// Amount to lock to the address, in satoshis.
    pub satoshis: u64,
}

/// Payload parts for one OP_RETURN data output.
///
/// Each part is pushed individually; the whole set lands in a single
/// zero-value output.
#[derive(Clone, Debug)]
pub struct OpReturnData(pub Vec<Vec<u8>>);

/// Build and sign a transaction spending the given UTXOs.
///
/// Outputs are ordered payments first, data outputs last. Every input
/// is signed with the supplied key using `SIGHASH_ALL_FORKID`; any
/// failure while decoding an address or signing aborts the whole build
/// and no partial transaction is returned.
///
/// # Errors
/// * `NoInputs` when `utxos` is empty.
/// * `NoOutputs` when there is nothing to pay and no data to carry.
/// * Address decode and signing errors propagate unchanged.
pub fn create_tx(
    utxos: &[Utxo],
    pay_to: &[PayToAddress],
    op_returns: &[OpReturnData],
    private_key: &PrivateKey,
) -> Result<Transaction, TransactionError> {
    if utxos.is_empty() {
        return Err(TransactionError::NoInputs);
    }
    if pay_to.is_empty() && op_returns.is_empty() {
        return Err(TransactionError::NoOutputs);
    }

    let mut tx = Transaction::new();

    for utxo in utxos {
        tx.add_input_from(&utxo.tx_id, utxo.vout, &utxo.script_pub_key, utxo.satoshis)?;
    }

    for payment in pay_to {
        let address = Address::from_string(&payment.address)?;
        tx.add_output(crate::output::TransactionOutput {
            satoshis: payment.satoshis,
            locking_script: p2pkh::lock(&address),
        });
    }

    // Data carrier outputs go last, at zero value.
    for data in op_returns {
        let parts: Vec<&[u8]> = data.0.iter().map(|p| p.as_slice()).collect();
        tx.add_output(crate::output::TransactionOutput {
            satoshis: 0,
            locking_script: Script::op_return(&parts)?,
        });
    }

    sign_all_inputs(&mut tx, private_key)?;
    Ok(tx)
}

/// Build and sign a transaction using a WIF-encoded private key.
///
/// Decodes the WIF first; decode errors propagate before any
/// transaction state exists.
pub fn create_tx_with_wif(
    utxos: &[Utxo],
    pay_to: &[PayToAddress],
    op_returns: &[OpReturnData],
    wif: &str,
) -> Result<Transaction, TransactionError> {
    let private_key = PrivateKey::from_wif(wif)?;
    create_tx(utxos, pay_to, op_returns, &private_key)
}

/// Sign every input of the transaction with the one key.
fn sign_all_inputs(
    tx: &mut Transaction,
    private_key: &PrivateKey,
) -> Result<(), TransactionError> {
    let unlocker = p2pkh::unlock(private_key.clone(), Some(SIGHASH_ALL_FORKID));

    let mut scripts = Vec::with_capacity(tx.inputs.len());
    for idx in 0..tx.inputs.len() {
        scripts.push(unlocker.sign(tx, idx as u32)?);
    }
    for (input, script) in tx.inputs.iter_mut().zip(scripts) {
        input.unlocking_script = Some(script);
    }
    Ok(())
}
