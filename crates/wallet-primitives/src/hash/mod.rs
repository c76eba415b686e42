//! Hash primitives used throughout the wallet.
//!
//! SHA-256, double SHA-256 (checksums, txids, signature digests) and
//! RIPEMD-160(SHA-256(...)) (address hashes).

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 of the input.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Double SHA-256 (SHA-256d) of the input.
///
/// The standard Bitcoin hash used for transaction IDs, Base58Check
/// checksums, and signature digests.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of the input.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

/// Hash160: RIPEMD-160(SHA-256(data)).
///
/// Used to derive an address hash from a serialized public key.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
