//! Bitcoin P2PKH address handling.
//!
//! Supports address generation from public keys or raw hash160 values,
//! address string validation, and mainnet/testnet discrimination.
//! Uses Base58Check encoding with SHA-256d checksums.

use std::fmt;

use wallet_primitives::ec::PublicKey;
use wallet_primitives::hash::{hash160, sha256d};
use wallet_primitives::Network;

use crate::ScriptError;

/// Decoded address length: version byte + 20-byte hash + 4-byte checksum.
const DECODED_LEN: usize = 25;

/// A Bitcoin P2PKH address.
///
/// Contains the 20-byte public key hash and the network it belongs to.
/// Can be serialized to/from the Base58Check string format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// Decodes the string, validates the checksum, and detects the
    /// network from the version byte (0x00 = mainnet, 0x6f = testnet).
    /// Empty, truncated, or otherwise mangled strings all fail here;
    /// nothing downstream ever sees a partially decoded address.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = bs58::decode(addr)
            .into_vec()
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != DECODED_LEN {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        // Last 4 bytes must equal sha256d of the first 21.
        let checksum = sha256d(&decoded[..21]);
        if decoded[21..25] != checksum[..4] {
            return Err(ScriptError::ChecksumFailed);
        }

        let network = Network::from_p2pkh_version(decoded[0])
            .ok_or_else(|| ScriptError::UnsupportedAddress(addr.to_string()))?;

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&decoded[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let mut payload = Vec::with_capacity(DECODED_LEN);
        payload.push(network.p2pkh_version());
        payload.extend_from_slice(hash);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);

        Address {
            address_string: bs58::encode(&payload).into_string(),
            public_key_hash: *hash,
            network,
        }
    }

    /// Create an address from a public key.
    ///
    /// The compression flag selects which serialization (33 or 65 bytes)
    /// is hashed; the two forms yield different addresses for the same
    /// key.
    pub fn from_public_key(pub_key: &PublicKey, compressed: bool, network: Network) -> Self {
        let h = hash160(&pub_key.serialize(compressed));
        Self::from_public_key_hash(&h, network)
    }

    /// Create an address from a hex-encoded SEC1 public key string.
    pub fn from_public_key_string(
        pub_key_hex: &str,
        network: Network,
    ) -> Result<Self, ScriptError> {
        let pub_key_bytes =
            hex::decode(pub_key_hex).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        let h = hash160(&pub_key_bytes);
        Ok(Self::from_public_key_hash(&h, network))
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}
