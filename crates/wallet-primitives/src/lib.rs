//! Wallet SDK - hashing, encoding, and secp256k1 key primitives.
//!
//! Foundation crate for the wallet SDK:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Base58 and Base58Check encoding
//! - Bitcoin wire-format variable-length integer encoding
//! - Transaction/block hash type with byte-reversed display
//! - secp256k1 private/public keys, WIF serialization, ECDSA signatures

pub mod base58;
pub mod chainhash;
pub mod ec;
pub mod hash;
pub mod wire;

mod error;
mod network;

pub use error::PrimitivesError;
pub use network::Network;
