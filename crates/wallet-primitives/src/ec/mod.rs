//! Elliptic curve cryptography on secp256k1.
//!
//! Private keys (with WIF serialization), public keys, and ECDSA
//! signatures including strict DER parsing and compact recovery.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
