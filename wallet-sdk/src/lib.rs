#![deny(missing_docs)]

//! Wallet identity and message authentication primitives.
//!
//! Re-exports all component crates for convenient single-crate usage:
//! key and address codecs, script builders, transaction building and
//! signing, and signed-message verification.

pub use wallet_message as message;
pub use wallet_primitives as primitives;
pub use wallet_script as script;
pub use wallet_transaction as transaction;
