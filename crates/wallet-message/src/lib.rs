#![deny(missing_docs)]

//! Bitcoin Signed Message signing and verification.
//!
//! Provides the compact-signature message scheme (sign with a private
//! key, verify against a claimed address) and hex-encoded strict-DER
//! signature verification against an explicit public key.

mod error;
pub mod der;
pub mod signed;

pub use der::verify_message_der;
pub use error::MessageError;
pub use signed::{sign_message, verify_message};
