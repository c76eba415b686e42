//! Bitcoin script construction and address handling.
//!
//! Provides the Script type, the opcode subset used by standard wallet
//! outputs, P2PKH address generation and validation, and the locking
//! script builders for payments and data carrier outputs.

pub mod address;
pub mod opcodes;
pub mod script;

mod error;
pub use address::Address;
pub use error::ScriptError;
pub use script::{script_from_address, Script};
pub use wallet_primitives::Network;
