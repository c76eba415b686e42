//! The opcode subset used by standard wallet output scripts.
//!
//! Only the opcodes that appear in P2PKH and data carrier templates are
//! defined; this crate builds scripts, it does not interpret them.

/// Push an empty value onto the stack.
pub const OP_FALSE: u8 = 0x00;
/// Push the next 20 bytes of data (a hash160).
pub const OP_DATA_20: u8 = 0x14;
/// Push the next 75 bytes of data (largest direct push).
pub const OP_DATA_75: u8 = 0x4b;
/// The next byte holds the push length (76..=255 bytes).
pub const OP_PUSHDATA1: u8 = 0x4c;
/// The next 2 LE bytes hold the push length (up to 65535 bytes).
pub const OP_PUSHDATA2: u8 = 0x4d;
/// The next 4 LE bytes hold the push length.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Mark the output as unspendable; the rest of the script is data.
pub const OP_RETURN: u8 = 0x6a;
/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Pop two items and fail unless they are equal.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Hash the top stack item with RIPEMD-160(SHA-256(x)).
pub const OP_HASH160: u8 = 0xa9;
/// Verify an ECDSA signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
