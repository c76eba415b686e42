/// Error types for message operations.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The signature string is not valid base64.
    #[error("invalid signature encoding: {0}")]
    SignatureEncoding(String),
    /// Public key recovery from the compact signature failed.
    #[error("recovery failed: {0}")]
    Recovery(String),
    /// The recovered key does not hash to the claimed address.
    #[error("address: {expected} not found vs {actual}")]
    AddressMismatch {
        /// The address the caller claimed signed the message.
        expected: String,
        /// The address actually derived from the recovered key.
        actual: String,
    },
    /// A hex-encoded input could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    /// An underlying primitives error (malformed signatures and keys).
    #[error("{0}")]
    Primitives(#[from] wallet_primitives::PrimitivesError),
}
