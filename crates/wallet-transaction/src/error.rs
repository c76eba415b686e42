/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The builder was given no UTXOs to spend.
    #[error("no inputs provided")]
    NoInputs,
    /// The builder was given no payments and no data to carry.
    #[error("no outputs provided")]
    NoOutputs,
    /// The transaction structure is invalid (e.g. an index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// An error occurred during input signing (e.g. missing source output).
    #[error("signing error: {0}")]
    SigningError(String),
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// An underlying script error (forwarded from `wallet-script`).
    #[error("script error: {0}")]
    Script(#[from] wallet_script::ScriptError),
    /// An underlying primitives error (forwarded from `wallet-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] wallet_primitives::PrimitivesError),
}
