//! Hex-encoded strict-DER signature verification.
//!
//! Verifies an ECDSA signature over a 32-byte digest against an
//! explicit public key, both supplied as hex strings. Parse failures
//! are hard errors; a well-formed signature that simply does not match
//! returns `Ok(false)`.

use wallet_primitives::ec::{PublicKey, Signature};

use crate::MessageError;

/// Verify a hex-encoded strict-DER signature over a digest.
///
/// # Errors
/// * `InvalidHex` when either hex string fails to decode;
/// * `Primitives` when the signature is not strict DER (wrong tags,
///   non-minimal integers, trailing data) or the public key is not a
///   valid curve point.
///
/// A structurally valid signature from the wrong key returns
/// `Ok(false)`, never an error.
pub fn verify_message_der(
    digest: &[u8; 32],
    pub_key_hex: &str,
    signature_hex: &str,
) -> Result<bool, MessageError> {
    let sig_bytes =
        hex::decode(signature_hex).map_err(|e| MessageError::InvalidHex(e.to_string()))?;
    let pub_key_bytes =
        hex::decode(pub_key_hex).map_err(|e| MessageError::InvalidHex(e.to_string()))?;

    let signature = Signature::from_der(&sig_bytes)?;
    let pub_key = PublicKey::from_bytes(&pub_key_bytes)?;

    Ok(signature.verify(digest, &pub_key))
}
