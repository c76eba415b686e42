//! Bitcoin Signed Message creation and verification.
//!
//! A message is framed with the `"Bitcoin Signed Message:\n"` magic,
//! double-SHA256 hashed, and signed with a 65-byte compact recoverable
//! signature carried as base64. Verification recovers the public key
//! from the signature alone and only then compares the derived address
//! with the claimed one; the claimed address never feeds into recovery.

use base64::Engine;

use wallet_primitives::ec::{PrivateKey, Signature};
use wallet_primitives::hash::sha256d;
use wallet_primitives::wire::WireWriter;
use wallet_primitives::Network;
use wallet_script::Address;

use crate::MessageError;

/// Magic prefix framing every signed message.
const MESSAGE_MAGIC: &str = "Bitcoin Signed Message:\n";

/// Compute the digest a signed message commits to.
///
/// Canonical buffer: var_bytes(magic) followed by var_bytes(message),
/// double-SHA256 hashed.
fn message_digest(message: &str) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(MESSAGE_MAGIC.len() + message.len() + 2);
    writer.write_var_bytes(MESSAGE_MAGIC.as_bytes());
    writer.write_var_bytes(message.as_bytes());
    sha256d(writer.as_bytes())
}

/// Sign a message, producing the base64 compact signature that
/// `verify_message` accepts.
///
/// The signature header byte carries the key's compression flag, so
/// verification derives the same address the key would.
pub fn sign_message(message: &str, private_key: &PrivateKey) -> Result<String, MessageError> {
    let digest = message_digest(message);
    let compact = private_key.sign_compact(&digest)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(compact))
}

/// Verify a signed message against a claimed address.
///
/// Steps:
/// 1. base64-decode the signature (`SignatureEncoding` on failure);
/// 2. recover the signer's public key from the compact signature and
///    the message digest (`Recovery` on failure);
/// 3. serialize the recovered key per the compression flag the
///    signature header carries, hash160, and encode the address for
///    the given network;
/// 4. compare with the claimed address (`AddressMismatch` on failure).
pub fn verify_message(
    address: &str,
    signature_b64: &str,
    message: &str,
    network: Network,
) -> Result<(), MessageError> {
    let compact = base64::engine::general_purpose::STANDARD
        .decode(signature_b64)
        .map_err(|e| MessageError::SignatureEncoding(e.to_string()))?;

    let digest = message_digest(message);

    let (recovered, compressed) = Signature::recover_compact(&compact, &digest)
        .map_err(|e| MessageError::Recovery(e.to_string()))?;

    let derived = Address::from_public_key(&recovered, compressed, network);
    if derived.address_string != address {
        return Err(MessageError::AddressMismatch {
            expected: address.to_string(),
            actual: derived.address_string,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_from_byte(b: u8, compressed: bool, network: Network) -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = b;
        PrivateKey::from_bytes(&bytes, compressed, network).unwrap()
    }

    #[test]
    fn test_sign_verify_round_trip_compressed() {
        let key = key_from_byte(15, true, Network::Mainnet);
        let sig = sign_message("hello world", &key).unwrap();
        verify_message(&key.address(), &sig, "hello world", Network::Mainnet).unwrap();
    }

    #[test]
    fn test_sign_verify_round_trip_uncompressed() {
        let key = key_from_byte(15, false, Network::Mainnet);
        let sig = sign_message("hello world", &key).unwrap();
        verify_message(&key.address(), &sig, "hello world", Network::Mainnet).unwrap();
    }

    #[test]
    fn test_sign_verify_round_trip_testnet() {
        let key = key_from_byte(21, true, Network::Testnet);
        let sig = sign_message("testnet message", &key).unwrap();
        verify_message(&key.address(), &sig, "testnet message", Network::Testnet).unwrap();
    }

    #[test]
    fn test_empty_message_round_trips() {
        let key = key_from_byte(15, true, Network::Mainnet);
        let sig = sign_message("", &key).unwrap();
        verify_message(&key.address(), &sig, "", Network::Mainnet).unwrap();
    }

    #[test]
    fn test_tampered_message_mismatches() {
        let key = key_from_byte(15, true, Network::Mainnet);
        let sig = sign_message("original", &key).unwrap();

        // Recovery still yields some key, but not the right one.
        let err = verify_message(&key.address(), &sig, "tampered", Network::Mainnet);
        assert!(matches!(
            err,
            Err(MessageError::AddressMismatch { .. }) | Err(MessageError::Recovery(_))
        ));
    }

    #[test]
    fn test_wrong_address_is_mismatch() {
        let key = key_from_byte(15, true, Network::Mainnet);
        let other = key_from_byte(21, true, Network::Mainnet);
        let sig = sign_message("hello", &key).unwrap();

        let err = verify_message(&other.address(), &sig, "hello", Network::Mainnet).unwrap_err();
        match err {
            MessageError::AddressMismatch { expected, actual } => {
                assert_eq!(expected, other.address());
                assert_eq!(actual, key.address());
            }
            other => panic!("expected AddressMismatch, got {}", other),
        }
    }

    #[test]
    fn test_bad_base64_is_encoding_error() {
        let key = key_from_byte(15, true, Network::Mainnet);
        let err =
            verify_message(&key.address(), "not base64!!", "hello", Network::Mainnet).unwrap_err();
        assert!(matches!(err, MessageError::SignatureEncoding(_)));
    }

    #[test]
    fn test_truncated_signature_is_recovery_error() {
        let key = key_from_byte(15, true, Network::Mainnet);
        // 64 bytes instead of 65.
        let short = base64::engine::general_purpose::STANDARD.encode([0u8; 64]);
        let err = verify_message(&key.address(), &short, "hello", Network::Mainnet).unwrap_err();
        assert!(matches!(err, MessageError::Recovery(_)));
    }

    #[test]
    fn test_signature_header_carries_compression() {
        let compressed = key_from_byte(15, true, Network::Mainnet);
        let uncompressed = key_from_byte(15, false, Network::Mainnet);

        let sig_c = base64::engine::general_purpose::STANDARD
            .decode(sign_message("m", &compressed).unwrap())
            .unwrap();
        let sig_u = base64::engine::general_purpose::STANDARD
            .decode(sign_message("m", &uncompressed).unwrap())
            .unwrap();

        assert_eq!(sig_c.len(), 65);
        assert_eq!(sig_u.len(), 65);
        assert!((31..=34).contains(&sig_c[0]));
        assert!((27..=30).contains(&sig_u[0]));
    }
}
