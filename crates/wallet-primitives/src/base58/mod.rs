//! Base58 and Base58Check encoding.
//!
//! Raw Base58 uses Bitcoin's modified alphabet; Base58Check appends the
//! first four bytes of SHA-256d(payload) as a checksum. Used for both
//! addresses and WIF private keys.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Number of checksum bytes appended by Base58Check.
const CHECKSUM_LEN: usize = 4;

/// Encode bytes as a Base58 string (Bitcoin alphabet).
///
/// Leading zero bytes become leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a Base58 string to bytes.
///
/// Fails with `InvalidBase58` if the string contains characters outside
/// the Bitcoin alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Base58Check-encode a payload.
///
/// The checksum is the first four bytes of SHA-256d(payload), appended
/// before encoding.
pub fn check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&data)
}

/// Decode a Base58Check string and verify its checksum.
///
/// Returns the payload with the checksum stripped. Fails with
/// `InvalidBase58` for foreign characters or data too short to carry a
/// checksum, and `ChecksumMismatch` if the trailing four bytes do not
/// equal the first four bytes of SHA-256d(payload).
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN + 1 {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_vectors() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode(&[0x00]), "1");
        assert_eq!(encode(&[0, 0, 0, 0]), "1111");
        assert_eq!(encode(&[255, 255, 255, 255]), "7YXq9G");
        let addr = hex::decode("00010966776006953D5567439E5E39F86A0D273BEED61967F6").unwrap();
        assert_eq!(encode(&addr), "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
    }

    #[test]
    fn decode_round_trips() {
        for s in ["", "1", "111233QC4", "C3CPq7c8PY", "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM"] {
            let bytes = decode(s).unwrap();
            assert_eq!(encode(&bytes), s);
        }
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        assert!(matches!(
            decode("invalid!@#$%"),
            Err(PrimitivesError::InvalidBase58(_))
        ));
        assert!(decode("1234O0Il").is_err());
    }

    #[test]
    fn check_round_trip() {
        let payload = hex::decode("00f54a5851e9372b87810a8e60cdd2e7cfd80b6e31").unwrap();
        let encoded = check_encode(&payload);
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn check_decode_rejects_flipped_checksum() {
        let mut encoded = check_encode(&[0x80, 0x01, 0x02, 0x03]);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(
            check_decode(&encoded),
            Err(PrimitivesError::ChecksumMismatch) | Err(PrimitivesError::InvalidBase58(_))
        ));
    }

    #[test]
    fn check_decode_rejects_short_data() {
        // "1" decodes to a single zero byte, far too short for a checksum.
        assert!(matches!(
            check_decode("1"),
            Err(PrimitivesError::InvalidBase58(_))
        ));
    }
}
