//! secp256k1 public key.
//!
//! Parses SEC1-encoded keys (compressed or uncompressed), serializes in
//! either form, and verifies ECDSA signatures.

use std::fmt;

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Compressed SEC1 length (prefix + x-coordinate).
const COMPRESSED_LEN: usize = 33;

/// Uncompressed SEC1 length (prefix + x + y).
const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Parse SEC1-encoded bytes (33-byte compressed or 65-byte uncompressed).
    ///
    /// Fails with `InvalidPublicKey` for anything that is not a valid
    /// point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key bytes are empty".to_string(),
            ));
        }
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner })
    }

    /// Parse a hex-encoded SEC1 public key string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize in compressed SEC1 form (0x02/0x03 prefix + x).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in uncompressed SEC1 form (0x04 prefix + x + y).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize per the given compression flag.
    pub fn serialize(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.to_compressed().to_vec()
        } else {
            self.to_uncompressed().to_vec()
        }
    }

    /// Compressed serialization as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Hash160 of the compressed serialization.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify an ECDSA signature over a digest with this key.
    pub fn verify(&self, digest: &[u8], sig: &Signature) -> bool {
        sig.verify(digest, self)
    }

    pub(crate) fn from_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_EVEN: [u8; 33] = [
        0x02, 0xce, 0x0b, 0x14, 0xfb, 0x84, 0x2b, 0x1b, 0xa5, 0x49, 0xfd, 0xd6, 0x75, 0xc9,
        0x80, 0x75, 0xf1, 0x2e, 0x9c, 0x51, 0x0f, 0x8e, 0xf5, 0x2b, 0xd0, 0x21, 0xa9, 0xa1,
        0xf4, 0x80, 0x9d, 0x3b, 0x4d,
    ];

    #[test]
    fn parses_valid_keys() {
        // Compressed, even y.
        assert!(PublicKey::from_bytes(&COMPRESSED_EVEN).is_ok());
        // Compressed, odd y.
        let odd: [u8; 33] = [
            0x03, 0x26, 0x89, 0xc7, 0xc2, 0xda, 0xb1, 0x33, 0x09, 0xfb, 0x14, 0x3e, 0x0e, 0x8f,
            0xe3, 0x96, 0x34, 0x25, 0x21, 0x88, 0x7e, 0x97, 0x66, 0x90, 0xb6, 0xb4, 0x7f, 0x5b,
            0x2a, 0x4b, 0x7d, 0x44, 0x8e,
        ];
        assert!(PublicKey::from_bytes(&odd).is_ok());
    }

    #[test]
    fn rejects_invalid_keys() {
        // Empty, wrong length, and a tampered x not on the curve.
        assert!(PublicKey::from_bytes(&[]).is_err());
        assert!(PublicKey::from_bytes(&[0x05]).is_err());

        let valid = PublicKey::from_bytes(&COMPRESSED_EVEN).unwrap();
        let mut tampered = valid.to_uncompressed();
        tampered[1] ^= 0x04;
        assert!(PublicKey::from_bytes(&tampered).is_err());
    }

    #[test]
    fn serialization_round_trips_both_forms() {
        let key = PublicKey::from_bytes(&COMPRESSED_EVEN).unwrap();
        assert_eq!(key.to_compressed(), COMPRESSED_EVEN);

        let uncompressed = key.to_uncompressed();
        let reparsed = PublicKey::from_bytes(&uncompressed).unwrap();
        assert_eq!(reparsed, key);

        assert_eq!(key.serialize(true).len(), 33);
        assert_eq!(key.serialize(false).len(), 65);
    }

    #[test]
    fn display_is_compressed_hex() {
        let key = PublicKey::from_bytes(&COMPRESSED_EVEN).unwrap();
        assert_eq!(
            format!("{}", key),
            "02ce0b14fb842b1ba549fdd675c98075f12e9c510f8ef52bd021a9a1f4809d3b4d"
        );
    }
}
