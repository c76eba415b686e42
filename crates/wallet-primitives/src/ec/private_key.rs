//! secp256k1 private key with WIF serialization.
//!
//! Wraps a k256 signing key together with the compression flag and
//! network tag that a WIF string carries, so encoding and decoding
//! round-trip exactly.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::{Network, PrimitivesError};

/// Length of the raw private key scalar in bytes.
const KEY_LEN: usize = 32;

/// Marker byte appended to the WIF payload for compressed public keys.
const COMPRESSION_MARKER: u8 = 0x01;

/// A secp256k1 private key.
///
/// Carries the compression flag (which public key serialization — 33 or
/// 65 bytes — is derived) and the network tag alongside the scalar.
/// Held by the caller only for the duration of a signing or derivation
/// call; this crate never persists key material, and the scalar bytes
/// are zeroed on drop.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    inner: SigningKey,
    /// Whether derived public keys serialize in compressed (33-byte) form.
    pub compressed: bool,
    /// The network this key's WIF and addresses belong to.
    pub network: Network,
}

impl PrivateKey {
    /// Generate a random compressed key for the given network.
    pub fn generate(network: Network) -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
            compressed: true,
            network,
        }
    }

    /// Build a key from a raw 32-byte scalar.
    ///
    /// Fails if the slice is not 32 bytes or the scalar is zero or out
    /// of range for the curve.
    pub fn from_bytes(
        bytes: &[u8],
        compressed: bool,
        network: Network,
    ) -> Result<Self, PrimitivesError> {
        if bytes.len() != KEY_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_bytes(bytes.into())
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey {
            inner,
            compressed,
            network,
        })
    }

    /// Build a compressed mainnet-style key from a 64-character hex string.
    pub fn from_hex(
        hex_str: &str,
        compressed: bool,
        network: Network,
    ) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes, compressed, network)
    }

    /// Decode a WIF (Wallet Import Format) string.
    ///
    /// Payload layout after Base58Check decoding:
    /// network prefix byte, 32-byte scalar, optional 0x01 compression
    /// marker. The compression flag and network both round-trip through
    /// `to_wif`.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(wif)
            .map_err(|e| match e {
                PrimitivesError::ChecksumMismatch => PrimitivesError::ChecksumMismatch,
                other => PrimitivesError::InvalidWif(other.to_string()),
            })?;

        // 1 prefix + 32 key (+ 1 compression marker)
        let compressed = match payload.len() {
            34 => {
                if payload[33] != COMPRESSION_MARKER {
                    return Err(PrimitivesError::InvalidWif(
                        "invalid compression marker".to_string(),
                    ));
                }
                true
            }
            33 => false,
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid payload length {}",
                    n
                )));
            }
        };

        let network = Network::from_wif_prefix(payload[0]).ok_or_else(|| {
            PrimitivesError::InvalidWif(format!("unknown network prefix 0x{:02x}", payload[0]))
        })?;

        Self::from_bytes(&payload[1..1 + KEY_LEN], compressed, network)
    }

    /// Encode this key as a WIF string.
    ///
    /// Exact inverse of `from_wif` for the same compression flag and
    /// network.
    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(1 + KEY_LEN + 1);
        payload.push(self.network.wif_prefix());
        payload.extend_from_slice(&self.to_bytes());
        if self.compressed {
            payload.push(COMPRESSION_MARKER);
        }
        base58::check_encode(&payload)
    }

    /// The raw 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// The scalar as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key())
    }

    /// Serialize the derived public key per this key's compression flag.
    ///
    /// 33 bytes compressed, 65 bytes uncompressed.
    pub fn pub_key_bytes(&self) -> Vec<u8> {
        self.pub_key().serialize(self.compressed)
    }

    /// Derive the P2PKH address string for this key on its network.
    ///
    /// Base58Check(version byte ‖ hash160(serialized public key)), where
    /// the public key serialization honors the compression flag.
    pub fn address(&self) -> String {
        let h = crate::hash::hash160(&self.pub_key_bytes());
        let mut payload = Vec::with_capacity(21);
        payload.push(self.network.p2pkh_version());
        payload.extend_from_slice(&h);
        base58::check_encode(&payload)
    }

    /// Sign a 32-byte digest with RFC6979 deterministic nonces.
    ///
    /// Produces a low-S normalized signature.
    pub fn sign(&self, digest: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    /// Sign a digest producing a 65-byte compact recoverable signature.
    ///
    /// Layout: header byte (27 + recovery id, +4 when compressed),
    /// 32-byte R, 32-byte S. The header encodes enough information to
    /// reconstruct the public key from the signature and digest alone.
    pub fn sign_compact(&self, digest: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        let (sig, recovery_id) = self
            .inner
            .sign_prehash_recoverable(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let mut out = vec![0u8; 65];
        out[0] = 27 + recovery_id.to_byte() + if self.compressed { 4 } else { 0 };
        let (r, s) = sig.split_bytes();
        out[1..33].copy_from_slice(&r);
        out[33..65].copy_from_slice(&s);
        Ok(out)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        let mut bytes = self.inner.to_bytes();
        bytes.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
            && self.compressed == other.compressed
            && self.network == other.network
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let key_bytes: [u8; 32] = [
            0xea, 0xf0, 0x2c, 0xa3, 0x48, 0xc5, 0x24, 0xe6, 0x39, 0x26, 0x55, 0xba, 0x4d, 0x29,
            0x60, 0x3c, 0xd1, 0xa7, 0x34, 0x7d, 0x9d, 0x65, 0xcf, 0xe9, 0x3c, 0xe1, 0xeb, 0xff,
            0xdc, 0xa2, 0x26, 0x94,
        ];
        let key = PrivateKey::from_bytes(&key_bytes, true, Network::Mainnet).unwrap();
        let pub_key = key.pub_key();

        let digest = crate::hash::sha256d(b"spend authorization");
        let sig = key.sign(&digest).unwrap();
        assert!(pub_key.verify(&digest, &sig));
        assert_eq!(key.to_bytes(), key_bytes);
    }

    #[test]
    fn wif_round_trip_compressed_and_uncompressed() {
        let key = PrivateKey::generate(Network::Mainnet);

        let wif = key.to_wif();
        let decoded = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(key, decoded);
        assert!(decoded.compressed);
        assert_eq!(decoded.to_wif(), wif);

        let mut uncompressed = key.clone();
        uncompressed.compressed = false;
        let wif_u = uncompressed.to_wif();
        assert_ne!(wif, wif_u);
        let decoded_u = PrivateKey::from_wif(&wif_u).unwrap();
        assert!(!decoded_u.compressed);
        assert_eq!(decoded_u.to_wif(), wif_u);
    }

    #[test]
    fn wif_round_trip_testnet() {
        let key = PrivateKey::generate(Network::Testnet);
        let decoded = PrivateKey::from_wif(&key.to_wif()).unwrap();
        assert_eq!(decoded.network, Network::Testnet);
        assert_eq!(decoded, key);
    }

    #[test]
    fn from_wif_rejects_malformed_strings() {
        // Modified character (checksum breaks).
        assert!(
            PrivateKey::from_wif("L401GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq").is_err()
        );
        // Truncated.
        assert!(
            PrivateKey::from_wif("L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkW").is_err()
        );
        // Not base58 at all.
        assert!(PrivateKey::from_wif("not-a-wif!").is_err());
        // Empty.
        assert!(PrivateKey::from_wif("").is_err());
    }

    #[test]
    fn from_wif_flipped_checksum_is_checksum_mismatch() {
        let key = PrivateKey::generate(Network::Mainnet);
        let mut wif = key.to_wif();
        let last = wif.pop().unwrap();
        wif.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(
            PrivateKey::from_wif(&wif),
            Err(PrimitivesError::ChecksumMismatch) | Err(PrimitivesError::InvalidWif(_))
        ));
    }

    #[test]
    fn from_hex_rejects_empty_and_invalid() {
        assert!(PrivateKey::from_hex("", true, Network::Mainnet).is_err());
        assert!(PrivateKey::from_hex("zz", true, Network::Mainnet).is_err());
        // A WIF string is not hex.
        assert!(PrivateKey::from_hex(
            "L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq",
            true,
            Network::Mainnet
        )
        .is_err());
    }

    #[test]
    fn compression_flag_selects_pub_key_serialization() {
        let mut key = PrivateKey::generate(Network::Mainnet);
        key.compressed = true;
        assert_eq!(key.pub_key_bytes().len(), 33);
        key.compressed = false;
        assert_eq!(key.pub_key_bytes().len(), 65);
    }

    #[test]
    fn address_differs_by_compression_and_network() {
        let key_bytes =
            hex::decode("0499f8239bfe10eb0f5e53d543635a423c96529dd85fa4bad42049a0b435ebdd")
                .unwrap();
        let compressed = PrivateKey::from_bytes(&key_bytes, true, Network::Mainnet).unwrap();
        let uncompressed = PrivateKey::from_bytes(&key_bytes, false, Network::Mainnet).unwrap();
        assert_ne!(compressed.address(), uncompressed.address());

        let testnet = PrivateKey::from_bytes(&key_bytes, true, Network::Testnet).unwrap();
        assert_ne!(compressed.address(), testnet.address());
        assert!(compressed.address().starts_with('1'));
    }
}
