//! ECDSA signatures with strict DER serialization and compact recovery.
//!
//! DER parsing is strict: non-minimal integer encodings, wrong tags, and
//! trailing bytes are rejected rather than tolerated, so a signature that
//! parses here is in its one canonical byte form. Compact (recoverable)
//! signatures carry a header byte that reconstructs the signer's public
//! key from the signature and digest alone.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{self, RecoveryId, VerifyingKey};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// The secp256k1 curve order N.
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// N/2, the low-S normalization boundary.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// Length of a compact recoverable signature: header + R + S.
const COMPACT_LEN: usize = 65;

/// An ECDSA signature over secp256k1, as R and S components.
#[derive(Clone, Debug)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    /// Build a signature from raw big-endian R and S values.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// The R component.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The S component.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a strict-DER-encoded signature.
    ///
    /// Layout: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>`.
    /// Rejected with `InvalidSignature`:
    /// - wrong tag bytes or truncated structure
    /// - a length byte that does not cover the input exactly (trailing data)
    /// - empty or negative (high bit set) integers
    /// - non-minimal integers (leading 0x00 not required by the next
    ///   byte's high bit), even when the underlying values are valid
    /// - R or S zero or not below the curve order
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 8 {
            return Err(malformed("too short"));
        }
        if bytes[0] != 0x30 {
            return Err(malformed("no sequence tag"));
        }
        // Short-form length only, and it must cover the rest exactly.
        let seq_len = bytes[1] as usize;
        if bytes[1] & 0x80 != 0 {
            return Err(malformed("long-form length"));
        }
        if seq_len != bytes.len() - 2 {
            return Err(malformed("sequence length does not match input"));
        }

        let (r, rest) = parse_der_int(&bytes[2..], "R")?;
        let (s, rest) = parse_der_int(rest, "S")?;
        if !rest.is_empty() {
            return Err(malformed("trailing data after S"));
        }

        if is_zero(&r) {
            return Err(malformed("R is zero"));
        }
        if is_zero(&s) {
            return Err(malformed("S is zero"));
        }
        if !is_less_than(&r, &CURVE_ORDER) {
            return Err(malformed("R is >= curve order"));
        }
        if !is_less_than(&s, &CURVE_ORDER) {
            return Err(malformed("S is >= curve order"));
        }

        Ok(Signature { r, s })
    }

    /// Serialize in minimal DER with low-S normalization.
    pub fn to_der(&self) -> Vec<u8> {
        let s = if is_greater_than(&self.s, &HALF_ORDER) {
            subtract_from_order(&self.s)
        } else {
            self.s
        };

        let rb = minimal_int(&self.r);
        let sb = minimal_int(&s);

        let total = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total);
        out.push(0x30);
        out.push((total - 2) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Sign a digest with RFC6979 deterministic nonces, low-S normalized.
    ///
    /// Digests shorter than 32 bytes are left-padded with zeros; longer
    /// ones are truncated to the scalar size.
    pub fn sign(digest: &[u8], key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let padded = normalize_digest(digest);
        let (sig, _recovery_id) = key
            .signing_key()
            .sign_prehash_recoverable(&padded)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let (r_bytes, s_bytes) = sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        if is_greater_than(&s, &HALF_ORDER) {
            s = subtract_from_order(&s);
        }

        Ok(Signature { r, s })
    }

    /// Verify this signature over a digest with the given public key.
    ///
    /// A well-formed but incorrect signature returns `false`; this never
    /// errors.
    pub fn verify(&self, digest: &[u8], pub_key: &PublicKey) -> bool {
        let sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        let padded = normalize_digest(digest);
        pub_key
            .verifying_key()
            .verify_prehash(&padded, &sig)
            .is_ok()
    }

    /// Recover the signer's public key from a 65-byte compact signature.
    ///
    /// Returns the key together with the compression flag carried by the
    /// header byte (27..=34; +4 marks a compressed key). Fails with
    /// `InvalidSignature` when the header is out of range or the
    /// signature does not resolve to a valid curve point for the digest.
    pub fn recover_compact(
        compact: &[u8],
        digest: &[u8],
    ) -> Result<(PublicKey, bool), PrimitivesError> {
        if compact.len() != COMPACT_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "invalid compact signature size {}",
                compact.len()
            )));
        }

        let header = compact[0];
        if !(27..=34).contains(&header) {
            return Err(PrimitivesError::InvalidSignature(format!(
                "invalid compact signature header 0x{:02x}",
                header
            )));
        }
        let compressed = header - 27 >= 4;
        let iteration = (header - 27) & 3;

        let recovery_id = RecoveryId::from_byte(iteration).ok_or_else(|| {
            PrimitivesError::InvalidSignature("invalid recovery id".to_string())
        })?;

        let sig = ecdsa::Signature::from_scalars(
            *k256::FieldBytes::from_slice(&compact[1..33]),
            *k256::FieldBytes::from_slice(&compact[33..65]),
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let padded = normalize_digest(digest);
        let recovered = VerifyingKey::recover_from_prehash(&padded, &sig, recovery_id)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        Ok((PublicKey::from_verifying_key(&recovered), compressed))
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.s == other.s
    }
}

impl Eq for Signature {}

fn malformed(detail: &str) -> PrimitivesError {
    PrimitivesError::InvalidSignature(format!("malformed signature: {}", detail))
}

/// Parse one strict-DER INTEGER, returning its 32-byte value and the rest.
fn parse_der_int<'a>(
    data: &'a [u8],
    which: &str,
) -> Result<([u8; 32], &'a [u8]), PrimitivesError> {
    if data.len() < 2 {
        return Err(malformed(&format!("truncated {} header", which)));
    }
    if data[0] != 0x02 {
        return Err(malformed(&format!("no integer tag for {}", which)));
    }
    let len = data[1] as usize;
    if data[1] & 0x80 != 0 {
        return Err(malformed(&format!("long-form {} length", which)));
    }
    if len == 0 {
        return Err(malformed(&format!("empty {}", which)));
    }
    if data.len() < 2 + len {
        return Err(malformed(&format!("truncated {}", which)));
    }
    let value = &data[2..2 + len];

    // DER integers are signed: a set high bit would make the value
    // negative, and a leading zero is only allowed to clear that bit.
    if value[0] & 0x80 != 0 {
        return Err(malformed(&format!("negative {}", which)));
    }
    if len > 1 && value[0] == 0x00 && value[1] & 0x80 == 0 {
        return Err(malformed(&format!("non-minimal {}", which)));
    }

    // At most 33 bytes: 32 of magnitude plus one permitted padding zero.
    let magnitude = if value[0] == 0x00 { &value[1..] } else { value };
    if magnitude.len() > 32 {
        return Err(malformed(&format!("{} too large", which)));
    }
    let mut out = [0u8; 32];
    out[32 - magnitude.len()..].copy_from_slice(magnitude);
    Ok((out, &data[2 + len..]))
}

/// Encode a 32-byte integer in minimal DER form.
///
/// Strips leading zeros and prepends 0x00 only when the high bit is set.
fn minimal_int(val: &[u8; 32]) -> Vec<u8> {
    let mut start = 0;
    while start < 31 && val[start] == 0 {
        start += 1;
    }
    let trimmed = &val[start..];

    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

/// Pad or truncate a digest to the 32-byte scalar size.
fn normalize_digest(digest: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if digest.len() >= 32 {
        padded.copy_from_slice(&digest[..32]);
    } else {
        padded[32 - digest.len()..].copy_from_slice(digest);
    }
    padded
}

fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Big-endian comparison: a < b.
fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    for i in 0..32 {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    false
}

/// Big-endian comparison: a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    for i in 0..32 {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    false
}

/// N - val, for low-S normalization.
fn subtract_from_order(val: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i32 - val[i] as i32 - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;
    use crate::Network;

    /// A valid DER signature lifted from the Bitcoin blockchain.
    fn valid_der() -> Vec<u8> {
        hex::decode(
            "304402204e45e16932b8af514961a1d3a1a25fdf3f4f7732e9d624c6c61548ab5fb8cd41\
             0220181522ec8eca07de4860a4acdd12909d831cc56cbbac4622082221a8768d1d09",
        )
        .unwrap()
    }

    #[test]
    fn der_parse_valid() {
        let sig = Signature::from_der(&valid_der()).unwrap();
        assert_eq!(sig.to_der(), valid_der());
    }

    #[test]
    fn der_parse_rejects_structural_damage() {
        assert!(Signature::from_der(&[]).is_err());

        let valid = valid_der();

        // Wrong sequence tag.
        let mut bad = valid.clone();
        bad[0] = 0x31;
        assert!(Signature::from_der(&bad).is_err());

        // Wrong first integer tag.
        let mut bad = valid.clone();
        bad[2] = 0x03;
        assert!(Signature::from_der(&bad).is_err());

        // Trailing byte not covered by the sequence length.
        let mut bad = valid.clone();
        bad.push(0x00);
        assert!(Signature::from_der(&bad).is_err());

        // Truncated.
        assert!(Signature::from_der(&valid[..valid.len() - 1]).is_err());
    }

    #[test]
    fn der_parse_rejects_non_minimal_integers() {
        // Take the valid signature and pad R with an unnecessary leading
        // zero, fixing up the three length bytes. The (r, s) pair is
        // still mathematically valid; only the encoding is wrong.
        let valid = valid_der();
        let r_len = valid[3] as usize;

        let mut padded = Vec::with_capacity(valid.len() + 1);
        padded.extend_from_slice(&[0x30, valid[1] + 1, 0x02, valid[3] + 1, 0x00]);
        padded.extend_from_slice(&valid[4..4 + r_len]);
        padded.extend_from_slice(&valid[4 + r_len..]);

        let err = Signature::from_der(&padded).unwrap_err();
        assert!(err.to_string().contains("non-minimal"), "got: {}", err);
    }

    #[test]
    fn der_parse_rejects_negative_integers() {
        // R with its high bit set and no padding zero.
        let mut bytes = vec![0x30, 0x08, 0x02, 0x02, 0x80, 0x01, 0x02, 0x02, 0x01, 0x01];
        assert!(Signature::from_der(&bytes).is_err());
        // Same value padded correctly parses.
        bytes = vec![0x30, 0x09, 0x02, 0x03, 0x00, 0x80, 0x01, 0x02, 0x02, 0x01, 0x01];
        assert!(Signature::from_der(&bytes).is_ok());
    }

    #[test]
    fn der_parse_rejects_zero_and_oversized_values() {
        // R = 0.
        let zero_r = vec![0x30, 0x08, 0x02, 0x01, 0x00, 0x02, 0x03, 0x01, 0x02, 0x03];
        assert!(Signature::from_der(&zero_r).is_err());

        // S = curve order (not below N).
        let mut order_s = vec![0x30, 0x26, 0x02, 0x01, 0x01, 0x02, 0x21, 0x00];
        order_s.extend_from_slice(&CURVE_ORDER);
        assert!(Signature::from_der(&order_s).is_err());
    }

    #[test]
    fn to_der_known_vectors() {
        // R and S with clear high bits: 0x44-byte body.
        let sig = Signature::new(
            to_32(&hex::decode("4e45e16932b8af514961a1d3a1a25fdf3f4f7732e9d624c6c61548ab5fb8cd41").unwrap()),
            to_32(&hex::decode("181522ec8eca07de4860a4acdd12909d831cc56cbbac4622082221a8768d1d09").unwrap()),
        );
        assert_eq!(sig.to_der(), valid_der());

        // S above N/2 gets low-S normalized on encode.
        let sig = Signature::new(
            to_32(&hex::decode("a196ed0e7ebcbe7b63fe1d8eecbdbde03a67ceba4fc8f6482bdcb9606a911404").unwrap()),
            to_32(&hex::decode("971729c7fa944b465b35250c6570a2f31acbb14b13d1565fab7330dcb2b3dfb1").unwrap()),
        );
        let expected = hex::decode(
            "3045022100a196ed0e7ebcbe7b63fe1d8eecbdbde03a67ceba4fc8f6482bdcb9606a911404\
             022068e8d638056bb4b9a4cadaf39a8f5d0b9fe32b9b9b7749dc145f2db01d826190",
        )
        .unwrap();
        assert_eq!(sig.to_der(), expected);
    }

    #[test]
    fn rfc6979_deterministic_signatures() {
        let tests = [
            (
                "cca9fbcc1b41e5a95d369eaa6ddcff73b61a4efaa279cfc6567e8daa39cbaf50",
                "sample",
                "3045022100af340daf02cc15c8d5d08d7735dfe6b98a474ed373bdb5fbecf7571be52b384202205009fb27f37034a9b24b707b7c6b79ca23ddef9e25f7282e8a797efe53a8f124",
            ),
            (
                "0000000000000000000000000000000000000000000000000000000000000001",
                "Satoshi Nakamoto",
                "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d802202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5",
            ),
            (
                "f8b8af8ce3c7cca5e300d33939540c10d45ce001b8f252bfbc57ba0342904181",
                "Alan Turing",
                "304402207063ae83e7f62bbb171798131b4a0564b956930092b33b07b395615d9ec7e15c022058dfcc1e00a35e1572f366ffe34ba0fc47db1e7189759b9fb233c5b05ab388ea",
            ),
        ];

        for (key_hex, msg, expected) in tests {
            let key = PrivateKey::from_bytes(&hex::decode(key_hex).unwrap(), true, Network::Mainnet)
                .unwrap();
            let digest = sha256(msg.as_bytes());
            let sig = key.sign(&digest).unwrap();
            assert_eq!(hex::encode(sig.to_der()), expected, "message '{}'", msg);
            assert!(key.pub_key().verify(&digest, &sig));
        }
    }

    #[test]
    fn compact_recovery_round_trip() {
        for compressed in [true, false] {
            let mut key = PrivateKey::generate(Network::Mainnet);
            key.compressed = compressed;
            let digest = crate::hash::sha256d(b"compact recovery test");

            let compact = key.sign_compact(&digest).unwrap();
            assert_eq!(compact.len(), 65);

            let (recovered, was_compressed) =
                Signature::recover_compact(&compact, &digest).unwrap();
            assert_eq!(was_compressed, compressed);
            assert_eq!(recovered, key.pub_key());
        }
    }

    #[test]
    fn compact_recovery_rejects_bad_input() {
        let digest = crate::hash::sha256d(b"x");
        assert!(Signature::recover_compact(&[0u8; 64], &digest).is_err());

        let key = PrivateKey::generate(Network::Mainnet);
        let mut compact = key.sign_compact(&digest).unwrap();
        compact[0] = 0x00; // header out of range
        assert!(Signature::recover_compact(&compact, &digest).is_err());
    }

    #[test]
    fn verify_rejects_wrong_key_without_error() {
        let key = PrivateKey::generate(Network::Mainnet);
        let other = PrivateKey::generate(Network::Mainnet);
        let digest = crate::hash::sha256d(b"who signed this");
        let sig = key.sign(&digest).unwrap();
        assert!(sig.verify(&digest, &key.pub_key()));
        assert!(!sig.verify(&digest, &other.pub_key()));
    }

    fn to_32(bytes: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(bytes);
        out
    }
}
