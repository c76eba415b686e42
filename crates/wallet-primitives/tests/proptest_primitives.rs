use proptest::prelude::*;

use wallet_primitives::base58;
use wallet_primitives::chainhash::Hash;
use wallet_primitives::ec::private_key::PrivateKey;
use wallet_primitives::ec::signature::Signature;
use wallet_primitives::hash::sha256;
use wallet_primitives::Network;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn wif_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        compressed in any::<bool>(),
        testnet in any::<bool>(),
    ) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        let network = if testnet { Network::Testnet } else { Network::Mainnet };
        if let Ok(pk) = PrivateKey::from_bytes(&seed, compressed, network) {
            let wif = pk.to_wif();
            let pk2 = PrivateKey::from_wif(&wif).unwrap();
            prop_assert_eq!(pk.to_hex(), pk2.to_hex());
            prop_assert_eq!(pk2.compressed, compressed);
            prop_assert_eq!(pk2.network, network);
            prop_assert!(!pk.address().is_empty());
        }
    }

    #[test]
    fn ecdsa_sign_verify_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed, true, Network::Mainnet) {
            let hash = sha256(&msg);
            let sig = pk.sign(&hash).unwrap();
            prop_assert!(pk.pub_key().verify(&hash, &sig));
        }
    }

    #[test]
    fn der_roundtrip_is_canonical(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed, true, Network::Mainnet) {
            let hash = sha256(&msg);
            let sig = pk.sign(&hash).unwrap();
            let der = sig.to_der();
            let parsed = Signature::from_der(&der).unwrap();
            prop_assert_eq!(parsed.to_der(), der);
        }
    }

    #[test]
    fn compact_recovery_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..64),
        compressed in any::<bool>(),
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed, compressed, Network::Mainnet) {
            let hash = sha256(&msg);
            let compact = pk.sign_compact(&hash).unwrap();
            let (recovered, flag) = Signature::recover_compact(&compact, &hash).unwrap();
            prop_assert_eq!(flag, compressed);
            prop_assert_eq!(recovered, pk.pub_key());
        }
    }

    #[test]
    fn base58_check_roundtrip(payload in prop::collection::vec(any::<u8>(), 1..64)) {
        let encoded = base58::check_encode(&payload);
        let decoded = base58::check_decode(&encoded).unwrap();
        prop_assert_eq!(decoded, payload);
    }

    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        let hex_str = hash.to_string();
        let hash2 = Hash::from_hex(&hex_str).unwrap();
        prop_assert_eq!(hash.as_bytes(), hash2.as_bytes());
    }
}
