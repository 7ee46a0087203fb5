//! Property-based tests.

use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rsa_jwk::{
    jwk::{decode_uint, encode_uint},
    BigUint, DefaultKeyFactory, JwkFieldSet, RsaPrivateJwk, RsaPrivateKey,
};

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. It's insecure and optimized for test speed.
    fn private_key()(seed in any::<[u8; 32]>(), nprimes in 2usize..=3) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed(seed);
        RsaPrivateKey::new_multi_prime(&mut rng, nprimes, 256).unwrap()
    }
}

proptest! {
    #[test]
    fn uint_encoding_is_stable(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let value = BigUint::from_bytes_be(&bytes);
        let encoded = encode_uint(&value);

        prop_assert!(!encoded.is_empty());
        prop_assert!(!encoded.contains('='));
        prop_assert_eq!(decode_uint("n", &encoded).unwrap(), value.clone());
        prop_assert_eq!(encode_uint(&decode_uint("n", &encoded).unwrap()), encoded);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn private_jwk_roundtrip(private_key in private_key()) {
        let factory = DefaultKeyFactory::new();
        let jwk = RsaPrivateJwk::from_key(private_key.clone(), None, &factory).unwrap();

        let json = serde_json::to_string(jwk.fields()).unwrap();
        let fields: JwkFieldSet = serde_json::from_str(&json).unwrap();
        let decoded = RsaPrivateJwk::from_fields(&fields, &factory).unwrap();

        prop_assert_eq!(decoded.key(), &private_key);
        prop_assert_eq!(decoded.fields(), jwk.fields());
    }
}
