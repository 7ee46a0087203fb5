//! Base64url encoding of JWK integer values ([RFC 7518 section 2]).
//!
//! Integers are written as their unsigned big-endian octets, using the
//! minimum number of octets needed to represent the value, and encoded with
//! the URL-safe Base64 alphabet without padding.
//!
//! [RFC 7518 section 2]: https://datatracker.ietf.org/doc/html/rfc7518#section-2

use alloc::string::String;
use base64ct::{Base64UrlUnpadded, Encoding};
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Encodes `value` as a "Base64urlUInt" string.
pub fn encode_uint(value: &BigUint) -> String {
    let bytes = Zeroizing::new(value.to_bytes_be());
    Base64UrlUnpadded::encode_string(&bytes)
}

/// Decodes a "Base64urlUInt" string read from the JWK parameter `field`.
pub fn decode_uint(field: &'static str, encoded: &str) -> Result<BigUint> {
    let bytes = Zeroizing::new(
        Base64UrlUnpadded::decode_vec(encoded)
            .map_err(|_| Error::malformed(field, "value is not a Base64url encoded integer"))?,
    );

    if bytes.is_empty() {
        return Err(Error::malformed(field, "value cannot be empty"));
    }

    Ok(BigUint::from_bytes_be(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num_traits::{FromPrimitive, Zero};

    #[test]
    fn encodes_minimal_octets() {
        // 65537 = 0x010001
        assert_eq!(encode_uint(&BigUint::from_u64(65537).unwrap()), "AQAB");
        assert_eq!(encode_uint(&BigUint::from_u64(255).unwrap()), "_w");
        assert_eq!(encode_uint(&BigUint::zero()), "AA");
    }

    #[test]
    fn decodes_known_values() {
        assert_eq!(
            decode_uint("e", "AQAB").unwrap(),
            BigUint::from_u64(65537).unwrap()
        );
        assert_eq!(
            decode_uint("n", "AAEAAQ").unwrap(),
            BigUint::from_bytes_be(&hex!("010001"))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(decode_uint("n", "").unwrap_err().field(), Some("n"));
        assert!(decode_uint("n", "AQAB==").unwrap_err().is_malformed());
        assert!(decode_uint("n", "A").unwrap_err().is_malformed());
        assert!(decode_uint("n", "a+b/").unwrap_err().is_malformed());
    }
}
