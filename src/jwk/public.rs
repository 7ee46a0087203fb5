//! Public RSA JWKs ([RFC 7518 section 6.3.1]).
//!
//! [RFC 7518 section 6.3.1]: https://datatracker.ietf.org/doc/html/rfc7518#section-6.3.1

use alloc::vec::Vec;

use super::field_set::{required_uint, FieldSource, JwkFieldSet};
use super::params::{KEY_TYPE, MODULUS, PUBLIC_EXPONENT, RSA_KEY_TYPE};
use crate::errors::{Error, Result};
use crate::factory::{DefaultKeyFactory, KeyFactory};
use crate::key::RsaPublicKey;
use crate::traits::PublicKeyParts;

/// An RSA public key together with its JWK fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicJwk {
    fields: JwkFieldSet,
    key: RsaPublicKey,
}

impl RsaPublicJwk {
    /// Encodes `key` as `kty`, `n` and `e`.
    pub fn from_key(key: RsaPublicKey) -> Self {
        let mut fields = JwkFieldSet::new();
        fields.put(&KEY_TYPE, RSA_KEY_TYPE);
        fields.put_uint(&MODULUS, key.n());
        fields.put_uint(&PUBLIC_EXPONENT, key.e());

        Self { fields, key }
    }

    /// Reads `n` and `e` from `fields` and builds the key with `factory`.
    ///
    /// Also returns the names of the fields that were consumed.
    pub fn from_fields<F: KeyFactory + ?Sized>(
        fields: &JwkFieldSet,
        factory: &F,
    ) -> Result<(Self, Vec<&'static str>)> {
        let mut consumed = Vec::with_capacity(3);
        if check_key_type(fields)? {
            consumed.push(KEY_TYPE.id());
        }

        let n = required_uint(fields, &MODULUS)?;
        let e = required_uint(fields, &PUBLIC_EXPONENT)?;
        consumed.push(MODULUS.id());
        consumed.push(PUBLIC_EXPONENT.id());

        let key = factory.public_key(n, e).map_err(|err| {
            Error::unsupported(format!(
                "unable to create RSA public key from JWK {}: {err}",
                fields.describe()
            ))
        })?;

        let mut out = JwkFieldSet::new();
        out.put(&KEY_TYPE, RSA_KEY_TYPE);
        out.extend(fields);

        Ok((Self { fields: out, key }, consumed))
    }

    /// The JWK fields of this key.
    pub fn fields(&self) -> &JwkFieldSet {
        &self.fields
    }

    /// The public key.
    pub fn key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Splits into the JWK fields and the key.
    pub fn into_parts(self) -> (JwkFieldSet, RsaPublicKey) {
        (self.fields, self.key)
    }
}

impl From<RsaPublicKey> for RsaPublicJwk {
    fn from(key: RsaPublicKey) -> Self {
        Self::from_key(key)
    }
}

impl TryFrom<&JwkFieldSet> for RsaPublicJwk {
    type Error = Error;

    fn try_from(fields: &JwkFieldSet) -> Result<Self> {
        Self::from_fields(fields, &DefaultKeyFactory::default()).map(|(jwk, _)| jwk)
    }
}

/// Fails when `kty` is present and is not `RSA`. Returns whether it was present.
pub(crate) fn check_key_type<S: FieldSource + ?Sized>(fields: &S) -> Result<bool> {
    match fields.field(KEY_TYPE.id()) {
        None => Ok(false),
        Some(value) if value.as_str() == Some(RSA_KEY_TYPE) => Ok(true),
        Some(value) => Err(Error::unsupported(format!(
            "JWK {KEY_TYPE} value {value} is not supported, expected \"{RSA_KEY_TYPE}\""
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use num_traits::FromPrimitive;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> JwkFieldSet {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn from_key_writes_kty_n_e() {
        let key = RsaPublicKey::new(
            BigUint::from_u64(3233).unwrap(),
            BigUint::from_u64(65537).unwrap(),
        )
        .unwrap();
        let jwk = RsaPublicJwk::from_key(key);

        assert_eq!(
            serde_json::to_value(jwk.fields()).unwrap(),
            json!({ "kty": "RSA", "n": "DKE", "e": "AQAB" })
        );
    }

    #[test]
    fn from_fields_reports_consumed_names() {
        let set = fields(json!({ "n": "DKE", "e": "AQAB", "kid": "k1" }));
        let (jwk, consumed) = RsaPublicJwk::from_fields(&set, &DefaultKeyFactory::new()).unwrap();

        assert_eq!(consumed, ["n", "e"]);
        assert_eq!(jwk.key().n(), &BigUint::from_u64(3233).unwrap());
        assert_eq!(
            jwk.fields().names().collect::<Vec<_>>(),
            ["kty", "n", "e", "kid"]
        );

        let set = fields(json!({ "kty": "RSA", "n": "DKE", "e": "AQAB" }));
        let (_, consumed) = RsaPublicJwk::from_fields(&set, &DefaultKeyFactory::new()).unwrap();
        assert_eq!(consumed, ["kty", "n", "e"]);
    }

    #[test]
    fn from_fields_errors() {
        let missing = fields(json!({ "kty": "RSA", "n": "DKE" }));
        assert_eq!(
            RsaPublicJwk::try_from(&missing).unwrap_err().field(),
            Some("e")
        );

        let wrong_type = fields(json!({ "kty": "EC", "n": "DKE", "e": "AQAB" }));
        assert!(RsaPublicJwk::try_from(&wrong_type)
            .unwrap_err()
            .is_unsupported());

        // even modulus is rejected by the factory
        let even = fields(json!({ "kty": "RSA", "n": "DKA", "e": "AQAB" }));
        assert!(RsaPublicJwk::try_from(&even).unwrap_err().is_unsupported());
    }
}
