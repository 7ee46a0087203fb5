//! Private RSA JWKs ([RFC 7518 section 6.3.2]).
//!
//! [RFC 7518 section 6.3.2]: https://datatracker.ietf.org/doc/html/rfc7518#section-6.3.2

use core::mem;
use num_bigint::BigUint;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::field_set::{required_uint, FieldSource, JwkFieldSet};
use super::other_prime::{other_primes_from_value, other_primes_to_value};
use super::params::{
    FIRST_CRT_COEFFICIENT, FIRST_CRT_EXPONENT, FIRST_PRIME, OPTIONAL_PRIVATE_PARAMS,
    OTHER_PRIMES_INFO, PRIVATE_EXPONENT, PRIVATE_PARAMS, SECOND_CRT_EXPONENT, SECOND_PRIME,
};
use super::public::{check_key_type, RsaPublicJwk};
use crate::errors::{Error, Result};
use crate::factory::{DefaultKeyFactory, KeyFactory};
use crate::key::{CrtParams, PrivateKeySpec, RsaPrivateKey, RsaPublicKey};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// An RSA private key together with its JWK fields and its public half.
///
/// Private RSA JWKs always carry the public values `n` and `e` as well, so a
/// private JWK can only be built from a key whose public exponent is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateJwk {
    fields: JwkFieldSet,
    key: RsaPrivateKey,
    public: RsaPublicJwk,
}

impl RsaPrivateJwk {
    /// Whether `fields` looks like a private RSA JWK: `d` is present and
    /// `kty`, if present, is `RSA`.
    pub fn supports(fields: &JwkFieldSet) -> bool {
        let supported = fields.has_field(PRIVATE_EXPONENT.id()) && check_key_type(fields).is_ok();
        trace!(fields = %fields.describe(), supported, "private RSA JWK gate");
        supported
    }

    /// Encodes `key` as a private JWK.
    ///
    /// `public_key` is required for keys in the [`PrivateKeySpec::Plain`]
    /// shape, which do not carry their public exponent. For the CRT shapes it
    /// is derived when not given. An explicit `public_key` must have the same
    /// modulus as `key`.
    pub fn from_key<F: KeyFactory + ?Sized>(
        key: RsaPrivateKey,
        public_key: Option<RsaPublicKey>,
        factory: &F,
    ) -> Result<Self> {
        let public_key = match public_key {
            Some(public_key) if public_key.n() != key.n() => {
                return Err(Error::unsupported(format!(
                    "the public key modulus does not match the modulus of the {} RSA private key",
                    key.shape()
                )))
            }
            Some(public_key) => public_key,
            None => derive_public_key(&key, factory)?,
        };

        let public = RsaPublicJwk::from_key(public_key);

        let mut fields = public.fields().clone();
        fields.put_uint(&PRIVATE_EXPONENT, key.d());

        match key.spec() {
            PrivateKeySpec::Plain { .. } => {}
            PrivateKeySpec::Crt { crt, .. } => put_crt_params(&mut fields, crt),
            PrivateKeySpec::MultiPrimeCrt {
                crt, other_primes, ..
            } => {
                put_crt_params(&mut fields, crt);
                if !other_primes.is_empty() {
                    fields.put(&OTHER_PRIMES_INFO, other_primes_to_value(other_primes));
                }
            }
        }

        debug!(shape = %key.shape(), fields = %fields.describe(), "encoded RSA private JWK");

        Ok(Self {
            fields,
            key,
            public,
        })
    }

    /// Decodes a private JWK and builds its key with `factory`.
    ///
    /// `d`, `n` and `e` are required. `p`, `q`, `dp`, `dq` and `qi` are all
    /// present or all absent; `oth` is only read when they are present.
    pub fn from_fields<F: KeyFactory + ?Sized>(fields: &JwkFieldSet, factory: &F) -> Result<Self> {
        let mut d = Zeroizing::new(required_uint(fields, &PRIVATE_EXPONENT)?);

        let (public, _) = RsaPublicJwk::from_fields(&fields.without(&PRIVATE_PARAMS), factory)?;
        let n = public.key().n().clone();
        let e = public.key().e().clone();

        let has_crt = OPTIONAL_PRIVATE_PARAMS
            .iter()
            .any(|param| fields.has_field(param.id()));

        let spec = if has_crt {
            let mut crt = CrtParams::default();
            crt.p = required_uint(fields, &FIRST_PRIME)?;
            crt.q = required_uint(fields, &SECOND_PRIME)?;
            crt.dp = required_uint(fields, &FIRST_CRT_EXPONENT)?;
            crt.dq = required_uint(fields, &SECOND_CRT_EXPONENT)?;
            crt.qi = required_uint(fields, &FIRST_CRT_COEFFICIENT)?;

            match fields.field(OTHER_PRIMES_INFO.id()) {
                Some(value) => PrivateKeySpec::MultiPrimeCrt {
                    other_primes: other_primes_from_value(value)?,
                    n,
                    e,
                    d: mem::take(&mut *d),
                    crt,
                },
                None => PrivateKeySpec::Crt {
                    n,
                    e,
                    d: mem::take(&mut *d),
                    crt,
                },
            }
        } else {
            if fields.has_field(OTHER_PRIMES_INFO.id()) {
                debug!("ignoring RSA JWK 'oth' without first and second prime CRT values");
            }
            PrivateKeySpec::Plain {
                n,
                d: mem::take(&mut *d),
            }
        };

        let shape = spec.shape();
        let key = factory.private_key(spec).map_err(|err| match err {
            Error::UnsupportedKeyShape { .. } => err,
            err => Error::unsupported(format!(
                "unable to create {shape} RSA private key from JWK {}: {err}",
                fields.describe()
            )),
        })?;

        let mut out = fields.clone();
        out.extend(public.fields());

        debug!(%shape, fields = %out.describe(), "decoded RSA private JWK");

        Ok(Self {
            fields: out,
            key,
            public,
        })
    }

    /// The JWK fields of this key, public values included.
    pub fn fields(&self) -> &JwkFieldSet {
        &self.fields
    }

    /// The private key.
    pub fn key(&self) -> &RsaPrivateKey {
        &self.key
    }

    /// The public half, with its own JWK fields.
    pub fn public_jwk(&self) -> &RsaPublicJwk {
        &self.public
    }

    /// Splits into the JWK fields, the private key and the public half.
    pub fn into_parts(self) -> (JwkFieldSet, RsaPrivateKey, RsaPublicJwk) {
        (self.fields, self.key, self.public)
    }
}

impl TryFrom<RsaPrivateKey> for RsaPrivateJwk {
    type Error = Error;

    fn try_from(key: RsaPrivateKey) -> Result<Self> {
        Self::from_key(key, None, &DefaultKeyFactory::default())
    }
}

impl TryFrom<(RsaPrivateKey, RsaPublicKey)> for RsaPrivateJwk {
    type Error = Error;

    fn try_from((key, public_key): (RsaPrivateKey, RsaPublicKey)) -> Result<Self> {
        Self::from_key(key, Some(public_key), &DefaultKeyFactory::default())
    }
}

impl TryFrom<&JwkFieldSet> for RsaPrivateJwk {
    type Error = Error;

    fn try_from(fields: &JwkFieldSet) -> Result<Self> {
        Self::from_fields(fields, &DefaultKeyFactory::default())
    }
}

/// Returns the public exponent carried by `key`.
///
/// Only the CRT shapes carry it; plain keys need their public key supplied
/// separately.
pub fn public_exponent(key: &RsaPrivateKey) -> Result<&BigUint> {
    key.public_exponent().ok_or_else(|| {
        Error::unsupported(format!(
            "unable to derive an RSA public key from a {} RSA private key. Supported keys have the \
             PrivateKeySpec::Crt or PrivateKeySpec::MultiPrimeCrt shape. If the private key cannot \
             have one of these two shapes, you must explicitly provide an RsaPublicKey in addition \
             to the RsaPrivateKey, as the [JWA RFC, Section 6.3.2]\
             (https://datatracker.ietf.org/doc/html/rfc7518#section-6.3.2) requires public values \
             to be present in private RSA JWKs.",
            key.shape()
        ))
    })
}

fn derive_public_key<F: KeyFactory + ?Sized>(
    key: &RsaPrivateKey,
    factory: &F,
) -> Result<RsaPublicKey> {
    let e = public_exponent(key)?.clone();
    factory.public_key(key.n().clone(), e).map_err(|err| {
        Error::unsupported(format!(
            "unable to derive an RSA public key from a {} RSA private key: {err}",
            key.shape()
        ))
    })
}

fn put_crt_params(fields: &mut JwkFieldSet, crt: &CrtParams) {
    fields.put_uint(&FIRST_PRIME, &crt.p);
    fields.put_uint(&SECOND_PRIME, &crt.q);
    fields.put_uint(&FIRST_CRT_EXPONENT, &crt.dp);
    fields.put_uint(&SECOND_CRT_EXPONENT, &crt.dq);
    fields.put_uint(&FIRST_CRT_COEFFICIENT, &crt.qi);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{KeyShape, OtherPrimeInfo};
    use num_traits::FromPrimitive;
    use serde_json::json;

    fn uint(v: u64) -> BigUint {
        BigUint::from_u64(v).unwrap()
    }

    fn fields(value: serde_json::Value) -> JwkFieldSet {
        serde_json::from_value(value).unwrap()
    }

    // p = 61, q = 53, e = 17, d = 413
    fn small_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(uint(3233), uint(17), uint(413), vec![uint(61), uint(53)])
            .unwrap()
    }

    // 11 * 13 * 17 = 2431, e = 7, d = 103
    fn small_multi_prime_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(
            uint(2431),
            uint(7),
            uint(103),
            vec![uint(11), uint(13), uint(17)],
        )
        .unwrap()
    }

    #[test]
    fn encodes_two_prime_key() {
        let jwk = RsaPrivateJwk::try_from(small_key()).unwrap();

        assert_eq!(
            serde_json::to_value(jwk.fields()).unwrap(),
            json!({
                "kty": "RSA",
                "n": "DKE",
                "e": "EQ",
                "d": "AZ0",
                "p": "PQ",
                "q": "NQ",
                "dp": "NQ",
                "dq": "MQ",
                "qi": "Jg",
            })
        );
        assert_eq!(
            jwk.public_jwk().fields().names().collect::<Vec<_>>(),
            ["kty", "n", "e"]
        );
    }

    #[test]
    fn encodes_multi_prime_key() {
        let jwk = RsaPrivateJwk::try_from(small_multi_prime_key()).unwrap();

        assert_eq!(
            jwk.fields().names().collect::<Vec<_>>(),
            ["kty", "n", "e", "d", "p", "q", "dp", "dq", "qi", "oth"]
        );
        assert_eq!(
            jwk.fields().get("oth").unwrap(),
            &json!([{ "r": "EQ", "d": "Bw", "t": "BQ" }])
        );
    }

    #[test]
    fn empty_other_primes_are_rejected() {
        let mut set = RsaPrivateJwk::try_from(small_key())
            .unwrap()
            .fields()
            .clone();
        set.insert("oth", json!([]));

        let err = RsaPrivateJwk::try_from(&set).unwrap_err();
        assert_eq!(err.field(), Some("oth"));

        let spec = PrivateKeySpec::MultiPrimeCrt {
            n: uint(3233),
            e: uint(17),
            d: uint(413),
            crt: CrtParams::new(uint(61), uint(53), uint(53), uint(49), uint(38)),
            other_primes: Vec::<OtherPrimeInfo>::new(),
        };
        assert!(RsaPrivateKey::from_spec(spec).unwrap_err().is_unsupported());
    }

    #[test]
    fn plain_key_needs_public_key() {
        let plain = RsaPrivateKey::from_spec(PrivateKeySpec::Plain {
            n: uint(3233),
            d: uint(413),
        })
        .unwrap();

        let err = RsaPrivateJwk::try_from(plain.clone()).unwrap_err();
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("rfc7518#section-6.3.2"));

        let public = RsaPublicKey::new(uint(3233), uint(17)).unwrap();
        let jwk = RsaPrivateJwk::try_from((plain, public)).unwrap();
        assert_eq!(
            jwk.fields().names().collect::<Vec<_>>(),
            ["kty", "n", "e", "d"]
        );
    }

    #[test]
    fn mismatched_public_key() {
        let public = RsaPublicKey::new(uint(2431), uint(7)).unwrap();
        let err = RsaPrivateJwk::try_from((small_key(), public)).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn decodes_each_shape() {
        let jwk = RsaPrivateJwk::try_from(small_multi_prime_key()).unwrap();
        let decoded = RsaPrivateJwk::try_from(jwk.fields()).unwrap();
        assert_eq!(decoded.key().shape(), KeyShape::MultiPrimeCrt);
        assert_eq!(decoded.key(), jwk.key());

        let jwk = RsaPrivateJwk::try_from(small_key()).unwrap();
        let decoded = RsaPrivateJwk::try_from(jwk.fields()).unwrap();
        assert_eq!(decoded.key().shape(), KeyShape::Crt);
        assert_eq!(decoded, jwk);

        let plain = fields(json!({ "kty": "RSA", "n": "DKE", "e": "EQ", "d": "AZ0" }));
        let decoded = RsaPrivateJwk::try_from(&plain).unwrap();
        assert_eq!(decoded.key().shape(), KeyShape::Plain);
        assert_eq!(decoded.public_jwk().key().e(), &uint(17));
    }

    #[test]
    fn decoded_fields_gain_kty() {
        let set = fields(json!({ "n": "DKE", "e": "EQ", "d": "AZ0", "kid": "k1" }));
        let decoded = RsaPrivateJwk::try_from(&set).unwrap();

        assert_eq!(
            decoded.fields().names().collect::<Vec<_>>(),
            ["n", "e", "d", "kid", "kty"]
        );
    }

    #[test]
    fn lenient_oth_without_crt_values() {
        let set = fields(json!({
            "kty": "RSA", "n": "DKE", "e": "EQ", "d": "AZ0",
            "oth": [{ "r": "EQ", "d": "Bw", "t": "BQ" }],
        }));
        let decoded = RsaPrivateJwk::try_from(&set).unwrap();
        assert_eq!(decoded.key().shape(), KeyShape::Plain);
        assert!(decoded.key().other_primes().is_empty());
    }

    #[test]
    fn factory_errors_are_wrapped() {
        // qi is wrong for p = 61, q = 53
        let set = fields(json!({
            "kty": "RSA", "n": "DKE", "e": "EQ", "d": "AZ0",
            "p": "PQ", "q": "NQ", "dp": "NQ", "dq": "MQ", "qi": "JQ",
        }));
        let err = RsaPrivateJwk::try_from(&set).unwrap_err();

        assert!(err.is_unsupported());
        let message = err.to_string();
        assert!(message.contains("two-prime CRT"));
        assert!(message.contains("invalid coefficient"));
        assert!(!message.contains("PQ"));
    }

    #[test]
    fn debug_hides_private_values() {
        let jwk = RsaPrivateJwk::try_from(small_key()).unwrap();
        let debug = format!("{jwk:?}");

        // d = 413 encodes as "AZ0", p = 61 as "PQ"
        assert!(!debug.contains("AZ0"));
        assert!(!debug.contains("PQ"));
        assert!(!debug.contains("413"));
        assert!(debug.contains("\"d\": <redacted>"));
        assert!(debug.contains("d: <redacted>"));
    }

    #[test]
    fn gate() {
        assert!(RsaPrivateJwk::supports(&fields(json!({ "d": "AZ0" }))));
        assert!(RsaPrivateJwk::supports(&fields(
            json!({ "kty": "RSA", "d": "AZ0" })
        )));
        assert!(!RsaPrivateJwk::supports(&fields(
            json!({ "kty": "RSA", "n": "DKE", "e": "EQ" })
        )));
        assert!(!RsaPrivateJwk::supports(&fields(
            json!({ "kty": "oct", "d": "AZ0" })
        )));
    }
}
