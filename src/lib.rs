#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! Conversion between RSA private keys and their JSON Web Key form, as
//! described in [RFC 7518 section 6.3].
//!
//! A private RSA JWK holds the public values `n` and `e`, the private
//! exponent `d`, and optionally the CRT values `p`, `q`, `dp`, `dq`, `qi`
//! plus an `oth` list for keys with more than two primes. This crate maps
//! those fields to and from three native key shapes:
//!
//! - [`PrivateKeySpec::Plain`]: modulus and private exponent only
//! - [`PrivateKeySpec::Crt`]: two primes with CRT values
//! - [`PrivateKeySpec::MultiPrimeCrt`]: additional primes in `oth`
//!
//! Native keys are built by a [`KeyFactory`]. The [`DefaultKeyFactory`]
//! checks every key for internal consistency before accepting it.
//!
//! # Usage
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use rsa_jwk::{JwkFieldSet, RsaPrivateJwk, RsaPrivateKey};
//!
//! let mut rng = ChaCha8Rng::from_seed([42; 32]);
//! let private_key = RsaPrivateKey::new(&mut rng, 1024)?;
//!
//! // Key -> JWK
//! let jwk = RsaPrivateJwk::try_from(private_key.clone())?;
//! let json = serde_json::to_string(jwk.fields())?;
//! assert!(json.starts_with(r#"{"kty":"RSA","n":"#));
//!
//! // JWK -> key
//! let fields: JwkFieldSet = serde_json::from_str(&json)?;
//! let parsed = RsaPrivateJwk::try_from(&fields)?;
//! assert_eq!(parsed.key(), &private_key);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Missing CRT values
//!
//! If any of `p`, `q`, `dp`, `dq` or `qi` is present, all of them must be:
//!
//! ```
//! use rsa_jwk::{JwkFieldSet, RsaPrivateJwk};
//!
//! let fields: JwkFieldSet = serde_json::from_str(
//!     r#"{"kty":"RSA","n":"DKE","e":"EQ","d":"AZ0","dq":"MQ"}"#,
//! )?;
//! let err = RsaPrivateJwk::try_from(&fields).unwrap_err();
//! assert_eq!(err.field(), Some("p"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [RFC 7518 section 6.3]: https://datatracker.ietf.org/doc/html/rfc7518#section-6.3

extern crate alloc;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod errors;
pub mod factory;
pub mod jwk;
pub mod traits;

mod key;

pub use crate::{
    errors::{Error, Result},
    factory::{DefaultKeyFactory, KeyFactory},
    jwk::{JwkFieldSet, RsaPrivateJwk, RsaPublicJwk},
    key::{CrtParams, KeyShape, OtherPrimeInfo, PrivateKeySpec, RsaPrivateKey, RsaPublicKey},
    traits::{PrivateKeyParts, PublicKeyParts},
};
