//! JSON Web Key encoding of RSA keys ([RFC 7518 section 6.3]).
//!
//! [`RsaPrivateJwk::from_key`] turns a native [`RsaPrivateKey`] into its JWK
//! fields, and [`RsaPrivateJwk::from_fields`] validates JWK fields and builds
//! the native key back through a [`KeyFactory`]. Both carry the public half
//! as an [`RsaPublicJwk`].
//!
//! [RFC 7518 section 6.3]: https://datatracker.ietf.org/doc/html/rfc7518#section-6.3
//! [`RsaPrivateKey`]: crate::RsaPrivateKey
//! [`KeyFactory`]: crate::KeyFactory

mod codec;
mod field_set;
mod other_prime;
pub mod params;
mod private;
mod public;

pub use codec::{decode_uint, encode_uint};
pub use field_set::{required_uint, FieldSource, JwkFieldSet};
pub use private::{public_exponent, RsaPrivateJwk};
pub use public::RsaPublicJwk;
