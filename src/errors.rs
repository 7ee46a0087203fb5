//! Error types.

use alloc::string::String;

/// Alias for [`core::result::Result`] with the `rsa-jwk` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The native key or the requested key specification shape cannot be handled.
    #[error("unsupported RSA key: {reason}")]
    UnsupportedKeyShape {
        /// Description of the offending key or shape.
        reason: String,
    },

    /// A JWK field is absent, has the wrong JSON type, or does not decode.
    #[error("malformed RSA JWK '{field}' value: {reason}")]
    MalformedField {
        /// Wire name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Number of primes must be 2 or greater.
    #[error("nprimes must be >= 2")]
    NprimesTooSmall,

    /// Too few primes of a given length to generate an RSA key.
    #[error("too few primes of given length to generate an RSA key")]
    TooFewPrimes,

    /// Invalid prime value.
    #[error("invalid prime value")]
    InvalidPrime,

    /// Invalid modulus.
    #[error("invalid modulus")]
    InvalidModulus,

    /// Invalid exponent.
    #[error("invalid exponent")]
    InvalidExponent,

    /// Invalid coefficient.
    #[error("invalid coefficient")]
    InvalidCoefficient,

    /// Modulus too large.
    #[error("modulus too large")]
    ModulusTooLarge,

    /// Public exponent too small.
    #[error("public exponent too small")]
    PublicExponentTooSmall,

    /// Public exponent too large.
    #[error("public exponent too large")]
    PublicExponentTooLarge,
}

impl Error {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Error::UnsupportedKeyShape {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`Error::MalformedField`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedField { .. })
    }

    /// Returns `true` for [`Error::UnsupportedKeyShape`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::UnsupportedKeyShape { .. })
    }

    /// Wire name of the offending field, for [`Error::MalformedField`].
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::MalformedField { field, .. } => Some(field),
            _ => None,
        }
    }
}
