//! JWK parameter names for RSA keys ([RFC 7518 section 6.3]).
//!
//! [RFC 7518 section 6.3]: https://datatracker.ietf.org/doc/html/rfc7518#section-6.3

use core::fmt;

/// A named JWK parameter: its wire id and a human readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Param {
    id: &'static str,
    name: &'static str,
    secret: bool,
}

impl Param {
    const fn public(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            secret: false,
        }
    }

    const fn secret(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            secret: true,
        }
    }

    /// Wire name of the parameter, e.g. `dp`.
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Human readable name of the parameter, e.g. `First Factor CRT Exponent`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the parameter holds private key material.
    pub const fn is_secret(&self) -> bool {
        self.secret
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.id, self.name)
    }
}

/// `kty` value of RSA keys.
pub const RSA_KEY_TYPE: &str = "RSA";

/// `kty` (Key Type)
pub const KEY_TYPE: Param = Param::public("kty", "Key Type");
/// `n` (Modulus)
pub const MODULUS: Param = Param::public("n", "Modulus");
/// `e` (Public Exponent)
pub const PUBLIC_EXPONENT: Param = Param::public("e", "Public Exponent");

/// `d` (Private Exponent)
pub const PRIVATE_EXPONENT: Param = Param::secret("d", "Private Exponent");
/// `p` (First Prime Factor)
pub const FIRST_PRIME: Param = Param::secret("p", "First Prime Factor");
/// `q` (Second Prime Factor)
pub const SECOND_PRIME: Param = Param::secret("q", "Second Prime Factor");
/// `dp` (First Factor CRT Exponent)
pub const FIRST_CRT_EXPONENT: Param = Param::secret("dp", "First Factor CRT Exponent");
/// `dq` (Second Factor CRT Exponent)
pub const SECOND_CRT_EXPONENT: Param = Param::secret("dq", "Second Factor CRT Exponent");
/// `qi` (First CRT Coefficient)
pub const FIRST_CRT_COEFFICIENT: Param = Param::secret("qi", "First CRT Coefficient");
/// `oth` (Other Primes Info)
pub const OTHER_PRIMES_INFO: Param = Param::secret("oth", "Other Primes Info");

// Members of each `oth` element.
/// `r` (Prime Factor)
pub const PRIME_FACTOR: Param = Param::secret("r", "Prime Factor");
/// `d` (Factor CRT Exponent)
pub const FACTOR_CRT_EXPONENT: Param = Param::secret("d", "Factor CRT Exponent");
/// `t` (Factor CRT Coefficient)
pub const FACTOR_CRT_COEFFICIENT: Param = Param::secret("t", "Factor CRT Coefficient");

/// Parameters only present in private RSA JWKs.
pub const PRIVATE_PARAMS: [Param; 7] = [
    PRIVATE_EXPONENT,
    FIRST_PRIME,
    SECOND_PRIME,
    FIRST_CRT_EXPONENT,
    SECOND_CRT_EXPONENT,
    FIRST_CRT_COEFFICIENT,
    OTHER_PRIMES_INFO,
];

/// Private parameters which are all present or all absent.
pub const OPTIONAL_PRIVATE_PARAMS: [Param; 5] = [
    FIRST_PRIME,
    SECOND_PRIME,
    FIRST_CRT_EXPONENT,
    SECOND_CRT_EXPONENT,
    FIRST_CRT_COEFFICIENT,
];

/// Every top-level parameter of an RSA JWK.
pub const RSA_PARAMS: [Param; 10] = [
    KEY_TYPE,
    MODULUS,
    PUBLIC_EXPONENT,
    PRIVATE_EXPONENT,
    FIRST_PRIME,
    SECOND_PRIME,
    FIRST_CRT_EXPONENT,
    SECOND_CRT_EXPONENT,
    FIRST_CRT_COEFFICIENT,
    OTHER_PRIMES_INFO,
];

/// Whether `id` names a top-level parameter holding private key material.
pub(crate) fn is_private_id(id: &str) -> bool {
    RSA_PARAMS
        .iter()
        .any(|param| param.is_secret() && param.id() == id)
}
