//! Construction of native RSA keys from their numeric specification.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::Zeroizing;

use crate::algorithms::crt::{compute_crt_params, compute_modulus};
use crate::errors::{Error, Result};
use crate::key::{
    check_modulus, check_public_with_max_size, CrtParams, OtherPrimeInfo, PrivateKeySpec,
    RsaPrivateKey, RsaPublicKey,
};

/// Builds native RSA keys out of fully populated numeric specifications.
///
/// The JWK conversions in [`crate::jwk`] never construct keys on their own;
/// every key they hand out went through one of these methods. Implementations
/// are expected to be usable from several threads at once.
pub trait KeyFactory {
    /// Builds a public key from its modulus and public exponent.
    fn public_key(&self, n: BigUint, e: BigUint) -> Result<RsaPublicKey>;

    /// Builds a private key from one of the supported specification shapes.
    fn private_key(&self, spec: PrivateKeySpec) -> Result<RsaPrivateKey>;
}

impl<F: KeyFactory + ?Sized> KeyFactory for &F {
    fn public_key(&self, n: BigUint, e: BigUint) -> Result<RsaPublicKey> {
        (**self).public_key(n, e)
    }

    fn private_key(&self, spec: PrivateKeySpec) -> Result<RsaPrivateKey> {
        (**self).private_key(spec)
    }
}

/// [`KeyFactory`] which checks every specification for internal consistency
/// before accepting it.
///
/// Public keys are checked for modulus size and public exponent bounds.
/// Keys with CRT values are checked against their primes: the primes must
/// multiply to the modulus, and every CRT exponent and coefficient must match
/// the value recomputed from the private exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultKeyFactory {
    max_size: usize,
}

impl Default for DefaultKeyFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultKeyFactory {
    /// Factory accepting moduli up to [`RsaPublicKey::MAX_SIZE`] bits.
    pub const fn new() -> Self {
        Self {
            max_size: RsaPublicKey::MAX_SIZE,
        }
    }

    /// Sets the largest accepted modulus size, in bits.
    pub const fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Largest accepted modulus size, in bits.
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    fn validate(&self, spec: &PrivateKeySpec) -> Result<()> {
        match spec {
            PrivateKeySpec::Plain { n, d } => {
                check_modulus(n, self.max_size)?;
                if d.is_zero() || d >= n {
                    return Err(Error::InvalidExponent);
                }
                Ok(())
            }
            PrivateKeySpec::Crt { n, e, d, crt } => {
                check_public_with_max_size(n, e, self.max_size)?;
                validate_crt(n, e, d, crt, &[])
            }
            PrivateKeySpec::MultiPrimeCrt {
                n,
                e,
                d,
                crt,
                other_primes,
            } => {
                if other_primes.is_empty() {
                    return Err(Error::unsupported(
                        "multi-prime CRT key without other primes, use the two-prime CRT shape",
                    ));
                }
                check_public_with_max_size(n, e, self.max_size)?;
                validate_crt(n, e, d, crt, other_primes)
            }
        }
    }
}

impl KeyFactory for DefaultKeyFactory {
    fn public_key(&self, n: BigUint, e: BigUint) -> Result<RsaPublicKey> {
        RsaPublicKey::new_with_max_size(n, e, self.max_size)
    }

    fn private_key(&self, spec: PrivateKeySpec) -> Result<RsaPrivateKey> {
        self.validate(&spec)?;
        Ok(RsaPrivateKey::from_validated_spec(spec))
    }
}

/// Checks the primes and CRT values of a key against its modulus and exponents.
fn validate_crt(
    n: &BigUint,
    e: &BigUint,
    d: &BigUint,
    crt: &CrtParams,
    other_primes: &[OtherPrimeInfo],
) -> Result<()> {
    let mut primes = Zeroizing::new(vec![crt.p.clone(), crt.q.clone()]);
    primes.extend(other_primes.iter().map(|info| info.prime.clone()));

    // Any primes ≤ 1 will cause divide-by-zero panics later.
    if primes.iter().any(|prime| *prime <= BigUint::one()) {
        return Err(Error::InvalidPrime);
    }

    // Check that Πprimes == n.
    if compute_modulus(primes.iter()) != *n {
        return Err(Error::InvalidModulus);
    }

    // Check that de ≡ 1 mod p-1, for each prime.
    // This implies that e is coprime to each p-1 as e has a multiplicative
    // inverse. Therefore e is coprime to lcm(p-1,q-1,r-1,...) =
    // exponent(ℤ/nℤ). It also implies that a^de ≡ a mod p as a^(p-1) ≡ 1
    // mod p. Thus a^de ≡ a mod n for all a coprime to n, as required.
    let de = Zeroizing::new(e * d);
    for prime in primes.iter() {
        let congruence: BigUint = &*de % (prime - BigUint::one());
        if !congruence.is_one() {
            return Err(Error::InvalidExponent);
        }
    }

    let (expected, expected_others) = compute_crt_params(d, &primes)?;

    if expected.dp != crt.dp || expected.dq != crt.dq {
        return Err(Error::InvalidExponent);
    }
    if expected.qi != crt.qi {
        return Err(Error::InvalidCoefficient);
    }

    for (expected, actual) in expected_others.iter().zip(other_primes) {
        if expected.exponent != actual.exponent {
            return Err(Error::InvalidExponent);
        }
        if expected.coefficient != actual.coefficient {
            return Err(Error::InvalidCoefficient);
        }
    }

    Ok(())
}
