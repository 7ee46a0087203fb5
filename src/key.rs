//! Native RSA key material.

use alloc::vec::Vec;
use core::fmt;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::algorithms::crt::compute_crt_params;
use crate::algorithms::generate::generate_multi_prime_key_with_exp;
use crate::errors::{Error, Result};
use crate::factory::{DefaultKeyFactory, KeyFactory};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    ///
    /// Typically 0x10001 (65537)
    e: BigUint,
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Minimum value of the public exponent `e`.
    pub const MIN_PUB_EXPONENT: u64 = 2;

    /// Maximum value of the public exponent `e`.
    pub const MAX_PUB_EXPONENT: u64 = (1 << 33) - 1;

    /// Maximum size of the modulus `n` in bits.
    pub const MAX_SIZE: usize = 4096;

    /// Create a new public key from its components.
    ///
    /// This function accepts public keys with a modulus size up to 4096-bits,
    /// i.e. [`RsaPublicKey::MAX_SIZE`].
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        Self::new_with_max_size(n, e, Self::MAX_SIZE)
    }

    /// Create a new public key from its components.
    pub fn new_with_max_size(n: BigUint, e: BigUint, max_size: usize) -> Result<Self> {
        check_public_with_max_size(&n, &e, max_size)?;
        Ok(Self { n, e })
    }

    /// Create a new public key, bypassing checks around the modulus and
    /// public exponent size.
    ///
    /// This method is not recommended, and only intended for unusual use cases.
    /// Most applications should use [`RsaPublicKey::new`] or
    /// [`RsaPublicKey::new_with_max_size`] instead.
    pub fn new_unchecked(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }
}

/// Check that the public key is well formed and has an exponent within acceptable bounds.
#[inline]
pub(crate) fn check_public_with_max_size(n: &BigUint, e: &BigUint, max_size: usize) -> Result<()> {
    check_modulus(n, max_size)?;

    let e = e.to_u64().ok_or(Error::PublicExponentTooLarge)?;

    if e < RsaPublicKey::MIN_PUB_EXPONENT {
        return Err(Error::PublicExponentTooSmall);
    }

    if e > RsaPublicKey::MAX_PUB_EXPONENT {
        return Err(Error::PublicExponentTooLarge);
    }

    Ok(())
}

#[inline]
pub(crate) fn check_modulus(n: &BigUint, max_size: usize) -> Result<()> {
    if n.bits() > max_size {
        return Err(Error::ModulusTooLarge);
    }

    if *n < BigUint::from(3u8) || n.is_even() {
        return Err(Error::InvalidModulus);
    }

    Ok(())
}

/// First two prime factors of the modulus together with their CRT values.
///
/// The [`Debug`](fmt::Debug) output shows none of the values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CrtParams {
    /// First prime factor.
    pub p: BigUint,
    /// Second prime factor.
    pub q: BigUint,
    /// D mod (P-1)
    pub dp: BigUint,
    /// D mod (Q-1)
    pub dq: BigUint,
    /// Q^-1 mod P
    pub qi: BigUint,
}

impl CrtParams {
    /// Groups the five CRT values of a two-prime key.
    pub fn new(p: BigUint, q: BigUint, dp: BigUint, dq: BigUint, qi: BigUint) -> Self {
        Self { p, q, dp, dq, qi }
    }
}

impl fmt::Debug for CrtParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrtParams").finish_non_exhaustive()
    }
}

impl Zeroize for CrtParams {
    fn zeroize(&mut self) {
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qi.zeroize();
    }
}

impl Drop for CrtParams {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// CRT values of the third and subsequent primes of a multi-prime key.
#[derive(Clone, PartialEq, Eq)]
pub struct OtherPrimeInfo {
    /// The prime factor `r_i`.
    pub prime: BigUint,
    /// D mod (r_i - 1)
    pub exponent: BigUint,
    /// R·Coeff ≡ 1 mod r_i, where R is the product of all primes prior to this one.
    pub coefficient: BigUint,
}

impl OtherPrimeInfo {
    /// Groups one extra prime with its CRT exponent and coefficient.
    pub fn new(prime: BigUint, exponent: BigUint, coefficient: BigUint) -> Self {
        Self {
            prime,
            exponent,
            coefficient,
        }
    }
}

impl fmt::Debug for OtherPrimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtherPrimeInfo").finish_non_exhaustive()
    }
}

impl Zeroize for OtherPrimeInfo {
    fn zeroize(&mut self) {
        self.prime.zeroize();
        self.exponent.zeroize();
        self.coefficient.zeroize();
    }
}

impl Drop for OtherPrimeInfo {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Shape of an RSA private key, without its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyShape {
    /// Modulus and private exponent only.
    Plain,
    /// Two primes with CRT values.
    Crt,
    /// Two primes with CRT values plus a list of other primes.
    MultiPrimeCrt,
}

impl fmt::Display for KeyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyShape::Plain => "plain",
            KeyShape::Crt => "two-prime CRT",
            KeyShape::MultiPrimeCrt => "multi-prime CRT",
        })
    }
}

/// Numeric specification of an RSA private key, handed to a [`KeyFactory`].
///
/// Secret values are zeroized on drop and left out of the
/// [`Debug`](fmt::Debug) output.
#[derive(Clone, PartialEq, Eq)]
pub enum PrivateKeySpec {
    /// Modulus and private exponent only. Carries no public exponent.
    Plain {
        /// Modulus
        n: BigUint,
        /// Private exponent
        d: BigUint,
    },
    /// Two-prime key with CRT values.
    Crt {
        /// Modulus
        n: BigUint,
        /// Public exponent
        e: BigUint,
        /// Private exponent
        d: BigUint,
        /// First two primes and their CRT values
        crt: CrtParams,
    },
    /// Key with more than two primes.
    MultiPrimeCrt {
        /// Modulus
        n: BigUint,
        /// Public exponent
        e: BigUint,
        /// Private exponent
        d: BigUint,
        /// First two primes and their CRT values
        crt: CrtParams,
        /// Third and subsequent primes, in order.
        other_primes: Vec<OtherPrimeInfo>,
    },
}

impl PrivateKeySpec {
    /// Returns the shape of this specification.
    pub fn shape(&self) -> KeyShape {
        match self {
            PrivateKeySpec::Plain { .. } => KeyShape::Plain,
            PrivateKeySpec::Crt { .. } => KeyShape::Crt,
            PrivateKeySpec::MultiPrimeCrt { .. } => KeyShape::MultiPrimeCrt,
        }
    }
}

struct Redacted;

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Debug for PrivateKeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivateKeySpec::Plain { n, .. } => f
                .debug_struct("Plain")
                .field("n", n)
                .field("d", &Redacted)
                .finish(),
            PrivateKeySpec::Crt { n, e, crt, .. } => f
                .debug_struct("Crt")
                .field("n", n)
                .field("e", e)
                .field("d", &Redacted)
                .field("crt", crt)
                .finish(),
            PrivateKeySpec::MultiPrimeCrt {
                n,
                e,
                crt,
                other_primes,
                ..
            } => f
                .debug_struct("MultiPrimeCrt")
                .field("n", n)
                .field("e", e)
                .field("d", &Redacted)
                .field("crt", crt)
                .field("other_primes", other_primes)
                .finish(),
        }
    }
}

impl Zeroize for PrivateKeySpec {
    fn zeroize(&mut self) {
        match self {
            PrivateKeySpec::Plain { d, .. } => d.zeroize(),
            PrivateKeySpec::Crt { d, crt, .. } => {
                d.zeroize();
                crt.zeroize();
            }
            PrivateKeySpec::MultiPrimeCrt {
                d,
                crt,
                other_primes,
                ..
            } => {
                d.zeroize();
                crt.zeroize();
                for info in other_primes.iter_mut() {
                    info.zeroize();
                }
                other_primes.clear();
            }
        }
    }
}

impl Drop for PrivateKeySpec {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Represents a whole RSA private key, as accepted by a [`KeyFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    spec: PrivateKeySpec,
}

impl PrivateKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        match &self.spec {
            PrivateKeySpec::Plain { n, .. }
            | PrivateKeySpec::Crt { n, .. }
            | PrivateKeySpec::MultiPrimeCrt { n, .. } => n,
        }
    }

    fn d(&self) -> &BigUint {
        match &self.spec {
            PrivateKeySpec::Plain { d, .. }
            | PrivateKeySpec::Crt { d, .. }
            | PrivateKeySpec::MultiPrimeCrt { d, .. } => d,
        }
    }

    fn public_exponent(&self) -> Option<&BigUint> {
        match &self.spec {
            PrivateKeySpec::Plain { .. } => None,
            PrivateKeySpec::Crt { e, .. } | PrivateKeySpec::MultiPrimeCrt { e, .. } => Some(e),
        }
    }

    fn crt(&self) -> Option<&CrtParams> {
        match &self.spec {
            PrivateKeySpec::Plain { .. } => None,
            PrivateKeySpec::Crt { crt, .. } | PrivateKeySpec::MultiPrimeCrt { crt, .. } => {
                Some(crt)
            }
        }
    }

    fn other_primes(&self) -> &[OtherPrimeInfo] {
        match &self.spec {
            PrivateKeySpec::MultiPrimeCrt { other_primes, .. } => other_primes,
            _ => &[],
        }
    }
}

impl RsaPrivateKey {
    /// Default exponent for RSA keys.
    const EXP: u64 = 65537;

    /// Generate a new Rsa key pair of the given bit size using the passed in `rng`.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new_multi_prime(rng, 2, bit_size)
    }

    /// Generate a new RSA key pair of the given bit size and the public exponent
    /// using the passed in `rng`.
    ///
    /// Unless you have specific needs, you should use `RsaPrivateKey::new` instead.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: &BigUint,
    ) -> Result<RsaPrivateKey> {
        let components = generate_multi_prime_key_with_exp(rng, 2, bit_size, exp)?;
        RsaPrivateKey::from_components(
            components.n,
            components.e,
            components.d,
            components.primes,
        )
    }

    /// Generate a new multi-prime RSA key of the given bit size, with the
    /// default public exponent.
    ///
    /// Keys with more than two primes come out in the
    /// [`PrivateKeySpec::MultiPrimeCrt`] shape.
    pub fn new_multi_prime<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        nprimes: usize,
        bit_size: usize,
    ) -> Result<RsaPrivateKey> {
        let exp = BigUint::from(Self::EXP);
        let components = generate_multi_prime_key_with_exp(rng, nprimes, bit_size, &exp)?;
        RsaPrivateKey::from_components(
            components.n,
            components.e,
            components.d,
            components.primes,
        )
    }

    /// Constructs an RSA key pair from individual components, computing the
    /// CRT values of every prime.
    ///
    /// - `n`: RSA modulus
    /// - `e`: public exponent (i.e. encrypting exponent)
    /// - `d`: private exponent (i.e. decrypting exponent)
    /// - `primes`: prime factors of `n`, at least two
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        primes: Vec<BigUint>,
    ) -> Result<RsaPrivateKey> {
        let (crt, other_primes) = compute_crt_params(&d, &primes)?;

        let spec = if other_primes.is_empty() {
            PrivateKeySpec::Crt { n, e, d, crt }
        } else {
            PrivateKeySpec::MultiPrimeCrt {
                n,
                e,
                d,
                crt,
                other_primes,
            }
        };

        DefaultKeyFactory::default().private_key(spec)
    }

    /// Validates `spec` with the [`DefaultKeyFactory`] and wraps it.
    pub fn from_spec(spec: PrivateKeySpec) -> Result<RsaPrivateKey> {
        DefaultKeyFactory::default().private_key(spec)
    }

    /// Wraps a specification that a [`KeyFactory`] has already accepted.
    ///
    /// No validation is performed here, this is meant for `KeyFactory`
    /// implementations.
    pub fn from_validated_spec(spec: PrivateKeySpec) -> RsaPrivateKey {
        RsaPrivateKey { spec }
    }

    /// Returns the numeric specification of this key.
    pub fn spec(&self) -> &PrivateKeySpec {
        &self.spec
    }

    /// Returns the shape of this key.
    pub fn shape(&self) -> KeyShape {
        self.spec.shape()
    }

    /// Get the public key from the private key, if its shape carries the
    /// public exponent.
    pub fn to_public_key(&self) -> Option<RsaPublicKey> {
        self.public_exponent()
            .map(|e| RsaPublicKey::new_unchecked(self.n().clone(), e.clone()))
    }

    /// Returns all prime factors known to this key, in order.
    pub fn primes(&self) -> Vec<&BigUint> {
        let mut primes = Vec::with_capacity(self.nprimes());
        if let Some(crt) = self.crt() {
            primes.push(&crt.p);
            primes.push(&crt.q);
        }
        primes.extend(self.other_primes().iter().map(|info| &info.prime));
        primes
    }
}
