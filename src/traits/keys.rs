//! Traits related to the key components

use num_bigint::BigUint;

use crate::key::{CrtParams, OtherPrimeInfo};

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the modulus size in bytes.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }
}

/// Components of an RSA private key.
///
/// Unlike [`PublicKeyParts`], the public exponent is optional: plain private
/// keys made of only a modulus and private exponent do not carry it.
pub trait PrivateKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;

    /// Returns the public exponent, when the key shape carries it.
    fn public_exponent(&self) -> Option<&BigUint>;

    /// Returns the first two primes and their CRT values, if present.
    fn crt(&self) -> Option<&CrtParams>;

    /// Returns the CRT triples of the third and subsequent primes.
    fn other_primes(&self) -> &[OtherPrimeInfo];

    /// Number of prime factors of the modulus known to this key.
    fn nprimes(&self) -> usize {
        match self.crt() {
            Some(_) => 2 + self.other_primes().len(),
            None => 0,
        }
    }
}
