//! Chinese remainder theorem values of an RSA private key.

use alloc::vec::Vec;
use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_traits::One;

use crate::errors::{Error, Result};
use crate::key::{CrtParams, OtherPrimeInfo};

/// Computes the CRT values of every prime of a key with private exponent `d`.
///
/// The first two primes are handled the PKCS#1 way (`dp`, `dq`, `qi`); every
/// subsequent prime `r_i` gets `d mod (r_i - 1)` and the inverse of
/// `r_1 * ... * r_(i-1)` modulo `r_i`.
pub(crate) fn compute_crt_params(
    d: &BigUint,
    primes: &[BigUint],
) -> Result<(CrtParams, Vec<OtherPrimeInfo>)> {
    if primes.len() < 2 {
        return Err(Error::NprimesTooSmall);
    }

    for prime in primes {
        // Any primes ≤ 1 will cause divide-by-zero panics later.
        if *prime <= BigUint::one() {
            return Err(Error::InvalidPrime);
        }
    }

    let p = &primes[0];
    let q = &primes[1];

    let dp = d % (p - BigUint::one());
    let dq = d % (q - BigUint::one());
    let qi = q
        .clone()
        .mod_inverse(p)
        .and_then(|qi| qi.into_biguint())
        .ok_or(Error::InvalidPrime)?;

    let mut r: BigUint = p * q;
    let mut other_primes = Vec::with_capacity(primes.len() - 2);
    for prime in &primes[2..] {
        let coefficient = r
            .clone()
            .mod_inverse(prime)
            .and_then(|coeff| coeff.into_biguint())
            .ok_or(Error::InvalidCoefficient)?;

        other_primes.push(OtherPrimeInfo::new(
            prime.clone(),
            d % (prime - BigUint::one()),
            coefficient,
        ));
        r *= prime;
    }

    Ok((CrtParams::new(p.clone(), q.clone(), dp, dq, qi), other_primes))
}

/// Computes the product of all primes.
pub(crate) fn compute_modulus<'a>(primes: impl IntoIterator<Item = &'a BigUint>) -> BigUint {
    primes
        .into_iter()
        .fold(BigUint::one(), |acc, prime| acc * prime)
}
