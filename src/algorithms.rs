//! Useful algorithms related to RSA key material.

pub(crate) mod crt;
pub(crate) mod generate;
