//! Conversion of `oth` (Other Primes Info) list members.

use alloc::vec::Vec;
use serde_json::{Map, Value};

use super::codec::encode_uint;
use super::field_set::{json_type, required_uint};
use super::params::{FACTOR_CRT_COEFFICIENT, FACTOR_CRT_EXPONENT, OTHER_PRIMES_INFO, PRIME_FACTOR};
use crate::errors::{Error, Result};
use crate::key::OtherPrimeInfo;

impl OtherPrimeInfo {
    /// Encodes this prime as an `oth` member: `r`, `d`, `t`, in that order.
    pub fn to_jwk_fields(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(PRIME_FACTOR.id().into(), encode_uint(&self.prime).into());
        map.insert(FACTOR_CRT_EXPONENT.id().into(), encode_uint(&self.exponent).into());
        map.insert(FACTOR_CRT_COEFFICIENT.id().into(), encode_uint(&self.coefficient).into());
        map
    }

    /// Decodes one `oth` member.
    ///
    /// `None` and JSON `null` are rejected the same way as non-object or
    /// empty members.
    pub fn from_jwk_value(value: Option<&Value>) -> Result<Self> {
        let value = match value {
            None | Some(Value::Null) => {
                return Err(Error::malformed(
                    OTHER_PRIMES_INFO.id(),
                    "Other Prime Info element cannot be null",
                ))
            }
            Some(value) => value,
        };

        let map = value.as_object().ok_or_else(|| {
            Error::malformed(
                OTHER_PRIMES_INFO.id(),
                format!(
                    "Other Prime Info list must contain objects of name/value pairs, found {}",
                    json_type(value)
                ),
            )
        })?;

        if map.is_empty() {
            return Err(Error::malformed(
                OTHER_PRIMES_INFO.id(),
                "Other Prime Info element cannot be empty",
            ));
        }

        let prime = required_uint(map, &PRIME_FACTOR)?;
        let exponent = required_uint(map, &FACTOR_CRT_EXPONENT)?;
        let coefficient = required_uint(map, &FACTOR_CRT_COEFFICIENT)?;

        Ok(OtherPrimeInfo::new(prime, exponent, coefficient))
    }
}

impl From<&OtherPrimeInfo> for Value {
    fn from(info: &OtherPrimeInfo) -> Self {
        Value::Object(info.to_jwk_fields())
    }
}

impl TryFrom<&Value> for OtherPrimeInfo {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_jwk_value(Some(value))
    }
}

/// Encodes the `oth` list, preserving order.
pub(crate) fn other_primes_to_value(infos: &[OtherPrimeInfo]) -> Value {
    Value::Array(infos.iter().map(Value::from).collect())
}

/// Decodes the non-empty `oth` list, preserving order.
pub(crate) fn other_primes_from_value(value: &Value) -> Result<Vec<OtherPrimeInfo>> {
    let list = value.as_array().ok_or_else(|| {
        Error::malformed(
            OTHER_PRIMES_INFO.id(),
            format!(
                "{OTHER_PRIMES_INFO} must be an array, found {}",
                json_type(value)
            ),
        )
    })?;

    if list.is_empty() {
        return Err(Error::malformed(
            OTHER_PRIMES_INFO.id(),
            format!("{OTHER_PRIMES_INFO} cannot be empty, omit it for two-prime keys"),
        ));
    }

    list.iter().map(OtherPrimeInfo::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use num_traits::FromPrimitive;
    use serde_json::json;

    fn info() -> OtherPrimeInfo {
        OtherPrimeInfo::new(
            BigUint::from_u64(17).unwrap(),
            BigUint::from_u64(7).unwrap(),
            BigUint::from_u64(5).unwrap(),
        )
    }

    #[test]
    fn to_fields_order() {
        let map = info().to_jwk_fields();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["r", "d", "t"]);
        assert_eq!(Value::Object(map), json!({ "r": "EQ", "d": "Bw", "t": "BQ" }));
    }

    #[test]
    fn from_value() {
        let value = json!({ "r": "EQ", "d": "Bw", "t": "BQ" });
        assert_eq!(OtherPrimeInfo::try_from(&value).unwrap(), info());
    }

    #[test]
    fn malformed_members() {
        let cases = [
            json!("EQ"),
            json!([]),
            json!({}),
            json!(null),
            json!({ "r": "EQ", "d": "Bw" }),
            json!({ "r": "EQ", "d": 7, "t": "BQ" }),
        ];
        for value in &cases {
            let err = OtherPrimeInfo::try_from(value).unwrap_err();
            assert!(err.is_malformed(), "{value}: {err}");
        }

        assert_eq!(
            OtherPrimeInfo::from_jwk_value(None).unwrap_err().field(),
            Some("oth")
        );
        assert_eq!(
            OtherPrimeInfo::try_from(&json!({ "r": "EQ", "d": "Bw" }))
                .unwrap_err()
                .field(),
            Some("t")
        );
    }

    #[test]
    fn list_round_trip_keeps_order() {
        let second = OtherPrimeInfo::new(
            BigUint::from_u64(19).unwrap(),
            BigUint::from_u64(13).unwrap(),
            BigUint::from_u64(3).unwrap(),
        );
        let value = other_primes_to_value(&[info(), second.clone()]);
        assert_eq!(other_primes_from_value(&value).unwrap(), [info(), second]);

        assert!(other_primes_from_value(&json!({ "r": "EQ" }))
            .unwrap_err()
            .is_malformed());
        assert_eq!(
            other_primes_from_value(&json!([])).unwrap_err().field(),
            Some("oth")
        );
    }
}
