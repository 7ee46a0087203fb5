//! Ordered JWK field sets and required-field extraction.

use alloc::string::String;
use core::fmt;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::codec::{decode_uint, encode_uint};
use super::params::{is_private_id, Param};
use crate::errors::{Error, Result};

/// The name/value pairs of one JSON Web Key, in insertion order.
///
/// Serializes as the plain JSON object. The [`Debug`](fmt::Debug) output
/// redacts the values of private key parameters.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JwkFieldSet(Map<String, Value>);

impl JwkFieldSet {
    /// Empty field set.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the value of `name`, treating JSON `null` as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name)
    }

    /// Whether `name` is present with a non-`null` value.
    pub fn contains(&self, name: &str) -> bool {
        self.has_field(name)
    }

    /// Sets `name` to `value`.
    ///
    /// A name that is already present keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    pub(crate) fn put(&mut self, param: &Param, value: impl Into<Value>) {
        self.0.insert(param.id().into(), value.into());
    }

    pub(crate) fn put_uint(&mut self, param: &Param, value: &BigUint) {
        self.put(param, encode_uint(value));
    }

    /// Copies every field of `other` into this set.
    pub fn extend(&mut self, other: &JwkFieldSet) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Copy of this set without the given parameters.
    pub fn without(&self, params: &[Param]) -> JwkFieldSet {
        self.0
            .iter()
            .filter(|(name, _)| !params.iter().any(|param| param.id() == name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Field names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over the fields, in insertion order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwraps the underlying JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Field names as `{a, b, c}`, for messages.
    pub(crate) fn describe(&self) -> String {
        let mut out = String::from("{");
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
        }
        out.push('}');
        out
    }
}

impl From<Map<String, Value>> for JwkFieldSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<JwkFieldSet> for Value {
    fn from(fields: JwkFieldSet) -> Self {
        Value::Object(fields.0)
    }
}

impl FromIterator<(String, Value)> for JwkFieldSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a JwkFieldSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct Redacted;

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Debug for JwkFieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.0 {
            if is_private_id(name) {
                map.entry(name, &Redacted);
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}

/// Read access to a mapping of JWK field names to JSON values.
///
/// Implemented for [`JwkFieldSet`] and for bare JSON objects, so the same
/// extraction helpers serve both a whole JWK and the members of its `oth`
/// list.
pub trait FieldSource {
    /// Returns the value of `name`, treating JSON `null` as absent.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Whether `name` is present with a non-`null` value.
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

impl FieldSource for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|value| !value.is_null())
    }
}

impl FieldSource for JwkFieldSet {
    fn field(&self, name: &str) -> Option<&Value> {
        self.0.field(name)
    }
}

/// Reads the required positive integer `param` from `source`.
pub fn required_uint<S: FieldSource + ?Sized>(source: &S, param: &Param) -> Result<BigUint> {
    let value = source.field(param.id()).ok_or_else(|| {
        Error::malformed(
            param.id(),
            format!("RSA JWK is missing required {param} value"),
        )
    })?;

    let encoded = value.as_str().ok_or_else(|| {
        Error::malformed(
            param.id(),
            format!("{param} must be a string, found {}", json_type(value)),
        )
    })?;

    let uint = decode_uint(param.id(), encoded)?;
    if uint.is_zero() {
        return Err(Error::malformed(
            param.id(),
            format!("{param} must be a positive integer"),
        ));
    }

    Ok(uint)
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
