// ABOUTME: State-map value types attached to instances by the state collaborator.
// ABOUTME: Closed union of scalars and arrays of scalars; nothing richer exists.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A scalar state value.
///
/// Equality is exact type-and-value: an `Int(1)` never equals a
/// `Float(1.0)` or a `Bool(true)`. The filter engine's semantics depend
/// on this, so the variants are compared via the derived `PartialEq`
/// and never coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// A field value as the filter engine sees it: a scalar or an array of
/// scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl From<Scalar> for FieldValue {
    fn from(v: Scalar) -> Self {
        FieldValue::Scalar(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Scalar(Scalar::Bool(v))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Scalar(Scalar::Int(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Scalar(Scalar::Float(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Scalar(Scalar::Str(v.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Scalar(Scalar::Str(v))
    }
}

impl From<Vec<Scalar>> for FieldValue {
    fn from(v: Vec<Scalar>) -> Self {
        FieldValue::List(v)
    }
}

/// Free-form per-instance state reported by the state collaborator
/// (queue depth, version, idle flag, ...). Keys are sorted for stable
/// display output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateMap(BTreeMap<String, FieldValue>);

impl StateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Convert a decoded JSON object into a state map.
    ///
    /// Values that are not scalars or arrays of scalars are dropped:
    /// the state contract only admits those two shapes, and a collaborator
    /// reporting anything else must not poison the rest of the map.
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut map = BTreeMap::new();
        for (key, value) in object {
            if let Some(field) = field_value_from_json(&value) {
                map.insert(key, field);
            }
        }
        Self(map)
    }
}

impl<'de> serde::Deserialize<'de> for StateMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = serde_json::Map::deserialize(deserializer)?;
        Ok(Self::from_json(object))
    }
}

fn scalar_from_json(value: &serde_json::Value) -> Option<Scalar> {
    match value {
        serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Scalar::Int(i))
            } else {
                n.as_f64().map(Scalar::Float)
            }
        }
        serde_json::Value::String(s) => Some(Scalar::Str(s.clone())),
        _ => None,
    }
}

fn field_value_from_json(value: &serde_json::Value) -> Option<FieldValue> {
    match value {
        serde_json::Value::Array(items) => {
            let scalars: Option<Vec<Scalar>> = items.iter().map(scalar_from_json).collect();
            scalars.map(FieldValue::List)
        }
        other => scalar_from_json(other).map(FieldValue::Scalar),
    }
}
