//! Metadata attached to kernel matrices
//!
//! Attributes are plain key-value pairs (`name`, `weight`, ...) that travel
//! with a kernel matrix but never influence its numeric values.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value stored under an attribute key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl PartialEq<&str> for AttrValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<f64> for AttrValue {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Self::Float(v) if v == other)
    }
}

/// Key-value attribute storage owned by a single kernel matrix
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    entries: BTreeMap<String, AttrValue>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an attribute
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Look up `key`, falling back to `default` when it is absent
    pub fn get_or(&self, key: &str, default: impl Into<AttrValue>) -> AttrValue {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Value handed to [`crate::set::KernelSet::set_attr`]
///
/// A single value is broadcast to every member; a sequence assigns its
/// `i`-th element to the `i`-th member.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrAssignment {
    Broadcast(AttrValue),
    PerMember(Vec<AttrValue>),
}

impl From<AttrValue> for AttrAssignment {
    fn from(v: AttrValue) -> Self {
        Self::Broadcast(v)
    }
}

impl From<&str> for AttrAssignment {
    fn from(v: &str) -> Self {
        Self::Broadcast(v.into())
    }
}

impl From<String> for AttrAssignment {
    fn from(v: String) -> Self {
        Self::Broadcast(v.into())
    }
}

impl From<f64> for AttrAssignment {
    fn from(v: f64) -> Self {
        Self::Broadcast(v.into())
    }
}

impl From<i64> for AttrAssignment {
    fn from(v: i64) -> Self {
        Self::Broadcast(v.into())
    }
}

impl From<i32> for AttrAssignment {
    fn from(v: i32) -> Self {
        Self::Broadcast(v.into())
    }
}

impl From<bool> for AttrAssignment {
    fn from(v: bool) -> Self {
        Self::Broadcast(v.into())
    }
}

impl From<Vec<AttrValue>> for AttrAssignment {
    fn from(values: Vec<AttrValue>) -> Self {
        Self::PerMember(values)
    }
}

impl From<Vec<f64>> for AttrAssignment {
    fn from(values: Vec<f64>) -> Self {
        Self::PerMember(values.into_iter().map(AttrValue::Float).collect())
    }
}

impl From<&[f64]> for AttrAssignment {
    fn from(values: &[f64]) -> Self {
        Self::PerMember(values.iter().copied().map(AttrValue::Float).collect())
    }
}

impl From<Array1<f64>> for AttrAssignment {
    fn from(values: Array1<f64>) -> Self {
        Self::PerMember(values.into_iter().map(AttrValue::Float).collect())
    }
}

impl From<Vec<&str>> for AttrAssignment {
    fn from(values: Vec<&str>) -> Self {
        Self::PerMember(values.into_iter().map(AttrValue::from).collect())
    }
}

impl From<Vec<String>> for AttrAssignment {
    fn from(values: Vec<String>) -> Self {
        Self::PerMember(values.into_iter().map(AttrValue::Text).collect())
    }
}
