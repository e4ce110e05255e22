//! Tagged value model for nested result trees
//!
//! A result tree is made of three shapes: scalars at the leaves, records
//! (insertion-ordered string maps) and sequences. Records and sequences are
//! the containers the pipeline descends into; the shape of a container
//! value decides how its key is named by the association key rename.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An insertion-ordered mapping from field or association name to value
pub type Record = IndexMap<String, Value>;

/// A leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// A node of a nested result tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Leaf value
    Scalar(Scalar),
    /// Ordered string-keyed mapping (a record or a has-one/belongs-to association)
    Record(Record),
    /// Ordered list (a has-many association or a list of primary records)
    Sequence(Vec<Value>),
}

/// Cardinality of an association, derived from the shape of its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationShape {
    /// The association holds one record
    Single,
    /// The association holds a list of records
    Multiple,
}

impl Scalar {
    /// Name of the scalar kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }

    /// Borrow the string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Value {
    /// The null value
    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    /// An empty record
    pub fn empty_record() -> Self {
        Value::Record(Record::new())
    }

    /// Name of the value kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(scalar) => scalar.kind(),
            Value::Record(_) => "record",
            Value::Sequence(_) => "sequence",
        }
    }

    /// Whether this value is a record or a sequence
    pub fn is_container(&self) -> bool {
        !matches!(self, Value::Scalar(_))
    }

    /// Whether this value is a container without members
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Record(record) => record.is_empty(),
            Value::Sequence(items) => items.is_empty(),
            Value::Scalar(_) => false,
        }
    }

    /// Association shape of this value; scalars are not associations
    pub fn shape(&self) -> Option<AssociationShape> {
        match self {
            Value::Record(_) => Some(AssociationShape::Single),
            Value::Sequence(_) => Some(AssociationShape::Multiple),
            Value::Scalar(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Look up a key when this value is a record
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.get(key))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Scalar(Scalar::Int(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Scalar(Scalar::Float(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => {
                let scalar = match n.as_i64() {
                    Some(i) => Scalar::Int(i),
                    // u64 beyond i64::MAX and all non-integers
                    None => n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null),
                };
                Value::Scalar(scalar)
            }
            serde_json::Value::String(s) => Value::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(Scalar::Null) => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(b),
            Value::Scalar(Scalar::Int(i)) => serde_json::Value::Number(i.into()),
            Value::Scalar(Scalar::Float(f)) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Scalar(Scalar::String(s)) => serde_json::Value::String(s),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Record(record) => serde_json::Value::Object(
                record
                    .into_iter()
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::Value::from(self.clone());
        write!(f, "{}", json)
    }
}
