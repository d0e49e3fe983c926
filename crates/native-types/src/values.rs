//! Native value representation.
//!
//! `NativeValue` is what application code sees after a decode and hands back
//! for an encode. Records and maps share one shape, a mapping from [`Symbol`]
//! to value; enum values are bare atoms.

use crate::symbol::Symbol;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Symbol-keyed mapping used for both records and maps.
pub type NativeMap = HashMap<Symbol, NativeValue>;

/// Application-level value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NativeValue {
    /// Absent value
    Null,

    /// Boolean value
    Boolean(bool),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    Long(i64),

    /// 32-bit floating point
    Float(f32),

    /// 64-bit floating point
    Double(f64),

    /// Raw byte sequence
    Bytes(Vec<u8>),

    /// UTF-8 text
    String(String),

    /// Symbolic atom (enum values)
    Atom(Symbol),

    /// Ordered sequence
    List(Vec<NativeValue>),

    /// Symbol-keyed mapping (records and maps)
    Map(NativeMap),

    /// Instant in UTC, produced by the timestamp logical strategies
    Timestamp(DateTime<Utc>),

    /// Calendar date, produced by the date logical strategy
    Date(NaiveDate),

    /// UUID, produced by the uuid logical strategy
    Uuid(Uuid),
}

/// Runtime shape of a [`NativeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Atom,
    List,
    Map,
    Timestamp,
    Date,
    Uuid,
}

impl ValueKind {
    /// Lower-case name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Bytes => "bytes",
            ValueKind::String => "string",
            ValueKind::Atom => "atom",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Date => "date",
            ValueKind::Uuid => "uuid",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NativeValue {
    /// Build a record-shaped map from `(field, value)` pairs.
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<Symbol>,
        I: IntoIterator<Item = (K, NativeValue)>,
    {
        Self::Map(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an atom from a name.
    pub fn atom(name: &str) -> Self {
        Self::Atom(Symbol::new(name))
    }

    /// Runtime shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::String(_) => ValueKind::String,
            Self::Atom(_) => ValueKind::Atom,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Date(_) => ValueKind::Date,
            Self::Uuid(_) => ValueKind::Uuid,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&NativeValue> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an atom.
    pub fn as_atom(&self) -> Option<&Symbol> {
        match self {
            Self::Atom(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get this value as a list.
    pub fn as_list(&self) -> Option<&[NativeValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as a map.
    pub fn as_map(&self) -> Option<&NativeMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for NativeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for NativeValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for NativeValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for NativeValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for NativeValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for NativeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Symbol> for NativeValue {
    fn from(value: Symbol) -> Self {
        Self::Atom(value)
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(value: Vec<NativeValue>) -> Self {
        Self::List(value)
    }
}

impl From<NativeMap> for NativeValue {
    fn from(value: NativeMap) -> Self {
        Self::Map(value)
    }
}
