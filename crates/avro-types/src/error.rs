//! Error types for avro-types crate.

use crate::node::BaseType;
use apache_avro::types::Value;
use native_types::NativeValue;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while resolving or converting a value.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Type mismatch: {schema_type} schema cannot accept {actual}")]
    TypeMismatch { schema_type: String, actual: String },

    #[error("Unsupported schema type: {0}")]
    Unsupported(BaseType),

    #[error("Unknown schema type: {0}")]
    UnknownType(String),

    #[error("Unknown field '{field}' for record {record}")]
    UnknownField { record: String, field: String },

    #[error("Missing field '{field}' for record {record}")]
    MissingField { record: String, field: String },

    #[error("Default for field '{field}' of record {record} does not fit its schema: {reason}")]
    InvalidDefault {
        record: String,
        field: String,
        reason: String,
    },

    #[error("Symbol '{symbol}' is not defined by enum {name}")]
    UnknownSymbol { name: String, symbol: String },

    #[error("{location}: {source}")]
    At {
        location: String,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Attach the location (field, element, key) a nested failure came from.
    pub fn at(self, location: impl fmt::Display) -> Self {
        Self::At {
            location: location.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all location wrappers removed.
    pub fn root_cause(&self) -> &ConvertError {
        match self {
            Self::At { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether the innermost error is a type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.root_cause(), Self::TypeMismatch { .. })
    }

    /// Whether the innermost error is an unsupported schema type.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.root_cause(), Self::Unsupported(_))
    }

    pub(crate) fn generic_mismatch(schema_type: impl fmt::Display, value: &Value) -> Self {
        Self::TypeMismatch {
            schema_type: schema_type.to_string(),
            actual: format!("generic {}", generic_kind(value)),
        }
    }

    pub(crate) fn native_mismatch(schema_type: impl fmt::Display, value: &NativeValue) -> Self {
        Self::TypeMismatch {
            schema_type: schema_type.to_string(),
            actual: format!("native {}", value.kind()),
        }
    }
}

/// Runtime shape name of a generic value.
pub fn generic_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Boolean(_) => "boolean",
        Value::Int(_) => "int",
        Value::Long(_) => "long",
        Value::Float(_) => "float",
        Value::Double(_) => "double",
        Value::Bytes(_) => "bytes",
        Value::String(_) => "string",
        Value::Fixed(_, _) => "fixed",
        Value::Enum(_, _) => "enum",
        Value::Union(_, _) => "union",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        Value::Record(_) => "record",
        Value::Date(_) => "date",
        Value::Decimal(_) => "decimal",
        Value::BigDecimal(_) => "big-decimal",
        Value::TimeMillis(_) => "time-millis",
        Value::TimeMicros(_) => "time-micros",
        Value::TimestampMillis(_) => "timestamp-millis",
        Value::TimestampMicros(_) => "timestamp-micros",
        Value::TimestampNanos(_) => "timestamp-nanos",
        Value::LocalTimestampMillis(_) => "local-timestamp-millis",
        Value::LocalTimestampMicros(_) => "local-timestamp-micros",
        Value::LocalTimestampNanos(_) => "local-timestamp-nanos",
        Value::Duration(_) => "duration",
        Value::Uuid(_) => "uuid",
    }
}

/// Result type alias for avro-types operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
