//! `timestamp-millis` / `timestamp-micros` ↔ `NativeValue::Timestamp`.

use super::LogicalType;
use crate::error::{ConvertError, Result};
use apache_avro::types::Value;
use apache_avro::Schema;
use chrono::{DateTime, Utc};
use native_types::NativeValue;

/// Resolution of an epoch-based timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePrecision {
    Millis,
    Micros,
}

/// Epoch timestamps as `DateTime<Utc>`.
#[derive(Debug, Clone, Copy)]
pub struct TimestampLogical {
    precision: TimePrecision,
}

impl TimestampLogical {
    pub fn millis() -> Self {
        Self {
            precision: TimePrecision::Millis,
        }
    }

    pub fn micros() -> Self {
        Self {
            precision: TimePrecision::Micros,
        }
    }

    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    fn schema_type(&self) -> String {
        format!("long({})", self.name())
    }

    fn to_datetime(&self, raw: i64) -> Option<DateTime<Utc>> {
        match self.precision {
            TimePrecision::Millis => DateTime::from_timestamp_millis(raw),
            TimePrecision::Micros => DateTime::from_timestamp_micros(raw),
        }
    }
}

impl LogicalType for TimestampLogical {
    fn name(&self) -> &str {
        match self.precision {
            TimePrecision::Millis => "timestamp-millis",
            TimePrecision::Micros => "timestamp-micros",
        }
    }

    fn decode(&self, _node: &Schema, value: &Value) -> Result<NativeValue> {
        let raw = match (self.precision, value) {
            (TimePrecision::Millis, Value::TimestampMillis(raw))
            | (TimePrecision::Micros, Value::TimestampMicros(raw))
            | (_, Value::Long(raw)) => *raw,
            _ => return Err(ConvertError::generic_mismatch(self.schema_type(), value)),
        };

        self.to_datetime(raw)
            .map(NativeValue::Timestamp)
            .ok_or_else(|| ConvertError::TypeMismatch {
                schema_type: self.schema_type(),
                actual: format!("out-of-range timestamp {raw}"),
            })
    }

    fn encode(&self, _node: &Schema, value: &NativeValue) -> Result<Value> {
        let NativeValue::Timestamp(dt) = value else {
            return Err(ConvertError::native_mismatch(self.schema_type(), value));
        };

        Ok(match self.precision {
            TimePrecision::Millis => Value::TimestampMillis(dt.timestamp_millis()),
            TimePrecision::Micros => Value::TimestampMicros(dt.timestamp_micros()),
        })
    }
}
