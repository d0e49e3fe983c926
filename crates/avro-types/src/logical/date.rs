//! `date` ↔ `NativeValue::Date`.

use super::LogicalType;
use crate::error::{ConvertError, Result};
use apache_avro::types::Value;
use apache_avro::Schema;
use chrono::{DateTime, NaiveDate, Utc};
use native_types::NativeValue;

const SCHEMA_TYPE: &str = "int(date)";
const SECONDS_PER_DAY: i64 = 86_400;

/// Days since the Unix epoch as a calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateLogical;

impl LogicalType for DateLogical {
    fn name(&self) -> &str {
        "date"
    }

    fn decode(&self, _node: &Schema, value: &Value) -> Result<NativeValue> {
        let days = match value {
            Value::Date(days) | Value::Int(days) => *days,
            _ => return Err(ConvertError::generic_mismatch(SCHEMA_TYPE, value)),
        };

        DateTime::from_timestamp(i64::from(days) * SECONDS_PER_DAY, 0)
            .map(|dt| NativeValue::Date(dt.date_naive()))
            .ok_or_else(|| ConvertError::TypeMismatch {
                schema_type: SCHEMA_TYPE.to_string(),
                actual: format!("out-of-range date {days}"),
            })
    }

    fn encode(&self, _node: &Schema, value: &NativeValue) -> Result<Value> {
        let NativeValue::Date(date) = value else {
            return Err(ConvertError::native_mismatch(SCHEMA_TYPE, value));
        };

        let days = days_since_epoch(*date);
        i32::try_from(days)
            .map(Value::Date)
            .map_err(|_| ConvertError::TypeMismatch {
                schema_type: SCHEMA_TYPE.to_string(),
                actual: format!("date {date} beyond int range"),
            })
    }
}

fn days_since_epoch(date: NaiveDate) -> i64 {
    date.signed_duration_since(DateTime::<Utc>::UNIX_EPOCH.date_naive())
        .num_days()
}
