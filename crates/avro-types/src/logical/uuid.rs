//! `uuid` ↔ `NativeValue::Uuid`.

use super::LogicalType;
use crate::error::{ConvertError, Result};
use apache_avro::types::Value;
use apache_avro::Schema;
use native_types::NativeValue;
use uuid::Uuid;

const SCHEMA_TYPE: &str = "string(uuid)";

/// UUID strings as `Uuid`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidLogical;

impl LogicalType for UuidLogical {
    fn name(&self) -> &str {
        "uuid"
    }

    fn decode(&self, _node: &Schema, value: &Value) -> Result<NativeValue> {
        match value {
            Value::Uuid(uuid) => Ok(NativeValue::Uuid(*uuid)),
            Value::String(s) => Uuid::parse_str(s).map(NativeValue::Uuid).map_err(|e| {
                ConvertError::TypeMismatch {
                    schema_type: SCHEMA_TYPE.to_string(),
                    actual: format!("generic string that is not a UUID ({e})"),
                }
            }),
            _ => Err(ConvertError::generic_mismatch(SCHEMA_TYPE, value)),
        }
    }

    fn encode(&self, _node: &Schema, value: &NativeValue) -> Result<Value> {
        match value {
            NativeValue::Uuid(uuid) => Ok(Value::Uuid(*uuid)),
            _ => Err(ConvertError::native_mismatch(SCHEMA_TYPE, value)),
        }
    }
}
