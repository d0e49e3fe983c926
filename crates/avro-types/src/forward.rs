//! Forward conversion: NativeValue → Avro generic value.
//!
//! The output of every function here conforms to the node it was produced
//! for, so it can be handed straight to `apache_avro::to_avro_datum`.

use crate::error::{ConvertError, Result};
use crate::node::{display_name, BaseType};
use crate::strategy::Context;
use apache_avro::schema::{EnumSchema, RecordSchema};
use apache_avro::types::{Record, Value};
use apache_avro::{Decimal, Schema};
use native_types::NativeValue;
use std::collections::HashMap;
use uuid::Uuid;

pub(crate) fn null(value: &NativeValue) -> Result<Value> {
    match value {
        NativeValue::Null => Ok(Value::Null),
        other => Err(ConvertError::native_mismatch(BaseType::Null, other)),
    }
}

pub(crate) fn boolean(value: &NativeValue) -> Result<Value> {
    match value {
        NativeValue::Boolean(b) => Ok(Value::Boolean(*b)),
        other => Err(ConvertError::native_mismatch(BaseType::Boolean, other)),
    }
}

/// `int`, wrapped as `date` / `time-millis` when the node says so.
pub(crate) fn int(node: &Schema, value: &NativeValue) -> Result<Value> {
    let NativeValue::Int(i) = value else {
        return Err(ConvertError::native_mismatch(BaseType::Int, value));
    };

    Ok(match node {
        Schema::Date => Value::Date(*i),
        Schema::TimeMillis => Value::TimeMillis(*i),
        _ => Value::Int(*i),
    })
}

/// `long`, wrapped in the time or timestamp variant the node names.
pub(crate) fn long(node: &Schema, value: &NativeValue) -> Result<Value> {
    let NativeValue::Long(i) = value else {
        return Err(ConvertError::native_mismatch(BaseType::Long, value));
    };

    Ok(match node {
        Schema::TimeMicros => Value::TimeMicros(*i),
        Schema::TimestampMillis => Value::TimestampMillis(*i),
        Schema::TimestampMicros => Value::TimestampMicros(*i),
        Schema::TimestampNanos => Value::TimestampNanos(*i),
        Schema::LocalTimestampMillis => Value::LocalTimestampMillis(*i),
        Schema::LocalTimestampMicros => Value::LocalTimestampMicros(*i),
        Schema::LocalTimestampNanos => Value::LocalTimestampNanos(*i),
        _ => Value::Long(*i),
    })
}

pub(crate) fn float(value: &NativeValue) -> Result<Value> {
    match value {
        NativeValue::Float(f) => Ok(Value::Float(*f)),
        other => Err(ConvertError::native_mismatch(BaseType::Float, other)),
    }
}

pub(crate) fn double(value: &NativeValue) -> Result<Value> {
    match value {
        NativeValue::Double(d) => Ok(Value::Double(*d)),
        other => Err(ConvertError::native_mismatch(BaseType::Double, other)),
    }
}

/// `bytes`; decimal nodes read the bytes as a two's-complement unscaled value.
pub(crate) fn bytes(node: &Schema, value: &NativeValue) -> Result<Value> {
    let NativeValue::Bytes(b) = value else {
        return Err(ConvertError::native_mismatch(BaseType::Bytes, value));
    };

    Ok(match node {
        Schema::Decimal(_) => Value::Decimal(Decimal::from(b.as_slice())),
        _ => Value::Bytes(b.clone()),
    })
}

/// `string`; uuid nodes only accept text that parses as a UUID.
pub(crate) fn string(node: &Schema, value: &NativeValue) -> Result<Value> {
    let NativeValue::String(s) = value else {
        return Err(ConvertError::native_mismatch(BaseType::String, value));
    };

    match node {
        Schema::Uuid => Uuid::parse_str(s)
            .map(Value::Uuid)
            .map_err(|_| ConvertError::TypeMismatch {
                schema_type: "string(uuid)".to_string(),
                actual: format!("native string '{s}' that is not a UUID"),
            }),
        _ => Ok(Value::String(s.clone())),
    }
}

/// Atom → symbol tagged with its position in the enum's symbol list.
pub(crate) fn enumeration(enum_schema: &EnumSchema, value: &NativeValue) -> Result<Value> {
    let NativeValue::Atom(atom) = value else {
        return Err(ConvertError::native_mismatch(BaseType::Enum, value));
    };

    let index = enum_schema
        .symbols
        .iter()
        .position(|s| s == atom.as_str())
        .ok_or_else(|| ConvertError::UnknownSymbol {
            name: display_name(&enum_schema.name),
            symbol: atom.to_string(),
        })?;

    // Avro caps enum symbol lists well below u32::MAX.
    Ok(Value::Enum(index as u32, atom.to_string()))
}

/// Encode every element with the element strategy, keeping order and length.
pub(crate) fn array<'a>(cx: Context<'a>, items: &'a Schema, value: &NativeValue) -> Result<Value> {
    let NativeValue::List(elements) = value else {
        return Err(ConvertError::native_mismatch(BaseType::Array, value));
    };

    let element_type = cx.resolve(items)?;
    let mut encoded = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let generic = element_type
            .encode(cx, element)
            .map_err(|e| e.at(format!("element {index}")))?;
        encoded.push(generic);
    }

    Ok(Value::Array(encoded))
}

/// Symbol keys become text; every value is encoded with the value strategy.
pub(crate) fn map<'a>(cx: Context<'a>, values: &'a Schema, value: &NativeValue) -> Result<Value> {
    let NativeValue::Map(entries) = value else {
        return Err(ConvertError::native_mismatch(BaseType::Map, value));
    };

    let value_type = cx.resolve(values)?;
    let mut encoded = HashMap::with_capacity(entries.len());
    for (key, entry) in entries {
        let generic = value_type
            .encode(cx, entry)
            .map_err(|e| e.at(format!("key '{key}'")))?;
        encoded.insert(key.to_string(), generic);
    }

    Ok(Value::Map(encoded))
}

/// Fill a fresh generic record built from `node` with every native entry.
///
/// Keys that name no field are rejected. A field the native map leaves out
/// takes the schema's default; without one the record is incomplete.
pub(crate) fn record<'a>(
    cx: Context<'a>,
    node: &'a Schema,
    record: &'a RecordSchema,
    value: &NativeValue,
) -> Result<Value> {
    let NativeValue::Map(entries) = value else {
        return Err(ConvertError::native_mismatch(BaseType::Record, value));
    };

    let mut generic = Record::new(node)
        .ok_or_else(|| ConvertError::UnknownType(format!("{node:?} is not a record")))?;

    for (key, entry) in entries {
        let field = record
            .lookup
            .get(key.as_str())
            .and_then(|&position| record.fields.get(position))
            .ok_or_else(|| ConvertError::UnknownField {
                record: display_name(&record.name),
                field: key.to_string(),
            })?;

        let encoded = cx
            .encode(&field.schema, entry)
            .map_err(|e| e.at(format!("field '{}'", field.name)))?;
        generic.put(&field.name, encoded);
    }

    for field in &record.fields {
        if entries.contains_key(field.name.as_str()) {
            continue;
        }

        let default = field
            .default
            .clone()
            .ok_or_else(|| ConvertError::MissingField {
                record: display_name(&record.name),
                field: field.name.clone(),
            })?;
        let resolved = Value::from(default)
            .resolve(cx.definition(&field.schema)?)
            .map_err(|e| ConvertError::InvalidDefault {
                record: display_name(&record.name),
                field: field.name.clone(),
                reason: e.to_string(),
            })?;
        generic.put(&field.name, resolved);
    }

    Ok(Value::from(generic))
}

pub(crate) fn unsupported(base: BaseType) -> Result<Value> {
    Err(ConvertError::Unsupported(base))
}
