//! Reverse conversion: Avro generic value → NativeValue.
//!
//! Primitive decoders are validating pass-throughs: the generic value must
//! have exactly the runtime type its node declares. Complex decoders resolve
//! each nested node through the [`Context`] and recurse.

use crate::error::{ConvertError, Result};
use crate::node::{display_name, BaseType};
use crate::strategy::Context;
use apache_avro::schema::{EnumSchema, RecordSchema};
use apache_avro::types::Value;
use apache_avro::Schema;
use native_types::{NativeMap, NativeValue, Symbol};

pub(crate) fn null(value: &Value) -> Result<NativeValue> {
    match value {
        Value::Null => Ok(NativeValue::Null),
        other => Err(ConvertError::generic_mismatch(BaseType::Null, other)),
    }
}

pub(crate) fn boolean(value: &Value) -> Result<NativeValue> {
    match value {
        Value::Boolean(b) => Ok(NativeValue::Boolean(*b)),
        other => Err(ConvertError::generic_mismatch(BaseType::Boolean, other)),
    }
}

/// `int`, plus the `date` / `time-millis` wrappers when the node carries
/// that annotation.
pub(crate) fn int(node: &Schema, value: &Value) -> Result<NativeValue> {
    match (node, value) {
        (_, Value::Int(i))
        | (Schema::Date, Value::Date(i))
        | (Schema::TimeMillis, Value::TimeMillis(i)) => Ok(NativeValue::Int(*i)),
        (_, other) => Err(ConvertError::generic_mismatch(BaseType::Int, other)),
    }
}

/// `long`, plus the time and timestamp wrappers matching the node.
pub(crate) fn long(node: &Schema, value: &Value) -> Result<NativeValue> {
    match (node, value) {
        (_, Value::Long(i))
        | (Schema::TimeMicros, Value::TimeMicros(i))
        | (Schema::TimestampMillis, Value::TimestampMillis(i))
        | (Schema::TimestampMicros, Value::TimestampMicros(i))
        | (Schema::TimestampNanos, Value::TimestampNanos(i))
        | (Schema::LocalTimestampMillis, Value::LocalTimestampMillis(i))
        | (Schema::LocalTimestampMicros, Value::LocalTimestampMicros(i))
        | (Schema::LocalTimestampNanos, Value::LocalTimestampNanos(i)) => {
            Ok(NativeValue::Long(*i))
        }
        (_, other) => Err(ConvertError::generic_mismatch(BaseType::Long, other)),
    }
}

pub(crate) fn float(value: &Value) -> Result<NativeValue> {
    match value {
        Value::Float(f) => Ok(NativeValue::Float(*f)),
        other => Err(ConvertError::generic_mismatch(BaseType::Float, other)),
    }
}

pub(crate) fn double(value: &Value) -> Result<NativeValue> {
    match value {
        Value::Double(d) => Ok(NativeValue::Double(*d)),
        other => Err(ConvertError::generic_mismatch(BaseType::Double, other)),
    }
}

/// `bytes`, plus the `decimal` wrapper (as its two's-complement bytes).
pub(crate) fn bytes(node: &Schema, value: &Value) -> Result<NativeValue> {
    match (node, value) {
        (_, Value::Bytes(b)) => Ok(NativeValue::Bytes(b.clone())),
        (Schema::Decimal(_), Value::Decimal(decimal)) => Vec::<u8>::try_from(decimal)
            .map(NativeValue::Bytes)
            .map_err(|e| ConvertError::TypeMismatch {
                schema_type: BaseType::Bytes.to_string(),
                actual: format!("generic decimal without a byte form ({e})"),
            }),
        (_, other) => Err(ConvertError::generic_mismatch(BaseType::Bytes, other)),
    }
}

/// `string`, plus the `uuid` wrapper (as its hyphenated text).
pub(crate) fn string(node: &Schema, value: &Value) -> Result<NativeValue> {
    match (node, value) {
        (_, Value::String(s)) => Ok(NativeValue::String(s.clone())),
        (Schema::Uuid, Value::Uuid(uuid)) => Ok(NativeValue::String(uuid.to_string())),
        (_, other) => Err(ConvertError::generic_mismatch(BaseType::String, other)),
    }
}

/// Symbol text → atom. The symbol must be one the enum defines, at the
/// index the generic value is tagged with.
pub(crate) fn enumeration(enum_schema: &EnumSchema, value: &Value) -> Result<NativeValue> {
    let Value::Enum(index, symbol) = value else {
        return Err(ConvertError::generic_mismatch(BaseType::Enum, value));
    };

    if !enum_schema.symbols.iter().any(|s| s == symbol) {
        return Err(ConvertError::UnknownSymbol {
            name: display_name(&enum_schema.name),
            symbol: symbol.clone(),
        });
    }

    if enum_schema.symbols.get(*index as usize) != Some(symbol) {
        return Err(ConvertError::TypeMismatch {
            schema_type: format!("enum {}", display_name(&enum_schema.name)),
            actual: format!("generic enum '{symbol}' tagged with index {index}"),
        });
    }

    Ok(NativeValue::Atom(Symbol::new(symbol)))
}

/// Decode every element with the element strategy, keeping order and length.
pub(crate) fn array<'a>(cx: Context<'a>, items: &'a Schema, value: &Value) -> Result<NativeValue> {
    let Value::Array(elements) = value else {
        return Err(ConvertError::generic_mismatch(BaseType::Array, value));
    };

    let element_type = cx.resolve(items)?;
    let mut decoded = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let native = element_type
            .decode(cx, element)
            .map_err(|e| e.at(format!("element {index}")))?;
        decoded.push(native);
    }

    Ok(NativeValue::List(decoded))
}

/// Keys become symbols; every value is decoded with the value strategy.
pub(crate) fn map<'a>(cx: Context<'a>, values: &'a Schema, value: &Value) -> Result<NativeValue> {
    let Value::Map(entries) = value else {
        return Err(ConvertError::generic_mismatch(BaseType::Map, value));
    };

    let value_type = cx.resolve(values)?;
    let mut decoded = NativeMap::with_capacity(entries.len());
    for (key, entry) in entries {
        let native = value_type
            .decode(cx, entry)
            .map_err(|e| e.at(format!("key '{key}'")))?;
        decoded.insert(Symbol::new(key), native);
    }

    Ok(NativeValue::Map(decoded))
}

/// Walk the schema's fields in declared order, decoding each one found in
/// the generic record under the field's name.
pub(crate) fn record<'a>(
    cx: Context<'a>,
    record: &'a RecordSchema,
    value: &Value,
) -> Result<NativeValue> {
    let Value::Record(fields) = value else {
        return Err(ConvertError::generic_mismatch(BaseType::Record, value));
    };

    let mut decoded = NativeMap::with_capacity(record.fields.len());
    for field in &record.fields {
        let generic = fields
            .iter()
            .find(|(name, _)| name == &field.name)
            .map(|(_, v)| v)
            .ok_or_else(|| ConvertError::MissingField {
                record: display_name(&record.name),
                field: field.name.clone(),
            })?;

        let native = cx
            .decode(&field.schema, generic)
            .map_err(|e| e.at(format!("field '{}'", field.name)))?;
        decoded.insert(Symbol::new(&field.name), native);
    }

    Ok(NativeValue::Map(decoded))
}

pub(crate) fn unsupported(base: BaseType) -> Result<NativeValue> {
    Err(ConvertError::Unsupported(base))
}
