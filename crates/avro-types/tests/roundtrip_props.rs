//! Property-based round-trip tests for the conversion engine.
//!
//! For every schema shape covered here, `decode(encode(v)) == v` on the
//! native side and `encode(decode(g)) == g` on the generic side.

use apache_avro::types::Value;
use apache_avro::Schema;
use avro_types::Converter;
use native_types::{NativeValue, Symbol};
use proptest::prelude::*;
use std::collections::HashMap;

// ============================================================================
// Generators
// ============================================================================

/// Primitive schemas paired with a matching native value.
fn arb_primitive() -> impl Strategy<Value = (Schema, NativeValue)> {
    prop_oneof![
        Just((Schema::Null, NativeValue::Null)),
        any::<bool>().prop_map(|b| (Schema::Boolean, NativeValue::Boolean(b))),
        any::<i32>().prop_map(|i| (Schema::Int, NativeValue::Int(i))),
        any::<i64>().prop_map(|i| (Schema::Long, NativeValue::Long(i))),
        (-1.0e6f32..1.0e6).prop_map(|f| (Schema::Float, NativeValue::Float(f))),
        (-1.0e12f64..1.0e12).prop_map(|d| (Schema::Double, NativeValue::Double(d))),
        prop::collection::vec(any::<u8>(), 0..64)
            .prop_map(|b| (Schema::Bytes, NativeValue::Bytes(b))),
        ".{0,32}".prop_map(|s| (Schema::String, NativeValue::String(s))),
    ]
}

/// A native value of a different kind than the one given.
fn mismatched(value: &NativeValue) -> NativeValue {
    match value {
        NativeValue::String(_) => NativeValue::Int(0),
        _ => NativeValue::String("mismatch".to_string()),
    }
}

/// A generic value of a different runtime type than the one given.
fn mismatched_generic(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::Int(0),
        _ => Value::String("mismatch".to_string()),
    }
}

fn arb_symbol_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,12}"
}

fn converter(json: &str) -> Converter {
    Converter::new(Schema::parse_str(json).unwrap()).unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn primitive_native_round_trip((schema, native) in arb_primitive()) {
        let converter = Converter::new(schema).unwrap();
        let generic = converter.encode(&native).unwrap();
        prop_assert_eq!(converter.decode(&generic).unwrap(), native);
    }

    #[test]
    fn primitive_generic_round_trip((schema, native) in arb_primitive()) {
        let converter = Converter::new(schema).unwrap();
        let generic = converter.encode(&native).unwrap();
        let native = converter.decode(&generic).unwrap();
        prop_assert_eq!(converter.encode(&native).unwrap(), generic);
    }

    #[test]
    fn primitive_rejects_wrong_runtime_type((schema, native) in arb_primitive()) {
        let converter = Converter::new(schema).unwrap();
        let err = converter.encode(&mismatched(&native)).unwrap_err();
        prop_assert!(err.is_type_mismatch());
    }

    #[test]
    fn primitive_decode_rejects_wrong_runtime_type((schema, native) in arb_primitive()) {
        let converter = Converter::new(schema).unwrap();
        let generic = converter.encode(&native).unwrap();
        let err = converter.decode(&mismatched_generic(&generic)).unwrap_err();
        prop_assert!(err.is_type_mismatch());
    }

    #[test]
    fn array_keeps_order_and_length(items in prop::collection::vec(any::<i64>(), 0..32)) {
        let converter = converter(r#"{"type": "array", "items": "long"}"#);
        let native = NativeValue::List(items.iter().copied().map(NativeValue::Long).collect());

        let generic = converter.encode(&native).unwrap();
        prop_assert!(matches!(&generic, Value::Array(elements) if elements.len() == items.len()));
        prop_assert_eq!(converter.decode(&generic).unwrap(), native);
    }

    #[test]
    fn map_round_trip(entries in prop::collection::hash_map(".{0,8}", ".{0,16}", 0..16)) {
        let converter = converter(r#"{"type": "map", "values": "string"}"#);
        let generic = Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<HashMap<_, _>>(),
        );

        let native = converter.decode(&generic).unwrap();
        prop_assert_eq!(native.as_map().unwrap().len(), entries.len());
        prop_assert_eq!(converter.encode(&native).unwrap(), generic);
    }

    #[test]
    fn enum_symbol_maps_to_its_index(
        symbols in prop::collection::hash_set(arb_symbol_name(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let symbols: Vec<String> = symbols.into_iter().collect();
        let schema = enum_schema_json(&symbols);
        let converter = converter(&schema);

        let index = pick.index(symbols.len());
        let native = NativeValue::Atom(Symbol::new(&symbols[index]));
        let generic = converter.encode(&native).unwrap();
        prop_assert_eq!(&generic, &Value::Enum(index as u32, symbols[index].clone()));
        prop_assert_eq!(converter.decode(&generic).unwrap(), native);
    }

    #[test]
    fn record_round_trip(id in any::<i32>(), name in ".{0,24}") {
        let converter = converter(
            r#"{"type": "record", "name": "User", "fields": [
                {"name": "id", "type": "int"},
                {"name": "name", "type": "string"}
            ]}"#,
        );
        let native = NativeValue::record([
            ("id", NativeValue::Int(id)),
            ("name", NativeValue::String(name)),
        ]);

        let generic = converter.encode(&native).unwrap();
        prop_assert_eq!(converter.decode(&generic).unwrap(), native);
    }
}

/// Enum schema JSON for the given symbols.
fn enum_schema_json(symbols: &[String]) -> String {
    let quoted: Vec<String> = symbols.iter().map(|s| format!("\"{s}\"")).collect();
    format!(
        r#"{{"type": "enum", "name": "Generated", "symbols": [{}]}}"#,
        quoted.join(", ")
    )
}
