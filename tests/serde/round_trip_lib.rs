use super::{init_logging, load_schema_file, sample_order, ORDER_SCHEMA};
use avro_native::prelude::*;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

#[test]
fn test_order_round_trip_without_registry() -> anyhow::Result<()> {
    init_logging();

    let schema = load_schema_file(ORDER_SCHEMA)?;
    let (serializer, deserializer) = serde_pair(schema, SerdeConfig::default())?;

    for status in ["PENDING", "SHIPPED", "DELIVERED"] {
        let order = sample_order(status);
        let bytes = serializer.serialize("orders", &order)?;
        assert_eq!(deserializer.deserialize("orders", &bytes)?, order);
    }

    Ok(())
}

#[test]
fn test_bytes_are_plain_avro_datum() -> anyhow::Result<()> {
    let schema = load_schema_file(ORDER_SCHEMA)?;
    let (serializer, _) = serde_pair(schema.clone(), SerdeConfig::default())?;

    let bytes = serializer.serialize("orders", &sample_order("SHIPPED"))?;
    let generic = apache_avro::from_avro_datum(&schema, &mut bytes.as_slice(), None)?;

    let Value::Record(fields) = generic else {
        anyhow::bail!("expected a generic record");
    };
    assert_eq!(fields[0], ("id".to_string(), Value::Long(1001)));
    assert_eq!(
        fields[2],
        ("status".to_string(), Value::Enum(1, "SHIPPED".to_string()))
    );
    Ok(())
}

#[test]
fn test_standard_logical_types_through_bytes() -> anyhow::Result<()> {
    init_logging();

    let schema = load_schema_file(ORDER_SCHEMA)?;
    let types = Arc::new(TypeRegistry::with_standard_logical_types());
    let (serializer, deserializer) =
        serde_pair_with_types(schema, types, SerdeConfig::default())?;

    let placed_at = Utc.timestamp_millis_opt(1_718_451_045_500).unwrap();
    let NativeValue::Map(mut order) = sample_order("PENDING") else {
        anyhow::bail!("expected a record-shaped map");
    };
    order.insert(Symbol::new("placed_at"), NativeValue::Timestamp(placed_at));
    let order = NativeValue::Map(order);

    let bytes = serializer.serialize("orders", &order)?;
    let decoded = deserializer.deserialize("orders", &bytes)?;
    assert_eq!(decoded.get("placed_at"), Some(&NativeValue::Timestamp(placed_at)));
    assert_eq!(decoded, order);
    Ok(())
}

#[test]
fn test_unknown_enum_symbol_is_rejected() -> anyhow::Result<()> {
    let schema = load_schema_file(ORDER_SCHEMA)?;
    let (serializer, _) = serde_pair(schema, SerdeConfig::default())?;

    let err = serializer
        .serialize("orders", &sample_order("LOST"))
        .unwrap_err();
    let SerdeError::Convert(convert) = err else {
        anyhow::bail!("expected a conversion error, got {err}");
    };
    assert!(matches!(
        convert.root_cause(),
        ConvertError::UnknownSymbol { symbol, .. } if symbol == "LOST"
    ));
    assert!(convert.to_string().starts_with("field 'status': "));
    Ok(())
}

#[test]
fn test_union_schema_fails_on_first_message() -> anyhow::Result<()> {
    let schema = Schema::parse_str(r#"["null", "string"]"#)?;
    let (serializer, _) = serde_pair(schema, SerdeConfig::default())?;

    let err = serializer
        .serialize("notes", &NativeValue::from("hello"))
        .unwrap_err();
    assert!(matches!(
        err,
        SerdeError::Convert(ConvertError::Unsupported(BaseType::Union))
    ));
    Ok(())
}
