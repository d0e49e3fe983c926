use super::{init_logging, load_schema_file, sample_order, ORDER_SCHEMA};
use avro_native::avro_serde::wire;
use avro_native::prelude::*;
use std::sync::Arc;

#[test]
fn test_framed_round_trip() -> anyhow::Result<()> {
    init_logging();

    let registry = Arc::new(MemoryRegistry::new());
    let schema = load_schema_file(ORDER_SCHEMA)?;
    let config = SerdeConfig::new().with_registry_client(registry.clone());
    let (serializer, deserializer) = serde_pair(schema, config)?;

    let order = sample_order("DELIVERED");
    let bytes = serializer.serialize("orders", &order)?;

    let (id, _) = wire::unframe(&bytes)?;
    assert_eq!(registry.versions("orders-value")?, vec![id]);
    assert_eq!(deserializer.deserialize("orders", &bytes)?, order);
    Ok(())
}

#[test]
fn test_key_and_value_subjects() -> anyhow::Result<()> {
    let registry = Arc::new(MemoryRegistry::new());

    let key_config = SerdeConfig::new()
        .key()
        .with_registry_client(registry.clone());
    let (key_serializer, key_deserializer) = serde_pair(Schema::Long, key_config)?;

    let value_config = SerdeConfig::new().with_registry_client(registry.clone());
    let (value_serializer, _) = serde_pair(load_schema_file(ORDER_SCHEMA)?, value_config)?;

    let key_bytes = key_serializer.serialize("orders", &NativeValue::Long(1001))?;
    value_serializer.serialize("orders", &sample_order("PENDING"))?;

    assert_eq!(registry.versions("orders-key")?.len(), 1);
    assert_eq!(registry.versions("orders-value")?.len(), 1);
    assert_eq!(registry.len(), 2);
    assert_eq!(
        key_deserializer.deserialize("orders", &key_bytes)?,
        NativeValue::Long(1001)
    );
    Ok(())
}

#[test]
fn test_reader_resolves_older_writer_schema() -> anyhow::Result<()> {
    let registry = Arc::new(MemoryRegistry::new());

    let writer_schema = Schema::parse_str(
        r#"{"type": "record", "name": "User", "fields": [
            {"name": "id", "type": "int"}
        ]}"#,
    )?;
    let reader_schema = Schema::parse_str(
        r#"{"type": "record", "name": "User", "fields": [
            {"name": "id", "type": "int"},
            {"name": "active", "type": "boolean", "default": true}
        ]}"#,
    )?;

    let (writer, _) = serde_pair(
        writer_schema,
        SerdeConfig::new().with_registry_client(registry.clone()),
    )?;
    let (_, reader) = serde_pair(
        reader_schema,
        SerdeConfig::new().with_registry_client(registry.clone()),
    )?;

    let bytes = writer.serialize("users", &NativeValue::record([("id", NativeValue::Int(5))]))?;
    let user = reader.deserialize("users", &bytes)?;
    assert_eq!(user.get("id"), Some(&NativeValue::Int(5)));
    assert_eq!(user.get("active"), Some(&NativeValue::Boolean(true)));
    Ok(())
}

#[test]
fn test_bad_frames_rejected() -> anyhow::Result<()> {
    let registry = Arc::new(MemoryRegistry::new());
    let config = SerdeConfig::new().with_registry_client(registry);
    let (_, deserializer) = serde_pair(load_schema_file(ORDER_SCHEMA)?, config)?;

    let err = deserializer.deserialize("orders", &[0x00, 0x01]).unwrap_err();
    assert!(matches!(err, SerdeError::InvalidFrame(_)));

    let err = deserializer
        .deserialize("orders", &[0x07, 0x00, 0x00, 0x00, 0x01, 0x02])
        .unwrap_err();
    assert!(matches!(err, SerdeError::InvalidFrame(_)));
    Ok(())
}

#[test]
fn test_trailing_bytes_rejected() -> anyhow::Result<()> {
    init_logging();
    let order = sample_order("SHIPPED");
    let garbage = [0xde, 0xad, 0xbe, 0xef];

    let registry = Arc::new(MemoryRegistry::new());
    let config = SerdeConfig::new().with_registry_client(registry);
    let (serializer, deserializer) = serde_pair(load_schema_file(ORDER_SCHEMA)?, config)?;
    let mut framed = serializer.serialize("orders", &order)?;
    framed.extend_from_slice(&garbage);
    let err = deserializer.deserialize("orders", &framed).unwrap_err();
    assert!(matches!(err, SerdeError::InvalidFrame(_)));

    let (serializer, deserializer) =
        serde_pair(load_schema_file(ORDER_SCHEMA)?, SerdeConfig::default())?;
    let mut unframed = serializer.serialize("orders", &order)?;
    unframed.extend_from_slice(&garbage);
    let err = deserializer.deserialize("orders", &unframed).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid frame: 4 trailing bytes after datum"
    );
    Ok(())
}

#[test]
fn test_registry_url_needs_client() -> anyhow::Result<()> {
    let config = SerdeConfig::from_yaml("registry_url: http://registry:8081")?;
    let result = serde_pair(load_schema_file(ORDER_SCHEMA)?, config);
    assert!(matches!(result, Err(SerdeError::InvalidConfig(_))));
    Ok(())
}
