//! Serializer/deserializer end-to-end tests
//!
//! Tests that native values survive the full path to message bytes and back,
//! with and without schema registry framing.

mod framing_lib;
mod round_trip_lib;

use avro_native::prelude::*;
use std::io::Write;
use std::path::Path;

/// Initialize logging for a test; ignores repeated initialization.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("avro_types=debug,avro_serde=debug")
        .try_init()
        .ok();
}

/// Order record with nested line items, an enum status and a tag map.
pub const ORDER_SCHEMA: &str = r#"{
    "type": "record",
    "name": "Order",
    "namespace": "com.example.shop",
    "fields": [
        {"name": "id", "type": "long"},
        {"name": "placed_at", "type": {"type": "long", "logicalType": "timestamp-millis"}},
        {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["PENDING", "SHIPPED", "DELIVERED"]}},
        {"name": "lines", "type": {"type": "array", "items": {
            "type": "record",
            "name": "Line",
            "fields": [
                {"name": "sku", "type": "string"},
                {"name": "quantity", "type": "int"},
                {"name": "price", "type": "double"}
            ]
        }}},
        {"name": "tags", "type": {"type": "map", "values": "string"}}
    ]
}"#;

/// Write `json` to a temporary `.avsc` file and parse it back.
pub fn load_schema_file(json: &str) -> anyhow::Result<Schema> {
    let mut file = tempfile::Builder::new().suffix(".avsc").tempfile()?;
    file.write_all(json.as_bytes())?;
    read_schema(file.path())
}

fn read_schema(path: &Path) -> anyhow::Result<Schema> {
    let content = std::fs::read_to_string(path)?;
    Ok(Schema::parse_str(&content)?)
}

/// Native order used across tests.
pub fn sample_order(status: &str) -> NativeValue {
    let line = |sku: &str, quantity: i32, price: f64| {
        NativeValue::record([
            ("sku", NativeValue::from(sku)),
            ("quantity", NativeValue::Int(quantity)),
            ("price", NativeValue::Double(price)),
        ])
    };

    let mut tags = NativeMap::new();
    tags.insert(Symbol::new("channel"), NativeValue::from("web"));
    tags.insert(Symbol::new("region"), NativeValue::from("eu-west"));

    NativeValue::record([
        ("id", NativeValue::Long(1001)),
        ("placed_at", NativeValue::Long(1_718_451_045_500)),
        ("status", NativeValue::atom(status)),
        (
            "lines",
            NativeValue::List(vec![line("A-1", 2, 9.5), line("B-7", 1, 120.0)]),
        ),
        ("tags", NativeValue::Map(tags)),
    ])
}
