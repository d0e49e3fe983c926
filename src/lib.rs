//! avro-native
//!
//! Schema-driven, bidirectional conversion between Avro generic values and
//! native values, plus a serializer/deserializer pair for message-broker
//! clients.
//!
//! # Crates
//!
//! - [`native_types`] - Native values: scalars, lists, symbol-keyed maps, atoms
//! - [`avro_types`] - Type resolver and conversion engine
//! - [`avro_serde`] - Byte-level serializer/deserializer and registry framing
//!
//! # Example
//!
//! ```rust
//! use avro_native::prelude::*;
//!
//! let schema = Schema::parse_str(
//!     r#"{"type": "record", "name": "User", "fields": [
//!         {"name": "id", "type": "int"},
//!         {"name": "name", "type": "string"}
//!     ]}"#,
//! ).unwrap();
//!
//! let (serializer, deserializer) = serde_pair(schema, SerdeConfig::default()).unwrap();
//! let user = NativeValue::record([
//!     ("id", NativeValue::Int(42)),
//!     ("name", NativeValue::from("Alice")),
//! ]);
//!
//! let bytes = serializer.serialize("users", &user).unwrap();
//! assert_eq!(deserializer.deserialize("users", &bytes).unwrap(), user);
//! ```

pub use apache_avro;
pub use avro_serde;
pub use avro_types;
pub use native_types;

/// Common imports for working with converters and serializers.
pub mod prelude {
    pub use apache_avro::types::Value;
    pub use apache_avro::Schema;
    pub use avro_serde::{
        serde_pair, serde_pair_with_types, Deserializer, MemoryRegistry, RegistryClient,
        SerdeConfig, SerdeError, Serializer,
    };
    pub use avro_types::{BaseType, ConvertError, Converter, DispatchKey, LogicalType, TypeRegistry};
    pub use native_types::{NativeMap, NativeValue, Symbol};
}
