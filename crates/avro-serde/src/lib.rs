//! Avro serializer/deserializer pair for message-broker clients.
//!
//! [`serde_pair`] wraps an [`avro_types::Converter`] for one schema into an
//! [`AvroSerializer`] / [`AvroDeserializer`]. Without a registry the payload
//! is the bare Avro datum. With a [`RegistryClient`] configured, the
//! serializer registers its schema under `"{topic}-key"` or
//! `"{topic}-value"` and frames each datum with the returned id (see
//! [`wire`]); the deserializer reads the writer schema id from the frame and
//! resolves the datum against its own schema.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use apache_avro::Schema;
//! use avro_serde::{serde_pair, Deserializer, MemoryRegistry, SerdeConfig, Serializer};
//! use native_types::NativeValue;
//!
//! let schema = Schema::parse_str(r#"{"type": "map", "values": "long"}"#).unwrap();
//! let config = SerdeConfig::new().with_registry_client(Arc::new(MemoryRegistry::new()));
//! let (serializer, deserializer) = serde_pair(schema, config).unwrap();
//!
//! let value = NativeValue::record([("hits", NativeValue::Long(3))]);
//! let bytes = serializer.serialize("stats", &value).unwrap();
//! assert_eq!(deserializer.deserialize("stats", &bytes).unwrap(), value);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod registry;
pub mod wire;

pub use codec::{
    serde_pair, serde_pair_with_types, subject_name, AvroDeserializer, AvroSerializer,
    Deserializer, Serializer,
};
pub use config::SerdeConfig;
pub use error::{Result, SerdeError};
pub use registry::{MemoryRegistry, RegistryClient};
