//! Schema-driven conversion between Avro generic values and native values.
//!
//! This crate holds the two halves of the converter:
//!
//! - **Type Resolver** ([`TypeRegistry`]): maps a schema node to the strategy
//!   that converts its values, keyed by `(base type, logical type)`.
//! - **Conversion Engine** ([`SchemaType`]): per-type `decode`
//!   (generic → native, see `reverse`) and `encode` (native → generic, see
//!   `forward`), recursing through the resolver for nested nodes.
//!
//! Logical types are the extension point: implement [`LogicalType`] and
//! register it to take over a `(base, logical)` key. Unregistered logical
//! annotations fall back to their base type.
//!
//! # Example
//!
//! ```rust
//! use apache_avro::{types::Value, Schema};
//! use avro_types::Converter;
//! use native_types::NativeValue;
//!
//! let schema = Schema::parse_str(
//!     r#"{"type": "enum", "name": "Letter", "symbols": ["A", "B", "C"]}"#,
//! ).unwrap();
//! let converter = Converter::new(schema).unwrap();
//!
//! let native = converter.decode(&Value::Enum(1, "B".to_string())).unwrap();
//! assert_eq!(native, NativeValue::atom("B"));
//! assert_eq!(converter.encode(&native).unwrap(), Value::Enum(1, "B".to_string()));
//! ```

pub mod converter;
pub mod error;
mod forward;
pub mod logical;
pub mod node;
pub mod registry;
mod reverse;
pub mod strategy;

pub use converter::Converter;
pub use error::{generic_kind, ConvertError, Result};
pub use logical::{DateLogical, LogicalType, TimePrecision, TimestampLogical, UuidLogical};
pub use node::{BaseType, DispatchKey, NamedSchemas};
pub use registry::TypeRegistry;
pub use strategy::{Context, SchemaType};
