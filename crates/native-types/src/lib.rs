//! Native value types for the avro-native converter.
//!
//! This crate provides the application-facing side of every conversion:
//!
//! - [`NativeValue`] - Scalars, sequences, symbol-keyed maps and enum atoms
//! - [`Symbol`] - Interned names used for map keys, record fields and enum values
//! - [`ValueKind`] - Runtime shape of a value, used in diagnostics
//!
//! # Architecture
//!
//! ```text
//! native-types (this crate)
//!    │
//!    └─── avro-types   (decodes Avro generic values into NativeValue and back)
//!            │
//!            └─── avro-serde   (wraps the conversion into broker serializers)
//! ```
//!
//! # Example
//!
//! ```rust
//! use native_types::{NativeValue, Symbol};
//!
//! let record = NativeValue::record([
//!     ("id", NativeValue::Int(7)),
//!     ("name", NativeValue::from("a")),
//! ]);
//!
//! assert_eq!(record.get("id"), Some(&NativeValue::Int(7)));
//! assert_eq!(Symbol::new("id"), Symbol::from("id"));
//! ```

pub mod symbol;
pub mod values;

pub use symbol::Symbol;
pub use values::{NativeMap, NativeValue, ValueKind};
