//! Logical-type extension point.
//!
//! Built-in base types are a closed set handled by [`crate::SchemaType`].
//! Logical types are open: anything implementing [`LogicalType`] can be
//! registered in a [`crate::TypeRegistry`] under a `(base type, logical name)`
//! key and will then take over conversion for nodes carrying exactly that
//! annotation.

mod date;
mod timestamp;
mod uuid;

use crate::error::Result;
use apache_avro::types::Value;
use apache_avro::Schema;
use native_types::NativeValue;
use std::fmt;

pub use self::date::DateLogical;
pub use self::timestamp::{TimePrecision, TimestampLogical};
pub use self::uuid::UuidLogical;

/// Conversion strategy for one logical type.
///
/// Implementations must be pure: the same node and value always give the
/// same result, and a value of the wrong runtime type is rejected with
/// [`crate::ConvertError::TypeMismatch`] rather than coerced.
pub trait LogicalType: Send + Sync + fmt::Debug {
    /// Logical type name, e.g. `"timestamp-millis"`.
    fn name(&self) -> &str;

    /// Generic value → native value.
    fn decode(&self, node: &Schema, value: &Value) -> Result<NativeValue>;

    /// Native value → generic value for `node`.
    fn encode(&self, node: &Schema, value: &NativeValue) -> Result<Value>;
}
