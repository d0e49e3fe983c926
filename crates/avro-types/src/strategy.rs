//! Conversion strategies.
//!
//! A [`SchemaType`] is the strategy the resolver picked for one schema node.
//! Built-in base types are a closed set of variants; registered logical types
//! arrive through the [`SchemaType::Logical`] variant. Complex variants borrow
//! only the child node they need and resolve it again through a [`Context`]
//! on every call, so arbitrarily deep (and recursive) schemas are handled
//! without building the strategy tree up front.

use crate::error::Result;
use crate::logical::LogicalType;
use crate::node::{BaseType, DispatchKey, NamedSchemas};
use crate::registry::{self, TypeRegistry};
use crate::{forward, reverse};
use apache_avro::schema::{EnumSchema, RecordSchema};
use apache_avro::types::Value;
use apache_avro::Schema;
use native_types::NativeValue;
use std::sync::Arc;

/// Strategy for converting values of one schema node.
#[derive(Debug, Clone)]
pub enum SchemaType<'a> {
    Null,
    Boolean,
    /// Carries the node so `date` / `time-millis` wrappers survive a fallback.
    Int(&'a Schema),
    /// Carries the node so timestamp and time wrappers survive a fallback.
    Long(&'a Schema),
    Float,
    Double,
    /// Carries the node so `decimal` wrappers survive a fallback.
    Bytes(&'a Schema),
    /// Carries the node so `uuid` wrappers survive a fallback.
    String(&'a Schema),
    Enum(&'a EnumSchema),
    /// Element node.
    Array(&'a Schema),
    /// Value node.
    Map(&'a Schema),
    Record {
        node: &'a Schema,
        record: &'a RecordSchema,
    },
    Fixed,
    Union,
    Logical {
        base: BaseType,
        strategy: Arc<dyn LogicalType>,
        node: &'a Schema,
    },
}

impl<'a> SchemaType<'a> {
    /// Built-in strategy for a node, ignoring any logical annotation.
    ///
    /// Returns `None` for references and for shapes with no base type.
    pub fn builtin(node: &'a Schema) -> Option<Self> {
        let strategy = match node {
            Schema::Null => Self::Null,
            Schema::Boolean => Self::Boolean,
            Schema::Int | Schema::Date | Schema::TimeMillis => Self::Int(node),
            Schema::Long
            | Schema::TimeMicros
            | Schema::TimestampMillis
            | Schema::TimestampMicros
            | Schema::TimestampNanos
            | Schema::LocalTimestampMillis
            | Schema::LocalTimestampMicros
            | Schema::LocalTimestampNanos => Self::Long(node),
            Schema::Float => Self::Float,
            Schema::Double => Self::Double,
            Schema::Bytes | Schema::Decimal(_) | Schema::BigDecimal => Self::Bytes(node),
            Schema::String | Schema::Uuid => Self::String(node),
            Schema::Enum(enum_schema) => Self::Enum(enum_schema),
            Schema::Array(array) => Self::Array(&array.items),
            Schema::Map(map) => Self::Map(&map.types),
            Schema::Record(record) => Self::Record { node, record },
            Schema::Fixed(_) | Schema::Duration => Self::Fixed,
            Schema::Union(_) => Self::Union,
            _ => return None,
        };
        Some(strategy)
    }

    /// Base type this strategy converts.
    pub fn base_type(&self) -> BaseType {
        match self {
            Self::Null => BaseType::Null,
            Self::Boolean => BaseType::Boolean,
            Self::Int(_) => BaseType::Int,
            Self::Long(_) => BaseType::Long,
            Self::Float => BaseType::Float,
            Self::Double => BaseType::Double,
            Self::Bytes(_) => BaseType::Bytes,
            Self::String(_) => BaseType::String,
            Self::Enum(_) => BaseType::Enum,
            Self::Array(_) => BaseType::Array,
            Self::Map(_) => BaseType::Map,
            Self::Record { .. } => BaseType::Record,
            Self::Fixed => BaseType::Fixed,
            Self::Union => BaseType::Union,
            Self::Logical { base, .. } => *base,
        }
    }

    /// Key this strategy was selected under.
    pub fn key(&self) -> DispatchKey {
        match self {
            Self::Logical { strategy, .. } => {
                DispatchKey::logical(self.base_type(), strategy.name())
            }
            _ => DispatchKey::base(self.base_type()),
        }
    }

    /// Whether this is a registered logical-type strategy.
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::Logical { .. })
    }

    /// Generic value → native value.
    pub fn decode(&self, cx: Context<'a>, value: &Value) -> Result<NativeValue> {
        match self {
            Self::Null => reverse::null(value),
            Self::Boolean => reverse::boolean(value),
            Self::Int(node) => reverse::int(node, value),
            Self::Long(node) => reverse::long(node, value),
            Self::Float => reverse::float(value),
            Self::Double => reverse::double(value),
            Self::Bytes(node) => reverse::bytes(node, value),
            Self::String(node) => reverse::string(node, value),
            Self::Enum(enum_schema) => reverse::enumeration(enum_schema, value),
            Self::Array(items) => reverse::array(cx, *items, value),
            Self::Map(values) => reverse::map(cx, *values, value),
            Self::Record { record, .. } => reverse::record(cx, *record, value),
            Self::Fixed => reverse::unsupported(BaseType::Fixed),
            Self::Union => reverse::unsupported(BaseType::Union),
            Self::Logical { strategy, node, .. } => strategy.decode(node, value),
        }
    }

    /// Native value → generic value.
    pub fn encode(&self, cx: Context<'a>, value: &NativeValue) -> Result<Value> {
        match self {
            Self::Null => forward::null(value),
            Self::Boolean => forward::boolean(value),
            Self::Int(node) => forward::int(node, value),
            Self::Long(node) => forward::long(node, value),
            Self::Float => forward::float(value),
            Self::Double => forward::double(value),
            Self::Bytes(node) => forward::bytes(node, value),
            Self::String(node) => forward::string(node, value),
            Self::Enum(enum_schema) => forward::enumeration(enum_schema, value),
            Self::Array(items) => forward::array(cx, *items, value),
            Self::Map(values) => forward::map(cx, *values, value),
            Self::Record { node, record } => forward::record(cx, *node, *record, value),
            Self::Fixed => forward::unsupported(BaseType::Fixed),
            Self::Union => forward::unsupported(BaseType::Union),
            Self::Logical { strategy, node, .. } => strategy.encode(node, value),
        }
    }
}

/// What a strategy needs to resolve nested nodes: the registry and the
/// named-type table of the top-level schema.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    registry: &'a TypeRegistry,
    names: &'a NamedSchemas,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a TypeRegistry, names: &'a NamedSchemas) -> Self {
        Self { registry, names }
    }

    /// Resolve the strategy for a nested node.
    pub fn resolve(&self, node: &'a Schema) -> Result<SchemaType<'a>> {
        self.registry.resolve(node, self.names)
    }

    /// The definition a named reference points at; other nodes as they are.
    pub fn definition(&self, node: &'a Schema) -> Result<&'a Schema> {
        registry::follow_ref(node, self.names)
    }

    /// Resolve `node` and decode `value` with it.
    pub fn decode(&self, node: &'a Schema, value: &Value) -> Result<NativeValue> {
        self.resolve(node)?.decode(*self, value)
    }

    /// Resolve `node` and encode `value` with it.
    pub fn encode(&self, node: &'a Schema, value: &NativeValue) -> Result<Value> {
        self.resolve(node)?.encode(*self, value)
    }
}
