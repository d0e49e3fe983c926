//! Schema node operations.
//!
//! The conversion engine reads only a handful of things from a schema node:
//! its base type, an optional logical-type annotation, and the children of
//! complex types. This module derives those from `apache_avro::Schema` and
//! collects the table used to follow named-type references.

use crate::error::{ConvertError, Result};
use crate::strategy::SchemaType;
use apache_avro::schema::Name;
use apache_avro::Schema;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The fixed vocabulary of Avro base types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Record,
    Enum,
    Array,
    Map,
    Fixed,
    Union,
}

impl BaseType {
    /// Every base type, in declaration order.
    pub const ALL: [BaseType; 14] = [
        BaseType::Null,
        BaseType::Boolean,
        BaseType::Int,
        BaseType::Long,
        BaseType::Float,
        BaseType::Double,
        BaseType::Bytes,
        BaseType::String,
        BaseType::Record,
        BaseType::Enum,
        BaseType::Array,
        BaseType::Map,
        BaseType::Fixed,
        BaseType::Union,
    ];

    /// Avro name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Null => "null",
            BaseType::Boolean => "boolean",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Float => "float",
            BaseType::Double => "double",
            BaseType::Bytes => "bytes",
            BaseType::String => "string",
            BaseType::Record => "record",
            BaseType::Enum => "enum",
            BaseType::Array => "array",
            BaseType::Map => "map",
            BaseType::Fixed => "fixed",
            BaseType::Union => "union",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        BaseType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConvertError::UnknownType(s.to_string()))
    }
}

/// Dispatch key of a schema node: base type plus optional logical type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    pub base: BaseType,
    pub logical: Option<String>,
}

impl DispatchKey {
    /// Key for a plain, unannotated base type.
    pub fn base(base: BaseType) -> Self {
        Self {
            base,
            logical: None,
        }
    }

    /// Key for a logical type refining `base`.
    pub fn logical(base: BaseType, logical: impl Into<String>) -> Self {
        Self {
            base,
            logical: Some(logical.into()),
        }
    }
}

impl fmt::Display for DispatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.logical {
            Some(logical) => write!(f, "{}({})", self.base, logical),
            None => write!(f, "{}", self.base),
        }
    }
}

/// Base type of a node, or `None` for references and shapes with no mapping.
///
/// Logical types report the primitive they annotate.
pub fn base_type(node: &Schema) -> Option<BaseType> {
    SchemaType::builtin(node).map(|strategy| strategy.base_type())
}

/// Logical-type annotation of a node, if any.
pub fn logical_type(node: &Schema) -> Option<&'static str> {
    let logical = match node {
        Schema::Date => "date",
        Schema::TimeMillis => "time-millis",
        Schema::TimeMicros => "time-micros",
        Schema::TimestampMillis => "timestamp-millis",
        Schema::TimestampMicros => "timestamp-micros",
        Schema::TimestampNanos => "timestamp-nanos",
        Schema::LocalTimestampMillis => "local-timestamp-millis",
        Schema::LocalTimestampMicros => "local-timestamp-micros",
        Schema::LocalTimestampNanos => "local-timestamp-nanos",
        Schema::Uuid => "uuid",
        Schema::Decimal(_) => "decimal",
        Schema::BigDecimal => "big-decimal",
        Schema::Duration => "duration",
        _ => return None,
    };
    Some(logical)
}

/// Fully qualified name of a named type.
pub fn display_name(name: &Name) -> String {
    name.fullname(None)
}

/// Named types (records, enums, fixed) reachable from a top-level schema,
/// keyed by fully qualified name.
///
/// apache-avro writes a second use of a named type as `Schema::Ref`; this
/// table is what lets the resolver follow such references, including
/// recursive ones.
#[derive(Debug, Clone, Default)]
pub struct NamedSchemas {
    by_name: HashMap<String, Schema>,
}

impl NamedSchemas {
    /// Walk `schema` once and collect every named definition.
    pub fn collect(schema: &Schema) -> Self {
        let mut named = Self::default();
        named.visit(schema);
        named
    }

    fn visit(&mut self, schema: &Schema) {
        match schema {
            Schema::Record(record) => {
                let key = display_name(&record.name);
                if self.by_name.contains_key(&key) {
                    return;
                }
                self.by_name.insert(key, schema.clone());
                for field in &record.fields {
                    self.visit(&field.schema);
                }
            }
            Schema::Enum(enum_schema) => {
                self.by_name
                    .insert(display_name(&enum_schema.name), schema.clone());
            }
            Schema::Fixed(fixed) => {
                self.by_name.insert(display_name(&fixed.name), schema.clone());
            }
            Schema::Array(array) => self.visit(&array.items),
            Schema::Map(map) => self.visit(&map.types),
            Schema::Union(union) => {
                for variant in union.variants() {
                    self.visit(variant);
                }
            }
            _ => {}
        }
    }

    /// Look up a named definition.
    pub fn get(&self, name: &Name) -> Option<&Schema> {
        self.by_name.get(&display_name(name))
    }

    /// Number of named definitions.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no named definitions were found.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_round_trips_through_name() {
        for base in BaseType::ALL {
            assert_eq!(base.as_str().parse::<BaseType>().unwrap(), base);
        }
    }

    #[test]
    fn test_unknown_base_type_name() {
        let err = "decimal128".parse::<BaseType>().unwrap_err();
        assert!(matches!(err, ConvertError::UnknownType(name) if name == "decimal128"));
    }

    #[test]
    fn test_logical_types_report_their_primitive() {
        let schema = Schema::parse_str(r#"{"type": "long", "logicalType": "timestamp-millis"}"#)
            .unwrap();
        assert_eq!(base_type(&schema), Some(BaseType::Long));
        assert_eq!(logical_type(&schema), Some("timestamp-millis"));

        let schema =
            Schema::parse_str(r#"{"type": "string", "logicalType": "uuid"}"#).unwrap();
        assert_eq!(base_type(&schema), Some(BaseType::String));
        assert_eq!(logical_type(&schema), Some("uuid"));

        assert_eq!(logical_type(&Schema::Long), None);
    }

    #[test]
    fn test_dispatch_key_display() {
        assert_eq!(DispatchKey::base(BaseType::Long).to_string(), "long");
        assert_eq!(
            DispatchKey::logical(BaseType::Long, "timestamp-millis").to_string(),
            "long(timestamp-millis)"
        );
    }

    #[test]
    fn test_collect_named_types() {
        let schema = Schema::parse_str(
            r#"{
                "type": "record",
                "name": "Node",
                "namespace": "com.example",
                "fields": [
                    {"name": "color", "type": {"type": "enum", "name": "Color", "symbols": ["RED"]}},
                    {"name": "children", "type": {"type": "array", "items": "Node"}}
                ]
            }"#,
        )
        .unwrap();

        let named = NamedSchemas::collect(&schema);
        assert_eq!(named.len(), 2);

        let Schema::Record(record) = &schema else {
            panic!("expected record");
        };
        let Schema::Array(children) = &record.fields[1].schema else {
            panic!("expected array");
        };
        let Schema::Ref { name } = children.items.as_ref() else {
            panic!("expected reference");
        };
        assert!(matches!(named.get(name), Some(Schema::Record(_))));
    }
}
