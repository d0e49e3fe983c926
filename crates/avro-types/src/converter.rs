//! Top-level entry point: one schema, both directions.

use crate::error::Result;
use crate::node::{DispatchKey, NamedSchemas};
use crate::registry::TypeRegistry;
use crate::strategy::Context;
use apache_avro::types::Value;
use apache_avro::Schema;
use native_types::NativeValue;
use std::sync::Arc;
use tracing::debug;

/// Converter bound to a single top-level schema.
///
/// The root strategy is resolved when the converter is built, so a schema the
/// registry cannot dispatch fails here rather than on the first message.
/// Nested nodes are resolved lazily on every call. The converter holds no
/// mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Converter {
    schema: Schema,
    names: NamedSchemas,
    registry: Arc<TypeRegistry>,
    root: DispatchKey,
}

impl Converter {
    /// Converter using the built-in strategies only.
    pub fn new(schema: Schema) -> Result<Self> {
        Self::with_registry(schema, Arc::new(TypeRegistry::new()))
    }

    /// Converter dispatching through `registry`.
    pub fn with_registry(schema: Schema, registry: Arc<TypeRegistry>) -> Result<Self> {
        let names = NamedSchemas::collect(&schema);
        let root = registry.resolve(&schema, &names)?.key();
        debug!(
            "Built converter for {root} schema with {} named types",
            names.len()
        );

        Ok(Self {
            schema,
            names,
            registry,
            root,
        })
    }

    /// Generic value → native value.
    pub fn decode(&self, value: &Value) -> Result<NativeValue> {
        self.context().decode(&self.schema, value)
    }

    /// Native value → generic value conforming to [`Converter::schema`].
    pub fn encode(&self, value: &NativeValue) -> Result<Value> {
        self.context().encode(&self.schema, value)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Dispatch key of the top-level strategy.
    pub fn root_type(&self) -> &DispatchKey {
        &self.root
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    fn context(&self) -> Context<'_> {
        Context::new(&self.registry, &self.names)
    }
}
