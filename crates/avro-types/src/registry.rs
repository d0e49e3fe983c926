//! Type resolution.
//!
//! [`TypeRegistry`] maps a schema node to the [`SchemaType`] strategy that
//! converts its values. The dispatch key is `(base type, logical type)`:
//! built-in base types always resolve to their closed [`SchemaType`]
//! variant, and a logical annotation only changes the outcome when a
//! strategy was registered for that exact pair. Unregistered annotations fall
//! back to the plain base-type strategy.

use crate::error::{ConvertError, Result};
use crate::logical::{DateLogical, LogicalType, TimestampLogical, UuidLogical};
use crate::node::{self, BaseType, DispatchKey, NamedSchemas};
use crate::strategy::SchemaType;
use apache_avro::Schema;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Explicit dispatch table from schema nodes to conversion strategies.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    logical: HashMap<BaseType, HashMap<String, Arc<dyn LogicalType>>>,
}

impl TypeRegistry {
    /// Registry with the built-in base types only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in base types plus the standard logical
    /// strategies (`timestamp-millis`, `timestamp-micros`, `date`, `uuid`).
    pub fn with_standard_logical_types() -> Self {
        let mut registry = Self::new();
        registry.register(BaseType::Long, TimestampLogical::millis());
        registry.register(BaseType::Long, TimestampLogical::micros());
        registry.register(BaseType::Int, DateLogical);
        registry.register(BaseType::String, UuidLogical);
        registry
    }

    /// Register `strategy` for nodes of `base` annotated with
    /// `strategy.name()`.
    ///
    /// Returns the strategy previously registered under the same key, if any.
    pub fn register<L>(&mut self, base: BaseType, strategy: L) -> Option<Arc<dyn LogicalType>>
    where
        L: LogicalType + 'static,
    {
        self.register_arc(base, Arc::new(strategy))
    }

    /// Register an already shared strategy.
    pub fn register_arc(
        &mut self,
        base: BaseType,
        strategy: Arc<dyn LogicalType>,
    ) -> Option<Arc<dyn LogicalType>> {
        let name = strategy.name().to_string();
        debug!("Registering logical type strategy for {base}({name})");
        self.logical.entry(base).or_default().insert(name, strategy)
    }

    /// Whether a logical strategy is registered for `key`.
    pub fn is_registered(&self, key: &DispatchKey) -> bool {
        key.logical
            .as_deref()
            .is_some_and(|logical| self.lookup(key.base, logical).is_some())
    }

    fn lookup(&self, base: BaseType, logical: &str) -> Option<&Arc<dyn LogicalType>> {
        self.logical.get(&base).and_then(|by_name| by_name.get(logical))
    }

    /// Dispatch key of `node`, following named references through `names`.
    pub fn dispatch_key(&self, node: &Schema, names: &NamedSchemas) -> Result<DispatchKey> {
        let node = follow_ref(node, names)?;
        let base = node::base_type(node).ok_or_else(|| unknown_type(node))?;
        Ok(DispatchKey {
            base,
            logical: node::logical_type(node).map(str::to_string),
        })
    }

    /// Select the strategy for `node`.
    ///
    /// Fails only with [`ConvertError::UnknownType`], when the node has no
    /// base type in the fixed vocabulary or names a type `names` does not
    /// define.
    pub fn resolve<'a>(
        &'a self,
        node: &'a Schema,
        names: &'a NamedSchemas,
    ) -> Result<SchemaType<'a>> {
        let node = follow_ref(node, names)?;
        let builtin = SchemaType::builtin(node).ok_or_else(|| unknown_type(node))?;

        if let Some(logical) = node::logical_type(node) {
            let base = builtin.base_type();
            if let Some(strategy) = self.lookup(base, logical) {
                trace!("Resolved {base}({logical}) to registered logical strategy");
                return Ok(SchemaType::Logical {
                    base,
                    strategy: strategy.clone(),
                    node,
                });
            }
            trace!("No strategy registered for {base}({logical}), using {base}");
        }

        Ok(builtin)
    }
}

pub(crate) fn follow_ref<'a>(node: &'a Schema, names: &'a NamedSchemas) -> Result<&'a Schema> {
    match node {
        Schema::Ref { name } => names.get(name).ok_or_else(|| {
            ConvertError::UnknownType(format!(
                "unresolved reference to {}",
                node::display_name(name)
            ))
        }),
        other => Ok(other),
    }
}

fn unknown_type(node: &Schema) -> ConvertError {
    ConvertError::UnknownType(format!("{node:?}"))
}
