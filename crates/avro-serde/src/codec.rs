//! Serializer/deserializer pair over a [`Converter`].

use crate::config::SerdeConfig;
use crate::error::{Result, SerdeError};
use crate::registry::RegistryClient;
use crate::wire;
use apache_avro::{from_avro_datum, to_avro_datum, Schema};
use avro_types::{Converter, TypeRegistry};
use native_types::NativeValue;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Turns a native value into message bytes for a topic.
pub trait Serializer: Send + Sync {
    fn serialize(&self, topic: &str, value: &NativeValue) -> Result<Vec<u8>>;
}

/// Turns message bytes from a topic back into a native value.
pub trait Deserializer: Send + Sync {
    fn deserialize(&self, topic: &str, bytes: &[u8]) -> Result<NativeValue>;
}

/// Registry subject for a topic: `"{topic}-key"` or `"{topic}-value"`.
pub fn subject_name(topic: &str, is_key: bool) -> String {
    if is_key {
        format!("{topic}-key")
    } else {
        format!("{topic}-value")
    }
}

/// Build a serializer/deserializer pair for `schema` using the built-in
/// conversion strategies.
pub fn serde_pair(schema: Schema, config: SerdeConfig) -> Result<(AvroSerializer, AvroDeserializer)> {
    serde_pair_with_types(schema, Arc::new(TypeRegistry::new()), config)
}

/// Build a serializer/deserializer pair whose conversion dispatches through
/// `types`.
///
/// The top-level strategy is resolved here, so a schema that cannot be
/// dispatched fails before any message is handled.
pub fn serde_pair_with_types(
    schema: Schema,
    types: Arc<TypeRegistry>,
    config: SerdeConfig,
) -> Result<(AvroSerializer, AvroDeserializer)> {
    config.validate()?;

    let converter = Arc::new(Converter::with_registry(schema, types)?);
    let registry = config.registry_client().cloned();
    debug!(
        "Created Avro serde pair for {} {} (registry: {})",
        converter.root_type(),
        if config.is_key { "keys" } else { "values" },
        registry.is_some()
    );

    let serializer = AvroSerializer {
        converter: Arc::clone(&converter),
        is_key: config.is_key,
        registry: registry.clone(),
        ids_by_subject: RwLock::new(HashMap::new()),
    };
    let deserializer = AvroDeserializer {
        converter,
        registry,
        writers_by_id: RwLock::new(HashMap::new()),
    };

    Ok((serializer, deserializer))
}

/// Encodes native values as Avro datums, framed when a registry is configured.
pub struct AvroSerializer {
    converter: Arc<Converter>,
    is_key: bool,
    registry: Option<Arc<dyn RegistryClient>>,
    ids_by_subject: RwLock<HashMap<String, u32>>,
}

impl AvroSerializer {
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    /// Schema id for `subject`, registering the writer schema on first use.
    fn schema_id(&self, registry: &dyn RegistryClient, subject: &str) -> Result<u32> {
        if let Some(&id) = self
            .ids_by_subject
            .read()
            .map_err(|_| cache_poisoned())?
            .get(subject)
        {
            return Ok(id);
        }

        let id = registry.register(subject, self.converter.schema())?;
        debug!("Using schema id {id} for subject {subject}");
        self.ids_by_subject
            .write()
            .map_err(|_| cache_poisoned())?
            .insert(subject.to_string(), id);
        Ok(id)
    }
}

impl Serializer for AvroSerializer {
    fn serialize(&self, topic: &str, value: &NativeValue) -> Result<Vec<u8>> {
        let generic = self.converter.encode(value)?;
        let datum = to_avro_datum(self.converter.schema(), generic)?;

        match &self.registry {
            Some(registry) => {
                let subject = subject_name(topic, self.is_key);
                let id = self.schema_id(registry.as_ref(), &subject)?;
                Ok(wire::frame(id, &datum))
            }
            None => Ok(datum),
        }
    }
}

/// Decodes Avro datums into native values, resolving the writer schema from
/// the registry when one is configured.
pub struct AvroDeserializer {
    converter: Arc<Converter>,
    registry: Option<Arc<dyn RegistryClient>>,
    writers_by_id: RwLock<HashMap<u32, Arc<Schema>>>,
}

impl AvroDeserializer {
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    fn writer_schema(&self, registry: &dyn RegistryClient, id: u32) -> Result<Arc<Schema>> {
        if let Some(schema) = self
            .writers_by_id
            .read()
            .map_err(|_| cache_poisoned())?
            .get(&id)
        {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(registry.schema_by_id(id)?);
        debug!("Fetched writer schema id {id}");
        self.writers_by_id
            .write()
            .map_err(|_| cache_poisoned())?
            .insert(id, Arc::clone(&schema));
        Ok(schema)
    }
}

impl Deserializer for AvroDeserializer {
    fn deserialize(&self, topic: &str, bytes: &[u8]) -> Result<NativeValue> {
        let reader = self.converter.schema();

        let generic = match &self.registry {
            Some(registry) => {
                let (id, mut datum) = wire::unframe(bytes)?;
                let writer = self.writer_schema(registry.as_ref(), id)?;
                let generic = from_avro_datum(&writer, &mut datum, Some(reader))?;
                ensure_consumed(datum)?;
                generic
            }
            None => {
                let mut datum = bytes;
                let generic = from_avro_datum(reader, &mut datum, None)?;
                ensure_consumed(datum)?;
                generic
            }
        };

        self.converter.decode(&generic).map_err(|e| {
            debug!("Failed to convert message from topic {topic}: {e}");
            SerdeError::from(e)
        })
    }
}

/// A message holds exactly one datum; anything left after it is corrupt.
fn ensure_consumed(rest: &[u8]) -> Result<()> {
    if rest.is_empty() {
        return Ok(());
    }
    Err(SerdeError::InvalidFrame(format!(
        "{} trailing bytes after datum",
        rest.len()
    )))
}

fn cache_poisoned() -> SerdeError {
    SerdeError::Registry("schema id cache lock poisoned".to_string())
}
