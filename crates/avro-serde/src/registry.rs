//! Schema registry client seam.
//!
//! The serializer registers its writer schema under a subject and frames each
//! message with the returned id; the deserializer looks the writer schema up
//! by that id. [`RegistryClient`] is the seam for a real registry transport;
//! [`MemoryRegistry`] is a process-local implementation.

use crate::error::{Result, SerdeError};
use apache_avro::Schema;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Access to a schema registry.
pub trait RegistryClient: Send + Sync {
    /// Register `schema` under `subject` and return its id.
    ///
    /// Registering a schema that is already known returns the existing id.
    fn register(&self, subject: &str, schema: &Schema) -> Result<u32>;

    /// Fetch the schema registered with `id`.
    fn schema_by_id(&self, id: u32) -> Result<Schema>;
}

#[derive(Debug, Default)]
struct Entries {
    /// Index is `id - 1`.
    schemas: Vec<Schema>,
    ids_by_canonical_form: HashMap<String, u32>,
    subjects: HashMap<String, Vec<u32>>,
}

/// In-memory registry. Ids start at 1 and are shared across subjects.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: RwLock<Entries>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids registered under `subject`, oldest first.
    pub fn versions(&self, subject: &str) -> Result<Vec<u32>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.subjects.get(subject).cloned().unwrap_or_default())
    }

    /// Number of distinct schemas registered.
    pub fn len(&self) -> usize {
        // Entries stay consistent under a poisoned lock; count them anyway.
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .schemas
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RegistryClient for MemoryRegistry {
    fn register(&self, subject: &str, schema: &Schema) -> Result<u32> {
        let canonical = schema.canonical_form();
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        let id = match entries.ids_by_canonical_form.get(&canonical) {
            Some(&id) => id,
            None => {
                entries.schemas.push(schema.clone());
                let id = u32::try_from(entries.schemas.len()).map_err(|_| {
                    SerdeError::Registry("schema id space exhausted".to_string())
                })?;
                entries.ids_by_canonical_form.insert(canonical, id);
                id
            }
        };

        let versions = entries.subjects.entry(subject.to_string()).or_default();
        if !versions.contains(&id) {
            versions.push(id);
            debug!("Registered schema id {id} under subject {subject}");
        }

        Ok(id)
    }

    fn schema_by_id(&self, id: u32) -> Result<Schema> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        id.checked_sub(1)
            .and_then(|index| entries.schemas.get(index as usize))
            .cloned()
            .ok_or_else(|| SerdeError::Registry(format!("schema id {id} not found")))
    }
}

fn poisoned() -> SerdeError {
    SerdeError::Registry("registry lock poisoned".to_string())
}
