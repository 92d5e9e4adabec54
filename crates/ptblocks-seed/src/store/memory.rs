//! In-memory store for dry runs and tests.

use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use super::{ContentStore, Patch};
use crate::error::{Result, SeedError};

/// Keeps documents in creation order. Ids come from `_id` when present,
/// otherwise they are generated.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: IndexMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.documents.get(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in creation order
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.documents.iter().map(|(id, doc)| (id.as_str(), doc))
    }
}

impl ContentStore for MemoryStore {
    fn create(&mut self, mut document: Value) -> Result<String> {
        let id = match document.get("_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        if let Some(fields) = document.as_object_mut() {
            fields.insert("_id".to_string(), Value::String(id.clone()));
        }
        self.documents.insert(id.clone(), document);
        Ok(id)
    }

    fn commit(&mut self, patch: Patch) -> Result<()> {
        let document = self
            .documents
            .get_mut(&patch.id)
            .ok_or_else(|| SeedError::UnknownDocument(patch.id.clone()))?;
        if let Some(fields) = document.as_object_mut() {
            fields.extend(patch.set);
        }
        Ok(())
    }
}
