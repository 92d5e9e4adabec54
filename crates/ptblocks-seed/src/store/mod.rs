//! Content stores: where seeded documents are written.
//!
//! The interface mirrors the CMS client calls the seeding flow needs:
//! `store.create(document)` returning the new id, and
//! `store.patch(id).set(field, value).commit()`.

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// A pending `set` patch on one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patch {
    pub id: String,
    pub set: Map<String, Value>,
}

impl Patch {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            set: Map::new(),
        }
    }

    /// Set `field` to `value` when the patch is committed
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.set.insert(field.to_string(), value);
        self
    }
}

/// Something documents can be created in and patched
pub trait ContentStore {
    /// Create a document and return its id
    fn create(&mut self, document: Value) -> Result<String>;

    /// Apply a patch
    fn commit(&mut self, patch: Patch) -> Result<()>;

    /// Start a patch on document `id`
    fn patch(&mut self, id: &str) -> PatchBuilder<'_, Self>
    where
        Self: Sized,
    {
        PatchBuilder {
            store: self,
            patch: Patch::new(id),
        }
    }
}

/// Builder returned by [`ContentStore::patch`]
pub struct PatchBuilder<'a, S: ContentStore> {
    store: &'a mut S,
    patch: Patch,
}

impl<'a, S: ContentStore> PatchBuilder<'a, S> {
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.patch = self.patch.set(field, value);
        self
    }

    pub fn commit(self) -> Result<()> {
        self.store.commit(self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_builder_commits_all_fields() {
        let mut store = MemoryStore::new();
        let id = store.create(json!({"_type": "post"})).unwrap();
        store
            .patch(&id)
            .set("title", json!("Hello"))
            .set("language", json!("en"))
            .commit()
            .unwrap();

        let document = store.get(&id).unwrap();
        assert_eq!(document["title"], "Hello");
        assert_eq!(document["language"], "en");
    }

    #[test]
    fn test_patch_serialization() {
        let patch = Patch::new("doc-1").set("featured", json!(true));
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"id": "doc-1", "set": {"featured": true}})
        );
    }
}
