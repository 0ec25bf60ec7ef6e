//! In-memory reference implementation of the Ledger Store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{Document, LedgerStore, StoreError, compare_field_values};

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// An in-memory document store.
///
/// Collections are id-sorted maps, so `list_all` iterates in document-id
/// order - the same default ordering a document database gives a bare
/// collection scan. Serves as the substrate for tests and local runs; a
/// production backend plugs in at the [`LedgerStore`] trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_owned()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_owned()))
    }

    fn scan<F>(&self, collection: &str, mut keep: F) -> Result<Vec<Document>, StoreError>
    where
        F: FnMut(&Value) -> bool,
    {
        let collections = self.read()?;
        let docs = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| keep(fields))
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.scan(collection, |_| true)
    }

    async fn query_range(
        &self,
        collection: &str,
        field: &str,
        low: &Value,
        high: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.scan(collection, |fields| {
            fields.get(field).is_some_and(|value| {
                compare_field_values(value, low).is_some_and(core::cmp::Ordering::is_ge)
                    && compare_field_values(value, high).is_some_and(core::cmp::Ordering::is_le)
            })
        })
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.scan(collection, |fields| fields.get(field) == Some(value))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_owned(),
                fields: fields.clone(),
            }))
    }

    async fn create(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.write()?;
        collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn put(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), fields);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let Value::Object(changes) = fields else {
            return Err(StoreError::OperationFailed(
                "update fields must be a JSON object".to_owned(),
            ));
        };

        let mut collections = self.write()?;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })?;

        let Value::Object(target) = existing else {
            return Err(StoreError::OperationFailed(format!(
                "document {id} in {collection} is not a JSON object"
            )));
        };
        for (key, value) in changes {
            target.insert(key, value);
        }
        Ok(())
    }
}
