//! Record store: the persistence seam for jobs and their event history.
//!
//! Records are opaque JSON values keyed by string id inside named collections.
//! Nothing in the readiness engine touches a store; only the job desk does.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record store lock poisoned")]
    Poisoned,

    #[error("cannot encode record {collection}/{id}: {message}")]
    Encode {
        collection: String,
        id: String,
        message: String,
    },

    #[error("cannot decode record in {collection}: {message}")]
    Decode { collection: String, message: String },

    #[error("record store backend failed: {0}")]
    Backend(String),
}

/// Collection-oriented key/value storage.
pub trait RecordStore: Send + Sync {
    /// Every record in `collection`, ordered by id.
    fn load(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError>;

    fn fetch(&self, collection: &str, id: &str) -> Result<Option<JsonValue>, StoreError>;

    /// Insert or replace the record stored under `id`.
    fn save(&self, collection: &str, id: &str, record: JsonValue) -> Result<(), StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn load(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        (**self).load(collection)
    }

    fn fetch(&self, collection: &str, id: &str) -> Result<Option<JsonValue>, StoreError> {
        (**self).fetch(collection, id)
    }

    fn save(&self, collection: &str, id: &str, record: JsonValue) -> Result<(), StoreError> {
        (**self).save(collection, id, record)
    }
}

/// Typed access on top of any [`RecordStore`].
pub trait RecordStoreExt: RecordStore {
    fn load_typed<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        self.load(collection)?
            .into_iter()
            .map(|record| decode(collection, record))
            .collect()
    }

    fn fetch_typed<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        self.fetch(collection, id)?
            .map(|record| decode(collection, record))
            .transpose()
    }

    fn save_typed<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        item: &T,
    ) -> Result<(), StoreError> {
        let record = serde_json::to_value(item).map_err(|e| StoreError::Encode {
            collection: collection.to_string(),
            id: id.to_string(),
            message: e.to_string(),
        })?;
        self.save(collection, id, record)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

fn decode<T: DeserializeOwned>(collection: &str, record: JsonValue) -> Result<T, StoreError> {
    serde_json::from_value(record).map_err(|e| StoreError::Decode {
        collection: collection.to_string(),
        message: e.to_string(),
    })
}

/// In-memory store for tests, demos and the command-line tool.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<HashMap<String, BTreeMap<String, JsonValue>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map
            .get(collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    fn fetch(&self, collection: &str, id: &str) -> Result<Option<JsonValue>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(collection).and_then(|records| records.get(id)).cloned())
    }

    fn save(&self, collection: &str, id: &str, record: JsonValue) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        map.entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), record);
        Ok(())
    }
}
