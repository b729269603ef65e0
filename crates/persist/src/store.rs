//! Persistence trait for keyed record collections.

use {
    async_trait::async_trait,
    serde::{Serialize, de::DeserializeOwned},
};

use crate::Result;

/// A record addressable by a stable string key.
pub trait Keyed {
    fn key(&self) -> String;
}

/// Bounds a backend needs to persist a record type.
pub trait Record: Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Record for T where T: Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

/// Persistence backend for one record collection.
///
/// The keyed mutations are load-mutate-save: there is no cross-process
/// atomicity, and the last writer wins.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// All persisted records. A missing source yields an empty set; see the
    /// backends for how unreadable data degrades.
    async fn load(&self) -> Result<Vec<T>>;

    /// Overwrite the whole collection.
    async fn replace_all(&self, records: &[T]) -> Result<()>;

    /// Insert `record`, replacing any existing record with the same key.
    async fn upsert(&self, record: &T) -> Result<()>;

    /// Replace the record sharing `record`'s key.
    /// [`Error::NotFound`](crate::Error::NotFound) if no such record exists.
    async fn update(&self, record: &T) -> Result<()>;

    /// Remove the record with `key`.
    /// [`Error::NotFound`](crate::Error::NotFound) if no such record exists.
    async fn remove(&self, key: &str) -> Result<()>;
}
