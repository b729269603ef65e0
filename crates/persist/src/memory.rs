//! In-memory store for tests and ephemeral runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    Error, Result,
    store::{Record, RecordStore},
};

/// `Vec`-backed store. Nothing survives the process.
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> MemoryStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<T>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryStore<T> {
    async fn load(&self) -> Result<Vec<T>> {
        Ok(self.lock().clone())
    }

    async fn replace_all(&self, records: &[T]) -> Result<()> {
        *self.lock() = records.to_vec();
        Ok(())
    }

    async fn upsert(&self, record: &T) -> Result<()> {
        let mut records = self.lock();
        let key = record.key();
        if let Some(pos) = records.iter().position(|r| r.key() == key) {
            records[pos] = record.clone();
        } else {
            records.push(record.clone());
        }
        Ok(())
    }

    async fn update(&self, record: &T) -> Result<()> {
        let mut records = self.lock();
        let key = record.key();
        let pos = records
            .iter()
            .position(|r| r.key() == key)
            .ok_or_else(|| Error::not_found(&key))?;
        records[pos] = record.clone();
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|r| r.key() != key);
        if records.len() == before {
            return Err(Error::not_found(key));
        }
        Ok(())
    }
}
