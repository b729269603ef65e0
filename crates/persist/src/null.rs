//! No-op store: loads nothing, accepts every write.

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::{
    Result,
    store::{Record, RecordStore},
};

/// Stand-in for environments without writable storage (or with persistence
/// disabled). Every operation succeeds silently and loads are always empty,
/// so the in-memory layer upstream keeps working as the sole authority.
pub struct NullStore<T> {
    _records: PhantomData<fn() -> T>,
}

impl<T> NullStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _records: PhantomData,
        }
    }
}

impl<T> Default for NullStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for NullStore<T> {
    async fn load(&self) -> Result<Vec<T>> {
        Ok(Vec::new())
    }

    async fn replace_all(&self, _records: &[T]) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, _record: &T) -> Result<()> {
        Ok(())
    }

    async fn update(&self, _record: &T) -> Result<()> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use {super::*, crate::store::Keyed};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Blip {
        id: String,
    }

    impl Keyed for Blip {
        fn key(&self) -> String {
            self.id.clone()
        }
    }

    #[tokio::test]
    async fn test_writes_succeed_and_loads_stay_empty() {
        let store = NullStore::new();
        let blip = Blip { id: "1".into() };

        store.upsert(&blip).await.unwrap();
        store.update(&blip).await.unwrap();
        store.remove("anything").await.unwrap();
        store.replace_all(&[blip]).await.unwrap();

        let loaded: Vec<Blip> = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }
}
