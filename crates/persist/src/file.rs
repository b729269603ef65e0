//! JSON file-backed record store with atomic writes.

use std::{marker::PhantomData, path::PathBuf};

use {async_trait::async_trait, tokio::fs, tracing::warn};

use crate::{
    Error, Result,
    store::{Record, RecordStore},
};

/// One pretty-printed JSON array per collection. Writes go to a temp file and
/// rename over the target, keeping the previous version as `.bak`. Timestamps
/// serialize as RFC 3339 strings and revive to date values on load.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _records: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl<T: Record> JsonFileStore<T> {
    /// Read the whole collection. A corrupt file degrades to an empty set
    /// with a warning; the next write replaces it.
    async fn read_all(&self) -> Result<Vec<T>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).await?;
        match serde_json::from_str(&data) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable record file, starting empty");
                Ok(Vec::new())
            },
        }
    }

    async fn atomic_write(&self, records: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json.as_bytes()).await?;

        // Keep the previous version around.
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            let bak = self.path.with_extension("json.bak");
            let _ = fs::rename(&self.path, &bak).await;
        }

        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for JsonFileStore<T> {
    async fn load(&self) -> Result<Vec<T>> {
        self.read_all().await
    }

    async fn replace_all(&self, records: &[T]) -> Result<()> {
        self.atomic_write(records).await
    }

    async fn upsert(&self, record: &T) -> Result<()> {
        let mut records = self.read_all().await?;
        let key = record.key();
        if let Some(pos) = records.iter().position(|r| r.key() == key) {
            records[pos] = record.clone();
        } else {
            records.push(record.clone());
        }
        self.atomic_write(&records).await
    }

    async fn update(&self, record: &T) -> Result<()> {
        let mut records = self.read_all().await?;
        let key = record.key();
        let pos = records
            .iter()
            .position(|r| r.key() == key)
            .ok_or_else(|| Error::not_found(&key))?;
        records[pos] = record.clone();
        self.atomic_write(&records).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| r.key() != key);
        if records.len() == before {
            return Err(Error::not_found(key));
        }
        self.atomic_write(&records).await
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        chrono::{DateTime, Utc},
        serde::{Deserialize, Serialize},
        tempfile::TempDir,
    };

    use {super::*, crate::store::Keyed};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
        created_at: DateTime<Utc>,
    }

    impl Keyed for Note {
        fn key(&self) -> String {
            self.id.clone()
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    fn store_in(dir: &TempDir) -> JsonFileStore<Note> {
        JsonFileStore::new(dir.path().join("notes.json"))
    }

    #[tokio::test]
    async fn test_roundtrip_revives_dates() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let records = vec![note("1", "alpha"), note("2", "beta")];

        store.replace_all(&records).await.unwrap();
        let loaded = store.load().await.unwrap();

        // Deep-equal, including the timestamp as a date value.
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("notes.json"), "{not json").unwrap();
        let store = store_in(&tmp);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_appends_then_replaces() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.upsert(&note("1", "first")).await.unwrap();
        store.upsert(&note("1", "second")).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].body, "second");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let err = store.update(&note("ghost", "x")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.upsert(&note("1", "a")).await.unwrap();
        store.upsert(&note("2", "b")).await.unwrap();
        store.remove("1").await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "2");
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert!(matches!(
            store.remove("ghost").await.unwrap_err(),
            Error::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_backup_kept_after_second_write() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.upsert(&note("1", "a")).await.unwrap();
        store.upsert(&note("2", "b")).await.unwrap();

        assert!(tmp.path().join("notes.json.bak").exists());
    }

    #[tokio::test]
    async fn test_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let store: JsonFileStore<Note> =
            JsonFileStore::new(tmp.path().join("nested").join("deep").join("notes.json"));
        store.upsert(&note("1", "a")).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 1);
    }
}
