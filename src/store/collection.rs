//! JSON collection
//!
//! A plain ordered sequence of records kept in one pretty-printed JSON array
//! file. Every access loads the whole file and every mutation rewrites it,
//! all inside one mutex section per collection.

use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::StoreError;

#[derive(Debug)]
pub struct JsonCollection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    /// Create the backing file as an empty array if it does not exist yet.
    /// Returns true if the file was created.
    pub async fn ensure_exists(&self) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;

        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::io(parent, e))?;
                }
                self.write_all(&[]).await?;
                tracing::info!(path = %self.path.display(), "Created empty collection");
                Ok(true)
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Load every record
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    /// Replace every record
    pub async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write_all(records).await
    }

    /// Load, mutate and rewrite the collection as one critical section.
    /// Nothing is written if `f` returns an error.
    pub async fn modify<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, StoreError> + Send,
        R: Send,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await?;
        let result = f(&mut records)?;
        self.write_all(&records).await?;
        Ok(result)
    }

    /// Append one record
    pub async fn append(&self, record: T) -> Result<(), StoreError> {
        self.modify(move |records| {
            records.push(record);
            Ok(())
        })
        .await
    }

    async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        serde_json::from_slice(&data).map_err(|e| StoreError::serialization(&self.path, e))
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    // Sibling temp file, flushed to disk, then renamed over the original
    async fn write_all(&self, records: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::serialization(&self.path, e))?;

        let tmp_path = self.tmp_path();
        let mut file = tokio::fs::File::create(&tmp_path)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        file.write_all(&data)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_exists_creates_empty_array() {
        let dir = TempDir::new().unwrap();
        let collection: JsonCollection<u32> = JsonCollection::new(dir.path().join("nested/items.json"));

        assert!(collection.ensure_exists().await.unwrap());
        assert!(!collection.ensure_exists().await.unwrap());
        assert!(collection.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let dir = TempDir::new().unwrap();
        let collection: JsonCollection<u32> = JsonCollection::new(dir.path().join("items.json"));
        collection.ensure_exists().await.unwrap();

        for i in 0..5 {
            collection.append(i).await.unwrap();
        }

        assert_eq!(collection.load().await.unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failed_modify_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let collection: JsonCollection<u32> = JsonCollection::new(dir.path().join("items.json"));
        collection.save(&[1, 2]).await.unwrap();

        let result = collection
            .modify(|records| {
                records.clear();
                Err::<(), _>(StoreError::AccountNotFound("nobody".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(collection.load().await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_save_replaces_file_and_cleans_up_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        let collection: JsonCollection<u32> = JsonCollection::new(&path);

        collection.save(&[1, 2, 3]).await.unwrap();
        collection.save(&[4]).await.unwrap();

        assert!(!collection.tmp_path().exists());
        let on_disk: Vec<u32> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec![4]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let collection: JsonCollection<u32> = JsonCollection::new(dir.path().join("missing.json"));

        assert!(matches!(collection.load().await, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let collection = std::sync::Arc::new(JsonCollection::<u32>::new(dir.path().join("items.json")));
        collection.ensure_exists().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let collection = collection.clone();
            handles.push(tokio::spawn(async move { collection.append(i).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut records = collection.load().await.unwrap();
        records.sort();
        assert_eq!(records, (0..20).collect::<Vec<_>>());
    }
}
