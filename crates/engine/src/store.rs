use std::collections::BTreeMap;
use std::path::PathBuf;

use boundary::ChunkKey;
use serde_json::Value;
use tokio::sync::Mutex;

/// Key of the durable record holding the data-format version marker.
pub const VERSION_KEY: &str = "version";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Unavailable,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "durable chunk store unavailable"),
            StoreError::Corrupt(msg) => write!(f, "chunk store corrupt: {msg}"),
            StoreError::Io(msg) => write!(f, "chunk store error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Durable tier of the boundary cache.
///
/// Layout: one `version` record plus one record per `"{tier}-{region}"` key,
/// each holding the raw GeoJSON chunk payload. `clear` removes everything
/// including the marker, so a half-cleared store reads as unversioned.
pub trait ChunkStore {
    fn read_version(&self) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;
    fn write_version(&self, version: &str) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
    fn get(&self, key: &ChunkKey) -> impl std::future::Future<Output = Result<Option<Value>, StoreError>> + Send;
    fn put(&self, key: &ChunkKey, raw: &Value) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

impl<S: ChunkStore + Sync> ChunkStore for &S {
    async fn read_version(&self) -> Result<Option<String>, StoreError> {
        (**self).read_version().await
    }
    async fn write_version(&self, version: &str) -> Result<(), StoreError> {
        (**self).write_version(version).await
    }
    async fn get(&self, key: &ChunkKey) -> Result<Option<Value>, StoreError> {
        (**self).get(key).await
    }
    async fn put(&self, key: &ChunkKey, raw: &Value) -> Result<(), StoreError> {
        (**self).put(key, raw).await
    }
    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}

/// In-memory store: the durable tier for tests and embedders that opt out of
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryChunkStore {
    records: parking_lot::Mutex<MemoryRecords>,
}

#[derive(Debug, Default)]
struct MemoryRecords {
    version: Option<String>,
    chunks: BTreeMap<String, Value>,
}

impl MemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_count(&self) -> usize {
        self.records.lock().chunks.len()
    }
}

impl ChunkStore for MemoryChunkStore {
    async fn read_version(&self) -> Result<Option<String>, StoreError> {
        Ok(self.records.lock().version.clone())
    }

    async fn write_version(&self, version: &str) -> Result<(), StoreError> {
        self.records.lock().version = Some(version.to_string());
        Ok(())
    }

    async fn get(&self, key: &ChunkKey) -> Result<Option<Value>, StoreError> {
        Ok(self.records.lock().chunks.get(&key.storage_key()).cloned())
    }

    async fn put(&self, key: &ChunkKey, raw: &Value) -> Result<(), StoreError> {
        self.records
            .lock()
            .chunks
            .insert(key.storage_key(), raw.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut records = self.records.lock();
        records.chunks.clear();
        records.version = None;
        Ok(())
    }
}

/// Filesystem store: one JSON file per chunk plus a `version` file, all under
/// one directory. Writes go through a temp file and rename so a crashed write
/// never leaves a torn record.
#[derive(Debug)]
pub struct FsChunkStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FsChunkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn version_path(&self) -> PathBuf {
        self.dir.join(VERSION_KEY)
    }

    fn chunk_path(&self, key: &ChunkKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.storage_key()))
    }

    async fn write_atomic(&self, path: PathBuf, text: String) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

impl ChunkStore for FsChunkStore {
    async fn read_version(&self) -> Result<Option<String>, StoreError> {
        let _g = self.lock.lock().await;
        match tokio::fs::read_to_string(self.version_path()).await {
            Ok(s) => {
                let s = s.trim().to_string();
                Ok((!s.is_empty()).then_some(s))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn write_version(&self, version: &str) -> Result<(), StoreError> {
        let _g = self.lock.lock().await;
        self.write_atomic(self.version_path(), version.to_string())
            .await
    }

    async fn get(&self, key: &ChunkKey) -> Result<Option<Value>, StoreError> {
        let _g = self.lock.lock().await;
        match tokio::fs::read_to_string(self.chunk_path(key)).await {
            Ok(s) => serde_json::from_str(&s)
                .map(Some)
                .map_err(|e| StoreError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn put(&self, key: &ChunkKey, raw: &Value) -> Result<(), StoreError> {
        let _g = self.lock.lock().await;
        let text = serde_json::to_string(raw).map_err(|e| StoreError::Io(e.to_string()))?;
        self.write_atomic(self.chunk_path(key), text).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _g = self.lock.lock().await;
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == VERSION_KEY || name.ends_with(".json") {
                tokio::fs::remove_file(entry.path())
                    .await
                    .map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }
        Ok(())
    }
}
