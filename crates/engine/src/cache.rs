use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use boundary::{BoundaryChunk, BoundaryFeature, ChunkKey, chunk_from_geojson};

use crate::coordinator::BoundarySource;
use crate::fetch::{ChunkFetcher, FetchError};
use crate::store::ChunkStore;

/// Version of the boundary data format. Bumping this invalidates every
/// durably cached chunk on the next `init`.
pub const DATA_VERSION: &str = "1.0.0";

/// Two-tier boundary chunk cache: parsed chunks in memory, raw GeoJSON in a
/// durable store, with the network as the origin of last resort.
///
/// The durable tier is best-effort. Any store failure flips the cache into
/// memory-only operation for the rest of its life; chunk loads keep working
/// off the fetcher alone.
pub struct BoundaryChunkCache<S, F> {
    version: String,
    store: S,
    fetcher: F,
    memory: parking_lot::Mutex<BTreeMap<ChunkKey, Arc<BoundaryChunk>>>,
    store_healthy: AtomicBool,
}

impl<S: ChunkStore, F: ChunkFetcher> BoundaryChunkCache<S, F> {
    pub fn new(store: S, fetcher: F) -> Self {
        Self::with_version(store, fetcher, DATA_VERSION)
    }

    pub fn with_version(store: S, fetcher: F, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            store,
            fetcher,
            memory: parking_lot::Mutex::new(BTreeMap::new()),
            store_healthy: AtomicBool::new(true),
        }
    }

    /// Reconciles the durable store with the expected data version.
    ///
    /// On mismatch the store is wiped and re-marked before any chunk is read,
    /// so a stale-format record can never reach the parser. A failing store
    /// downgrades the cache to memory-only instead of blocking startup.
    pub async fn init(&self) {
        let result = async {
            let stored = self.store.read_version().await?;
            if stored.as_deref() != Some(self.version.as_str()) {
                tracing::info!(
                    stored = stored.as_deref().unwrap_or("none"),
                    expected = %self.version,
                    "boundary data version changed, clearing durable cache"
                );
                self.store.clear().await?;
                self.store.write_version(&self.version).await?;
            }
            Ok::<_, crate::store::StoreError>(())
        }
        .await;

        if let Err(err) = result {
            tracing::warn!(%err, "durable chunk store unusable, running memory-only");
            self.store_healthy.store(false, Ordering::Relaxed);
        }
    }

    /// Loads one chunk, trying memory, then the durable store, then the
    /// network. Fetched payloads are written through to the store before the
    /// chunk is returned.
    ///
    /// Concurrent loads of the same key are not coalesced: payloads are
    /// content-stable per key and version, so the duplicate work is wasted
    /// bandwidth at worst and last-write-wins is harmless.
    pub async fn load_chunk(&self, key: ChunkKey) -> Result<Arc<BoundaryChunk>, FetchError> {
        if let Some(chunk) = self.memory.lock().get(&key).cloned() {
            return Ok(chunk);
        }

        if self.store_healthy.load(Ordering::Relaxed) {
            match self.store.get(&key).await {
                Ok(Some(raw)) => {
                    let chunk = Arc::new(chunk_from_geojson(&raw));
                    self.memory.lock().insert(key, Arc::clone(&chunk));
                    tracing::debug!(key = %key, features = chunk.len(), "chunk loaded from store");
                    return Ok(chunk);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(key = %key, %err, "durable chunk read failed, running memory-only");
                    self.store_healthy.store(false, Ordering::Relaxed);
                }
            }
        }

        let raw = self.fetcher.fetch(&key).await?;
        let chunk = Arc::new(chunk_from_geojson(&raw));
        self.memory.lock().insert(key, Arc::clone(&chunk));

        if self.store_healthy.load(Ordering::Relaxed) {
            if let Err(err) = self.store.put(&key, &raw).await {
                tracing::warn!(key = %key, %err, "durable chunk write failed, running memory-only");
                self.store_healthy.store(false, Ordering::Relaxed);
            }
        }

        tracing::debug!(key = %key, features = chunk.len(), "chunk fetched");
        Ok(chunk)
    }

    /// Drops everything cached and re-marks the durable store at the current
    /// version.
    pub async fn clear(&self) {
        self.memory.lock().clear();
        if !self.store_healthy.load(Ordering::Relaxed) {
            return;
        }
        let result = async {
            self.store.clear().await?;
            self.store.write_version(&self.version).await
        }
        .await;
        if let Err(err) = result {
            tracing::warn!(%err, "durable chunk clear failed, running memory-only");
            self.store_healthy.store(false, Ordering::Relaxed);
        }
    }

    pub fn loaded_chunk_count(&self) -> usize {
        self.memory.lock().len()
    }

    pub fn is_store_healthy(&self) -> bool {
        self.store_healthy.load(Ordering::Relaxed)
    }
}

impl<S: ChunkStore, F: ChunkFetcher> BoundarySource for BoundaryChunkCache<S, F> {
    fn loaded_features(&self) -> Vec<BoundaryFeature> {
        self.memory
            .lock()
            .values()
            .flat_map(|chunk| chunk.features.iter().cloned())
            .collect()
    }
}
