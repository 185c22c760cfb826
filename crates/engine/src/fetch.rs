use boundary::ChunkKey;
use serde_json::Value;

/// Upper bound on a fetched chunk body. High-detail chunks for dense regions
/// run a few megabytes; anything past this is a server fault, not data.
pub const MAX_CHUNK_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Http(String),
    Status(u16),
    TooLarge { len: usize, max: usize },
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(msg) => write!(f, "chunk fetch failed: {msg}"),
            FetchError::Status(code) => write!(f, "chunk fetch returned status {code}"),
            FetchError::TooLarge { len, max } => {
                write!(f, "chunk body of {len} bytes exceeds limit of {max}")
            }
            FetchError::Decode(msg) => write!(f, "chunk body is not valid JSON: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Origin of boundary chunks on cache miss.
pub trait ChunkFetcher {
    fn fetch(
        &self,
        key: &ChunkKey,
    ) -> impl std::future::Future<Output = Result<Value, FetchError>> + Send;
}

impl<F: ChunkFetcher + Sync> ChunkFetcher for &F {
    async fn fetch(&self, key: &ChunkKey) -> Result<Value, FetchError> {
        (**self).fetch(key).await
    }
}

/// Fetches chunks over HTTP from a static file layout: one JSON document per
/// `"{tier}-{region}"` key under a base URL.
#[derive(Debug, Clone)]
pub struct HttpChunkFetcher {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChunkFetcher {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    pub fn chunk_url(&self, key: &ChunkKey) -> String {
        format!("{}/{}.json", self.base_url, key.storage_key())
    }
}

impl ChunkFetcher for HttpChunkFetcher {
    async fn fetch(&self, key: &ChunkKey) -> Result<Value, FetchError> {
        let url = self.chunk_url(key);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;
        if body.len() > MAX_CHUNK_BYTES {
            return Err(FetchError::TooLarge {
                len: body.len(),
                max: MAX_CHUNK_BYTES,
            });
        }

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::HttpChunkFetcher;
    use boundary::{ChunkKey, RegionId, ZoomTier};

    #[test]
    fn chunk_url_joins_base_and_storage_key() {
        let fetcher = HttpChunkFetcher::new(
            reqwest::Client::new(),
            "https://tiles.example.net/boundaries/",
        );
        let key = ChunkKey::new(ZoomTier::Medium, RegionId::new(2, 4));
        assert_eq!(
            fetcher.chunk_url(&key),
            "https://tiles.example.net/boundaries/medium-r2-4.json"
        );
    }
}
