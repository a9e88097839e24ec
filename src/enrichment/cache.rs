//! On-disk context cache with an in-memory LRU mirror: one JSON file per
//! fingerprint, atomic write-then-rename, per-fingerprint write
//! serialization, concurrent reads.

use std::collections::HashMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex as AsyncMutex;

use crate::datamodel::DocumentCategory;
use crate::error::{CacheError, CoreError, EnrichmentError, Result};

const DEFAULT_LRU_CAPACITY: usize = 4096;

/// A cached context entry, serialized verbatim to `<fingerprint>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedContext {
    pub fingerprint: String,
    pub category: DocumentCategory,
    pub context: String,
    pub created_at_unix: i64,
}

/// Fingerprint over the inputs that determine a chunk's context: content,
/// section hierarchy, document path, and category.
pub fn fingerprint(content: &str, section_hierarchy: &[String], document_path: &str, category: DocumentCategory) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update([0u8]);
    hasher.update(section_hierarchy.join(">").as_bytes());
    hasher.update([0u8]);
    hasher.update(document_path.as_bytes());
    hasher.update([0u8]);
    hasher.update(category.to_string().as_bytes());
    let digest = hasher.finalize();
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Long-lived handle owning the cache directory, the LRU mirror, and the
/// per-fingerprint write locks. There are no module-level singletons; a
/// `ContextCache` bounds the lifetime of all its readers and writers.
pub struct ContextCache {
    cache_dir: PathBuf,
    mirror: Mutex<LruCache<String, CachedContext>>,
    write_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ContextCache {
    pub fn open(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir).map_err(|e| {
            CoreError::Enrichment(EnrichmentError::CacheDirUnwritable {
                path: cache_dir.display().to_string(),
                reason: e.to_string(),
            })
        })?;
        Ok(Self {
            cache_dir,
            mirror: Mutex::new(LruCache::new(NonZeroUsize::new(DEFAULT_LRU_CAPACITY).unwrap())),
            write_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Read a cache entry, checking the in-memory mirror first and falling
    /// back to disk. A missing or truncated file is treated as a miss, not
    /// an error.
    pub fn get(&self, fingerprint: &str) -> Option<CachedContext> {
        if let Some(hit) = self.mirror.lock().unwrap().get(fingerprint).cloned() {
            return Some(hit);
        }
        let bytes = fs::read(self.path_for(fingerprint)).ok()?;
        let cached: CachedContext = serde_json::from_slice(&bytes).ok()?;
        self.mirror.lock().unwrap().put(fingerprint.to_string(), cached.clone());
        Some(cached)
    }

    /// Write a cache entry atomically (temp-file + rename), serialized per
    /// fingerprint; writes to distinct fingerprints proceed concurrently.
    pub async fn put(&self, cached: CachedContext) -> Result<()> {
        let lock = self.lock_for(&cached.fingerprint);
        let _guard = lock.lock().await;

        let path = self.path_for(&cached.fingerprint);
        let tmp_path = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&cached).map_err(|e| {
            CoreError::Cache(CacheError::Corrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;
        fs::write(&tmp_path, &bytes).map_err(|e| {
            CoreError::Cache(CacheError::Io {
                path: tmp_path.display().to_string(),
                source: e,
            })
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            CoreError::Cache(CacheError::Io {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        self.mirror.lock().unwrap().put(cached.fingerprint.clone(), cached);
        Ok(())
    }

    fn path_for(&self, fingerprint: &str) -> PathBuf {
        self.cache_dir.join(format!("{fingerprint}.json"))
    }

    fn lock_for(&self, fingerprint: &str) -> Arc<AsyncMutex<()>> {
        self.write_locks
            .lock()
            .unwrap()
            .entry(fingerprint.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}
