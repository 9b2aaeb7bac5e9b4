//! JSON file backing the cache.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::entry::{Cache, CacheEntry};
use super::key::CacheKey;
use crate::error::CacheError;

/// Reads and writes the cache file.
///
/// Reads never fail: a missing, unreadable or malformed file is an empty cache.
/// Writes go through a temp file and a rename so readers never see a partial document,
/// and [`CacheStore::put`] serializes concurrent read-modify-write cycles.
pub struct CacheStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole cache, skipping entries that do not have the entry shape.
    pub async fn load(&self) -> Cache {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Cache::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read cache file");
                return Cache::new();
            }
        };

        let document: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cache file is not a JSON object, ignoring it");
                return Cache::new();
            }
        };

        let mut cache = Cache::new();
        for (key, value) in document {
            match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => cache.insert_raw(key, entry),
                Err(e) => warn!(key = %key, error = %e, "Skipping malformed cache entry"),
            }
        }
        debug!(path = %self.path.display(), entries = cache.len(), "Loaded cache");
        cache
    }

    /// Writes the whole cache, replacing the file atomically.
    pub async fn save(&self, cache: &Cache) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(cache)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, body).await.map_err(io_err)?;
        fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }

    pub async fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.load().await.get(key).cloned()
    }

    /// Replaces one entry and persists the cache, leaving every other entry as it was on disk.
    pub async fn put(&self, key: &CacheKey, entry: CacheEntry) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().await;
        let mut cache = self.load().await;
        cache.insert(key, entry);
        self.save(&cache).await?;
        debug!(key = %key, "Cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleRecord, Lang};
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, CacheStore) {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path().join("data").join("cache.json"));
        (dir, store)
    }

    fn record(title: &str) -> ArticleRecord {
        ArticleRecord::new(title, "2024-05-01", format!("https://kadrovik.uz/{}", title))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let (_dir, store) = store();
        assert!(store.load().await.is_empty());
        assert!(store.lookup(&CacheKey::latest(Lang::Ru)).await.is_none());
    }

    #[tokio::test]
    async fn test_put_creates_parent_and_round_trips() {
        let (_dir, store) = store();
        let key = CacheKey::search("отпуск", Lang::Ru);
        store.put(&key, CacheEntry::new(vec![record("a")])).await.unwrap();

        let entry = store.lookup(&key).await.unwrap();
        assert_eq!(entry.records().to_vec(), vec![record("a")]);
        assert!(entry.timestamp.is_some());
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_put_replaces_only_its_key() {
        let (_dir, store) = store();
        let ru = CacheKey::latest(Lang::Ru);
        let uz = CacheKey::latest(Lang::Uz);
        store.put(&ru, CacheEntry::new(vec![record("old")])).await.unwrap();
        store.put(&uz, CacheEntry::new(vec![record("uz")])).await.unwrap();
        store.put(&ru, CacheEntry::new(vec![record("new")])).await.unwrap();

        let cache = store.load().await;
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&ru).unwrap().records().to_vec(), vec![record("new")]);
        assert_eq!(cache.get(&uz).unwrap().records().to_vec(), vec![record("uz")]);
    }

    #[tokio::test]
    async fn test_save_of_loaded_cache_is_stable() {
        let (_dir, store) = store();
        store
            .put(&CacheKey::latest(Lang::Uz), CacheEntry::new(vec![record("a"), record("b")]))
            .await
            .unwrap();
        store
            .put(&CacheKey::search("ндфл_2024", Lang::Ru), CacheEntry::new(Vec::new()))
            .await
            .unwrap();

        let cache = store.load().await;
        store.save(&cache).await.unwrap();
        assert_eq!(store.load().await, cache);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty_and_is_overwritten() {
        let (_dir, store) = store();
        std_fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std_fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().await.is_empty());

        let key = CacheKey::latest(Lang::Ru);
        store.put(&key, CacheEntry::new(Vec::new())).await.unwrap();
        assert!(store.lookup(&key).await.is_some());
    }

    #[tokio::test]
    async fn test_malformed_entry_is_skipped() {
        let (_dir, store) = store();
        std_fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std_fs::write(
            store.path(),
            r#"{"latest_ru": {"timestamp": "2024-05-01T10:00:00", "data": []}, "latest_uz": "broken"}"#,
        )
        .unwrap();

        let cache = store.load().await;
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&CacheKey::latest(Lang::Ru)).unwrap().timestamp.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_keep_every_key() {
        let (_dir, store) = store();
        let store = std::sync::Arc::new(store);
        let queries: Vec<String> = (0..16).map(|i| format!("запрос {}", i)).collect();

        let tasks: Vec<_> = queries
            .iter()
            .cloned()
            .map(|query| {
                let store = std::sync::Arc::clone(&store);
                tokio::spawn(async move {
                    let key = CacheKey::search(query.as_str(), Lang::Ru);
                    store.put(&key, CacheEntry::new(vec![record("a")])).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let cache = store.load().await;
        assert_eq!(cache.len(), queries.len());
        for query in &queries {
            assert!(cache.get(&CacheKey::search(query.as_str(), Lang::Ru)).is_some());
        }
    }
}
