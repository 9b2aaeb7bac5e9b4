//! Query service: the cache-first entry point used by the chat layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, instrument};

use crate::article::{ArticleRecord, Lang};
use crate::cache::{CacheKey, CacheStore};
use crate::config::SiteConfig;
use crate::error::FetchError;
use crate::fetcher::ArticleFetcher;

/// Result of the last fetch made under a key's gate, with the moment it completed.
type Flight = Option<(Instant, Vec<ArticleRecord>)>;

/// Serves listings from the cache while they are fresh, fetching otherwise.
///
/// Concurrent requests for the same key share one fetch: callers queue on a per-key
/// async lock, and whoever gets it after a fetch that completed while they were waiting
/// takes that fetch's records instead of fetching again.
pub struct ArticleService {
    fetcher: ArticleFetcher,
    cache: Arc<CacheStore>,
    freshness: chrono::Duration,
    limit: usize,
    inflight: Mutex<HashMap<CacheKey, Arc<tokio::sync::Mutex<Flight>>>>,
}

impl ArticleService {
    pub fn new(site: SiteConfig, cache: Arc<CacheStore>) -> Result<Self, FetchError> {
        let freshness = site.freshness;
        let limit = site.listing_limit;
        let fetcher = ArticleFetcher::new(site, Arc::clone(&cache))?;
        Ok(Self {
            fetcher,
            cache,
            freshness,
            limit,
            inflight: Mutex::new(HashMap::new()),
        })
    }

    pub fn fetcher(&self) -> &ArticleFetcher {
        &self.fetcher
    }

    /// Latest articles of the edition.
    #[instrument(skip(self))]
    pub async fn get_latest(&self, lang: Lang) -> Vec<ArticleRecord> {
        self.listing(CacheKey::latest(lang)).await
    }

    /// Search results for `query`; a blank query finds nothing and touches neither cache nor network.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, lang: Lang) -> Vec<ArticleRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.listing(CacheKey::search(query, lang)).await
    }

    /// Article text. Detail pages are never cached.
    pub async fn fetch_detail(&self, url: &str) -> Result<String, FetchError> {
        self.fetcher.fetch_detail(url).await
    }

    async fn listing(&self, key: CacheKey) -> Vec<ArticleRecord> {
        if let Some(records) = self.fresh(&key).await {
            return records;
        }

        let requested_at = Instant::now();
        let gate = self.gate(&key);
        let records = {
            let mut flight = gate.lock().await;
            match flight.as_ref() {
                Some((finished_at, records)) if *finished_at >= requested_at => {
                    debug!(key = %key, "Joined concurrent fetch");
                    records.clone()
                }
                _ => match self.fresh(&key).await {
                    Some(records) => records,
                    None => {
                        let records = self
                            .fetcher
                            .fetch_listing(key.query(), key.lang(), self.limit)
                            .await;
                        *flight = Some((Instant::now(), records.clone()));
                        records
                    }
                },
            }
        };
        self.release(&key, gate);
        records
    }

    /// Cached records for `key` if the entry is still inside the freshness window.
    async fn fresh(&self, key: &CacheKey) -> Option<Vec<ArticleRecord>> {
        let entry = self.cache.lookup(key).await?;
        if entry.is_fresh_at(Utc::now(), self.freshness) {
            debug!(key = %key, count = entry.records().len(), "Cache hit");
            Some(entry.into_records())
        } else {
            None
        }
    }

    fn gate(&self, key: &CacheKey) -> Arc<tokio::sync::Mutex<Flight>> {
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(inflight.entry(key.clone()).or_default())
    }

    /// Drops the gate from the map once no other caller holds it.
    fn release(&self, key: &CacheKey, gate: Arc<tokio::sync::Mutex<Flight>>) {
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // One reference in the map, one here.
        if Arc::strong_count(&gate) <= 2 {
            inflight.remove(key);
        }
    }
}
