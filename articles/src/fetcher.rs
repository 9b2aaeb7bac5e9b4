//! Network side of the article pipeline.
//!
//! Listing fetches are fail-soft: on any failure the last cached result for the same
//! key is returned instead. Detail fetches report their errors.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::article::{ArticleRecord, Lang};
use crate::cache::{CacheEntry, CacheKey, CacheStore};
use crate::config::SiteConfig;
use crate::error::FetchError;
use crate::extractor::{extract_detail, extract_listing};

const MAX_REDIRECTS: usize = 5;

pub struct ArticleFetcher {
    client: Client,
    site: SiteConfig,
    cache: Arc<CacheStore>,
}

impl ArticleFetcher {
    pub fn new(site: SiteConfig, cache: Arc<CacheStore>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(site.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            site,
            cache,
        })
    }

    /// Fetches a listing (front page, or search results when `query` is set) and caches it.
    ///
    /// Never fails: when the site cannot be read, the previously cached records for the
    /// same key are returned, or nothing if there are none.
    #[instrument(skip(self))]
    pub async fn fetch_listing(
        &self,
        query: Option<&str>,
        lang: Lang,
        limit: usize,
    ) -> Vec<ArticleRecord> {
        let key = CacheKey::listing(query, lang);

        match self.try_fetch_listing(query, lang, limit).await {
            Ok(records) => {
                info!(key = %key, count = records.len(), "Fetched article listing");
                if let Err(e) = self.cache.put(&key, CacheEntry::new(records.clone())).await {
                    warn!(key = %key, error = %e, "Failed to write cache entry");
                }
                records
            }
            Err(e) => {
                let cached = self.cache.lookup(&key).await.map(CacheEntry::into_records);
                warn!(
                    key = %key,
                    error = %e,
                    cached = cached.as_ref().map_or(0, Vec::len),
                    "Listing fetch failed, serving cached data"
                );
                cached.unwrap_or_default()
            }
        }
    }

    /// One listing request plus extraction, with no cache involvement.
    pub async fn try_fetch_listing(
        &self,
        query: Option<&str>,
        lang: Lang,
        limit: usize,
    ) -> Result<Vec<ArticleRecord>, FetchError> {
        let url = self.site.listing_url(lang, query);
        let html = self.get_html(&url, self.site.listing_timeout).await?;

        let base = self.site.base_url_for(lang);
        extract_listing(&html, base.as_str(), limit).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches one article page and returns its chat-ready text.
    ///
    /// Only http(s) URLs on the configured site are fetched.
    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, url: &str) -> Result<String, FetchError> {
        let result = self.try_fetch_detail(url).await;
        match &result {
            Ok(text) => info!(chars = text.chars().count(), "Fetched article"),
            Err(e) => warn!(error = %e, "Article fetch failed"),
        }
        result
    }

    async fn try_fetch_detail(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url.trim())
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !self.site.is_site_url(&parsed) {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let html = self.get_html(&parsed, self.site.detail_timeout).await?;
        extract_detail(&html).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }

    async fn get_html(&self, url: &Url, timeout: Duration) -> Result<String, FetchError> {
        debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "GET");

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), e))
    }
}
