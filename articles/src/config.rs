//! Site configuration: where to fetch from, how long to wait, how long cached data stays fresh.

use std::time::Duration;

use url::Url;

use crate::article::Lang;
use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://kadrovik.uz/";
/// The site rejects clients that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_LISTING_TIMEOUT_SECS: u64 = 6;
pub const DEFAULT_DETAIL_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FRESHNESS_HOURS: i64 = 24;
pub const DEFAULT_LISTING_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root of the Russian edition; always ends with `/`.
    pub base_url: Url,
    pub user_agent: String,
    pub listing_timeout: Duration,
    pub detail_timeout: Duration,
    /// Cached listings younger than this are served without a request.
    pub freshness: chrono::Duration,
    /// Maximum number of records taken from one listing page.
    pub listing_limit: usize,
}

impl SiteConfig {
    /// Config with default timeouts for the given site root.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            listing_timeout: Duration::from_secs(DEFAULT_LISTING_TIMEOUT_SECS),
            detail_timeout: Duration::from_secs(DEFAULT_DETAIL_TIMEOUT_SECS),
            freshness: chrono::Duration::hours(DEFAULT_FRESHNESS_HOURS),
            listing_limit: DEFAULT_LISTING_LIMIT,
        })
    }

    /// Root of the given edition: `/` for Russian, `/uz/` for Uzbek.
    pub fn base_url_for(&self, lang: Lang) -> Url {
        match lang {
            Lang::Ru => self.base_url.clone(),
            Lang::Uz => self
                .base_url
                .join("uz/")
                .unwrap_or_else(|_| self.base_url.clone()),
        }
    }

    /// Front page of the edition, or its search page when `query` is set.
    pub fn listing_url(&self, lang: Lang, query: Option<&str>) -> Url {
        let base = self.base_url_for(lang);
        match query {
            None => base,
            Some(query) => {
                let mut url = base.join("search").unwrap_or(base);
                url.query_pairs_mut().append_pair("q", query);
                url
            }
        }
    }

    /// True for http(s) URLs on the configured site host.
    pub fn is_site_url(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https") && url.host_str() == self.base_url.host_str()
    }
}
