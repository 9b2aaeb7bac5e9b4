//! Article source config: site root, cache file, timeouts and freshness. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use kadrovik_articles::config::{
    DEFAULT_BASE_URL, DEFAULT_DETAIL_TIMEOUT_SECS, DEFAULT_FRESHNESS_HOURS, DEFAULT_LISTING_LIMIT,
    DEFAULT_LISTING_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use kadrovik_articles::SiteConfig;

#[derive(Debug, Clone)]
pub struct ArticlesConfig {
    /// SITE_BASE_URL
    pub site_base_url: String,
    /// CACHE_FILE
    pub cache_file: String,
    /// LISTING_TIMEOUT_SECS
    pub listing_timeout_secs: u64,
    /// DETAIL_TIMEOUT_SECS
    pub detail_timeout_secs: u64,
    /// CACHE_FRESHNESS_HOURS
    pub cache_freshness_hours: i64,
    /// ARTICLES_LIMIT
    pub articles_limit: usize,
    /// SITE_USER_AGENT
    pub user_agent: String,
}

/// Parses `name` when set and non-blank; a value that does not parse is an error naming the variable.
fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", name, raw)),
        _ => Ok(default),
    }
}

impl ArticlesConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            site_base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            cache_file: env::var("CACHE_FILE").unwrap_or_else(|_| "./data/cache.json".to_string()),
            listing_timeout_secs: env_or("LISTING_TIMEOUT_SECS", DEFAULT_LISTING_TIMEOUT_SECS)?,
            detail_timeout_secs: env_or("DETAIL_TIMEOUT_SECS", DEFAULT_DETAIL_TIMEOUT_SECS)?,
            cache_freshness_hours: env_or("CACHE_FRESHNESS_HOURS", DEFAULT_FRESHNESS_HOURS)?,
            articles_limit: env_or("ARTICLES_LIMIT", DEFAULT_LISTING_LIMIT)?,
            user_agent: env::var("SITE_USER_AGENT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.site_base_url).is_err() {
            anyhow::bail!("SITE_BASE_URL is not a valid URL: {}", self.site_base_url);
        }
        if self.listing_timeout_secs == 0 || self.detail_timeout_secs == 0 {
            anyhow::bail!("LISTING_TIMEOUT_SECS and DETAIL_TIMEOUT_SECS must be positive");
        }
        if self.cache_freshness_hours <= 0 {
            anyhow::bail!("CACHE_FRESHNESS_HOURS must be positive");
        }
        if self.articles_limit == 0 {
            anyhow::bail!("ARTICLES_LIMIT must be positive");
        }
        Ok(())
    }

    /// Builds the scraper-side config.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let mut site = SiteConfig::new(&self.site_base_url)
            .with_context(|| format!("Invalid SITE_BASE_URL: {}", self.site_base_url))?;
        site.user_agent = self.user_agent.clone();
        site.listing_timeout = Duration::from_secs(self.listing_timeout_secs);
        site.detail_timeout = Duration::from_secs(self.detail_timeout_secs);
        site.freshness = chrono::Duration::hours(self.cache_freshness_hours);
        site.listing_limit = self.articles_limit;
        Ok(site)
    }
}
