//! # kadrovik-articles
//!
//! Fetches article listings and article pages from kadrovik.uz, turns their HTML into
//! [`ArticleRecord`]s / readable text, and keeps a time-boxed JSON cache so repeated requests
//! skip the network and failed requests fall back to the last known good data.
//!
//! Layers, leaf to root: [`cache`] → [`extractor`] → [`fetcher`] → [`service`].
//! Callers normally only touch [`ArticleService`].

pub mod article;
pub mod cache;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod service;

pub use article::{ArticleRecord, Lang, ARTICLE_EMOJI};
pub use cache::{Cache, CacheEntry, CacheKey, CacheStore};
pub use config::SiteConfig;
pub use error::{CacheError, ExtractError, FetchError, InvalidCacheKey, UnknownLang};
pub use extractor::{extract_detail, extract_listing};
pub use fetcher::ArticleFetcher;
pub use service::ArticleService;
