//! Error types for fetching, extraction and the cache file.
//!
//! Listing fetches never surface [`FetchError`] to callers (they fall back to cached data);
//! it is visible on [`crate::ArticleFetcher::try_fetch_listing`] and on detail fetches.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("unknown language code: {0}")]
pub struct UnknownLang(pub String);

#[derive(Error, Debug)]
#[error("unrecognized cache key: {0}")]
pub struct InvalidCacheKey(pub String);

/// HTML could not be turned into a result.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("extracted text too short ({chars} chars)")]
    TooShort { chars: usize },
}

/// A page could not be fetched or extracted.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("unsupported URL: {0}")]
    InvalidUrl(String),

    #[error("failed to extract {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ExtractError,
    },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source: e,
            }
        }
    }
}

/// The cache file could not be written.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
