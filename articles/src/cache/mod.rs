//! Time-boxed article cache persisted as one JSON document.
//!
//! File layout: `{ "<key>": { "timestamp": "<ISO-8601>", "data": [ArticleRecord, ...] }, ... }`.

mod entry;
mod key;
mod store;

pub use entry::{parse_timestamp, Cache, CacheEntry};
pub use key::CacheKey;
pub use store::CacheStore;
