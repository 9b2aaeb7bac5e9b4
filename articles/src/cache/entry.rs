//! Cache entries and the in-memory form of the cache document.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::key::CacheKey;
use crate::article::ArticleRecord;

/// Result of one successful listing fetch.
///
/// An entry without a readable timestamp is never fresh, but its data still serves as fallback.
/// An entry without `data` is never fresh either, so it is refetched instead of served as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ArticleRecord>>,
}

impl CacheEntry {
    /// Entry stamped with the current time.
    pub fn new(data: Vec<ArticleRecord>) -> Self {
        Self::at(Utc::now(), data)
    }

    pub fn at(timestamp: DateTime<Utc>, data: Vec<ArticleRecord>) -> Self {
        Self {
            timestamp: Some(timestamp),
            data: Some(data),
        }
    }

    /// Cached records; empty when the entry has no `data`.
    pub fn records(&self) -> &[ArticleRecord] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn into_records(self) -> Vec<ArticleRecord> {
        self.data.unwrap_or_default()
    }

    /// Fresh while strictly younger than `window`; an entry exactly `window` old is stale.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        match (self.timestamp, &self.data) {
            (Some(ts), Some(_)) => now.signed_duration_since(ts) < window,
            _ => false,
        }
    }
}

/// Parses RFC 3339 timestamps, and naive ISO-8601 ones (no offset) as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(d)?;
        Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
    }
}

/// Every cached listing, keyed by the serialized [`CacheKey`].
///
/// Keys that do not parse as a [`CacheKey`] are kept untouched so newer files stay readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cache {
    entries: BTreeMap<String, CacheEntry>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(&key.to_string())
    }

    /// Replaces the entry for `key`, returning the previous one.
    pub fn insert(&mut self, key: &CacheKey, entry: CacheEntry) -> Option<CacheEntry> {
        self.entries.insert(key.to_string(), entry)
    }

    pub(crate) fn insert_raw(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
