//! Typed cache key with a stable string form: `latest_<lang>` or `search_<query>_<lang>`.

use std::fmt;
use std::str::FromStr;

use crate::article::Lang;
use crate::error::InvalidCacheKey;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Latest(Lang),
    Search { query: String, lang: Lang },
}

impl CacheKey {
    pub fn latest(lang: Lang) -> Self {
        CacheKey::Latest(lang)
    }

    /// The query is trimmed so `" отпуск "` and `"отпуск"` share an entry.
    pub fn search(query: &str, lang: Lang) -> Self {
        CacheKey::Search {
            query: query.trim().to_string(),
            lang,
        }
    }

    /// Listing key for an optional search query.
    pub fn listing(query: Option<&str>, lang: Lang) -> Self {
        match query {
            Some(query) => CacheKey::search(query, lang),
            None => CacheKey::latest(lang),
        }
    }

    pub fn lang(&self) -> Lang {
        match self {
            CacheKey::Latest(lang) | CacheKey::Search { lang, .. } => *lang,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            CacheKey::Latest(_) => None,
            CacheKey::Search { query, .. } => Some(query),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Latest(lang) => write!(f, "latest_{}", lang),
            CacheKey::Search { query, lang } => write!(f, "search_{}_{}", query, lang),
        }
    }
}

impl FromStr for CacheKey {
    type Err = InvalidCacheKey;

    /// The language is always the last `_`-separated segment, so queries may contain `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidCacheKey(s.to_string());

        if let Some(lang) = s.strip_prefix("latest_") {
            return lang.parse().map(CacheKey::Latest).map_err(|_| invalid());
        }
        let rest = s.strip_prefix("search_").ok_or_else(invalid)?;
        let (query, lang) = rest.rsplit_once('_').ok_or_else(invalid)?;
        let lang = lang.parse().map_err(|_| invalid())?;
        Ok(CacheKey::Search {
            query: query.to_string(),
            lang,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form() {
        assert_eq!(CacheKey::latest(Lang::Ru).to_string(), "latest_ru");
        assert_eq!(
            CacheKey::search(" отпуск ", Lang::Uz).to_string(),
            "search_отпуск_uz"
        );
    }

    #[test]
    fn test_parse_query_with_underscores() {
        let key: CacheKey = "search_ндфл_2024_ru".parse().unwrap();
        assert_eq!(key, CacheKey::search("ндфл_2024", Lang::Ru));
        assert_eq!(key.query(), Some("ндфл_2024"));
        assert_eq!(key.lang(), Lang::Ru);
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        assert!("latest_en".parse::<CacheKey>().is_err());
        assert!("search_ru".parse::<CacheKey>().is_err());
        assert!("recent_ru".parse::<CacheKey>().is_err());
    }

    #[test]
    fn test_listing_picks_variant() {
        assert_eq!(CacheKey::listing(None, Lang::Uz), CacheKey::Latest(Lang::Uz));
        assert_eq!(
            CacheKey::listing(Some("soliq"), Lang::Uz).to_string(),
            "search_soliq_uz"
        );
    }
}
