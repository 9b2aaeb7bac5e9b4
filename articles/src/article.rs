//! Article record and site language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLang;

/// Marker prepended to every article title.
pub const ARTICLE_EMOJI: &str = "📰";

/// Site edition. Russian lives at the site root, Uzbek under `/uz/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ru,
    Uz,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Ru, Lang::Uz];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Uz => "uz",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = UnknownLang;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Lang::Ru),
            "uz" => Ok(Lang::Uz),
            _ => Err(UnknownLang(s.to_string())),
        }
    }
}

/// One article as shown in a listing. `content` is empty for listing results.
///
/// Field order matches the cache file layout; missing fields read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub url: String,
}

impl ArticleRecord {
    pub fn new(title: impl Into<String>, date: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            date: date.into(),
            emoji: ARTICLE_EMOJI.to_string(),
            url: url.into(),
        }
    }
}
