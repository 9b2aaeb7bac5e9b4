//! CLI parser and the cache inspection command.

use std::str::FromStr;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use kadrovik_articles::{CacheKey, CacheStore};

use crate::config::{ArticlesConfig, BotConfig};

#[derive(Parser)]
#[command(name = "kadrovik-bot")]
#[command(about = "Kadrovik.uz Telegram bot: run, inspect article cache", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// List entries of the article cache file with their age and freshness.
    Cache {
        /// Cache file path; defaults to CACHE_FILE.
        #[arg(long)]
        cache_file: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Prints one line per cache entry: kind, language, query, timestamp, fresh?, record count.
pub async fn handle_cache(cache_file: Option<String>) -> Result<()> {
    let articles = ArticlesConfig::from_env()?;
    let path = cache_file.unwrap_or_else(|| articles.cache_file.clone());
    let freshness = chrono::Duration::hours(articles.cache_freshness_hours);

    let cache = CacheStore::new(&path).load().await;
    if cache.is_empty() {
        println!("No cache entries (path: {}).", path);
        return Ok(());
    }

    println!("{} cache entr(ies) (path: {}):\n", cache.len(), path);
    println!(
        "{:<8} {:<4} {:<30} {:<20} {:<6} {}",
        "kind", "lang", "query", "timestamp", "fresh", "records"
    );
    println!("{}", "-".repeat(80));

    let now = Utc::now();
    for (raw_key, entry) in cache.iter() {
        let (kind, lang, query) = match CacheKey::from_str(raw_key) {
            Ok(key) => (
                if key.query().is_some() { "search" } else { "latest" },
                key.lang().code(),
                key.query().unwrap_or("-").to_string(),
            ),
            Err(_) => ("?", "-", raw_key.to_string()),
        };
        let timestamp = entry
            .timestamp
            .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<4} {:<30} {:<20} {:<6} {}",
            kind,
            lang,
            query,
            timestamp,
            if entry.is_fresh_at(now, freshness) { "yes" } else { "no" },
            entry.records().len()
        );
    }

    Ok(())
}
