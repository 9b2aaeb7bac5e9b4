//! ArticleService against a mock kadrovik.uz (mockito) and a temp cache file.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use kadrovik_articles::{
    ArticleRecord, ArticleService, CacheEntry, CacheKey, CacheStore, FetchError, Lang, SiteConfig,
};
use mockito::Matcher;
use tempfile::TempDir;

const LISTING: &str = include_str!("fixtures/listing.html");
const DETAIL: &str = include_str!("fixtures/detail.html");

fn site(base_url: &str) -> SiteConfig {
    let mut site = SiteConfig::new(base_url).unwrap();
    site.listing_timeout = Duration::from_secs(2);
    site.detail_timeout = Duration::from_secs(2);
    site
}

fn service(base_url: &str, dir: &TempDir) -> (ArticleService, Arc<CacheStore>) {
    let cache = Arc::new(CacheStore::new(dir.path().join("cache.json")));
    let service = ArticleService::new(site(base_url), Arc::clone(&cache)).unwrap();
    (service, cache)
}

fn cached_record() -> ArticleRecord {
    ArticleRecord::new("Старая статья", "2024-01-01T00:00:00+05:00", "https://kadrovik.uz/post/old")
}

async fn seed(cache: &CacheStore, key: &CacheKey, age: chrono::Duration) {
    cache
        .put(key, CacheEntry::at(Utc::now() - age, vec![cached_record()]))
        .await
        .unwrap();
}

/// **Test: Two requests inside the freshness window hit the site once**
#[tokio::test]
async fn test_latest_is_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(LISTING)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);

    let first = service.get_latest(Lang::Ru).await;
    let second = service.get_latest(Lang::Ru).await;

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(first[0].url, format!("{}/post/trudovoj-otpusk", server.url()));
    let entry = cache.lookup(&CacheKey::latest(Lang::Ru)).await.unwrap();
    assert_eq!(entry.records().to_vec(), first);
    mock.assert_async().await;
}

/// **Test: An entry just under 24h old is served without a request**
#[tokio::test]
async fn test_entry_within_window_is_fresh() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/").expect(0).create_async().await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);
    seed(&cache, &CacheKey::latest(Lang::Ru), chrono::Duration::minutes(23 * 60 + 59)).await;

    assert_eq!(service.get_latest(Lang::Ru).await, vec![cached_record()]);
    mock.assert_async().await;
}

/// **Test: An entry just over 24h old is refetched and replaced**
#[tokio::test]
async fn test_stale_entry_is_refetched() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(LISTING)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);
    let key = CacheKey::latest(Lang::Ru);
    seed(&cache, &key, chrono::Duration::minutes(24 * 60 + 1)).await;

    let records = service.get_latest(Lang::Ru).await;

    assert_eq!(records.len(), 3);
    let entry = cache.lookup(&key).await.unwrap();
    assert_eq!(entry.records().to_vec(), records);
    assert!(entry.is_fresh_at(Utc::now(), chrono::Duration::hours(24)));
    mock.assert_async().await;
}

/// **Test: An entry without data is a miss even inside the freshness window**
#[tokio::test]
async fn test_entry_without_data_is_refetched() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(LISTING)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);
    std::fs::write(
        cache.path(),
        format!(r#"{{"latest_ru": {{"timestamp": "{}"}}}}"#, Utc::now().to_rfc3339()),
    )
    .unwrap();

    let records = service.get_latest(Lang::Ru).await;

    assert_eq!(records.len(), 3);
    let entry = cache.lookup(&CacheKey::latest(Lang::Ru)).await.unwrap();
    assert_eq!(entry.records().to_vec(), records);
    mock.assert_async().await;
}

/// **Test: A failing site serves the previously cached records untouched**
#[tokio::test]
async fn test_failed_fetch_falls_back_to_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);
    let key = CacheKey::latest(Lang::Ru);
    seed(&cache, &key, chrono::Duration::hours(48)).await;
    let before = cache.lookup(&key).await.unwrap();

    assert_eq!(service.get_latest(Lang::Ru).await, vec![cached_record()]);
    assert_eq!(cache.lookup(&key).await.unwrap(), before);
    mock.assert_async().await;
}

/// **Test: A failing site with nothing cached yields an empty listing and no cache write**
#[tokio::test]
async fn test_failed_fetch_without_cache_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/uz/")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);

    assert!(service.get_latest(Lang::Uz).await.is_empty());
    assert!(!cache.path().exists());
    mock.assert_async().await;
}

/// **Test: An unreachable site falls back the same way as an error status**
#[tokio::test]
async fn test_unreachable_site_falls_back() {
    let dir = TempDir::new().unwrap();
    let (service, cache) = service("http://127.0.0.1:1/", &dir);
    let key = CacheKey::search("отпуск", Lang::Ru);
    seed(&cache, &key, chrono::Duration::hours(30)).await;

    assert_eq!(service.search("отпуск", Lang::Ru).await, vec![cached_record()]);
    assert!(matches!(
        service.fetcher().try_fetch_listing(None, Lang::Ru, 10).await,
        Err(FetchError::Network { .. }) | Err(FetchError::Timeout { .. })
    ));
}

/// **Test: A site slower than the listing timeout falls back to cached records**
#[tokio::test]
async fn test_timed_out_fetch_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(2));
            w.write_all(LISTING.as_bytes())
        })
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let cache = Arc::new(CacheStore::new(dir.path().join("cache.json")));
    let mut site = site(&server.url());
    site.listing_timeout = Duration::from_millis(300);
    let service = ArticleService::new(site, Arc::clone(&cache)).unwrap();
    let key = CacheKey::latest(Lang::Ru);
    seed(&cache, &key, chrono::Duration::hours(30)).await;
    let before = cache.lookup(&key).await.unwrap();

    assert_eq!(service.get_latest(Lang::Ru).await, vec![cached_record()]);
    assert_eq!(cache.lookup(&key).await.unwrap(), before);
    assert!(matches!(
        service.fetcher().try_fetch_listing(None, Lang::Ru, 10).await,
        Err(FetchError::Timeout { .. })
    ));
}

/// **Test: Search sends the encoded query and caches under the trimmed query**
#[tokio::test]
async fn test_search_uses_query_and_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "трудовой отпуск".into()))
        .with_status(200)
        .with_body(LISTING)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);

    let first = service.search("трудовой отпуск", Lang::Ru).await;
    let second = service.search("  трудовой отпуск ", Lang::Ru).await;

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    let stored = cache.load().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.iter().next().unwrap().0, "search_трудовой отпуск_ru");
    mock.assert_async().await;
}

/// **Test: Uzbek listings come from /uz/ and resolve links under it**
#[tokio::test]
async fn test_uzbek_edition() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/uz/")
        .with_status(200)
        .with_body(LISTING)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);

    let records = service.get_latest(Lang::Uz).await;

    assert_eq!(records[0].url, format!("{}/uz/post/trudovoj-otpusk", server.url()));
    assert!(cache.lookup(&CacheKey::latest(Lang::Uz)).await.is_some());
    assert!(cache.lookup(&CacheKey::latest(Lang::Ru)).await.is_none());
    mock.assert_async().await;
}

/// **Test: A blank query finds nothing without touching cache or network**
#[tokio::test]
async fn test_blank_search() {
    let dir = TempDir::new().unwrap();
    let (service, cache) = service("http://127.0.0.1:1/", &dir);

    assert!(service.search("   ", Lang::Ru).await.is_empty());
    assert!(!cache.path().exists());
}

/// **Test: Records are still returned when the cache file cannot be written**
#[tokio::test]
async fn test_cache_write_failure_keeps_records() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(LISTING)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let cache = Arc::new(CacheStore::new(blocker.join("cache.json")));
    let service = ArticleService::new(site(&server.url()), cache).unwrap();

    assert_eq!(service.get_latest(Lang::Ru).await.len(), 3);
}

/// **Test: Concurrent requests for one stale key share a single fetch**
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_fetch_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(LISTING)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, _cache) = service(&server.url(), &dir);
    let service = Arc::new(service);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.get_latest(Lang::Ru).await })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap().len(), 3);
    }
    mock.assert_async().await;
}

/// **Test: Article pages on the site are fetched, extracted and not cached**
#[tokio::test]
async fn test_fetch_detail() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/post/trudovoj-otpusk")
        .with_status(200)
        .with_body(DETAIL)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, cache) = service(&server.url(), &dir);

    let text = service
        .fetch_detail(&format!("{}/post/trudovoj-otpusk", server.url()))
        .await
        .unwrap();

    assert!(text.starts_with("📰 Ежегодный трудовой отпуск\n📅 2024-05-01"));
    assert!(!cache.path().exists());
    mock.assert_async().await;
}

/// **Test: A missing article page is a status error**
#[tokio::test]
async fn test_fetch_detail_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/post/missing")
        .with_status(404)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let (service, _cache) = service(&server.url(), &dir);

    let err = service
        .fetch_detail(&format!("{}/post/missing", server.url()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

/// **Test: URLs outside the site are refused without a request**
#[tokio::test]
async fn test_fetch_detail_rejects_foreign_urls() {
    let dir = TempDir::new().unwrap();
    let (service, _cache) = service("https://kadrovik.uz/", &dir);

    for url in ["https://example.com/post/1", "file:///etc/passwd", "not a url"] {
        let err = service.fetch_detail(url).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)), "{}: {:?}", url, err);
    }
}
