use chrono::{Local, SecondsFormat};
use scraper::Html;

use super::text::{selector, trimmed_text};
use crate::article::ArticleRecord;
use crate::error::ExtractError;

/// Title used when a post card or article page has no heading.
pub const UNTITLED: &str = "Без заголовка";

const POSTS_LIST: &str = "section.posts-block ul.posts-list";
const POST_ITEM: &str = "li.post-card-wrapper";
const POST_LINK: &str = "a[href]";
const POST_TITLE: &str = "h4.post-card__title";
const PUBLISHED: &str = "time.longread-post__time-published";

/// Extracts up to `limit` articles from a listing or search page.
///
/// Only the first `limit` post cards are looked at; cards without a link are skipped
/// and still count toward the limit. Relative links are resolved against `base_url`,
/// the root of the edition the page came from. A page without the posts list yields
/// an empty result.
pub fn extract_listing(
    html: &str,
    base_url: &str,
    limit: usize,
) -> Result<Vec<ArticleRecord>, ExtractError> {
    let list_sel = selector(POSTS_LIST)?;
    let item_sel = selector(POST_ITEM)?;
    let link_sel = selector(POST_LINK)?;
    let title_sel = selector(POST_TITLE)?;
    let time_sel = selector(PUBLISHED)?;

    let document = Html::parse_document(html);
    let Some(list) = document.select(&list_sel).next() else {
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for item in list.select(&item_sel).take(limit) {
        let Some(href) = item
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        let title = item
            .select(&title_sel)
            .next()
            .map(|h| trimmed_text(&h))
            .unwrap_or_else(|| UNTITLED.to_string());
        let date = item
            .select(&time_sel)
            .next()
            .and_then(|t| t.value().attr("datetime"))
            .map(str::to_string)
            .unwrap_or_else(|| Local::now().to_rfc3339_opts(SecondsFormat::Secs, false));

        records.push(ArticleRecord::new(title, date, resolve_link(base_url, href)));
    }
    Ok(records)
}

fn resolve_link(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}
