use scraper::Html;

use super::text::{selector, stripped_text};
use super::MIN_CONTENT_CHARS;
use crate::article::ARTICLE_EMOJI;
use crate::error::ExtractError;
use crate::extractor::listing::UNTITLED;

/// Body line used when an article page has no paragraphs to show.
pub const CONTENT_NOT_FOUND: &str = "Не удалось найти контент.";

const EMPHASIS_MARKER: &str = "🔹";
const CONTENT_REGION: &str = "section.longread-block";
const PUBLISHED: &str = "time.longread-post__time-published";

/// Turns an article page into chat-ready text.
///
/// The text is a title line, a date line, then every paragraph and emphasized
/// fragment of the article body in document order. Emphasized fragments get a
/// marker and a blank line around them. Repeated fragments appear once.
///
/// A page whose body has no paragraphs at all still yields a short
/// "content not found" text; a page whose composed text is too short to be an
/// article is [`ExtractError::TooShort`].
pub fn extract_detail(html: &str) -> Result<String, ExtractError> {
    let h1_sel = selector("h1")?;
    let time_sel = selector(PUBLISHED)?;
    let region_sel = selector(CONTENT_REGION)?;
    let body_sel = selector("body")?;
    let parts_sel = selector("p, strong")?;

    let document = Html::parse_document(html);

    let title = document
        .select(&h1_sel)
        .next()
        .map(|h| stripped_text(&h, ""))
        .unwrap_or_else(|| UNTITLED.to_string());
    let date = document
        .select(&time_sel)
        .next()
        .and_then(|t| t.value().attr("datetime"))
        .unwrap_or_default();

    let region = document
        .select(&region_sel)
        .next()
        .or_else(|| document.select(&body_sel).next());
    let nodes: Vec<_> = region
        .map(|r| r.select(&parts_sel).collect())
        .unwrap_or_default();
    if nodes.is_empty() {
        return Ok(format!(
            "{} {}\n📅 {}\n\n{}",
            ARTICLE_EMOJI, title, date, CONTENT_NOT_FOUND
        ));
    }

    let mut parts = vec![
        format!("{} {}", ARTICLE_EMOJI, title),
        format!("\n📅 {}", date),
    ];
    for node in nodes {
        let text = stripped_text(&node, " ");
        if text.is_empty() {
            continue;
        }
        let part = if node.value().name() == "strong" {
            format!("\n{} {}\n", EMPHASIS_MARKER, text)
        } else {
            format!("\n{}", text)
        };
        if !parts.contains(&part) {
            parts.push(part);
        }
    }

    let content = parts.concat();
    let chars = content.chars().count();
    if chars <= MIN_CONTENT_CHARS {
        return Err(ExtractError::TooShort { chars });
    }
    Ok(content)
}
