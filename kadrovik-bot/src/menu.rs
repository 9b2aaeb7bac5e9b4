//! Menu labels, reply keyboards and message formatting.

use kadrovik_articles::{ArticleRecord, Lang};
use kbot_core::ReplyKeyboard;

pub const BTN_SEARCH: &str = "🔍 Поиск статьи";
pub const BTN_LATEST: &str = "📰 Актуальное Kadrovik.uz";
pub const BTN_SETTINGS: &str = "⚙️ Настройки";
pub const BTN_LANG_RU: &str = "🇷🇺 Русский";
pub const BTN_LANG_UZ: &str = "🇺🇿 O'zbekcha";

/// Telegram rejects messages longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

pub const LOADING_TEXT: &str = "⏳ Загружаем статью...";
pub const NOTHING_FOUND: &str = "Ничего не найдено.";
pub const READ_HINT: &str = "Чтобы прочитать статью, отправьте: /read <ссылка>";

pub fn main_menu() -> ReplyKeyboard {
    ReplyKeyboard::new()
        .row([BTN_SEARCH])
        .row([BTN_LATEST])
        .row([BTN_SETTINGS])
}

pub fn lang_menu() -> ReplyKeyboard {
    ReplyKeyboard::new().row([BTN_LANG_RU, BTN_LANG_UZ])
}

pub fn lang_label(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => BTN_LANG_RU,
        Lang::Uz => BTN_LANG_UZ,
    }
}

/// One block per article, blank line between blocks, read hint at the end.
pub fn render_articles(records: &[ArticleRecord]) -> String {
    if records.is_empty() {
        return NOTHING_FOUND.to_string();
    }
    let blocks: Vec<String> = records
        .iter()
        .map(|r| format!("{} {}\n📅 {}\n🔗 {}", r.emoji, r.title, r.date, r.url))
        .collect();
    format!("{}\n\n{}", blocks.join("\n\n"), READ_HINT)
}

/// Splits `text` into consecutive pieces of at most `max_chars` characters.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.is_empty() {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
