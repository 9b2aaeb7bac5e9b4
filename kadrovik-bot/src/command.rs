//! Parses incoming text (slash commands and menu button labels) into [`Input`].

use kadrovik_articles::Lang;

use crate::menu::{BTN_LANG_RU, BTN_LANG_UZ, BTN_LATEST, BTN_SEARCH, BTN_SETTINGS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    Help,
    Latest,
    /// Search button or bare `/search`: the next text is the query.
    SearchPrompt,
    Search(String),
    Read(String),
    LangMenu,
    SetLang(Lang),
    /// Slash command nobody handles.
    UnknownCommand(String),
    Text(String),
    /// Non-text message (photo, sticker, ...).
    Empty,
}

impl Input {
    pub fn parse(content: &str) -> Self {
        let text = content.trim();
        if text.is_empty() {
            return Input::Empty;
        }

        match text {
            BTN_SEARCH => return Input::SearchPrompt,
            BTN_LATEST => return Input::Latest,
            BTN_SETTINGS => return Input::LangMenu,
            BTN_LANG_RU => return Input::SetLang(Lang::Ru),
            BTN_LANG_UZ => return Input::SetLang(Lang::Uz),
            _ => {}
        }

        let Some(command_line) = text.strip_prefix('/') else {
            return Input::Text(text.to_string());
        };
        let (word, arg) = match command_line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (command_line, ""),
        };
        // "/latest@kadrovik_bot" in group chats
        let name = word.split('@').next().unwrap_or(word).to_lowercase();

        match (name.as_str(), arg) {
            ("start", _) => Input::Start,
            ("help", _) => Input::Help,
            ("latest", _) => Input::Latest,
            ("search", "") => Input::SearchPrompt,
            ("search", query) => Input::Search(query.to_string()),
            ("read", "") => Input::Help,
            ("read", url) => Input::Read(url.to_string()),
            ("lang", code) => code.parse().map(Input::SetLang).unwrap_or(Input::LangMenu),
            _ => Input::UnknownCommand(name),
        }
    }
}
