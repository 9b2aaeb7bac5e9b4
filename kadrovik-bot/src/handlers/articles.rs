//! Latest articles, search and article reading.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kadrovik_articles::{ArticleRecord, ArticleService};
use kbot_core::{Bot, Chat, Handler, HandlerResponse, Message, Result};
use storage::UserRepository;
use tracing::{info, instrument, warn};

use super::user_lang;
use crate::command::Input;
use crate::menu::{render_articles, split_message, LOADING_TEXT, MAX_MESSAGE_CHARS};

pub const ASK_QUERY: &str = "Введите запрос для поиска:";
pub const READ_FAILED: &str = "Не удалось загрузить статью. Попробуйте позже.";

pub struct ArticlesHandler {
    users: UserRepository,
    articles: Arc<ArticleService>,
    bot: Arc<dyn Bot>,
    /// Chats whose next text message is a search query.
    awaiting_query: Mutex<HashSet<i64>>,
}

impl ArticlesHandler {
    pub fn new(users: UserRepository, articles: Arc<ArticleService>, bot: Arc<dyn Bot>) -> Self {
        Self {
            users,
            articles,
            bot,
            awaiting_query: Mutex::new(HashSet::new()),
        }
    }

    fn awaiting(&self) -> std::sync::MutexGuard<'_, HashSet<i64>> {
        self.awaiting_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sends each chunk as its own message.
    async fn send_chunks(&self, chat: &Chat, chunks: &[String]) -> Result<()> {
        for chunk in chunks {
            self.bot.send_message(chat, chunk).await?;
        }
        Ok(())
    }

    async fn send_listing(&self, chat: &Chat, records: &[ArticleRecord]) -> Result<HandlerResponse> {
        let text = render_articles(records);
        self.send_chunks(chat, &split_message(&text, MAX_MESSAGE_CHARS))
            .await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn search(&self, message: &Message, query: &str) -> Result<HandlerResponse> {
        let lang = user_lang(&self.users, message.user.id).await?;
        let records = self.articles.search(query, lang).await;
        info!(query = %query, lang = %lang, count = records.len(), "Search served");
        self.send_listing(&message.chat, &records).await
    }

    /// Placeholder first, then the article edited into it; overflow goes out as new messages.
    async fn read(&self, message: &Message, url: &str) -> Result<HandlerResponse> {
        let placeholder = self
            .bot
            .send_message_and_return_id(&message.chat, LOADING_TEXT)
            .await?;

        let text = match self.articles.fetch_detail(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %url, error = %e, "Article could not be loaded");
                self.bot
                    .edit_message(&message.chat, &placeholder, READ_FAILED)
                    .await?;
                return Ok(HandlerResponse::Reply(READ_FAILED.to_string()));
            }
        };

        let chunks = split_message(&text, MAX_MESSAGE_CHARS);
        if let Some((first, rest)) = chunks.split_first() {
            self.bot
                .edit_message(&message.chat, &placeholder, first)
                .await?;
            self.send_chunks(&message.chat, rest).await?;
        }
        info!(url = %url, parts = chunks.len(), "Article sent");
        Ok(HandlerResponse::Reply(text))
    }
}

#[async_trait]
impl Handler for ArticlesHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let chat_id = message.chat.id;

        match Input::parse(&message.content) {
            Input::Latest => {
                self.awaiting().remove(&chat_id);
                let lang = user_lang(&self.users, message.user.id).await?;
                let records = self.articles.get_latest(lang).await;
                info!(lang = %lang, count = records.len(), "Latest articles served");
                self.send_listing(&message.chat, &records).await
            }
            Input::SearchPrompt => {
                self.awaiting().insert(chat_id);
                self.bot.send_message(&message.chat, ASK_QUERY).await?;
                Ok(HandlerResponse::Reply(ASK_QUERY.to_string()))
            }
            Input::Search(query) => {
                self.awaiting().remove(&chat_id);
                self.search(message, &query).await
            }
            Input::Read(url) => {
                self.awaiting().remove(&chat_id);
                self.read(message, &url).await
            }
            Input::Text(query) => {
                let awaiting = self.awaiting().remove(&chat_id);
                if awaiting {
                    self.search(message, &query).await
                } else {
                    Ok(HandlerResponse::Continue)
                }
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
