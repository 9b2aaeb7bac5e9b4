//! Shared helpers: recording Bot, test config and message builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use handler_chain::HandlerChain;
use kadrovik_bot::{build_handler_chain_only, ArticlesConfig, BaseConfig, BotConfig};
use kbot_core::{Bot, Chat, Message, ReplyKeyboard, Result, User};
use tempfile::TempDir;

/// One outbound call made by the handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Keyboard { chat_id: i64, text: String, keyboard: ReplyKeyboard },
    Edit { chat_id: i64, message_id: String, text: String },
}

impl Sent {
    pub fn text(&self) -> &str {
        match self {
            Sent::Text { text, .. } | Sent::Keyboard { text, .. } | Sent::Edit { text, .. } => text,
        }
    }
}

/// Bot that records every call instead of talking to Telegram.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicUsize,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns and clears everything recorded so far.
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_keyboard(&self, chat: &Chat, text: &str, keyboard: &ReplyKeyboard) -> Result<()> {
        self.record(Sent::Keyboard {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(Sent::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.send_message(chat, text).await?;
        Ok((self.next_id.fetch_add(1, Ordering::SeqCst) + 100).to_string())
    }
}

/// Config pointing at temp files and the given site URL; nothing is read from env.
pub fn test_config(dir: &TempDir, site_url: &str) -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "test_bot_token_12345".to_string(),
            telegram_api_url: None,
            log_file: dir.path().join("bot.log").to_string_lossy().into_owned(),
            database_url: dir.path().join("users.db").to_string_lossy().into_owned(),
        },
        articles: ArticlesConfig {
            site_base_url: site_url.to_string(),
            cache_file: dir.path().join("cache.json").to_string_lossy().into_owned(),
            listing_timeout_secs: 2,
            detail_timeout_secs: 2,
            cache_freshness_hours: 24,
            articles_limit: 10,
            user_agent: "kadrovik-bot-test".to_string(),
        },
    }
}

pub async fn build_chain(dir: &TempDir, site_url: &str, bot: Arc<RecordingBot>) -> HandlerChain {
    build_handler_chain_only(&test_config(dir, site_url), bot)
        .await
        .expect("build handler chain")
}

/// Private-chat text message; chat id equals user id.
pub fn message(user_id: i64, text: &str) -> Message {
    Message {
        id: format!("msg-{}", user_id),
        user: User {
            id: user_id,
            username: Some("hr_manager".to_string()),
            first_name: Some("Dilnoza".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        content: text.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

/// Runs the whole registration dialog for `user_id` and clears the recorded output.
pub async fn register(chain: &HandlerChain, bot: &RecordingBot, user_id: i64) {
    for text in ["/start", "Dilnoza Karimova", "+998901234567"] {
        chain.handle(&message(user_id, text)).await.unwrap();
    }
    bot.take();
}
