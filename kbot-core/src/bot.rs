//! Bot abstraction for sending and editing messages.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in kbot-telegram.
//! Handlers only talk to this trait, so tests can substitute a recording implementation.

use async_trait::async_trait;

use crate::error::{KbotError, Result};
use crate::types::{Chat, ReplyKeyboard};

/// Abstraction for sending and editing messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a text message with a reply keyboard attached (menus).
    async fn send_keyboard(&self, chat: &Chat, text: &str, keyboard: &ReplyKeyboard) -> Result<()>;
    /// Edits an already-sent message. `message_id` is transport-specific (Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Sends a message and returns its id for a later [`Bot::edit_message`].
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
}

/// Parses a message id string into an i32. Used by edit_message implementations.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| KbotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
