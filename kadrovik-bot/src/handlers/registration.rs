//! Registration dialog: name, then phone. Unregistered users never get past this handler.

use std::sync::Arc;

use async_trait::async_trait;
use kbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use storage::{RegistrationStep, UserRecord, UserRepository};
use tracing::{info, instrument};

use super::storage_error;
use crate::command::Input;
use crate::menu::main_menu;

pub const ASK_NAME: &str =
    "Добро пожаловать в бот Kadrovik.uz! Для регистрации введите ваше имя и фамилию:";
pub const ASK_PHONE: &str = "Введите номер телефона (например, +998901234567):";
pub const INVALID_PHONE: &str =
    "Некорректный номер. Введите номер из 7–15 цифр, например +998901234567:";
pub const MENU_PROMPT: &str = "Выберите опцию:";

/// Normalized phone (optional `+`, then 7 to 15 digits), or None if `raw` is not a phone number.
///
/// Spaces, dashes and parentheses are ignored.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let (plus, digits) = match compact.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", compact.as_str()),
    };
    let valid = (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    valid.then(|| format!("{}{}", plus, digits))
}

pub struct RegistrationHandler {
    users: UserRepository,
    bot: Arc<dyn Bot>,
}

impl RegistrationHandler {
    pub fn new(users: UserRepository, bot: Arc<dyn Bot>) -> Self {
        Self { users, bot }
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        self.bot.send_message(&message.chat, text).await?;
        Ok(HandlerResponse::Reply(text.to_string()))
    }
}

#[async_trait]
impl Handler for RegistrationHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let input = Input::parse(&message.content);
        let user = self
            .users
            .find(message.user.id)
            .await
            .map_err(storage_error)?;

        let Some(user) = user else {
            let record =
                UserRecord::new(message.user.id, message.chat.id, message.user.username.clone());
            self.users.upsert(&record).await.map_err(storage_error)?;
            info!("New user, registration started");
            return self.reply(message, ASK_NAME).await;
        };

        match user.step() {
            RegistrationStep::Completed => {
                if input == Input::Start {
                    let text = format!(
                        "С возвращением, {}! {}",
                        user.full_name.as_deref().unwrap_or_default(),
                        MENU_PROMPT
                    );
                    self.bot
                        .send_keyboard(&message.chat, &text, &main_menu())
                        .await?;
                    return Ok(HandlerResponse::Reply(text));
                }
                Ok(HandlerResponse::Continue)
            }
            RegistrationStep::AwaitingName => match input {
                Input::Text(name) => {
                    self.users
                        .set_name(message.user.id, &name)
                        .await
                        .map_err(storage_error)?;
                    self.reply(message, ASK_PHONE).await
                }
                _ => self.reply(message, ASK_NAME).await,
            },
            RegistrationStep::AwaitingPhone => {
                let Some(phone) = normalize_phone(&message.content) else {
                    let text = if input == Input::Start { ASK_PHONE } else { INVALID_PHONE };
                    return self.reply(message, text).await;
                };
                self.users
                    .set_phone(message.user.id, &phone)
                    .await
                    .map_err(storage_error)?;
                info!("Registration completed");

                let text = format!(
                    "Регистрация завершена, {}! {}",
                    user.full_name.as_deref().unwrap_or_default(),
                    MENU_PROMPT
                );
                self.bot
                    .send_keyboard(&message.chat, &text, &main_menu())
                    .await?;
                Ok(HandlerResponse::Reply(text))
            }
        }
    }
}
