//! Article language setting.

use std::sync::Arc;

use async_trait::async_trait;
use kbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use storage::UserRepository;
use tracing::{info, instrument};

use super::storage_error;
use crate::command::Input;
use crate::menu::{lang_label, lang_menu, main_menu};

pub const CHOOSE_LANG: &str = "Выберите язык статей:";

pub struct SettingsHandler {
    users: UserRepository,
    bot: Arc<dyn Bot>,
}

impl SettingsHandler {
    pub fn new(users: UserRepository, bot: Arc<dyn Bot>) -> Self {
        Self { users, bot }
    }
}

#[async_trait]
impl Handler for SettingsHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match Input::parse(&message.content) {
            Input::LangMenu => {
                self.bot
                    .send_keyboard(&message.chat, CHOOSE_LANG, &lang_menu())
                    .await?;
                Ok(HandlerResponse::Reply(CHOOSE_LANG.to_string()))
            }
            Input::SetLang(lang) => {
                self.users
                    .set_lang(message.user.id, lang.code())
                    .await
                    .map_err(storage_error)?;
                info!(lang = %lang, "Article language changed");

                let text = format!("Язык статей: {}", lang_label(lang));
                self.bot
                    .send_keyboard(&message.chat, &text, &main_menu())
                    .await?;
                Ok(HandlerResponse::Reply(text))
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
