//! Last handler: answers anything nobody else took with a short help text.

use std::sync::Arc;

use async_trait::async_trait;
use kbot_core::{Bot, Handler, HandlerResponse, Message, Result};

use crate::menu::main_menu;

pub const HELP_TEXT: &str = "Используйте кнопки меню или команды:\n\
/latest — актуальные статьи\n\
/search <запрос> — поиск статьи\n\
/read <ссылка> — прочитать статью\n\
/lang — язык статей";

pub struct FallbackHandler {
    bot: Arc<dyn Bot>,
}

impl FallbackHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for FallbackHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        self.bot
            .send_keyboard(&message.chat, HELP_TEXT, &main_menu())
            .await?;
        Ok(HandlerResponse::Reply(HELP_TEXT.to_string()))
    }
}
