//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use kadrovik_articles::{ArticleService, CacheStore};
use kbot_core::Bot as CoreBot;
use kbot_telegram::TelegramBotAdapter;
use storage::UserRepository;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::{
    ArticlesHandler, FallbackHandler, LoggingHandler, RegistrationHandler, SettingsHandler,
};

/// Everything the handler chain needs; produced by [`build_bot_components`].
#[derive(Clone)]
pub struct BotComponents {
    pub users: UserRepository,
    pub articles: Arc<ArticleService>,
    pub teloxide_bot: Bot,
    /// Outbound side used by handlers. The Telegram adapter unless overridden (tests).
    pub bot: Arc<dyn CoreBot>,
}

/// Opens the user database and the article cache, and wires the Telegram client.
///
/// When `bot_override` is `Some`, handlers send through it instead of Telegram.
#[instrument(skip(config, bot_override))]
pub async fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<BotComponents> {
    let users = UserRepository::new(config.database_url())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to initialize user storage"
            );
            anyhow::anyhow!("Failed to initialize user storage: {}", e)
        })?;

    let site = config.articles().site_config()?;
    info!(
        site = %site.base_url,
        cache_file = %config.cache_file(),
        freshness_hours = site.freshness.num_hours(),
        "Article source configured"
    );
    let cache = Arc::new(CacheStore::new(config.cache_file()));
    let articles = Arc::new(
        ArticleService::new(site, cache)
            .map_err(|e| anyhow::anyhow!("Failed to initialize article service: {}", e))?,
    );

    let teloxide_bot = {
        let bot = Bot::new(config.bot_token());
        match config.telegram_api_url() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    };

    let bot: Arc<dyn CoreBot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    Ok(BotComponents {
        users,
        articles,
        teloxide_bot,
        bot,
    })
}

/// Chain order: logging → registration → settings → articles → fallback.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(RegistrationHandler::new(
            components.users.clone(),
            components.bot.clone(),
        )))
        .add_handler(Arc::new(SettingsHandler::new(
            components.users.clone(),
            components.bot.clone(),
        )))
        .add_handler(Arc::new(ArticlesHandler::new(
            components.users.clone(),
            components.articles.clone(),
            components.bot.clone(),
        )))
        .add_handler(Arc::new(FallbackHandler::new(components.bot.clone())))
}
