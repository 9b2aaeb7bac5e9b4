use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use kbot_core::{init_tracing, Bot};
use kbot_telegram::run_repl;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;

/// Main entry: validate config, init logging, build components and the handler chain, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        cache_file = %config.cache_file(),
        "Initializing bot"
    );

    let components = build_bot_components(&config, None).await?;
    let handler_chain = build_handler_chain(&components);
    let teloxide_bot = components.teloxide_bot.clone();

    info!("Bot started successfully");

    run_repl(teloxide_bot, handler_chain).await
}

/// Builds components and handler chain without starting the REPL or logging.
///
/// Used by integration tests that inject a recording bot and drive the chain with core messages.
#[instrument(skip(config, bot))]
pub async fn build_handler_chain_only(config: &BotConfig, bot: Arc<dyn Bot>) -> Result<HandlerChain> {
    config.validate()?;
    let components = build_bot_components(config, Some(bot)).await?;
    Ok(build_handler_chain(&components))
}
