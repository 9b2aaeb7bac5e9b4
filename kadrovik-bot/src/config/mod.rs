//! Bot configuration: BaseConfig (Telegram + log + DB) + ArticlesConfig (site, cache, timeouts).

mod articles;
mod base;
mod bot_config;


pub use articles::ArticlesConfig;
pub use base::BaseConfig;
pub use bot_config::BotConfig;
