//! # kadrovik-bot
//!
//! Telegram bot for kadrovik.uz. Wires the handler chain (registration, language settings,
//! latest articles, search, article reading) to user storage and the article service,
//! loads config from env and runs the REPL.

pub mod cli;
pub mod command;
pub mod components;
pub mod config;
pub mod handlers;
pub mod menu;
pub mod runner;

pub use cli::{handle_cache, load_config, Cli, Commands};
pub use command::Input;
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{ArticlesConfig, BaseConfig, BotConfig};
pub use handlers::{
    ArticlesHandler, FallbackHandler, LoggingHandler, RegistrationHandler, SettingsHandler,
};
pub use runner::{build_handler_chain_only, run_bot};
