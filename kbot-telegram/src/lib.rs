//! Telegram transport layer: teloxide → core type adapters, [`kbot_core::Bot`] implementation
//! and the long-polling REPL runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_repl;
