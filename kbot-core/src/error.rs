//! Error types for the bot core.
//!
//! [`KbotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error for the bot: storage, bot transport or handler state.
#[derive(Error, Debug)]
pub enum KbotError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Conversation state changed underneath the handler (e.g. the user row is gone).
    #[error("State error: {0}")]
    State(String),
}

/// Result type for core operations; uses [`KbotError`].
pub type Result<T> = std::result::Result<T, KbotError>;
