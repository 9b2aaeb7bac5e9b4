//! Chat handlers, in chain order: logging, registration, settings, articles, fallback.

mod articles;
mod fallback;
mod logging;
mod registration;
mod settings;

pub use articles::ArticlesHandler;
pub use fallback::FallbackHandler;
pub use logging::LoggingHandler;
pub use registration::{normalize_phone, RegistrationHandler};
pub use settings::SettingsHandler;

use kadrovik_articles::Lang;
use kbot_core::{HandlerError, KbotError};
use storage::{StorageError, UserRepository};

fn storage_error(e: StorageError) -> KbotError {
    match e {
        StorageError::NotFound(what) => HandlerError::State(format!("{} not found", what)).into(),
        other => KbotError::Storage(other.to_string()),
    }
}

/// Article language of the user; Russian when unknown.
async fn user_lang(users: &UserRepository, user_id: i64) -> kbot_core::Result<Lang> {
    let user = users.find(user_id).await.map_err(storage_error)?;
    Ok(user
        .and_then(|u| u.lang.parse().ok())
        .unwrap_or_default())
}
