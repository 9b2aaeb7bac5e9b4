//! Storage crate: registered users, their contact details and language preference.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, RegistrationStep
//! - [`user_repo`] – UserRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod sqlite_pool;
mod user_repo;

pub use error::StorageError;
pub use models::{RegistrationStep, UserRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
