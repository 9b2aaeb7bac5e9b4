//! User repository: registration state, contact details and language preference.
//!
//! Uses SqlitePoolManager; one row per Telegram user.

use chrono::Utc;
use tracing::info;

use crate::error::StorageError;
use crate::models::{RegistrationStep, UserRecord};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct UserRepository {
    pool_manager: SqlitePoolManager,
}

impl UserRepository {
    /// Opens (or creates) the database and ensures the `users` table exists.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                username TEXT,
                full_name TEXT,
                phone TEXT,
                lang TEXT NOT NULL DEFAULT 'ru',
                registration_step TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("users table ready");
        Ok(())
    }

    /// Returns the user, or None if they never pressed /start.
    pub async fn find(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let record = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(record)
    }

    /// Inserts the record or replaces every column of an existing one (created_at is kept).
    pub async fn upsert(&self, user: &UserRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, chat_id, username, full_name, phone, lang, registration_step, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                chat_id = excluded.chat_id,
                username = excluded.username,
                full_name = excluded.full_name,
                phone = excluded.phone,
                lang = excluded.lang,
                registration_step = excluded.registration_step,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user.user_id)
        .bind(user.chat_id)
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(&user.lang)
        .bind(&user.registration_step)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool_manager.pool())
        .await?;

        info!(user_id = user.user_id, step = %user.registration_step, "Saved user");
        Ok(())
    }

    /// Stores the name and moves the user on to the phone step.
    pub async fn set_name(&self, user_id: i64, full_name: &str) -> Result<(), StorageError> {
        self.update(
            "UPDATE users SET full_name = ?, registration_step = ?, updated_at = ? WHERE user_id = ?",
            user_id,
            full_name,
            Some(RegistrationStep::AwaitingPhone),
        )
        .await
    }

    /// Stores the phone and completes registration.
    pub async fn set_phone(&self, user_id: i64, phone: &str) -> Result<(), StorageError> {
        self.update(
            "UPDATE users SET phone = ?, registration_step = ?, updated_at = ? WHERE user_id = ?",
            user_id,
            phone,
            Some(RegistrationStep::Completed),
        )
        .await
    }

    /// Stores the article language preference.
    pub async fn set_lang(&self, user_id: i64, lang: &str) -> Result<(), StorageError> {
        self.update(
            "UPDATE users SET lang = ?, updated_at = ? WHERE user_id = ?",
            user_id,
            lang,
            None,
        )
        .await
    }

    async fn update(
        &self,
        sql: &str,
        user_id: i64,
        value: &str,
        step: Option<RegistrationStep>,
    ) -> Result<(), StorageError> {
        let mut query = sqlx::query(sql).bind(value);
        if let Some(step) = step {
            query = query.bind(step.as_str());
        }
        let result = query
            .bind(Utc::now())
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("user {}", user_id)));
        }
        Ok(())
    }
}
