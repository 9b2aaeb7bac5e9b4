//! User record model for persistence.
//!
//! Maps to the `users` table and is used by UserRepository.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Where a user is in the registration dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStep {
    AwaitingName,
    AwaitingPhone,
    Completed,
}

impl RegistrationStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStep::AwaitingName => "awaiting_name",
            RegistrationStep::AwaitingPhone => "awaiting_phone",
            RegistrationStep::Completed => "completed",
        }
    }
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStep {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awaiting_name" => Ok(RegistrationStep::AwaitingName),
            "awaiting_phone" => Ok(RegistrationStep::AwaitingPhone),
            "completed" => Ok(RegistrationStep::Completed),
            other => Err(StorageError::InvalidValue(format!(
                "unknown registration step: {}",
                other
            ))),
        }
    }
}

/// One row from the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Telegram user id (primary key).
    pub user_id: i64,
    /// Private chat id used to reach the user.
    pub chat_id: i64,
    /// Telegram username.
    pub username: Option<String>,
    /// Name typed in during registration.
    pub full_name: Option<String>,
    /// Normalized phone number.
    pub phone: Option<String>,
    /// Article language code ("ru" or "uz").
    pub lang: String,
    /// Stored form of [`RegistrationStep`].
    pub registration_step: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a record for a user who just started registration.
    pub fn new(user_id: i64, chat_id: i64, username: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            chat_id,
            username,
            full_name: None,
            phone: None,
            lang: "ru".to_string(),
            registration_step: RegistrationStep::AwaitingName.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Parsed registration step; unknown stored values restart the dialog.
    pub fn step(&self) -> RegistrationStep {
        self.registration_step
            .parse()
            .unwrap_or(RegistrationStep::AwaitingName)
    }

    pub fn is_registered(&self) -> bool {
        self.step() == RegistrationStep::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_awaits_name() {
        let record = UserRecord::new(1, 2, None);
        assert_eq!(record.step(), RegistrationStep::AwaitingName);
        assert_eq!(record.lang, "ru");
        assert!(!record.is_registered());
    }

    #[test]
    fn test_step_round_trip() {
        for step in [
            RegistrationStep::AwaitingName,
            RegistrationStep::AwaitingPhone,
            RegistrationStep::Completed,
        ] {
            assert_eq!(step.as_str().parse::<RegistrationStep>().unwrap(), step);
        }
        assert!("done".parse::<RegistrationStep>().is_err());
    }

    #[test]
    fn test_unknown_stored_step_restarts() {
        let mut record = UserRecord::new(1, 2, None);
        record.registration_step = "garbage".to_string();
        assert_eq!(record.step(), RegistrationStep::AwaitingName);
    }
}
