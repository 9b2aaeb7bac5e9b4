//! Reply keyboard: rows of button labels shown under the input field.
//!
//! Pressing a button sends its label back as an ordinary text message, so handlers
//! match on labels the same way they match on commands.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
}

impl ReplyKeyboard {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Appends a row of buttons.
    pub fn row<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(labels.into_iter().map(Into::into).collect());
        self
    }

    /// True if any button carries exactly this label.
    pub fn contains(&self, label: &str) -> bool {
        self.rows.iter().flatten().any(|b| b == label)
    }
}

impl Default for ReplyKeyboard {
    fn default() -> Self {
        Self::new()
    }
}
