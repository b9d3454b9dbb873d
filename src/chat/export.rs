//! Chat history export and import
//!
//! The export payload is plain JSON with ISO 8601 timestamps:
//!
//! ```json
//! {
//!   "result": "Sate Khas Senayan (Bekasi)",
//!   "category": "food",
//!   "exportDate": "2026-10-18T09:30:00Z",
//!   "messages": [
//!     { "role": "user", "content": "...", "timestamp": "2026-10-18T09:29:58Z" }
//!   ]
//! }
//! ```

use crate::catalog::Category;
use crate::chat::session::{ConversationEntry, ConversationSession};
use crate::error::{DaduError, Result};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Serialized form of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExport {
    /// Venue the conversation was about
    pub result: String,
    /// Venue category
    pub category: Category,
    /// When the export was made; optional on import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    /// Messages, oldest first
    pub messages: Vec<ConversationEntry>,
}

impl ChatExport {
    /// Snapshot of a session, stamped with the current time
    pub fn from_session(session: &ConversationSession) -> Self {
        Self::from_entries(
            &session.key().result,
            session.key().category,
            session.entries(),
        )
    }

    /// Snapshot of raw entries
    pub fn from_entries(result: &str, category: Category, entries: &[ConversationEntry]) -> Self {
        Self {
            result: result.to_string(),
            category,
            export_date: Some(Utc::now()),
            messages: entries.to_vec(),
        }
    }

    /// Parses and validates an import payload
    ///
    /// # Errors
    ///
    /// Returns `DaduError::Import` if the JSON is malformed or `result`,
    /// `category` or `messages` is missing, or `result` is blank.
    pub fn parse(json: &str) -> Result<Self> {
        let export: ChatExport = serde_json::from_str(json)
            .map_err(|e| DaduError::Import(format!("Invalid chat history format: {}", e)))?;

        if export.result.trim().is_empty() {
            return Err(DaduError::Import("Chat history has an empty result".to_string()).into());
        }

        Ok(export)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the export into `dir` and returns the file path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let at = self.export_date.unwrap_or_else(Utc::now);
        let path = dir.join(export_file_name(&self.result, at));
        std::fs::write(&path, self.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), messages = self.messages.len(), "Chat history exported");
        Ok(path)
    }
}

/// File name for an export: `dnAI-chat-<slug>-<epoch millis>.json`
///
/// The slug is the venue with every character outside `[A-Za-z0-9]`
/// replaced by `_`, lowercased.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use dadu::chat::export::export_file_name;
///
/// let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
/// assert_eq!(
///     export_file_name("Sate Khas Senayan (Bekasi)", at),
///     "dnAI-chat-sate_khas_senayan__bekasi_-1700000000123.json"
/// );
/// ```
pub fn export_file_name(result: &str, at: DateTime<Utc>) -> String {
    let slug: String = result
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("dnAI-chat-{}-{}.json", slug, at.timestamp_millis())
}
