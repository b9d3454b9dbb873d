//! Conversation sessions
//!
//! A session is the ordered message history for one (venue, category)
//! pair, bounded to a fixed number of entries.

use crate::catalog::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum entries kept per session unless configured otherwise
pub const DEFAULT_MAX_ENTRIES: usize = 24;

/// Identifies a session: the rolled venue and its category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey {
    /// Venue as rolled, including any "(area)" suffix
    pub result: String,
    /// Category the venue was rolled under
    pub category: Category,
}

impl SessionKey {
    /// Creates a key
    pub fn new(result: impl Into<String>, category: Category) -> Self {
        Self {
            result: result.into(),
            category,
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.result, self.category)
    }
}

/// Who wrote an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking
    User,
    /// The completion service
    Assistant,
}

impl Role {
    /// Wire name used by chat completion APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in a session
///
/// Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
    /// When the message was recorded
    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    /// Creates an entry stamped with the current time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a user entry
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant entry
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Bounded, insertion-ordered history for one key
///
/// # Examples
///
/// ```
/// use dadu::catalog::Category;
/// use dadu::chat::session::{ConversationEntry, ConversationSession, SessionKey};
///
/// let mut session = ConversationSession::new(SessionKey::new("Monas", Category::Place), 2);
/// session.push(ConversationEntry::user("one"));
/// session.push(ConversationEntry::assistant("two"));
/// session.push(ConversationEntry::user("three"));
/// assert_eq!(session.len(), 2);
/// assert_eq!(session.entries()[0].content, "two");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    key: SessionKey,
    entries: Vec<ConversationEntry>,
    max_entries: usize,
}

impl ConversationSession {
    /// Creates an empty session holding at most `max_entries` entries
    pub fn new(key: SessionKey, max_entries: usize) -> Self {
        Self {
            key,
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Builds a session from existing entries, keeping the newest ones
    pub fn with_entries(
        key: SessionKey,
        entries: Vec<ConversationEntry>,
        max_entries: usize,
    ) -> Self {
        let mut session = Self::new(key, max_entries);
        session.entries = entries;
        session.trim();
        session
    }

    /// Appends an entry, dropping the oldest ones past the cap
    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
        self.trim();
    }

    fn trim(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    /// Removes the most recent user entry and everything after it
    ///
    /// Returns the removed question, or `None` (leaving the session as it
    /// was) if the session holds no user entry.
    pub fn take_last_question(&mut self) -> Option<String> {
        let index = self
            .entries
            .iter()
            .rposition(|entry| entry.role == Role::User)?;
        let question = self.entries[index].content.clone();
        self.entries.truncate(index);
        Some(question)
    }

    /// The last `size` entries, oldest first
    pub fn window(&self, size: usize) -> &[ConversationEntry] {
        let start = self.entries.len().saturating_sub(size);
        &self.entries[start..]
    }

    /// Session key
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the session has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SessionKey {
        SessionKey::new("Warung Nasi (Bekasi)", Category::Food)
    }

    #[test]
    fn test_key_display_joins_result_and_category() {
        assert_eq!(key().to_string(), "Warung Nasi (Bekasi)_food");
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut session = ConversationSession::new(key(), DEFAULT_MAX_ENTRIES);
        session.push(ConversationEntry::user("halo"));
        session.push(ConversationEntry::assistant("halo juga"));

        assert_eq!(session.len(), 2);
        assert_eq!(session.entries()[0].role, Role::User);
        assert_eq!(session.entries()[1].role, Role::Assistant);
    }

    #[test]
    fn test_twenty_fifth_entry_drops_oldest() {
        let mut session = ConversationSession::new(key(), DEFAULT_MAX_ENTRIES);
        for i in 0..24 {
            session.push(ConversationEntry::user(format!("message {}", i)));
        }
        assert_eq!(session.len(), 24);

        session.push(ConversationEntry::assistant("message 24"));
        assert_eq!(session.len(), 24);
        assert_eq!(session.entries()[0].content, "message 1");
        assert_eq!(session.entries()[23].content, "message 24");
    }

    #[test]
    fn test_window_returns_tail_oldest_first() {
        let mut session = ConversationSession::new(key(), DEFAULT_MAX_ENTRIES);
        for i in 0..10 {
            session.push(ConversationEntry::user(i.to_string()));
        }

        let window = session.window(8);
        assert_eq!(window.len(), 8);
        assert_eq!(window[0].content, "2");
        assert_eq!(window[7].content, "9");

        assert_eq!(session.window(50).len(), 10);
    }

    #[test]
    fn test_with_entries_trims_to_cap() {
        let entries = (0..30)
            .map(|i| ConversationEntry::user(i.to_string()))
            .collect();
        let session = ConversationSession::with_entries(key(), entries, DEFAULT_MAX_ENTRIES);
        assert_eq!(session.len(), 24);
        assert_eq!(session.entries()[0].content, "6");
    }

    #[test]
    fn test_take_last_question_drops_trailing_reply() {
        let mut session = ConversationSession::new(key(), DEFAULT_MAX_ENTRIES);
        session.push(ConversationEntry::user("satu"));
        session.push(ConversationEntry::assistant("jawab satu"));
        session.push(ConversationEntry::user("dua"));
        session.push(ConversationEntry::assistant("jawab dua"));

        assert_eq!(session.take_last_question().as_deref(), Some("dua"));
        assert_eq!(session.len(), 2);
        assert_eq!(session.entries()[1].content, "jawab satu");
    }

    #[test]
    fn test_take_last_question_without_user_entry() {
        let mut session = ConversationSession::new(key(), DEFAULT_MAX_ENTRIES);
        assert_eq!(session.take_last_question(), None);

        session.push(ConversationEntry::assistant("halo"));
        assert_eq!(session.take_last_question(), None);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
