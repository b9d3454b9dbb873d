//! In-memory store of conversation sessions
//!
//! The cache is owned by whoever drives the chat (normally
//! [`VenueAssistant`](crate::chat::assistant::VenueAssistant)); nothing here
//! is global.

use crate::catalog::Category;
use crate::chat::export::ChatExport;
use crate::chat::session::{ConversationEntry, ConversationSession, Role, SessionKey};

use chrono::{DateTime, Duration, Utc};
use regex::RegexBuilder;
use std::collections::HashMap;

/// A search match with the query wrapped in `<mark>` tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Matching entry
    pub entry: ConversationEntry,
    /// Entry content with each occurrence of the query marked
    pub highlighted: String,
}

/// Counts and timing for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub first_message_time: Option<DateTime<Utc>>,
    pub last_message_time: Option<DateTime<Utc>>,
    /// Time between first and last message; zero for fewer than two
    pub session_duration: Duration,
}

/// Totals over the whole cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStats {
    pub active_sessions: usize,
    pub total_messages: usize,
    /// Keys of every session, sorted
    pub keys: Vec<SessionKey>,
}

/// Sessions keyed by (venue, category)
#[derive(Debug, Clone)]
pub struct SessionCache {
    sessions: HashMap<SessionKey, ConversationSession>,
    max_entries: usize,
}

impl SessionCache {
    /// Creates an empty cache whose sessions hold at most `max_entries`
    pub fn new(max_entries: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_entries,
        }
    }

    /// Session for a key, if one exists
    pub fn get(&self, key: &SessionKey) -> Option<&ConversationSession> {
        self.sessions.get(key)
    }

    /// Mutable session for a key, if one exists
    pub fn get_mut(&mut self, key: &SessionKey) -> Option<&mut ConversationSession> {
        self.sessions.get_mut(key)
    }

    /// Session for a key, created empty on first use
    pub fn get_or_create(&mut self, key: SessionKey) -> &mut ConversationSession {
        let max_entries = self.max_entries;
        self.sessions
            .entry(key.clone())
            .or_insert_with(|| ConversationSession::new(key, max_entries))
    }

    /// History for a venue; empty if there is no session
    pub fn history(&self, result: &str, category: Category) -> &[ConversationEntry] {
        self.sessions
            .get(&SessionKey::new(result, category))
            .map(ConversationSession::entries)
            .unwrap_or(&[])
    }

    /// Replaces the session for the export's key with its messages
    pub fn replace(&mut self, export: ChatExport) -> SessionKey {
        let key = SessionKey::new(export.result, export.category);
        let session = ConversationSession::with_entries(key.clone(), export.messages, self.max_entries);
        self.sessions.insert(key.clone(), session);
        key
    }

    /// Removes every session
    pub fn clear_all(&mut self) {
        let cleared = self.sessions.len();
        self.sessions.clear();
        tracing::debug!(cleared, "Cleared all chat sessions");
    }

    /// Removes every session except the given one
    pub fn clear_except(&mut self, keep: &SessionKey) {
        self.sessions.retain(|key, _| key == keep);
    }

    /// Case-insensitive search in one session's history
    ///
    /// The query is matched literally. An empty query matches nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dadu::catalog::Category;
    /// use dadu::chat::cache::SessionCache;
    /// use dadu::chat::session::{ConversationEntry, SessionKey};
    ///
    /// let mut cache = SessionCache::new(24);
    /// cache
    ///     .get_or_create(SessionKey::new("Monas", Category::Place))
    ///     .push(ConversationEntry::assistant("Parkir di Monas luas"));
    ///
    /// let hits = cache.search("Monas", Category::Place, "PARKIR");
    /// assert_eq!(hits[0].highlighted, "<mark>Parkir</mark> di Monas luas");
    /// ```
    pub fn search(&self, result: &str, category: Category, query: &str) -> Vec<SearchHit> {
        if query.is_empty() {
            return Vec::new();
        }

        let pattern = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!("Unable to build search pattern: {}", e);
                return Vec::new();
            }
        };

        self.history(result, category)
            .iter()
            .filter(|entry| pattern.is_match(&entry.content))
            .map(|entry| SearchHit {
                entry: entry.clone(),
                highlighted: pattern
                    .replace_all(&entry.content, "<mark>$0</mark>")
                    .into_owned(),
            })
            .collect()
    }

    /// Message counts and time span for one session
    pub fn response_stats(&self, result: &str, category: Category) -> ResponseStats {
        let history = self.history(result, category);
        let user_messages = history.iter().filter(|e| e.role == Role::User).count();
        let first_message_time = history.first().map(|e| e.timestamp);
        let last_message_time = history.last().map(|e| e.timestamp);

        let session_duration = match (first_message_time, last_message_time) {
            (Some(first), Some(last)) if history.len() > 1 => last - first,
            _ => Duration::zero(),
        };

        ResponseStats {
            total_messages: history.len(),
            user_messages,
            assistant_messages: history.len() - user_messages,
            first_message_time,
            last_message_time,
            session_duration,
        }
    }

    /// Totals over every session
    pub fn memory_stats(&self) -> MemoryStats {
        let mut keys: Vec<SessionKey> = self.sessions.keys().cloned().collect();
        keys.sort();

        MemoryStats {
            active_sessions: self.sessions.len(),
            total_messages: self.sessions.values().map(ConversationSession::len).sum(),
            keys,
        }
    }

    /// Number of sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True if there are no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Per-session entry cap
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(crate::chat::session::DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_at(role: Role, content: &str, millis: i64) -> ConversationEntry {
        ConversationEntry {
            role,
            content: content.to_string(),
            timestamp: Utc.timestamp_millis_opt(millis).unwrap(),
        }
    }

    fn populated() -> SessionCache {
        let mut cache = SessionCache::default();
        let session = cache.get_or_create(SessionKey::new("Bakmi GM", Category::Food));
        session.push(entry_at(Role::User, "Menu apa yang enak?", 1_000));
        session.push(entry_at(Role::Assistant, "Bakmi ayam-nya enak banget, ENAK!", 4_000));
        session.push(entry_at(Role::User, "Parkir gimana?", 61_000));

        cache
            .get_or_create(SessionKey::new("Monas", Category::Place))
            .push(entry_at(Role::User, "Kenapa harus ke Monas?", 2_000));
        cache
    }

    #[test]
    fn test_history_of_unknown_session_is_empty() {
        let cache = SessionCache::default();
        assert!(cache.history("Nowhere", Category::Food).is_empty());
    }

    #[test]
    fn test_same_venue_different_category_is_separate() {
        let mut cache = populated();
        cache
            .get_or_create(SessionKey::new("Bakmi GM", Category::Place))
            .push(ConversationEntry::user("halo"));

        assert_eq!(cache.history("Bakmi GM", Category::Food).len(), 3);
        assert_eq!(cache.history("Bakmi GM", Category::Place).len(), 1);
    }

    #[test]
    fn test_get_or_create_uses_cache_cap() {
        let mut cache = SessionCache::new(3);
        let session = cache.get_or_create(SessionKey::new("A", Category::Food));
        for i in 0..5 {
            session.push(ConversationEntry::user(i.to_string()));
        }
        assert_eq!(cache.history("A", Category::Food).len(), 3);
    }

    #[test]
    fn test_clear_except_keeps_only_given_key() {
        let mut cache = populated();
        let keep = SessionKey::new("Monas", Category::Place);
        cache.clear_except(&keep);

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&keep).is_some());
    }

    #[test]
    fn test_clear_all() {
        let mut cache = populated();
        cache.clear_all();
        assert!(cache.is_empty());
        assert_eq!(cache.memory_stats().total_messages, 0);
    }

    #[test]
    fn test_search_marks_every_occurrence() {
        let cache = populated();
        let hits = cache.search("Bakmi GM", Category::Food, "enak");

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].highlighted, "Menu apa yang <mark>enak</mark>?");
        assert_eq!(
            hits[1].highlighted,
            "Bakmi ayam-nya <mark>enak</mark> banget, <mark>ENAK</mark>!"
        );
    }

    #[test]
    fn test_search_treats_query_literally() {
        let cache = populated();
        assert_eq!(cache.search("Bakmi GM", Category::Food, "?").len(), 2);
        assert!(cache.search("Bakmi GM", Category::Food, ".*").is_empty());
        assert!(cache.search("Bakmi GM", Category::Food, "").is_empty());
    }

    #[test]
    fn test_response_stats() {
        let cache = populated();
        let stats = cache.response_stats("Bakmi GM", Category::Food);

        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.user_messages, 2);
        assert_eq!(stats.assistant_messages, 1);
        assert_eq!(stats.session_duration, Duration::seconds(60));
        assert_eq!(
            stats.first_message_time,
            Some(Utc.timestamp_millis_opt(1_000).unwrap())
        );
    }

    #[test]
    fn test_response_stats_single_and_empty() {
        let cache = populated();
        let single = cache.response_stats("Monas", Category::Place);
        assert_eq!(single.session_duration, Duration::zero());

        let empty = cache.response_stats("Nowhere", Category::Place);
        assert_eq!(empty.total_messages, 0);
        assert!(empty.first_message_time.is_none());
    }

    #[test]
    fn test_memory_stats_lists_sorted_keys() {
        let stats = populated().memory_stats();
        assert_eq!(stats.active_sessions, 2);
        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.keys[0], SessionKey::new("Bakmi GM", Category::Food));
        assert_eq!(stats.keys[1], SessionKey::new("Monas", Category::Place));
    }

    #[test]
    fn test_replace_overwrites_session() {
        let mut cache = populated();
        let export = ChatExport {
            result: "Bakmi GM".to_string(),
            category: Category::Food,
            export_date: None,
            messages: vec![entry_at(Role::Assistant, "imported", 5)],
        };

        let key = cache.replace(export);
        assert_eq!(key, SessionKey::new("Bakmi GM", Category::Food));
        let history = cache.history("Bakmi GM", Category::Food);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "imported");
    }
}
