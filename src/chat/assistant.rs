//! Venue assistant
//!
//! Answers questions about the rolled venue. With a provider configured,
//! each question is sent together with the system instruction and the
//! recent history of the venue's session; any failure degrades to the
//! keyword fallback replies. Without a provider every answer comes from
//! the fallback table and nothing is recorded.

use crate::catalog::Category;
use crate::chat::cache::{MemoryStats, ResponseStats, SearchHit, SessionCache};
use crate::chat::export::ChatExport;
use crate::chat::fallback::fallback_reply;
use crate::chat::prompts::{self, system_prompt};
use crate::chat::session::{ConversationEntry, SessionKey};
use crate::config::ChatConfig;
use crate::error::{DaduError, Result};
use crate::providers::{Message, Provider};

use std::path::{Path, PathBuf};

/// A reply ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    /// Reply text
    pub content: String,
    /// True for generated replies, which are rendered with the typing effect
    pub animate: bool,
}

impl AssistantReply {
    fn generated(content: String) -> Self {
        Self {
            content,
            animate: true,
        }
    }

    fn fallback(content: String) -> Self {
        Self {
            content,
            animate: false,
        }
    }
}

/// Question answering over per-venue sessions
pub struct VenueAssistant {
    provider: Option<Box<dyn Provider>>,
    cache: SessionCache,
    history_window: usize,
}

impl VenueAssistant {
    /// Create an assistant
    ///
    /// # Arguments
    ///
    /// * `provider` - Completion service, or `None` to answer offline
    /// * `cache` - Session store the assistant takes ownership of
    /// * `history_window` - Number of recent entries sent per request
    pub fn new(
        provider: Option<Box<dyn Provider>>,
        cache: SessionCache,
        history_window: usize,
    ) -> Self {
        Self {
            provider,
            cache,
            history_window,
        }
    }

    /// Create an assistant with a fresh cache sized from configuration
    pub fn from_config(provider: Option<Box<dyn Provider>>, config: &ChatConfig) -> Self {
        Self::new(
            provider,
            SessionCache::new(config.max_entries),
            config.history_window,
        )
    }

    /// True if a completion service is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer a question about a venue
    ///
    /// Returns `None` for a blank question. Otherwise always returns a
    /// reply: generated when the service answers, fallback when it is
    /// missing or fails.
    pub async fn ask(
        &mut self,
        question: &str,
        result: &str,
        category: Category,
    ) -> Option<AssistantReply> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        let Some(provider) = self.provider.as_deref() else {
            tracing::debug!("No provider configured, answering from fallback rules");
            return Some(AssistantReply::fallback(fallback_reply(
                question, result, category,
            )));
        };

        let session = self.cache.get_or_create(SessionKey::new(result, category));
        session.push(ConversationEntry::user(question));

        let mut messages = Vec::with_capacity(self.history_window + 1);
        messages.push(Message::system(system_prompt(result, category)));
        messages.extend(session.window(self.history_window).iter().map(Message::from));

        let completion = match provider.complete(&messages).await {
            Ok(response) => clean_completion(&response.content),
            Err(e) => Err(e),
        };

        match completion {
            Ok(content) => {
                self.cache
                    .get_or_create(SessionKey::new(result, category))
                    .push(ConversationEntry::assistant(content.clone()));
                Some(AssistantReply::generated(content))
            }
            Err(e) => {
                tracing::warn!("Falling back to canned reply for {}: {}", result, e);
                Some(AssistantReply::fallback(fallback_reply(
                    question, result, category,
                )))
            }
        }
    }

    /// Ask the venue's last question again
    ///
    /// The last user entry and any reply after it are removed before the
    /// question is resent, so the session ends up with a single copy of
    /// the question. Returns `None` if the session has no question to
    /// repeat.
    pub async fn regenerate(
        &mut self,
        result: &str,
        category: Category,
    ) -> Option<AssistantReply> {
        let question = self.take_last_question(result, category)?;
        tracing::debug!("Regenerating reply for {}", result);
        self.ask(&question, result, category).await
    }

    /// Replace the venue's last question with `question` and ask it
    ///
    /// Returns `None` for a blank question, or if the session has no
    /// question to replace; the session is left untouched in both cases.
    pub async fn edit_last_question(
        &mut self,
        question: &str,
        result: &str,
        category: Category,
    ) -> Option<AssistantReply> {
        if question.trim().is_empty() {
            return None;
        }
        let previous = self.take_last_question(result, category)?;
        tracing::debug!("Editing question {:?} for {}", previous, result);
        self.ask(question, result, category).await
    }

    fn take_last_question(&mut self, result: &str, category: Category) -> Option<String> {
        self.cache
            .get_mut(&SessionKey::new(result, category))?
            .take_last_question()
    }

    /// Called when a roll commits; discards every session
    pub fn on_new_roll(&mut self, result: &str, category: Category) {
        tracing::debug!("New roll {} ({}), clearing chat sessions", result, category);
        self.cache.clear_all();
    }

    /// The 12 suggested questions for a venue
    pub fn suggested_prompts(&self, result: &str, category: Category) -> Vec<String> {
        prompts::suggested_prompts(result, category)
    }

    /// History for a venue
    pub fn history(&self, result: &str, category: Category) -> &[ConversationEntry] {
        self.cache.history(result, category)
    }

    /// Snapshot of a venue's session for export
    pub fn export_session(&self, result: &str, category: Category) -> ChatExport {
        ChatExport::from_entries(result, category, self.cache.history(result, category))
    }

    /// Export a venue's session as a JSON file in `dir`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn write_export(&self, result: &str, category: Category, dir: &Path) -> Result<PathBuf> {
        self.export_session(result, category).write_to_dir(dir)
    }

    /// Replace a session from an exported JSON document
    ///
    /// Returns false, leaving the cache untouched, if the document is
    /// malformed or incomplete.
    pub fn import_session(&mut self, json: &str) -> bool {
        match ChatExport::parse(json) {
            Ok(export) => {
                let count = export.messages.len();
                let key = self.cache.replace(export);
                tracing::info!("Imported {} messages into {}", count, key);
                true
            }
            Err(e) => {
                tracing::warn!("Chat history import failed: {}", e);
                false
            }
        }
    }

    /// Case-insensitive search in a venue's history
    pub fn search(&self, result: &str, category: Category, query: &str) -> Vec<SearchHit> {
        self.cache.search(result, category, query)
    }

    /// Message counts and time span for a venue's session
    pub fn response_stats(&self, result: &str, category: Category) -> ResponseStats {
        self.cache.response_stats(result, category)
    }

    /// Totals over all sessions
    pub fn memory_stats(&self) -> MemoryStats {
        self.cache.memory_stats()
    }

    /// Drop every session except the given venue's
    pub fn clear_except(&mut self, result: &str, category: Category) {
        self.cache.clear_except(&SessionKey::new(result, category));
    }

    /// Drop every session
    pub fn clear_all(&mut self) {
        self.cache.clear_all();
    }

    /// Read access to the session cache
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}

/// Normalizes a completion: runs of three or more newlines become two,
/// surrounding whitespace is trimmed
///
/// # Errors
///
/// Returns a provider error if nothing is left
fn clean_completion(raw: &str) -> Result<String> {
    let cleaned = collapse_blank_lines(raw).trim().to_string();

    if cleaned.is_empty() {
        return Err(DaduError::Provider("Empty completion".to_string()).into());
    }
    Ok(cleaned)
}

fn collapse_blank_lines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut newlines = 0;
    for c in raw.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(c);
    }
    out
}
