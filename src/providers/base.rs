//! Base provider trait and common message types
//!
//! This module defines the `Provider` trait the venue assistant talks to,
//! along with the message and response structures exchanged with it.

use crate::chat::session::ConversationEntry;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message structure for a completion request
///
/// Represents one message sent to the chat completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use dadu::providers::Message;
    ///
    /// let msg = Message::system("Kamu adalah dnAI");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use dadu::providers::Message;
    ///
    /// let msg = Message::user("Kenapa harus ke Monas?");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

impl From<&ConversationEntry> for Message {
    fn from(entry: &ConversationEntry) -> Self {
        Self {
            role: entry.role.as_str().to_string(),
            content: entry.content.clone(),
        }
    }
}

/// Token usage reported by the service, when available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: usize,
    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: usize,
    /// Sum of both
    #[serde(default)]
    pub total_tokens: usize,
}

/// Completion response with the generated text and optional token usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// The generated reply
    pub content: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse
    ///
    /// # Examples
    ///
    /// ```
    /// use dadu::providers::CompletionResponse;
    ///
    /// let response = CompletionResponse::new("Sabi banget bro!");
    /// assert_eq!(response.content, "Sabi banget bro!");
    /// assert!(response.usage.is_none());
    /// ```
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(content: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            content: content.into(),
            usage: Some(usage),
        }
    }
}

/// Chat completion service
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use dadu::error::Result;
/// use dadu::providers::{CompletionResponse, Message, Provider};
///
/// struct Canned;
///
/// #[async_trait]
/// impl Provider for Canned {
///     async fn complete(&self, _messages: &[Message]) -> Result<CompletionResponse> {
///         Ok(CompletionResponse::new("Gas kuy!"))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation
    ///
    /// # Arguments
    ///
    /// * `messages` - System instruction followed by the conversation window
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the service reports an error,
    /// or the response cannot be parsed
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse>;

    /// Short provider name for logs
    fn name(&self) -> &str {
        "provider"
    }
}
