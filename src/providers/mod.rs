//! Provider module for Dadu
//!
//! This module contains the chat completion provider abstraction and the
//! OpenAI-compatible implementation.

pub mod base;
pub mod chat_completions;

pub use base::{CompletionResponse, Message, Provider, TokenUsage};
pub use chat_completions::ChatCompletionsProvider;

use crate::config::ProviderConfig;
use crate::error::{DaduError, Result};

/// Create a provider instance from configuration
///
/// # Errors
///
/// Returns `DaduError::MissingCredentials` when no API key is configured,
/// or an error if the HTTP client cannot be initialized
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    Ok(Box::new(ChatCompletionsProvider::new(config.clone())?))
}

/// Create a provider if an API key is configured
///
/// A missing key yields `Ok(None)` so callers can run offline.
///
/// # Errors
///
/// Returns error if a configured provider cannot be initialized
pub fn optional_provider(config: &ProviderConfig) -> Result<Option<Box<dyn Provider>>> {
    match create_provider(config) {
        Ok(provider) => Ok(Some(provider)),
        Err(e) => match e.downcast_ref::<DaduError>() {
            Some(DaduError::MissingCredentials(_)) => {
                tracing::debug!("No API key configured, assistant runs offline");
                Ok(None)
            }
            _ => Err(e),
        },
    }
}
