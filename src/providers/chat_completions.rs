//! OpenAI-compatible chat completions provider
//!
//! Works against any endpoint speaking the `/chat/completions` wire format
//! (Groq by default).

use crate::config::ProviderConfig;
use crate::error::{DaduError, Result};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider for OpenAI-compatible chat completion endpoints
#[derive(Debug, Clone)]
pub struct ChatCompletionsProvider {
    client: Client,
    config: ProviderConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl ChatCompletionsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `DaduError::MissingCredentials` if no API key is configured,
    /// or a provider error if the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use dadu::config::ProviderConfig;
    /// use dadu::providers::ChatCompletionsProvider;
    ///
    /// let mut config = ProviderConfig::default();
    /// assert!(ChatCompletionsProvider::new(config.clone()).is_err());
    ///
    /// config.api_key = Some("gsk_test".to_string());
    /// let provider = ChatCompletionsProvider::new(config).unwrap();
    /// assert_eq!(provider.model(), "llama-3.1-8b-instant");
    /// ```
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = config
            .credential()
            .ok_or_else(|| DaduError::MissingCredentials("chat_completions".to_string()))?
            .to_string();

        let mut builder = Client::builder().user_agent(concat!("dadu/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| DaduError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized chat completions provider: url={}, model={}",
            config.api_url,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Configured endpoint URL
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }
}

#[async_trait]
impl Provider for ChatCompletionsProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            stream: false,
        };

        tracing::debug!("Sending chat completion request: {} messages", messages.len());

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                DaduError::Provider(format!("Chat completion request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Chat completion returned error {}: {}", status, error_text);
            return Err(DaduError::Provider(format!(
                "Chat completion returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion response: {}", e);
            DaduError::Provider(format!("Failed to parse chat completion response: {}", e))
        })?;

        if let Some(error) = body.error {
            tracing::error!("Chat completion service error: {}", error.message);
            return Err(DaduError::Provider(error.message).into());
        }

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DaduError::Provider("Response contained no choices".to_string()))?;

        tracing::debug!("Chat completion received: {} chars", content.len());

        Ok(match body.usage {
            Some(usage) => CompletionResponse::with_usage(content, usage),
            None => CompletionResponse::new(content),
        })
    }

    fn name(&self) -> &str {
        "chat_completions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ProviderConfig {
        ProviderConfig {
            api_url: format!("{}/openai/v1/chat/completions", server.uri()),
            api_key: Some("gsk_test".to_string()),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let err = ChatCompletionsProvider::new(ProviderConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DaduError>(),
            Some(DaduError::MissingCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Halo bestie!"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = ChatCompletionsProvider::new(config_for(&server)).unwrap();
        let response = provider
            .complete(&[Message::system("sys"), Message::user("halo")])
            .await
            .unwrap();

        assert_eq!(response.content, "Halo bestie!");
        assert_eq!(response.usage.unwrap().total_tokens, 16);

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["stream"], false);
        assert_eq!(
            body["messages"],
            serde_json::json!([
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "halo"}
            ])
        );
    }

    #[tokio::test]
    async fn test_complete_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let provider = ChatCompletionsProvider::new(config_for(&server)).unwrap();
        let err = provider.complete(&[Message::user("halo")]).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_complete_error_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": {"message": "Invalid API Key"}
            })))
            .mount(&server)
            .await;

        let provider = ChatCompletionsProvider::new(config_for(&server)).unwrap();
        let err = provider.complete(&[Message::user("halo")]).await.unwrap_err();
        assert!(err.to_string().contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn test_complete_without_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let provider = ChatCompletionsProvider::new(config_for(&server)).unwrap();
        assert!(provider.complete(&[Message::user("halo")]).await.is_err());
    }
}
