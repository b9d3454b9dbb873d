use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use dadu::chat::{SessionCache, VenueAssistant};
use dadu::config::ProviderConfig;
use dadu::providers::create_provider;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Provider config pointing at the mock server
#[allow(dead_code)]
pub fn provider_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        api_url: format!("{}/openai/v1/chat/completions", server.uri()),
        api_key: Some("gsk_test".to_string()),
        ..ProviderConfig::default()
    }
}

/// Assistant talking to the mock server with the default window of 8
#[allow(dead_code)]
pub fn assistant_for(server: &MockServer) -> VenueAssistant {
    let provider = create_provider(&provider_config(server)).expect("provider should build");
    VenueAssistant::new(Some(provider), SessionCache::default(), 8)
}

/// Mounts a mock answering every POST with the given completion text
#[allow(dead_code)]
pub async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })))
        .mount(server)
        .await;
}

/// Bodies of every request the mock server received
#[allow(dead_code)]
pub async fn request_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
        .collect()
}
