//! Configuration management for Dadu
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{DaduError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Dadu
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat completion service settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Dice roll timing
    #[serde(default)]
    pub roll: RollConfig,
    /// Chat history and rendering settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Chat completion service configuration
///
/// Any OpenAI-compatible `/chat/completions` endpoint works. Leaving
/// `api_key` unset keeps the assistant fully offline: every question is
/// answered from the built-in fallback replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Full URL of the chat completions endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the endpoint
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens in a generated reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Optional client-side request timeout; unset means no timeout
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_max_tokens() -> u32 {
    200
}

fn default_temperature() -> f32 {
    0.9
}

fn default_top_p() -> f32 {
    0.95
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_seconds: None,
        }
    }
}

impl ProviderConfig {
    /// Returns the API key if one is set and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Dice roll animation timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollConfig {
    /// Milliseconds between animation ticks
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Number of ticks before the final draw
    #[serde(default = "default_tick_count")]
    pub tick_count: u32,

    /// Delay between the final draw and the commit
    #[serde(default = "default_commit_delay_ms")]
    pub commit_delay_ms: u64,
}

fn default_tick_interval_ms() -> u64 {
    150
}

fn default_tick_count() -> u32 {
    11
}

fn default_commit_delay_ms() -> u64 {
    200
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            tick_count: default_tick_count(),
            commit_delay_ms: default_commit_delay_ms(),
        }
    }
}

/// Chat history and rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Number of most recent entries sent with each request
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Maximum entries kept per session
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Per-character delay for the typing effect (0 disables it)
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Directory chat exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_history_window() -> usize {
    8
}

fn default_max_entries() -> usize {
    24
}

fn default_typing_delay_ms() -> u64 {
    50
}

fn default_export_dir() -> String {
    ".".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            max_entries: default_max_entries(),
            typing_delay_ms: default_typing_delay_ms(),
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DaduError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| DaduError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_url) = std::env::var("DADU_API_URL") {
            self.provider.api_url = api_url;
        }

        if let Ok(api_key) = std::env::var("DADU_API_KEY").or_else(|_| std::env::var("GROQ_API_KEY")) {
            self.provider.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("DADU_MODEL") {
            self.provider.model = model;
        }

        if let Ok(max_tokens) = std::env::var("DADU_MAX_TOKENS") {
            if let Ok(value) = max_tokens.parse() {
                self.provider.max_tokens = value;
            } else {
                tracing::warn!("Invalid DADU_MAX_TOKENS: {}", max_tokens);
            }
        }

        if let Ok(temperature) = std::env::var("DADU_TEMPERATURE") {
            if let Ok(value) = temperature.parse() {
                self.provider.temperature = value;
            } else {
                tracing::warn!("Invalid DADU_TEMPERATURE: {}", temperature);
            }
        }

        if let Ok(delay) = std::env::var("DADU_TYPING_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.chat.typing_delay_ms = value;
            } else {
                tracing::warn!("Invalid DADU_TYPING_DELAY_MS: {}", delay);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = &cli.model {
            tracing::debug!("Model overridden from command line: {}", model);
            self.provider.model = model.clone();
        }

        if let Some(api_url) = &cli.api_url {
            tracing::debug!("API URL overridden from command line: {}", api_url);
            self.provider.api_url = api_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_url.trim().is_empty() {
            return Err(DaduError::Config("provider.api_url cannot be empty".to_string()).into());
        }

        if self.provider.max_tokens == 0 {
            return Err(
                DaduError::Config("provider.max_tokens must be greater than 0".to_string()).into(),
            );
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(DaduError::Config(
                "provider.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if self.provider.top_p <= 0.0 || self.provider.top_p > 1.0 {
            return Err(
                DaduError::Config("provider.top_p must be in (0.0, 1.0]".to_string()).into(),
            );
        }

        if self.roll.tick_count == 0 {
            return Err(
                DaduError::Config("roll.tick_count must be greater than 0".to_string()).into(),
            );
        }

        if self.roll.tick_interval_ms == 0 {
            return Err(DaduError::Config(
                "roll.tick_interval_ms must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.max_entries == 0 {
            return Err(
                DaduError::Config("chat.max_entries must be greater than 0".to_string()).into(),
            );
        }

        if self.chat.history_window == 0 || self.chat.history_window > self.chat.max_entries {
            return Err(DaduError::Config(
                "chat.history_window must be between 1 and chat.max_entries".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
