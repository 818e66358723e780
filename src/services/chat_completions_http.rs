//! OpenAI-compatible chat completions client using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, ModelConfig};
use crate::ports::LanguageModel;

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["DECKGEN_API_KEY", "OPENAI_API_KEY"];

/// HTTP client for a chat completions endpoint.
///
/// Every call is a single request; failures are reported, never resent.
#[derive(Clone)]
pub struct HttpChatClient {
    api_key: Option<String>,
    api_url: Url,
    model: String,
    temperature: f32,
    client: Client,
}

impl std::fmt::Debug for HttpChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpChatClient {
    /// Create a new HTTP client with an optional API key and the given configuration.
    pub fn new(api_key: Option<String>, config: &ModelConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            client,
        })
    }

    /// Create with the API key taken from the environment, if any.
    ///
    /// Local servers usually need no key, so a missing variable is not an error.
    pub fn from_env_with_config(config: &ModelConfig) -> Result<Self, AppError> {
        Self::new(api_key_from_env(), config)
    }
}

fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl LanguageModel for HttpChatClient {
    fn invoke(&self, prompt: &str) -> Result<String, AppError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };

        let mut builder = self
            .client
            .post(self.api_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .map_err(|e| AppError::ModelInvocation(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ModelInvocation(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .map_err(|e| AppError::ModelInvocation(format!("Failed to parse response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::ModelInvocation("No message content in response".into()))
    }
}
