//! OpenAI Chat Completions client.
//!
//! Talks to `https://api.openai.com/v1` or any OpenAI-compatible endpoint.
//! Every call is a single non-streaming exchange bounded by the configured
//! timeout.  Failures are returned as-is; there is no retry layer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};

use crate::error::{RelayError, Result};
use crate::llm::types::CompletionRequest;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Upper bound on a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// How much of an upstream error body is kept for diagnostics.
pub const ERROR_EXCERPT_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// Client configuration
// ---------------------------------------------------------------------------

/// Configuration for the upstream completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    /// API key for bearer authentication.
    pub api_key: String,
    /// Base URL for the API (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// Default model identifier.
    pub default_model: String,
    /// Bound on the whole request, connect through body.
    pub timeout: Duration,
}

impl LlmClientConfig {
    /// Create a configuration for the OpenAI API.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::openai_compatible(api_key, model, OPENAI_BASE_URL)
    }

    /// Create a configuration for any OpenAI-compatible API.
    pub fn openai_compatible(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            default_model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the upstream Chat Completions endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: Arc<LlmClientConfig>,
    http: reqwest::Client,
}

impl LlmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LlmClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(RelayError::MissingApiKey {
                variable: "OPENAI_API_KEY",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Send one completion request and return the assistant message text.
    ///
    /// A non-success status yields [`RelayError::UpstreamStatus`] carrying
    /// an excerpt of the body; the caller decides whether to surface it.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = self.build_request_body(request);
        let started = Instant::now();
        let resp = self.send_request(&body, request.label).await?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| self.transport_error(e, request.label))?;

        tracing::debug!(
            call = request.label,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream responded"
        );

        if !status.is_success() {
            tracing::warn!(
                call = request.label,
                status = status.as_u16(),
                "upstream returned an error status"
            );
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
                excerpt: Some(excerpt(&text, ERROR_EXCERPT_CHARS)),
            });
        }

        let v: Value = serde_json::from_str(&text).map_err(|e| RelayError::MalformedPayload {
            context: request.label,
            reason: format!("invalid JSON response: {e}"),
        })?;

        message_content(&v, request.label)
    }

    // -- request building ----------------------------------------------------

    /// Build the JSON body for the Chat Completions API.
    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        let mut body = json!({
            "model": self.config.default_model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        if let Some(format) = &request.response_format {
            body["response_format"] = format.clone();
        }

        body
    }

    /// Send the HTTP request to the `/chat/completions` endpoint.
    async fn send_request(&self, body: &Value, label: &'static str) -> Result<reqwest::Response> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.config.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| RelayError::Config {
                reason: format!("invalid authorization header: {e}"),
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(url = %url, model = %body["model"], call = label, "sending completion request");

        self.http
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e, label))
    }

    fn transport_error(&self, err: reqwest::Error, label: &'static str) -> RelayError {
        if err.is_timeout() {
            tracing::warn!(call = label, timeout = ?self.config.timeout, "upstream request timed out");
            RelayError::UpstreamTimeout {
                timeout: self.config.timeout,
            }
        } else {
            tracing::warn!(call = label, error = %err, "upstream request failed");
            RelayError::from(err)
        }
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Extract `choices[0].message.content` from a Chat Completions response.
pub fn message_content(v: &Value, label: &'static str) -> Result<String> {
    v["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| RelayError::MalformedPayload {
            context: label,
            reason: "missing `choices[0].message.content` in response".into(),
        })
}

/// The first `max_chars` characters of `text`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::{CallProfile, Message};
    use crate::prompt::Prompt;

    fn client() -> LlmClient {
        LlmClient::new(LlmClientConfig::openai("sk-test", "gpt-4o-mini")).unwrap()
    }

    fn request(profile: CallProfile) -> CompletionRequest {
        CompletionRequest::from_prompt(
            Prompt {
                system: "be brief".into(),
                user: "hello".into(),
            },
            profile,
        )
    }

    #[test]
    fn openai_config_construction() {
        let config = LlmClientConfig::openai("sk-test-key", "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.default_model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn openai_compatible_config_construction() {
        let config =
            LlmClientConfig::openai_compatible("local-key", "llama3", "http://localhost:11434/v1")
                .with_timeout(Duration::from_millis(250));
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn empty_api_key_returns_error() {
        let err = LlmClient::new(LlmClientConfig::openai("  ", "gpt-4o-mini")).unwrap_err();
        assert!(matches!(err, RelayError::MissingApiKey { .. }));
    }

    #[test]
    fn quiz_body_carries_schema_and_profile() {
        let body = client().build_request_body(&request(CallProfile::QUIZ));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be brief");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
    }

    #[test]
    fn chat_body_has_no_response_format() {
        let body = client().build_request_body(&request(CallProfile::CHAT));
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["temperature"], 0.8);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn body_uses_configured_model() {
        let llm = LlmClient::new(LlmClientConfig::openai("sk-test", "gpt-4o")).unwrap();
        let mut req = request(CallProfile::CHAT);
        req.messages.push(Message::user("again"));
        let body = llm.build_request_body(&req);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn message_content_extraction() {
        let v = json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "{\"a\":1}" },
                "finish_reason": "stop"
            }]
        });
        assert_eq!(message_content(&v, "Quiz").unwrap(), "{\"a\":1}");

        let err = message_content(&json!({"choices": []}), "Quiz").unwrap_err();
        assert!(err.to_string().starts_with("Quiz parse error"));
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("héllo", 2), "hé");
        assert_eq!(excerpt("short", 300), "short");
        assert_eq!(excerpt(&"x".repeat(1000), ERROR_EXCERPT_CHARS).len(), 300);
    }
}
