//! # Greeting Service
//!
//! Fetches a short, warm message to show right after a check-in.
//!
//! The greeting is decoration only. It is requested after the check-in has
//! been saved, never stored, and never allowed to fail: any provider error,
//! a missing API key or a slow response turns into a fixed fallback line.

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::GreetingConfig;

/// Shown when the provider fails, times out or is not configured
pub const FAILURE_FALLBACK: &str =
    "Remember to be kind to yourself today. Being safe and well is the greatest happiness.";

/// Shown when the provider answers with nothing
pub const EMPTY_FALLBACK: &str = "Seeing you safe and well truly makes me happy.";

/// How long the greeting stays on screen; later answers are dropped
pub const DISPLAY_WINDOW: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum GreetingError {
    #[error("greeting request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("greeting provider returned HTTP {0}")]
    Status(u16),
}

/// Source of greeting text
#[async_trait]
pub trait GreetingProvider: Send + Sync {
    /// Produce a greeting for `nickname`. An empty string is a valid answer.
    async fn generate(&self, nickname: &str) -> Result<String, GreetingError>;
}

/// Prompt sent to the text model
pub fn build_prompt(nickname: &str) -> String {
    let nickname = nickname.trim();
    let nickname = if nickname.is_empty() { "friend" } else { nickname };
    format!(
        "You are a warm, caring companion. The user just pressed the \"I'm still here\" \
         check-in button. Write one short, positive, comforting daily greeting for {}. \
         Keep it under 20 words, warm in tone, giving strength or comfort, \
         with nothing that could read as negative.",
        nickname
    )
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate; empty when there is none
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Greeting provider backed by the Gemini `generateContent` endpoint
pub struct GeminiGreetingProvider {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGreetingProvider {
    pub fn new(config: &GreetingConfig, api_key: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("still-here/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a provider when the config carries an API key
    pub fn from_config(config: &GreetingConfig) -> Option<Self> {
        config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Self::new(config, key))
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GreetingProvider for GeminiGreetingProvider {
    async fn generate(&self, nickname: &str) -> Result<String, GreetingError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(nickname),
                }],
            }],
        };

        debug!("Requesting greeting from {}", self.endpoint());
        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GreetingError::Status(status.as_u16()));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}

/// Wraps an optional provider so callers always get a line to show
#[derive(Clone)]
pub struct GreetingService {
    provider: Option<Arc<dyn GreetingProvider>>,
    display_window: Duration,
}

impl GreetingService {
    pub fn new(provider: Option<Arc<dyn GreetingProvider>>) -> Self {
        Self {
            provider,
            display_window: DISPLAY_WINDOW,
        }
    }

    /// Build from config; without an API key every greeting is the fallback
    pub fn from_config(config: &GreetingConfig) -> Self {
        let provider = GeminiGreetingProvider::from_config(config)
            .map(|provider| Arc::new(provider) as Arc<dyn GreetingProvider>);
        if provider.is_none() {
            debug!("No greeting API key configured, using fallback greetings");
        }
        Self::new(provider)
    }

    pub fn with_display_window(mut self, display_window: Duration) -> Self {
        self.display_window = display_window;
        self
    }

    /// Get a greeting for `nickname`. Never fails.
    pub async fn generate_greeting(&self, nickname: &str) -> String {
        let Some(provider) = self.provider.as_ref() else {
            return FAILURE_FALLBACK.to_string();
        };

        match tokio::time::timeout(self.display_window, provider.generate(nickname)).await {
            Ok(Ok(text)) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
            Ok(Ok(text)) => text.trim().to_string(),
            Ok(Err(e)) => {
                warn!("Greeting provider failed: {}", e);
                FAILURE_FALLBACK.to_string()
            }
            Err(_) => {
                warn!("Greeting took longer than {:?}, dropping it", self.display_window);
                FAILURE_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(&'static str);

    #[async_trait]
    impl GreetingProvider for FixedProvider {
        async fn generate(&self, _nickname: &str) -> Result<String, GreetingError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl GreetingProvider for FailingProvider {
        async fn generate(&self, _nickname: &str) -> Result<String, GreetingError> {
            Err(GreetingError::Status(429))
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl GreetingProvider for SlowProvider {
        async fn generate(&self, _nickname: &str) -> Result<String, GreetingError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok("too late".to_string())
        }
    }

    fn service(provider: impl GreetingProvider + 'static) -> GreetingService {
        GreetingService::new(Some(Arc::new(provider)))
    }

    #[tokio::test]
    async fn test_provider_text_is_used() {
        let greeting = service(FixedProvider("  Glad you're here, Ann. ")).generate_greeting("Ann").await;
        assert_eq!(greeting, "Glad you're here, Ann.");
    }

    #[tokio::test]
    async fn test_empty_answer_uses_empty_fallback() {
        let greeting = service(FixedProvider("   ")).generate_greeting("Ann").await;
        assert_eq!(greeting, EMPTY_FALLBACK);
    }

    #[tokio::test]
    async fn test_failure_uses_failure_fallback() {
        let greeting = service(FailingProvider).generate_greeting("Ann").await;
        assert_eq!(greeting, FAILURE_FALLBACK);
    }

    #[tokio::test]
    async fn test_missing_provider_uses_failure_fallback() {
        let greeting = GreetingService::new(None).generate_greeting("Ann").await;
        assert_eq!(greeting, FAILURE_FALLBACK);
    }

    #[tokio::test]
    async fn test_slow_provider_is_dropped() {
        let greeting = service(SlowProvider)
            .with_display_window(Duration::from_millis(50))
            .generate_greeting("Ann")
            .await;
        assert_eq!(greeting, FAILURE_FALLBACK);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let config = GreetingConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..GreetingConfig::default()
        };
        let greeting = GreetingService::from_config(&config).generate_greeting("Ann").await;
        assert_eq!(greeting, FAILURE_FALLBACK);
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = GreetingConfig::default();
        config.api_key = None;
        assert!(GeminiGreetingProvider::from_config(&config).is_none());

        config.api_key = Some("  ".to_string());
        assert!(GeminiGreetingProvider::from_config(&config).is_none());

        config.api_key = Some("abc".to_string());
        config.base_url = "https://example.com/".to_string();
        config.model = "some-model".to_string();
        let provider = GeminiGreetingProvider::from_config(&config).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://example.com/v1beta/models/some-model:generateContent"
        );
    }

    #[test]
    fn test_prompt_names_the_user() {
        assert!(build_prompt("Ann").contains("for Ann."));
        assert!(build_prompt("  ").contains("for friend."));
    }

    #[test]
    fn test_response_text_extraction() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Stay "},{"text":"warm."}]}},
                              {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text(), "Stay warm.");

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");

        let no_content: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(no_content.text(), "");
    }
}
