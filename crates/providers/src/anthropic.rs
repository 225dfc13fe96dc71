//! Anthropic native Messages API client.
//!
//! One blocking round trip per call with fixed parameters: the configured
//! model, a token ceiling, and a sampling temperature. Transport and provider
//! failures surface as `ProviderError` variants; the caller decides what to do
//! with them (the service layer converts them into a fallback response).

use briefclaw_core::error::ProviderError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// The round trip has no retries; the only bound on its duration is this
/// client-side timeout.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Anthropic native Messages API client.
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Create a new client with fixed generation parameters.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The model this client generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt with the fixed system instruction and return the raw
    /// assistant text.
    pub async fn generate(
        &self,
        prompt: &str,
        system: &str,
    ) -> std::result::Result<String, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);

        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system.to_string(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(format!(
                        "Generation timed out after {REQUEST_TIMEOUT_SECS}s"
                    ))
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: MessagesResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Anthropic response: {e}"),
            })?;

        Ok(api_resp.text())
    }
}

// --- Anthropic API types ---

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContentBlock>,
}

impl MessagesResponse {
    /// Concatenate the text blocks of the reply.
    fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.content {
            if let ResponseContentBlock::Text { text } = block {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(text);
            }
        }
        out
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let client = AnthropicClient::new("sk-ant-test", "claude-3-sonnet-20241022", 2000, 0.7);
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model(), "claude-3-sonnet-20241022");
        assert_eq!(client.max_tokens, 2000);
    }

    #[test]
    fn constructor_with_base_url() {
        let client = AnthropicClient::new("sk-ant-test", "m", 100, 0.5)
            .with_base_url("https://custom.proxy.com/");
        assert_eq!(client.base_url, "https://custom.proxy.com");
    }

    #[test]
    fn request_serializes_fixed_parameters() {
        let body = MessagesRequest {
            model: "claude-3-sonnet-20241022".into(),
            max_tokens: 2000,
            temperature: 0.7,
            system: "You are a campaign manager".into(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "CAMPAIGN BRIEF".into(),
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["max_tokens"], 2000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["system"], "You are a campaign manager");
    }

    #[test]
    fn parse_text_response() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "{\"strategy_summary\": \"...\"}"}]}"#,
        )
        .unwrap();
        assert!(resp.text().contains("strategy_summary"));
    }

    #[test]
    fn parse_joins_multiple_text_blocks() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "text", "text": "part one"},
                {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                {"type": "text", "text": "part two"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.text(), "part one\npart two");
    }
}
