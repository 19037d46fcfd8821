use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::types::{ChatMessage, ChatRequest, ChatResponse, DEFAULT_TEMPERATURE, ErrorEnvelope};
use crate::oracle::RecommendationError;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Client for OpenAI-compatible chat completion APIs.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, RecommendationError> {
        Self::with_base_url(api_key, OPENAI_API_BASE.to_string(), timeout)
    }

    /// NOTE: Also used for self-hosted compatible servers and mock servers.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, RecommendationError> {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
            RecommendationError::Auth {
                message: "Invalid API key format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(RecommendationError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    pub async fn chat_completion(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, RecommendationError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: DEFAULT_TEMPERATURE,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            if status == StatusCode::UNAUTHORIZED {
                return Err(RecommendationError::Auth { message });
            }

            return Err(RecommendationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| RecommendationError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse response: {}", e),
        })?;

        body.into_content()
            .ok_or(RecommendationError::EmptyResponse)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::DEFAULT_TIMEOUT;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("sk-test".to_string(), DEFAULT_TIMEOUT);
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_api_key_format() {
        let result = OpenAiClient::new("sk-bad\nkey".to_string(), DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(RecommendationError::Auth { .. })));
    }

    #[test]
    fn test_debug_does_not_expose_api_key() {
        let client = OpenAiClient::new("sk-super-secret-12345".to_string(), DEFAULT_TIMEOUT)
            .unwrap();
        let debug_output = format!("{:?}", client);

        assert!(debug_output.contains("[REDACTED]"));
        assert!(
            !debug_output.contains("sk-super-secret-12345"),
            "Debug output must NOT contain the actual API key"
        );
    }

    #[test]
    fn test_api_base_url() {
        let client = OpenAiClient::new("sk-test".to_string(), DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.api_base(), "https://api.openai.com/v1");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenAiClient::with_base_url(
            "sk-test".to_string(),
            "http://localhost:8080/v1/".to_string(),
            DEFAULT_TIMEOUT,
        )
        .unwrap();
        assert_eq!(client.api_base(), "http://localhost:8080/v1");
    }
}
