use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Recommender, RecommendationError, SYSTEM_PROMPT, build_prompt};

const OLLAMA_API_BASE: &str = "http://localhost:11434";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(timeout: Duration) -> Result<Self, RecommendationError> {
        Self::with_base_url(OLLAMA_API_BASE.to_string(), timeout)
    }

    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, RecommendationError> {
        let client = reqwest::Client::builder()
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

    pub async fn generate(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, RecommendationError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model,
            system,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            return Err(RecommendationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse =
            response.json().await.map_err(|e| RecommendationError::Api {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })?;

        if body.response.trim().is_empty() {
            return Err(RecommendationError::EmptyResponse);
        }

        Ok(body.response)
    }
}

#[async_trait]
impl Recommender for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn recommend(
        &self,
        resource_type: &str,
        unused: &[String],
        model: &str,
    ) -> Result<String, RecommendationError> {
        let prompt = build_prompt(resource_type, unused);

        tracing::debug!(
            resource_type,
            model,
            attributes = unused.len(),
            "requesting Ollama recommendations"
        );

        self.generate(model, SYSTEM_PROMPT, &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::DEFAULT_TIMEOUT;

    #[test]
    fn test_default_base_url() {
        let client = OllamaClient::new(DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.api_base(), "http://localhost:11434");
    }

    #[test]
    fn test_generate_request_disables_streaming() {
        let request = GenerateRequest {
            model: "llama3.1",
            system: "sys",
            prompt: "hi",
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["model"], "llama3.1");
    }

    #[test]
    fn test_generate_response_ignores_extra_fields() {
        let json = r#"{ "model": "llama3.1", "response": "  size = 10\n", "done": true }"#;
        let body: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.response, "  size = 10\n");
    }
}
