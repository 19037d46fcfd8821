pub mod ollama;
pub mod openai;

mod error;

pub use error::RecommendationError;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

use std::time::Duration;

use async_trait::async_trait;

pub const DEFAULT_BACKEND: &str = "ollama";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub const SYSTEM_PROMPT: &str = "You are a Terraform expert reviewing resource configurations. \
Answer only with HCL attribute assignments. Do not use markdown or code fences.";

/// External capability that turns unused attribute names into guidance text.
#[async_trait]
pub trait Recommender: Send + Sync {
    fn name(&self) -> &str;

    async fn recommend(
        &self,
        resource_type: &str,
        unused: &[String],
        model: &str,
    ) -> Result<String, RecommendationError>;
}

#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub fn get_recommender(
    backend: &str,
    config: &RecommenderConfig,
) -> Result<Box<dyn Recommender>, RecommendationError> {
    match backend {
        "ollama" => {
            let client = match &config.endpoint {
                Some(url) => OllamaClient::with_base_url(url.clone(), config.timeout)?,
                None => OllamaClient::new(config.timeout)?,
            };
            Ok(Box::new(client))
        }
        "openai" => {
            let api_key = config.api_key.clone().ok_or_else(|| RecommendationError::Auth {
                message: "No API key provided. Set OPENAI_API_KEY or use --api-key flag"
                    .to_string(),
            })?;
            let client = match &config.endpoint {
                Some(url) => OpenAiClient::with_base_url(api_key, url.clone(), config.timeout)?,
                None => OpenAiClient::new(api_key, config.timeout)?,
            };
            Ok(Box::new(client))
        }
        other => Err(RecommendationError::UnknownBackend(other.to_string())),
    }
}

/// Builds the user prompt listing every unused attribute of a resource type.
pub fn build_prompt(resource_type: &str, unused: &[String]) -> String {
    let attributes = unused
        .iter()
        .map(|attr| format!("- {}", attr))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "The Terraform resource type \"{resource_type}\" supports these attributes that are not set:\n\
         {attributes}\n\n\
         For each attribute worth enabling, write one line indented by two spaces in the form \
         `name = value  # what enabling it does`. Use realistic values and keep each description short."
    )
}
