mod client;
mod types;

pub use client::OpenAiClient;

use async_trait::async_trait;

use super::{Recommender, RecommendationError, SYSTEM_PROMPT, build_prompt};

#[async_trait]
impl Recommender for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
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
            "requesting OpenAI recommendations"
        );

        self.chat_completion(model, SYSTEM_PROMPT, &prompt).await
    }
}
