//! Ollama-backed answer generator

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::ollama::OllamaClient;

use super::prompt::PromptBuilder;
use super::LlmProvider;

/// Generation provider backed by an Ollama server
pub struct OllamaGenerator {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaGenerator {
    /// Create a generator sharing an existing client
    pub fn new(client: Arc<OllamaClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.generate_model.clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaGenerator {
    async fn generate(&self, question: &str, context: &str) -> Result<String> {
        let prompt = PromptBuilder::build_prompt(question, context);
        tracing::info!("Generating answer with model: {}", self.model);
        self.client.generate(&self.model, &prompt).await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
