//! Answer generation behind the LLM provider boundary

use async_trait::async_trait;

use crate::error::Result;

pub mod ollama;
pub mod prompt;

pub use ollama::OllamaGenerator;
pub use prompt::PromptBuilder;

/// Trait for the external generation collaborator
///
/// Takes a question and the assembled context and returns the answer text.
/// The prompt handed over instructs the model to answer strictly from the
/// supplied context.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate an answer grounded in `context`
    async fn generate(&self, question: &str, context: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;
}
