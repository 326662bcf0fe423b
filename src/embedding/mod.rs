//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

pub mod ollama;

pub use ollama::OllamaEmbedder;

/// Trait for mapping text to fixed-dimension vectors
///
/// For a fixed provider configuration, identical text must produce
/// numerically equivalent vectors; change detection and test fixtures rely
/// on this. Empty input is an error, never a silent zero vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, order-preserving and
    /// index-aligned with the input
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Embedding dimension, constant for the provider's lifetime
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
