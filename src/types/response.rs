//! Response types returned to the UI collaborator

use serde::{Deserialize, Serialize};

use crate::index::ScoredChunk;

/// A retrieved context chunk, exposed so the caller can render the
/// evidence behind an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextChunk {
    /// Chunk index within the document
    pub index: u32,
    /// Character offset where the chunk starts in the extracted text
    pub char_start: usize,
    /// Chunk length in characters
    pub length: usize,
    /// Exact chunk text
    pub text: String,
    /// Similarity to the question (0.0-1.0, higher is more similar)
    pub similarity: f32,
}

impl From<&ScoredChunk> for ContextChunk {
    fn from(scored: &ScoredChunk) -> Self {
        Self {
            index: scored.chunk.index,
            char_start: scored.chunk.char_start,
            length: scored.chunk.char_end - scored.chunk.char_start,
            text: scored.chunk.text.clone(),
            similarity: scored.similarity,
        }
    }
}

/// Answer to a question, with the context it was grounded in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Generated answer
    pub answer: String,
    /// Context chunks handed to the generator, in similarity order
    pub context: Vec<ContextChunk>,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl AskResponse {
    /// Response when retrieval produced no context at all
    pub fn no_context(processing_time_ms: u64) -> Self {
        Self {
            answer: "No indexed content was available to answer this question.".to_string(),
            context: Vec::new(),
            processing_time_ms,
        }
    }
}
