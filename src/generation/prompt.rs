//! Prompt templates for grounded answering

use crate::index::ScoredChunk;

/// Prompt builder for document-grounded answers
pub struct PromptBuilder;

impl PromptBuilder {
    /// Assemble retrieved chunks into a numbered context payload, in
    /// similarity order
    pub fn build_context(results: &[ScoredChunk]) -> String {
        let mut context = String::new();

        for (i, result) in results.iter().enumerate() {
            context.push_str(&format!(
                "[{}] (chunk {}, offset {})\n{}\n\n",
                i + 1,
                result.chunk.index,
                result.chunk.char_start,
                result.chunk.text
            ));
        }

        context
    }

    /// Build the grounding prompt for the generation collaborator
    pub fn build_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are an assistant that answers ONLY with information from the context below.
If the answer is not in the context, say: "The answer is not found in the document."
Do not use external knowledge and do not guess.

CONTEXT:
{context}

QUESTION:
{question}

Answer:"#,
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    fn scored(index: u32, text: &str, similarity: f32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk::new(index, text.to_string(), 0, text.len(), "fp".to_string()),
            similarity,
        }
    }

    #[test]
    fn context_numbers_chunks_in_given_order() {
        let results = vec![scored(2, "second chunk", 0.9), scored(0, "first chunk", 0.7)];
        let context = PromptBuilder::build_context(&results);

        assert!(context.starts_with("[1] (chunk 2, offset 0)\nsecond chunk"));
        assert!(context.contains("[2] (chunk 0, offset 0)\nfirst chunk"));
    }

    #[test]
    fn prompt_embeds_question_and_context() {
        let prompt = PromptBuilder::build_prompt("why?", "some context");
        assert!(prompt.contains("QUESTION:\nwhy?"));
        assert!(prompt.contains("CONTEXT:\nsome context"));
        assert!(prompt.contains("not found in the document"));
    }
}
