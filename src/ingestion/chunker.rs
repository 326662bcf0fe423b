//! Fixed-size text chunking with overlap

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::Chunk;

/// Text chunker with configurable size and overlap
///
/// Chunks are fixed-size character windows that advance by
/// `chunk_size - overlap`, so consecutive chunks share `overlap`
/// characters. The window that reaches the end of the text is the final
/// chunk and may be shorter than `chunk_size`. Output is deterministic for
/// identical input and parameters.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker, enforcing `0 < overlap < chunk_size`
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if config.chunk_overlap == 0 || config.chunk_overlap >= config.chunk_size {
            return Err(Error::config(format!(
                "chunk_overlap must satisfy 0 < overlap < chunk_size (got overlap {} for chunk_size {})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        Ok(Self {
            chunk_size: config.chunk_size,
            overlap: config.chunk_overlap,
        })
    }

    /// Split text into overlapping chunks owned by `fingerprint`
    ///
    /// Every character of the input is covered by at least one chunk. Empty
    /// input yields an empty sequence; input shorter than the chunk size
    /// yields a single chunk spanning the whole text. Offsets are character
    /// offsets, and slicing is UTF-8 boundary safe.
    pub fn chunk(&self, text: &str, fingerprint: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character boundary, including the end of text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let total_chars = boundaries.len() - 1;

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut index = 0u32;

        loop {
            let end = (start + self.chunk_size).min(total_chars);
            let content = &text[boundaries[start]..boundaries[end]];
            chunks.push(Chunk::new(
                index,
                content.to_string(),
                start,
                end,
                fingerprint.to_string(),
            ));

            if end == total_chars {
                break;
            }
            start += step;
            index += 1;
        }

        chunks
    }
}
