//! In-memory vector index for the active document's chunks
//!
//! The collection holds at most one document's chunks at a time. Ingestion
//! replaces the whole collection through `replace_all`, a single swap under
//! the write lock, so a concurrent reader can never observe a partially
//! cleared or partially populated index.

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::types::Chunk;

/// A chunk returned from a similarity query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query vector (higher is more similar)
    pub similarity: f32,
}

struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// Exact-scan vector index over (chunk, embedding) pairs
pub struct VectorIndex {
    /// Fixed embedding dimension for the lifetime of the index
    dimensions: usize,
    entries: RwLock<Vec<IndexEntry>>,
}

impl VectorIndex {
    /// Create an empty index for vectors of the given dimension
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Embedding dimension this index was created with
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Insert a chunk with its embedding, replacing any entry that carries
    /// the same chunk index
    pub fn upsert(&self, chunk: Chunk, vector: Vec<f32>) -> Result<()> {
        self.check_dimension(&vector)?;

        let mut entries = self.entries.write();
        match entries.iter_mut().find(|e| e.chunk.index == chunk.index) {
            Some(entry) => *entry = IndexEntry { chunk, vector },
            None => entries.push(IndexEntry { chunk, vector }),
        }
        Ok(())
    }

    /// Replace the entire collection in one atomic swap
    ///
    /// All vectors are dimension-checked before anything is touched, so a
    /// failure leaves the previous contents intact.
    pub fn replace_all(&self, items: Vec<(Chunk, Vec<f32>)>) -> Result<()> {
        for (_, vector) in &items {
            self.check_dimension(vector)?;
        }

        let new_entries: Vec<IndexEntry> = items
            .into_iter()
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();

        *self.entries.write() = new_entries;
        Ok(())
    }

    /// Remove all entries; idempotent
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of stored chunks
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Query the `top_k` most similar chunks
    ///
    /// Results are sorted by descending similarity, ties broken by
    /// ascending chunk index. `top_k` is clamped to the number of stored
    /// chunks; an empty index yields an empty result.
    pub fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>> {
        self.check_dimension(vector)?;

        let entries = self.entries.read();
        let mut results: Vec<ScoredChunk> = entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                similarity: cosine_similarity(vector, &entry.vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.chunk.index.cmp(&b.chunk.index))
        });
        results.truncate(top_k);

        Ok(results)
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::index(format!(
                "vector dimension mismatch: index holds {}-dimensional vectors, got {}",
                self.dimensions,
                vector.len()
            )));
        }
        Ok(())
    }
}

/// Cosine similarity between two equal-length vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: u32, text: &str) -> Chunk {
        Chunk::new(index, text.to_string(), 0, text.chars().count(), "fp".to_string())
    }

    #[test]
    fn query_orders_by_descending_similarity() {
        let index = VectorIndex::new(2);
        index.upsert(chunk(0, "north"), vec![0.0, 1.0]).unwrap();
        index.upsert(chunk(1, "east"), vec![1.0, 0.0]).unwrap();
        index.upsert(chunk(2, "northeast"), vec![1.0, 1.0]).unwrap();

        let results = index.query(&[0.0, 1.0], 3).unwrap();
        assert_eq!(results[0].chunk.index, 0);
        assert_eq!(results[1].chunk.index, 2);
        assert_eq!(results[2].chunk.index, 1);
        assert!(results[0].similarity > results[1].similarity);
    }

    #[test]
    fn ties_break_by_ascending_chunk_index() {
        let index = VectorIndex::new(2);
        index.upsert(chunk(3, "later"), vec![1.0, 0.0]).unwrap();
        index.upsert(chunk(1, "earlier"), vec![1.0, 0.0]).unwrap();

        let results = index.query(&[1.0, 0.0], 2).unwrap();
        assert_eq!(results[0].chunk.index, 1);
        assert_eq!(results[1].chunk.index, 3);
    }

    #[test]
    fn top_k_is_clamped_to_stored_count() {
        let index = VectorIndex::new(2);
        index.upsert(chunk(0, "a"), vec![1.0, 0.0]).unwrap();
        index.upsert(chunk(1, "b"), vec![0.0, 1.0]).unwrap();

        let results = index.query(&[1.0, 0.0], 4).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn empty_index_returns_empty_results() {
        let index = VectorIndex::new(2);
        assert!(index.query(&[1.0, 0.0], 4).unwrap().is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let index = VectorIndex::new(2);
        index.upsert(chunk(0, "a"), vec![1.0, 0.0]).unwrap();
        index.clear();
        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let index = VectorIndex::new(3);
        let err = index.upsert(chunk(0, "a"), vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::Index(_)));

        let err = index.query(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[test]
    fn replace_all_swaps_the_whole_collection() {
        let index = VectorIndex::new(2);
        index.upsert(chunk(0, "old"), vec![1.0, 0.0]).unwrap();

        index
            .replace_all(vec![
                (chunk(0, "new a"), vec![0.0, 1.0]),
                (chunk(1, "new b"), vec![1.0, 0.0]),
            ])
            .unwrap();

        let results = index.query(&[0.0, 1.0], 10).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.chunk.text.starts_with("new")));
    }

    #[test]
    fn failed_replace_leaves_previous_contents_intact() {
        let index = VectorIndex::new(2);
        index.upsert(chunk(0, "kept"), vec![1.0, 0.0]).unwrap();

        let err = index
            .replace_all(vec![(chunk(0, "bad"), vec![1.0, 0.0, 0.0])])
            .unwrap_err();
        assert!(matches!(err, Error::Index(_)));

        let results = index.query(&[1.0, 0.0], 1).unwrap();
        assert_eq!(results[0].chunk.text, "kept");
    }

    #[test]
    fn upsert_replaces_entry_with_same_chunk_index() {
        let index = VectorIndex::new(2);
        index.upsert(chunk(0, "first"), vec![1.0, 0.0]).unwrap();
        index.upsert(chunk(0, "second"), vec![1.0, 0.0]).unwrap();

        assert_eq!(index.len(), 1);
        let results = index.query(&[1.0, 0.0], 1).unwrap();
        assert_eq!(results[0].chunk.text, "second");
    }
}
