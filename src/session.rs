//! Retrieval orchestrator: one document, one session
//!
//! `DocumentSession` owns the pipeline state explicitly instead of keeping
//! it in ambient globals, so independent sessions can coexist and each test
//! constructs a fresh one.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{Error, Result};
use crate::generation::{LlmProvider, PromptBuilder};
use crate::index::VectorIndex;
use crate::ingestion::{chunker::TextChunker, extractor, fingerprint};
use crate::types::{AskResponse, ContextChunk, Document, DocumentFormat};

/// Pipeline state visible to the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    /// No document indexed
    Empty,
    /// Extraction/chunking/embedding/indexing in progress
    Ingesting,
    /// Index populated, questions answerable
    Ready,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Ingesting => "ingesting",
            Self::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Outcome of an upload
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// The bytes match the currently indexed document; nothing was redone
    Unchanged,
    /// The document was (re)ingested
    Ingested(Document),
}

/// Single-document retrieval session
pub struct DocumentSession {
    config: PipelineConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn LlmProvider>,
    chunker: TextChunker,
    index: VectorIndex,
    state: PipelineState,
    document: Option<Document>,
}

impl DocumentSession {
    /// Create a session from validated configuration and providers
    pub fn new(
        config: PipelineConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        config.validate()?;

        if embedder.dimensions() != config.embedding.dimensions {
            return Err(Error::config(format!(
                "embedding provider '{}' produces {}-dimensional vectors, config expects {}",
                embedder.name(),
                embedder.dimensions(),
                config.embedding.dimensions
            )));
        }

        let chunker = TextChunker::new(&config.chunking)?;
        let index = VectorIndex::new(embedder.dimensions());

        Ok(Self {
            config,
            embedder,
            generator,
            chunker,
            index,
            state: PipelineState::Empty,
            document: None,
        })
    }

    /// Current pipeline state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The currently indexed document, if any
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Number of chunks currently indexed
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    /// Upload a document, re-ingesting only when its content changed
    ///
    /// Identical bytes while `Ready` are a no-op. Any change (or no prior
    /// document) wipes the index and runs the full pipeline; on failure the
    /// session reverts to `Empty` with a cleared index, never a partially
    /// indexed state.
    pub async fn upload(&mut self, filename: &str, data: &[u8]) -> Result<UploadOutcome> {
        let digest = fingerprint::fingerprint(data);

        let indexed = self.document.as_ref().map(|d| d.fingerprint.as_str());
        if self.state == PipelineState::Ready && !fingerprint::has_changed(&digest, indexed) {
            tracing::info!("Upload '{}' matches the indexed document, skipping", filename);
            return Ok(UploadOutcome::Unchanged);
        }

        self.index.clear();
        self.document = None;
        self.state = PipelineState::Ingesting;

        match self.ingest(filename, data, &digest).await {
            Ok(document) => {
                self.state = PipelineState::Ready;
                self.document = Some(document.clone());
                Ok(UploadOutcome::Ingested(document))
            }
            Err(e) => {
                self.index.clear();
                self.state = PipelineState::Empty;
                Err(e)
            }
        }
    }

    /// Run detect -> extract -> chunk -> embed -> index for one document
    async fn ingest(&mut self, filename: &str, data: &[u8], digest: &str) -> Result<Document> {
        tracing::info!("Ingesting '{}' ({} bytes)", filename, data.len());

        let format = DocumentFormat::from_filename(filename)?;
        let text = extractor::extract(format, data)?;
        let chunks = self.chunker.chunk(&text, digest);
        tracing::info!("Created {} chunks from {} characters", chunks.len(), text.chars().count());

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "provider returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        self.index
            .replace_all(chunks.into_iter().zip(vectors).collect())?;

        let mut document = Document::new(
            filename.to_string(),
            format,
            digest.to_string(),
            data.len() as u64,
        );
        document.total_chunks = self.index.len() as u32;

        tracing::info!(
            "Indexed '{}': {} chunks, fingerprint {}",
            filename,
            document.total_chunks,
            &document.fingerprint[..12]
        );

        Ok(document)
    }

    /// Answer a question from the indexed document
    ///
    /// Only valid in `Ready`; per-question failures leave the index and
    /// state untouched, so the caller may simply retry.
    pub async fn ask(&self, question: &str) -> Result<AskResponse> {
        if self.state != PipelineState::Ready {
            return Err(Error::not_ready(self.state.to_string()));
        }

        let start = Instant::now();
        tracing::info!("Question: \"{}\"", question);

        let query_vector = self.embedder.embed(question).await?;
        let matches = self
            .index
            .query(&query_vector, self.config.retrieval.top_k)?;

        if matches.is_empty() {
            let elapsed = start.elapsed().as_millis() as u64;
            return Ok(AskResponse::no_context(elapsed));
        }

        let context = PromptBuilder::build_context(&matches);
        let answer = self.generator.generate(question, &context).await?;

        let elapsed = start.elapsed().as_millis() as u64;
        tracing::info!("Answered in {}ms using {} chunks", elapsed, matches.len());

        Ok(AskResponse {
            answer,
            context: matches.iter().map(ContextChunk::from).collect(),
            processing_time_ms: elapsed,
        })
    }
}
