//! doc-rag: single-document retrieval-augmented question answering
//!
//! Upload one document (PDF, DOCX, TXT, HTML, CSV, or XLSX), ask questions
//! in natural language, and receive answers grounded only in that
//! document's content. The crate covers the ingestion and retrieval
//! pipeline: format dispatch and text extraction, deterministic chunking,
//! embedding generation, in-memory vector search, and fingerprint-based
//! change detection so identical uploads are never reprocessed. Embeddings
//! and answer generation run behind provider traits whose default
//! implementations talk to a local Ollama server.

pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod ollama;
pub mod session;
pub mod types;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use session::{DocumentSession, PipelineState, UploadOutcome};
pub use types::{
    document::{Chunk, Document, DocumentFormat},
    response::{AskResponse, ContextChunk},
};
