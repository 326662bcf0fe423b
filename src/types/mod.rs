//! Core types for the document pipeline

pub mod document;
pub mod response;

pub use document::{Chunk, Document, DocumentFormat};
pub use response::{AskResponse, ContextChunk};
