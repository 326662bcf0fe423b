//! Document and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Supported document formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// HTML document
    Html,
    /// CSV file
    Csv,
    /// Excel spreadsheet (.xlsx)
    Xlsx,
}

impl DocumentFormat {
    /// Detect format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" | "text" => Some(Self::Txt),
            "html" | "htm" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Detect format from a filename, rejecting anything outside the
    /// supported set
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        Self::from_extension(&extension)
            .ok_or_else(|| Error::UnsupportedFormat(extension))
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Txt => "Text File",
            Self::Html => "HTML",
            Self::Csv => "CSV",
            Self::Xlsx => "Excel Spreadsheet (.xlsx)",
        }
    }
}

/// The uploaded document currently backing the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded
    pub filename: String,
    /// Detected format
    pub format: DocumentFormat,
    /// SHA-256 hex digest of the raw upload bytes
    pub fingerprint: String,
    /// Upload size in bytes
    pub size_bytes: u64,
    /// Number of chunks created during ingestion
    pub total_chunks: u32,
    /// Upload timestamp
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(
        filename: String,
        format: DocumentFormat,
        fingerprint: String,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            format,
            fingerprint,
            size_bytes,
            total_chunks: 0,
            uploaded_at: chrono::Utc::now(),
        }
    }
}

/// A contiguous fragment of the extracted text
///
/// Chunks are immutable once created and are destroyed wholesale when the
/// owning document changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// 0-based sequence index within the document
    pub index: u32,
    /// Text content
    pub text: String,
    /// Character offset of the first character in the extracted text
    pub char_start: usize,
    /// Character offset one past the last character
    pub char_end: usize,
    /// Fingerprint of the owning document
    pub fingerprint: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(
        index: u32,
        text: String,
        char_start: usize,
        char_end: usize,
        fingerprint: String,
    ) -> Self {
        Self {
            index,
            text,
            char_start,
            char_end,
            fingerprint,
        }
    }

    /// Chunk length in characters
    pub fn len_chars(&self) -> usize {
        self.char_end - self.char_start
    }
}
