//! Error types for pdfium-plainlinks

use crate::codec::DecodeError;
use thiserror::Error;

/// Result type for pdfium-plainlinks operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Error types for link synthesis and text access
#[derive(Error, Debug)]
pub enum PdfError {
    /// Malformed UTF-16 returned by the engine
    #[error("Invalid text data: {0}")]
    Decode(#[from] DecodeError),

    /// The engine produced no characters for the requested range
    #[error("Failed to extract text: {count} chars at index {start}")]
    TextExtractionFailed { start: usize, count: usize },

    /// The engine could not report a character box
    #[error("Failed to get bounding box of char {index}")]
    CharBoxUnavailable { index: usize },

    /// Character index out of bounds
    #[error("Char index {index} out of bounds (page has {count} chars)")]
    CharIndexOutOfBounds { index: usize, count: usize },

    /// Page index out of bounds
    #[error("Page index {index} out of bounds (document has {count} pages)")]
    PageNotFound { index: usize, count: usize },

    /// Annotation index out of bounds
    #[error("Annotation index {index} out of bounds (page has {count} annotations)")]
    AnnotationIndexOutOfBounds { index: usize, count: usize },

    /// Failed to create or modify an annotation
    #[error("Failed to create annotation: {reason}")]
    AnnotationCreationFailed { reason: String },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// `release()` called on a session holding no references
    #[error("Engine session released without a matching acquire")]
    SessionNotAcquired,

    /// Malformed page fixture
    #[error("Invalid fixture: {reason}")]
    Fixture { reason: String },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
