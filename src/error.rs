//! Error types for PDF Reader MCP Server

use thiserror::Error;

/// Result type alias for PDF Reader MCP Server
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PDF Reader MCP Server
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file not found
    #[error("PDF not found: {path}")]
    DocumentNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidDocument { reason: String },

    /// Page out of bounds
    #[error("Page {page} out of bounds (total: {total})")]
    PageOutOfBounds { page: u32, total: u32 },

    /// Invalid request argument, rejected before any document is opened
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (paths, library errors) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::DocumentNotFound { .. } => "PDF not found".to_string(),
            Error::InvalidDocument { .. } => "Invalid PDF file".to_string(),
            Error::PageOutOfBounds { page, total } => {
                format!("Page {} out of bounds (total: {})", page, total)
            }
            Error::InvalidArgument { reason } => format!("Invalid argument: {}", reason),
            Error::Io(_) => "I/O error".to_string(),
            Error::Pdfium { .. } => "PDF processing error".to_string(),
        }
    }
}
