//! PDF document access layer
//!
//! This module wraps PDFium behind a small seam: a pooled document opener and
//! a per-page text source consumed by the search engine.

mod document;
mod pool;

pub use document::PdfiumDocument;
pub use pool::DocumentPool;

use crate::error::Result;

/// Per-page text access for one open document.
///
/// The search engine is written against this trait; production code uses the
/// PDFium-backed implementation, tests substitute an in-memory one.
pub trait PageSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// Plain text of a page (1-indexed). Fails with `PageOutOfBounds` when
    /// the page lies outside `[1, page_count]`.
    fn page_text(&self, page: u32) -> Result<String>;
}
