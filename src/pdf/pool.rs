//! Document pool bounding concurrent PDFium usage

use crate::error::{Error, Result};
use crate::pdf::document::{bind_pdfium, PdfiumDocument};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Bounded pool of PDFium document slots.
///
/// The pool is constructed once at the composition root and injected into the
/// server; it caps how many documents may be open at the same time. Document
/// work runs on the blocking thread pool, and both the pool permit and the
/// document handle are released when the work returns, on every exit path.
pub struct DocumentPool {
    permits: Arc<Semaphore>,
}

impl DocumentPool {
    /// Create a pool allowing up to `max_open` simultaneously open documents.
    pub fn new(max_open: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_open.max(1))),
        }
    }

    /// Open the document at `path` and run `f` against it.
    ///
    /// Acquires a pool permit, then binds PDFium and loads the document on
    /// the blocking thread pool. The document lives only for the duration of
    /// `f`; it is closed when the closure returns, whether `f` succeeded or
    /// failed.
    pub async fn with_document<T, F>(&self, path: PathBuf, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&PdfiumDocument) -> Result<T> + Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| Error::Pdfium {
                reason: "document pool is closed".to_string(),
            })?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let pdfium = bind_pdfium()?;
            let document = PdfiumDocument::load(&pdfium, &path)?;
            f(&document)
        })
        .await
        .map_err(|e| Error::Pdfium {
            reason: format!("Task join error: {}", e),
        })?
    }
}
