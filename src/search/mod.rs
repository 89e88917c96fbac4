//! Page-scoped text search engine
//!
//! Locates occurrences of a query string in per-page extracted text, builds
//! clamped context windows around each occurrence, and aggregates matches
//! across pages.

mod engine;
mod locate;
mod window;

pub use engine::{read_document, read_pages, search_document, search_pages, Match, SearchRequest};
pub use locate::locate;
pub use window::window;
