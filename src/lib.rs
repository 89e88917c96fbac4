//! PDF Reader MCP Server Library
//!
//! This crate provides MCP tools for PDF documents:
//! - `read_pdf`: Extract the full text content of a PDF
//! - `search_in_pdf`: Search for text within a PDF and return matches with
//!   page numbers and surrounding context

pub mod error;
pub mod pdf;
pub mod search;
pub mod server;

pub use error::{Error, Result};
pub use server::{run_server, run_server_with_config, PdfServer, ServerConfig};
