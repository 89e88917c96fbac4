//! MCP Server implementation using rmcp

use crate::pdf::DocumentPool;
use crate::search::{read_document, search_document, Match, SearchRequest};
use anyhow::Result;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Resource configuration for the PDF Reader MCP Server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of simultaneously open PDFium documents (default: 4)
    pub max_open_documents: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_open_documents: 4,
        }
    }
}

/// PDF Reader MCP Server
#[derive(Clone)]
pub struct PdfServer {
    pool: Arc<DocumentPool>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Request/Response types for read_pdf
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadPdfParams {
    /// Path to the PDF file to read
    pub path: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ReadPdfResult {
    /// Source file path
    pub source: String,
    /// Full text content of the document
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for search_in_pdf
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchPdfParams {
    /// Path to the PDF file to search in
    pub path: String,
    /// Text to search for
    pub query: String,
    /// Restrict the search to a single page (1-indexed)
    #[serde(default)]
    pub page: Option<u32>,
    /// Case-sensitive search (default: false)
    #[serde(default)]
    pub case_sensitive: bool,
    /// Characters of context around each match
    #[serde(default = "default_context_length")]
    pub context_length: u32,
}

fn default_context_length() -> u32 {
    50
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SearchMatch {
    /// Page number (1-indexed)
    pub page: u32,
    /// Matched text with surrounding context
    pub context: String,
    /// Match start offset within `context` (characters)
    pub match_start: usize,
    /// Match end offset within `context` (characters)
    pub match_end: usize,
}

impl From<Match> for SearchMatch {
    fn from(m: Match) -> Self {
        Self {
            page: m.page,
            context: m.context,
            match_start: m.match_start,
            match_end: m.match_end,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SearchPdfResult {
    /// Source file path
    pub source: String,
    /// Matches in page order, left to right within a page
    pub matches: Vec<SearchMatch>,
    /// Total number of matches
    pub total_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[tool_router]
impl PdfServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new PdfServer with full configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            pool: Arc::new(DocumentPool::new(config.max_open_documents)),
            tool_router: Self::tool_router(),
        }
    }

    /// Read the full text content of a PDF file
    #[tool(
        description = "Reads the full text content from a PDF file and returns it as a string"
    )]
    async fn read_pdf(&self, Parameters(params): Parameters<ReadPdfParams>) -> String {
        let result = self.process_read(&params).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "read_pdf failed");
            ReadPdfResult {
                source: params.path.clone(),
                content: String::new(),
                error: Some(e.client_message()),
            }
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    /// Search for text within a PDF file
    #[tool(
        description = "Searches for specific text in a PDF file and returns all matches with their page numbers and surrounding context"
    )]
    async fn search_in_pdf(&self, Parameters(params): Parameters<SearchPdfParams>) -> String {
        let result = self.process_search(&params).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "search_in_pdf failed");
            SearchPdfResult {
                source: params.path.clone(),
                matches: vec![],
                total_count: 0,
                error: Some(e.client_message()),
            }
        });

        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    async fn process_read(&self, params: &ReadPdfParams) -> crate::error::Result<ReadPdfResult> {
        let content = read_document(&self.pool, PathBuf::from(&params.path)).await?;

        Ok(ReadPdfResult {
            source: params.path.clone(),
            content,
            error: None,
        })
    }

    async fn process_search(
        &self,
        params: &SearchPdfParams,
    ) -> crate::error::Result<SearchPdfResult> {
        let request = SearchRequest {
            path: PathBuf::from(&params.path),
            query: params.query.clone(),
            page: params.page,
            case_sensitive: params.case_sensitive,
            context_length: params.context_length as usize,
        };

        let matches = search_document(&self.pool, request).await?;
        let total_count = matches.len() as u32;

        Ok(SearchPdfResult {
            source: params.path.clone(),
            matches: matches.into_iter().map(SearchMatch::from).collect(),
            total_count,
            error: None,
        })
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "PDF Reader MCP Server provides tools for reading the full text of a PDF \
                 and searching for text within one."
                    .into(),
            ),
        }
    }
}

/// Run the MCP server with default configuration
pub async fn run_server() -> Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the MCP server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> Result<()> {
    let server = PdfServer::with_config(config);

    tracing::info!("PDF Reader MCP Server ready, waiting for connections...");

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_deserialization() {
        let json = r#"{
            "path": "/test.pdf",
            "query": "tellus"
        }"#;
        let params: SearchPdfParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.path, "/test.pdf");
        assert_eq!(params.query, "tellus");
        assert_eq!(params.page, None);
        assert!(!params.case_sensitive);
        assert_eq!(params.context_length, 50);
    }

    #[test]
    fn test_search_params_full_deserialization() {
        let json = r#"{
            "path": "/test.pdf",
            "query": "tellus",
            "page": 3,
            "case_sensitive": true,
            "context_length": 20
        }"#;
        let params: SearchPdfParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page, Some(3));
        assert!(params.case_sensitive);
        assert_eq!(params.context_length, 20);
    }

    #[test]
    fn test_read_params_deserialization() {
        let json = r#"{"path": "/test.pdf"}"#;
        let params: ReadPdfParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.path, "/test.pdf");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_context_length(), 50);
        assert_eq!(ServerConfig::default().max_open_documents, 4);
    }

    #[test]
    fn test_match_conversion() {
        let m = Match {
            page: 2,
            context: "around the term here".to_string(),
            match_start: 11,
            match_end: 15,
        };

        let converted = SearchMatch::from(m);
        assert_eq!(converted.page, 2);
        assert_eq!(converted.match_start, 11);
        assert_eq!(converted.match_end, 15);
    }

    #[test]
    fn test_search_result_serialization_omits_absent_error() {
        let result = SearchPdfResult {
            source: "/test.pdf".to_string(),
            matches: vec![],
            total_count: 0,
            error: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("error").is_none());
        // Zero matches serialize as an empty array, never null
        assert_eq!(json["matches"], serde_json::json!([]));
        assert_eq!(json["total_count"], 0);
    }

    #[tokio::test]
    async fn test_search_missing_document_reports_error_in_result() {
        let server = PdfServer::new();
        let params = SearchPdfParams {
            path: "/nonexistent/path/file.pdf".to_string(),
            query: "term".to_string(),
            page: None,
            case_sensitive: false,
            context_length: 50,
        };

        let result = server.process_search(&params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_missing_document_reports_error_in_result() {
        let server = PdfServer::new();
        let params = ReadPdfParams {
            path: "/nonexistent/path/file.pdf".to_string(),
        };

        let result = server.process_read(&params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_touching_the_file() {
        let server = PdfServer::new();
        let params = SearchPdfParams {
            // Path does not exist; validation must fail before it matters
            path: "/nonexistent/path/file.pdf".to_string(),
            query: String::new(),
            page: None,
            case_sensitive: false,
            context_length: 50,
        };

        let result = server.process_search(&params).await;
        assert!(matches!(
            result,
            Err(crate::error::Error::InvalidArgument { .. })
        ));
    }
}
