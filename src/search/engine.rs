//! Search orchestration and full-document reading

use crate::error::{Error, Result};
use crate::pdf::{DocumentPool, PageSource};
use crate::search::locate::locate;
use crate::search::window::window;
use std::path::PathBuf;

/// A single search hit.
///
/// `match_start` and `match_end` are character offsets into `context`, so the
/// characters `context[match_start..match_end]` are the matched text with its
/// original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Page number (1-indexed)
    pub page: u32,
    /// Matched text with surrounding context
    pub context: String,
    /// Match start offset, relative to `context`
    pub match_start: usize,
    /// Match end offset, relative to `context`
    pub match_end: usize,
}

/// Parameters of one search call
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Path to the PDF file to search in
    pub path: PathBuf,
    /// Text to search for
    pub query: String,
    /// Restrict the scan to a single page (1-indexed)
    pub page: Option<u32>,
    /// Match case exactly instead of case folding
    pub case_sensitive: bool,
    /// Characters of context on each side of a match
    pub context_length: usize,
}

impl SearchRequest {
    /// Reject malformed requests before any document is opened
    fn validate(&self) -> Result<()> {
        if self.query.is_empty() {
            return Err(Error::InvalidArgument {
                reason: "query must not be empty".to_string(),
            });
        }
        if self.page == Some(0) {
            return Err(Error::InvalidArgument {
                reason: "page numbers start at 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Search a PDF for all occurrences of the request's query.
///
/// The result is complete or the call fails; no partial match list is ever
/// returned. The document handle is released on every exit path.
pub async fn search_document(pool: &DocumentPool, request: SearchRequest) -> Result<Vec<Match>> {
    request.validate()?;

    let SearchRequest {
        path,
        query,
        page,
        case_sensitive,
        context_length,
    } = request;

    pool.with_document(path, move |doc| {
        search_pages(doc, &query, page, case_sensitive, context_length)
    })
    .await
}

/// Extract the full text of a PDF, pages joined by a blank line.
pub async fn read_document(pool: &DocumentPool, path: PathBuf) -> Result<String> {
    pool.with_document(path, |doc| read_pages(doc)).await
}

/// Scan the requested page range and collect matches in page order.
///
/// Within a page, matches appear left to right as the locator produced them.
pub fn search_pages(
    doc: &impl PageSource,
    query: &str,
    page: Option<u32>,
    case_sensitive: bool,
    context_length: usize,
) -> Result<Vec<Match>> {
    let total = doc.page_count();
    let (first, last) = match page {
        Some(p) if p > total => return Err(Error::PageOutOfBounds { page: p, total }),
        Some(p) => (p, p),
        None => (1, total),
    };

    let query_len = query.chars().count();
    let mut matches = Vec::new();

    for page_num in first..=last {
        let text = doc.page_text(page_num)?;
        let offsets = locate(&text, query, case_sensitive);
        if offsets.is_empty() {
            continue;
        }

        // Windows index the original text, not the folded one
        let chars: Vec<char> = text.chars().collect();
        for offset in offsets {
            let (context, match_start, match_end) =
                window(&chars, offset, query_len, context_length);
            matches.push(Match {
                page: page_num,
                context,
                match_start,
                match_end,
            });
        }
    }

    Ok(matches)
}

/// Concatenate every page's text, with a blank line between pages.
pub fn read_pages(doc: &impl PageSource) -> Result<String> {
    let mut content = String::new();

    for page_num in 1..=doc.page_count() {
        if page_num > 1 {
            content.push_str("\n\n");
        }
        content.push_str(&doc.page_text(page_num)?);
    }

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct PageFixture {
        pages: Vec<&'static str>,
    }

    impl PageSource for PageFixture {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_text(&self, page: u32) -> Result<String> {
            self.pages
                .get((page - 1) as usize)
                .map(|text| text.to_string())
                .ok_or(Error::PageOutOfBounds {
                    page,
                    total: self.pages.len() as u32,
                })
        }
    }

    #[test]
    fn aggregates_matches_in_page_order() {
        let doc = PageFixture {
            pages: vec![
                "needle at the start",
                "nothing of interest here",
                "ends with a needle",
            ],
        };

        let matches = search_pages(&doc, "needle", None, true, 50).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].page, 1);
        assert_eq!(matches[1].page, 3);
    }

    #[test]
    fn restricts_scan_to_requested_page() {
        let doc = PageFixture {
            pages: vec!["shared term", "shared term", "shared term"],
        };

        let matches = search_pages(&doc, "shared", Some(2), true, 10).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].page, 2);
    }

    #[test]
    fn requested_page_beyond_total_fails() {
        let doc = PageFixture {
            pages: vec!["only one page"],
        };

        let result = search_pages(&doc, "page", Some(5), true, 10);

        assert!(matches!(
            result,
            Err(Error::PageOutOfBounds { page: 5, total: 1 })
        ));
    }

    #[test]
    fn no_occurrence_yields_empty_list_not_error() {
        let doc = PageFixture {
            pages: vec!["alpha", "beta"],
        };

        let matches = search_pages(&doc, "gamma", None, false, 10).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn match_offsets_reproduce_the_query_within_context() {
        let doc = PageFixture {
            pages: vec!["Fusce nec tellus sed augue semper porta"],
        };

        let matches = search_pages(&doc, "tellus", None, true, 5).unwrap();

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.context, " nec tellus sed ");
        assert!(m.match_start <= m.match_end);
        assert!(m.match_end <= m.context.chars().count());

        let matched: String = m
            .context
            .chars()
            .skip(m.match_start)
            .take(m.match_end - m.match_start)
            .collect();
        assert_eq!(matched, "tellus");
    }

    #[test]
    fn case_insensitive_context_preserves_original_casing() {
        let doc = PageFixture {
            pages: vec!["The QUICK brown fox"],
        };

        let matches = search_pages(&doc, "quick", None, false, 4).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].context, "The QUICK bro");

        let m = &matches[0];
        let matched: String = m
            .context
            .chars()
            .skip(m.match_start)
            .take(m.match_end - m.match_start)
            .collect();
        assert_eq!(matched, "QUICK");
    }

    #[test]
    fn match_at_page_end_truncates_the_window() {
        let doc = PageFixture {
            pages: vec!["the last word is needle"],
        };

        let matches = search_pages(&doc, "needle", None, true, 50).unwrap();

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.context, "the last word is needle");
        assert_eq!(m.match_end, m.context.chars().count());
    }

    #[test]
    fn repeated_search_is_idempotent() {
        let doc = PageFixture {
            pages: vec!["one needle, two needle", "three needle"],
        };

        let first = search_pages(&doc, "needle", None, false, 8).unwrap();
        let second = search_pages(&doc, "needle", None, false, 8).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_query_is_rejected_before_document_work() {
        let request = SearchRequest {
            path: PathBuf::from("/unused.pdf"),
            query: String::new(),
            page: None,
            case_sensitive: false,
            context_length: 50,
        };

        assert!(matches!(
            request.validate(),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn page_zero_is_rejected_before_document_work() {
        let request = SearchRequest {
            path: PathBuf::from("/unused.pdf"),
            query: "term".to_string(),
            page: Some(0),
            case_sensitive: false,
            context_length: 50,
        };

        assert!(matches!(
            request.validate(),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn read_joins_pages_with_blank_line_and_trims() {
        let doc = PageFixture {
            pages: vec!["  first page", "second page", "third page  "],
        };

        let content = read_pages(&doc).unwrap();
        assert_eq!(content, "first page\n\nsecond page\n\nthird page");
    }

    #[test]
    fn read_of_single_page_has_no_separator() {
        let doc = PageFixture {
            pages: vec!["only page"],
        };

        assert_eq!(read_pages(&doc).unwrap(), "only page");
    }

    #[test]
    fn read_of_empty_document_is_empty_string() {
        let doc = PageFixture { pages: vec![] };

        assert_eq!(read_pages(&doc).unwrap(), "");
    }
}
