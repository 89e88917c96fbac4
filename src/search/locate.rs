//! Occurrence location within one page's text

/// Fold a character for case-insensitive comparison.
///
/// Only 1:1 lowercase mappings are applied; a character whose lowercase form
/// expands to multiple characters keeps its original identity. This keeps the
/// folded text offset-aligned with the original, and the mapping is fixed and
/// locale-independent.
pub(crate) fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// Locate every non-overlapping occurrence of `query` in `text`, scanning
/// left to right. Returned offsets are character offsets into `text`.
///
/// An occurrence consumes its full length before the next scan begins, so
/// `"aa"` matches `"aaa"` once, not twice. With `case_sensitive` off, both
/// sides are folded before comparison; offsets still index the original text.
pub fn locate(text: &str, query: &str, case_sensitive: bool) -> Vec<usize> {
    // An empty needle would match at every cursor position without ever
    // advancing; callers reject it as an invalid argument.
    debug_assert!(!query.is_empty());

    let haystack: Vec<char> = if case_sensitive {
        text.chars().collect()
    } else {
        text.chars().map(fold_char).collect()
    };
    let needle: Vec<char> = if case_sensitive {
        query.chars().collect()
    } else {
        query.chars().map(fold_char).collect()
    };

    if needle.is_empty() || haystack.len() < needle.len() {
        return Vec::new();
    }

    let mut offsets = Vec::new();
    let mut cursor = 0;
    while cursor + needle.len() <= haystack.len() {
        if haystack[cursor..cursor + needle.len()] == needle[..] {
            offsets.push(cursor);
            cursor += needle.len();
        } else {
            cursor += 1;
        }
    }

    offsets
}
