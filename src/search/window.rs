//! Context windows around located matches

/// Build the context window around one match.
///
/// `chars` is the original (unfolded) page text and `match_start` a character
/// offset into it. The window extends `context_length` characters to each
/// side, clamped to the text bounds; at a page edge it shrinks rather than
/// padding or wrapping. Returns the window text together with the match
/// offsets relative to that window.
pub fn window(
    chars: &[char],
    match_start: usize,
    match_len: usize,
    context_length: usize,
) -> (String, usize, usize) {
    let window_start = match_start.saturating_sub(context_length);
    let window_end = (match_start + match_len + context_length).min(chars.len());

    let context: String = chars[window_start..window_end].iter().collect();
    let rel_start = match_start - window_start;

    (context, rel_start, rel_start + match_len)
}
