//! Document previews shown to the reasoning model.

use verity_core::config::PreviewBoundary;

/// At most `limit` chars of `text`.
///
/// With [`PreviewBoundary::Sentence`] the cut lands after the last `.`, `!`
/// or `?` inside the limit that is followed by whitespace or the end of the
/// text, else before the last whitespace, else at the limit. Dots inside
/// `3.5` or `U.S.A` are not sentence ends.
pub fn truncate_preview(text: &str, limit: usize, boundary: PreviewBoundary) -> &str {
    let hard_end = match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => byte_idx,
        None => return text,
    };
    let window = &text[..hard_end];

    if boundary == PreviewBoundary::Hard {
        return window;
    }

    if let Some(end) = last_sentence_end(text, hard_end) {
        return &text[..end];
    }
    if let Some(pos) = window.rfind(char::is_whitespace) {
        let cut = window[..pos].trim_end();
        if !cut.is_empty() {
            return cut;
        }
    }
    window
}

/// Byte offset just past the last sentence terminator before `limit`.
fn last_sentence_end(text: &str, limit: usize) -> Option<usize> {
    text[..limit]
        .char_indices()
        .rev()
        .filter(|&(pos, ch)| pos > 0 && matches!(ch, '.' | '!' | '?'))
        .map(|(pos, _)| pos + 1)
        .find(|&end| text[end..].chars().next().map_or(true, char::is_whitespace))
}
