//! Fitting transcript text into the model's input limit.

use std::iter;

/// Cut `text` to at most `max_chars` characters.
///
/// The cut lands on the last whitespace inside the limit so no word is split,
/// unless the limit falls inside one very long word. Returns the kept text and
/// whether anything was removed.
pub fn truncate_to_chars(text: &str, max_chars: usize) -> (&str, bool) {
    let Some((limit, _)) = text.char_indices().nth(max_chars) else {
        return (text, false);
    };

    let head = &text[..limit];
    let cut = match head.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => head[..pos].trim_end(),
        _ => head,
    };
    (cut, true)
}

/// Split `text` into windows of `size` characters, each overlapping the
/// previous one by `overlap` characters. `overlap` must be smaller than `size`.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<&str> {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(text.len()))
        .collect();
    let total = boundaries.len() - 1;

    if total == 0 {
        return Vec::new();
    }
    if total <= size {
        return vec![text];
    }

    let step = size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::with_capacity(total / step + 1);
    let mut start = 0;
    loop {
        let end = (start + size).min(total);
        chunks.push(&text[boundaries[start]..boundaries[end]]);
        if end == total {
            break;
        }
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_to_chars("hello world", 100), ("hello world", false));
        assert_eq!(truncate_to_chars("hello", 5), ("hello", false));
    }

    #[test]
    fn test_truncate_cuts_at_word_boundary() {
        let (kept, truncated) = truncate_to_chars("alpha beta gamma delta", 13);
        assert!(truncated);
        assert_eq!(kept, "alpha beta");
    }

    #[test]
    fn test_truncate_long_word_hard_cut() {
        assert_eq!(truncate_to_chars("abcdefghij", 4), ("abcd", true));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let (kept, truncated) = truncate_to_chars("ææææ øøøø", 6);
        assert!(truncated);
        assert_eq!(kept, "ææææ");
    }

    #[test]
    fn test_chunk_windows_overlap() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunk_text(text, 10, 2);
        assert_eq!(chunks, vec!["abcdefghij", "ijklmnopqr", "qrstuvwxyz"]);
    }

    #[test]
    fn test_chunk_covers_whole_text() {
        let text = "0123456789".repeat(7);
        let chunks = chunk_text(&text, 25, 5);
        assert_eq!(chunks.first().map(|c| &c[..5]), Some("01234"));
        assert!(text.ends_with(chunks.last().unwrap()));
        assert!(chunks.iter().all(|c| c.chars().count() <= 25));
    }

    #[test]
    fn test_chunk_small_and_empty_text() {
        assert_eq!(chunk_text("short", 10, 2), vec!["short"]);
        assert!(chunk_text("", 10, 2).is_empty());
    }
}
