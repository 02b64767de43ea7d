//! Text chunking with configurable size and overlap.
//!
//! The chunker is a pure function: the same input always yields the same
//! windows, and insertion order downstream is the only join key between a
//! chunk and its embedding.

use docqa_core::{AppError, AppResult};

/// Fraction of the window tail in which a whitespace cut is preferred over
/// a hard cut.
const BOUNDARY_WINDOW: usize = 5; // last 1/5th of the window

/// Split text into overlapping chunks.
///
/// Units are bytes snapped outward-in to UTF-8 char boundaries, so a window
/// never splits a code point; `chunk_size` and `overlap` are therefore
/// approximate for multi-byte text but exact for ASCII. Each window after
/// the first starts `chunk_size - overlap` units after the previous start.
/// The final window may be shorter. When a window would cut mid-word, the
/// cut moves back to the last whitespace inside the trailing fifth of the
/// window; this is a quality heuristic, not part of the correctness
/// contract.
///
/// # Errors
/// `InvalidConfiguration` if `chunk_size` is zero or `overlap >= chunk_size`
/// (such a step would never advance).
///
/// # Edge cases
/// Empty input yields an empty vec. Input shorter than `chunk_size` yields
/// exactly one chunk equal to the trimmed input.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> AppResult<Vec<String>> {
    if chunk_size == 0 {
        return Err(AppError::InvalidConfiguration(
            "chunk_size must be greater than zero".to_string(),
        ));
    }

    if overlap >= chunk_size {
        return Err(AppError::InvalidConfiguration(format!(
            "overlap ({}) must be strictly less than chunk_size ({})",
            overlap, chunk_size
        )));
    }

    if text.is_empty() {
        return Ok(Vec::new());
    }

    if text.len() <= chunk_size {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        return Ok(vec![trimmed.to_string()]);
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + chunk_size).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }

        // Prefer a whitespace boundary near the window edge. Disabled when
        // the overlap reaches into that boundary zone: a softened cut could
        // then land at or before the next window start and the walk would
        // crawl forward a byte at a time instead of by the stride.
        let soften_floor = chunk_size - chunk_size / BOUNDARY_WINDOW;
        if end < text.len() && overlap < soften_floor {
            let window = &text[start..end];
            if let Some(cut) = window.rfind(char::is_whitespace) {
                if cut >= soften_floor {
                    // Step over the whitespace char itself, which may be
                    // wider than one byte
                    let ws_len = window[cut..].chars().next().map_or(1, |c| c.len_utf8());
                    end = start + cut + ws_len;
                }
            }
        }

        let chunk = text[start..end].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if end == text.len() {
            break;
        }

        // Advance from the actual cut so a softened boundary never skips
        // text; with a hard cut this is exactly start + (chunk_size - overlap)
        let mut next_start = end.saturating_sub(overlap).max(start + 1);
        while next_start < text.len() && !text.is_char_boundary(next_start) {
            next_start += 1;
        }
        start = next_start;
    }

    tracing::debug!(
        "Chunked {} bytes into {} chunks (size: {}, overlap: {})",
        text.len(),
        chunks.len(),
        chunk_size,
        overlap
    );

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_basic() {
        let text = "a".repeat(1000);
        let chunks = chunk_text(&text, 200, 50).unwrap();

        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| c.len() <= 200));
    }

    #[test]
    fn test_chunk_empty_input() {
        let chunks = chunk_text("", 100, 10).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_whitespace_only_input() {
        let chunks = chunk_text("   \n\t  ", 100, 10).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_short_text_single_chunk() {
        let chunks = chunk_text("  hello world  ", 100, 10).unwrap();
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_chunk_no_overlap_exact_windows() {
        let text = "a".repeat(300);
        let chunks = chunk_text(&text, 100, 0).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[test]
    fn test_chunk_rejects_overlap_equal_to_size() {
        let err = chunk_text("some text that is long enough", 10, 10).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_chunk_rejects_overlap_larger_than_size() {
        let err = chunk_text("some text", 10, 20).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_chunk_rejects_zero_size() {
        let err = chunk_text("some text", 0, 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_chunk_overlap_repeats_content() {
        // With uniform content and no whitespace, each window after the
        // first must start `overlap` units before the previous window's end.
        let text: String = ('a'..='z').cycle().take(500).collect();
        let chunks = chunk_text(&text, 100, 20).unwrap();

        for pair in chunks.windows(2) {
            let prev_tail = &pair[0][pair[0].len() - 20..];
            assert!(
                pair[1].starts_with(prev_tail),
                "expected declared overlap between consecutive chunks"
            );
        }
    }

    #[test]
    fn test_chunk_reconstructs_source() {
        // Dropping each chunk's leading overlap and concatenating restores
        // the original text (no whitespace near the cuts, so no softening
        // or trimming interferes).
        let text: String = ('a'..='z').cycle().take(437).collect();
        let chunks = chunk_text(&text, 100, 20).unwrap();

        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.push_str(&chunk[20.min(chunk.len())..]);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_chunk_prefers_word_boundary() {
        let text = format!("{} {}", "a".repeat(95), "b".repeat(200));
        let chunks = chunk_text(&text, 100, 0).unwrap();

        // Cut lands on the whitespace at offset 95, not mid-word at 100,
        // and the next window resumes right after it
        assert_eq!(chunks[0], "a".repeat(95));
        assert!(chunks[1].starts_with('b'));
        let total_b: usize = chunks[1..].iter().map(|c| c.len()).sum();
        assert_eq!(total_b, 200);
    }

    #[test]
    fn test_chunk_utf8_safety() {
        let text = "é".repeat(300); // 2 bytes per char
        let chunks = chunk_text(&text, 101, 0).unwrap();

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().all(|c| c == 'é'));
        }
    }

    #[test]
    fn test_chunk_high_overlap_keeps_stride() {
        // Whitespace near the window edge must not stall the advance when
        // the overlap is large: with size 100 / overlap 85 every window
        // starts 15 bytes after the previous one.
        let text = format!("{} {}", "a".repeat(80), "b".repeat(199));
        let chunks = chunk_text(&text, 100, 85).unwrap();

        assert_eq!(chunks[0], &text[..100]);
        assert!(chunks[1].starts_with(&text[15..100]));
        assert!(chunks.len() <= text.len() / 15 + 1);
    }
}
