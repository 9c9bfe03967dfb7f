//! Text helpers shared by the render paths.

use std::borrow::Cow;
use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to `max_width` terminal columns, ending with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Strips ESC bytes and expands tabs so server text cannot move the cursor
/// or break column math.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if s.contains('\x1b') || s.contains('\t') || s.contains('\r') {
        Cow::Owned(s.replace('\x1b', "").replace('\t', "    ").replace('\r', ""))
    } else {
        Cow::Borrowed(s)
    }
}

/// Splits `text` into byte ranges no wider than `width` columns.
///
/// A space that overflows ends the chunk and is dropped; otherwise the
/// break goes after the last space that fits, or mid-word. Always returns
/// at least one (possibly empty) range.
pub fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut start = 0;
    let mut current_width = 0;
    let mut last_space: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && idx > start {
            if ch == ' ' {
                out.push(start..idx);
                start = idx + 1;
                current_width = 0;
                last_space = None;
                continue;
            }
            match last_space {
                Some(space) if space > start => {
                    out.push(start..space + 1);
                    start = space + 1;
                    current_width = text[start..idx].width();
                }
                _ => {
                    out.push(start..idx);
                    start = idx;
                    current_width = 0;
                }
            }
            last_space = None;
        }
        if ch == ' ' {
            last_space = Some(idx);
        }
        current_width += ch_width;
    }
    out.push(start..text.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_to_width(text: &str, width: usize) -> Vec<&str> {
        wrap_ranges(text, width)
            .into_iter()
            .map(|range| &text[range])
            .collect()
    }

    #[test]
    fn test_truncate_keeps_short_titles() {
        assert_eq!(truncate_with_ellipsis("Headache", 20), "Headache");
    }

    #[test]
    fn test_truncate_long_title() {
        assert_eq!(
            truncate_with_ellipsis("Persistent lower back pain", 10),
            "Persisten…"
        );
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns.
        assert_eq!(truncate_with_ellipsis("头痛头痛", 5), "头痛…");
    }

    #[test]
    fn test_sanitize_strips_escapes() {
        assert_eq!(sanitize_for_display("\x1b[2Jhi\tthere"), "[2Jhi    there");
        assert!(matches!(sanitize_for_display("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        assert_eq!(
            wrap_to_width("drink more water daily", 10),
            vec!["drink more", "water ", "daily"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_to_width("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_empty_yields_one_chunk() {
        assert_eq!(wrap_to_width("", 10), vec![""]);
    }
}
