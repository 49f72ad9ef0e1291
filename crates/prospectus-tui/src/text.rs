//! Text wrapping and width helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap plain text to the given width. A zero width disables wrapping.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest suffix of `s` that fits in `max_width` cells.
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (idx, ch) in s.char_indices().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
        assert_eq!(wrap_text("abc", 0), vec!["abc"]);
    }

    #[test]
    fn test_visual_width_wide_chars() {
        assert_eq!(visual_width("hello"), 5);
        assert_eq!(visual_width("你好"), 4);
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("hello world", 5), "world");
        assert_eq!(tail_to_width("short", 10), "short");
        assert_eq!(tail_to_width("ab你好", 5), "b你好");
        assert_eq!(tail_to_width("abc", 0), "");
    }
}
