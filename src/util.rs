//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to at most `max_cols` terminal columns.
///
/// Appends `…` when anything was cut (the ellipsis counts toward the limit).
/// Wide characters are never split.
///
/// # Examples
///
/// ```
/// use omnibar::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("hello world", 6), "hello…");
/// assert_eq!(truncate_to_width("hello", 10), "hello");
/// ```
pub fn truncate_to_width(s: &str, max_cols: usize) -> String {
    if s.width() <= max_cols {
        return s.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }

    let budget = max_cols - 1;
    let mut used = 0;
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
