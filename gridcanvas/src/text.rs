//! Display-width helpers for laying text onto cells.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Columns `s` occupies on a terminal.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Columns one character occupies; zero for control and combining characters.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Fit `s` into `max_width` columns, ending with an ellipsis when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    let Some(budget) = max_width.checked_sub(1) else {
        return Cow::Borrowed("");
    };

    let mut used = 0;
    let mut cut: String = s
        .chars()
        .take_while(|&ch| {
            used += char_width(ch);
            used <= budget
        })
        .collect();
    cut.push(ELLIPSIS);
    Cow::Owned(cut)
}
