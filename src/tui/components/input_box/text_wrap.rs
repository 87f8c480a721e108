//! Wrapping helpers and dimensions for the InputBox.
//!
//! The buffer is split into *visual rows*: byte ranges of the buffer that end
//! up on one screen row after wrapping. Cursor math and rendering both read
//! from the same rows.

use std::ops::Range;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content rows before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border + left padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(inner_width))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after borders and padding; 0 when the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Byte ranges of `buffer` that land on each screen row at `width`.
///
/// Never empty: an empty buffer (or an empty line after `\n`) is one empty row.
/// Ranges exclude the `\n` itself; trailing spaces dropped by wrapping stay in
/// the row they follow so every byte offset belongs to some row.
pub(super) fn visual_rows(buffer: &str, width: u16) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in buffer.split('\n') {
        let line_end = line_start + line.len();
        if width == 0 || line.is_empty() {
            rows.push(line_start..line_end);
        } else {
            let first_row = rows.len();
            let mut search_from = 0;
            for segment in textwrap::wrap(line, wrap_options(width)) {
                let found = line[search_from..].find(segment.as_ref()).unwrap_or(0);
                let start = search_from + found;
                search_from = start + segment.len();
                rows.push(line_start + start..line_start + search_from);
            }
            // Stretch each row up to the next so dropped whitespace is covered
            for i in first_row..rows.len() {
                rows[i].end = rows.get(i + 1).map_or(line_end, |next| next.start);
            }
            if rows.len() == first_row {
                rows.push(line_start..line_end);
            }
        }
        line_start = line_end + 1;
    }

    rows
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_texts(buffer: &str, width: u16) -> Vec<&str> {
        visual_rows(buffer, width)
            .into_iter()
            .map(|r| &buffer[r])
            .collect()
    }

    #[test]
    fn empty_buffer_is_one_row() {
        assert_eq!(visual_rows("", 10), vec![0..0]);
    }

    #[test]
    fn newlines_start_new_rows() {
        assert_eq!(row_texts("a\nb\n", 10), vec!["a", "b", ""]);
    }

    #[test]
    fn long_words_break() {
        assert_eq!(row_texts("aaaaaaaaaa", 5), vec!["aaaaa", "aaaaa"]);
    }

    #[test]
    fn spaces_stay_with_previous_row() {
        let rows = visual_rows("hello world", 6);
        assert_eq!(rows, vec![0..6, 6..11]);
    }

    #[test]
    fn zero_width_keeps_logical_lines() {
        assert_eq!(row_texts("abc\ndef", 0), vec!["abc", "def"]);
    }

    #[test]
    fn rows_cover_every_byte() {
        let buffer = "one two  three\nfour";
        let rows = visual_rows(buffer, 5);
        let covered: usize = rows.iter().map(|r| r.len()).sum();
        // Every byte except the single newline separator
        assert_eq!(covered, buffer.len() - 1);
    }

    #[test]
    fn char_boundaries_multibyte() {
        let s = "سلام";
        assert_eq!(next_char_boundary(s, 0), 2);
        assert_eq!(prev_char_boundary(s, s.len()), 6);
        assert_eq!(next_char_boundary(s, s.len()), s.len());
    }
}
