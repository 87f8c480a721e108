//! Cursor position and internal scroll for the InputBox.
//!
//! The buffer itself lives in `Conversation::input`, so every method takes
//! `buffer: &str` explicitly. Because the buffer can change under the cursor
//! (a successful send clears it), [`CursorState::clamp`] runs before any use.

use ratatui::layout::Rect;
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

use super::text_wrap::{CONTENT_OFFSET, MAX_VISIBLE_LINES, inner_width, visual_rows};

pub(super) struct CursorState {
    /// Byte offset in the buffer (0..=buffer.len()), always on a char boundary
    pub pos: usize,
    /// First visible row when the content is taller than the box
    pub scroll_offset: u16,
    /// Area width from the last render, used for vertical movement
    pub last_area_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_area_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Pull the cursor back inside `buffer` after an external edit.
    pub fn clamp(&mut self, buffer: &str) {
        if self.pos > buffer.len() || !buffer.is_char_boundary(self.pos) {
            self.pos = buffer.len();
        }
        if buffer.is_empty() {
            self.scroll_offset = 0;
        }
    }

    /// Index of the row holding the cursor. At a soft-wrap boundary the
    /// cursor belongs to the later row.
    fn row_index(&self, rows: &[Range<usize>]) -> usize {
        rows.iter()
            .rposition(|r| r.start <= self.pos)
            .unwrap_or(0)
    }

    /// Move one visual row up (`-1`) or down (`1`), keeping the column.
    /// Returns `false` at the first/last row.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let rows = visual_rows(buffer, inner_width(self.last_area_width));
        let current = self.row_index(&rows);
        let target = match direction {
            d if d < 0 && current > 0 => current - 1,
            d if d > 0 && current + 1 < rows.len() => current + 1,
            _ => return false,
        };

        let column = buffer[rows[current].start..self.pos].chars().count();
        let target_row = &rows[target];
        self.pos = buffer[target_row.clone()]
            .char_indices()
            .nth(column)
            .map_or(target_row.end, |(i, _)| target_row.start + i);
        true
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let rows = visual_rows(buffer, inner_width(area_width));
        if rows.len() <= usize::from(MAX_VISIBLE_LINES) {
            self.scroll_offset = 0;
            return;
        }

        let cursor_row = self.row_index(&rows) as u16;
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let rows = visual_rows(buffer, width);
        let row = self.row_index(&rows);

        let before_cursor = &buffer[rows[row].start..self.pos];
        let column = (before_cursor.width() as u16).min(width.saturating_sub(1));
        let visible_row = (row as u16).saturating_sub(self.scroll_offset);

        (
            area.x + CONTENT_OFFSET + column,
            area.y + 1 + visible_row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_at(pos: usize, area_width: u16) -> CursorState {
        CursorState {
            pos,
            scroll_offset: 0,
            last_area_width: area_width,
        }
    }

    #[test]
    fn clamp_after_buffer_cleared() {
        let mut cursor = cursor_at(5, 20);
        cursor.scroll_offset = 2;
        cursor.clamp("");
        assert_eq!(cursor.pos, 0);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn clamp_inside_multibyte_char() {
        let mut cursor = cursor_at(1, 20);
        cursor.clamp("é");
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn move_up_and_down_across_newline() {
        // Inner width 16 at area width 20
        let buffer = "first\nsecond";
        let mut cursor = cursor_at(buffer.len(), 20);

        assert!(cursor.move_vertically(buffer, -1));
        // "second" is longer than "first": clamp to end of row 0
        assert_eq!(cursor.pos, 5);

        assert!(cursor.move_vertically(buffer, 1));
        assert_eq!(cursor.pos, 11);
        assert!(!cursor.move_vertically(buffer, 1));
    }

    #[test]
    fn move_up_on_first_row_is_noop() {
        let mut cursor = cursor_at(2, 20);
        assert!(!cursor.move_vertically("hello", -1));
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn scroll_follows_cursor_down() {
        let buffer = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = cursor_at(buffer.len(), 20);
        cursor.update_scroll_offset(buffer, 20);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 20);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn screen_pos_counts_display_width() {
        let area = Rect::new(0, 10, 20, 3);
        let cursor = cursor_at(3, 20);
        assert_eq!(cursor.screen_pos("abc", area), (5, 11));
    }

    #[test]
    fn screen_pos_after_newline() {
        let area = Rect::new(0, 0, 20, 4);
        let cursor = cursor_at(2, 20);
        assert_eq!(cursor.screen_pos("a\n", area), (2, 2));
    }
}
