//! # InputBox Component
//!
//! Multi-line message editor with a character counter.
//!
//! ## Responsibilities
//!
//! - Edit the draft (insert, paste, backspace, delete, cursor movement)
//! - Report Enter as a submit request; validation happens in `core::update`
//! - Show `n/1000` in the border, red once the draft is over the limit
//! - Grey out while a reply is pending
//!
//! ## State Management
//!
//! The draft text is `Conversation::input` and is passed in by the caller.
//! `InputBoxState` only keeps the cursor and internal scroll, so the core can
//! clear the draft after a successful send without the TUI knowing.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::core::MAX_MESSAGE_CHARS;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    visual_rows,
};

pub const PLACEHOLDER: &str = "Type your message...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; the caller decides whether the draft may be sent
    Submit,
    /// Text or cursor changed
    ContentChanged,
}

/// Persistent cursor state for the input box.
pub struct InputBoxState {
    cursor: CursorState,
}

impl Default for InputBoxState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBoxState {
    pub fn new() -> Self {
        Self {
            cursor: CursorState::new(),
        }
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }

    /// Height for `buffer` at `area_width`, between 1 and `MAX_VISIBLE_LINES`
    /// content rows plus borders.
    pub fn calculate_height(buffer: &str, area_width: u16) -> u16 {
        let rows = visual_rows(buffer, inner_width(area_width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Apply an editing event to `buffer`.
    ///
    /// Not an `EventHandler` impl: the buffer is owned by the conversation,
    /// not by this state.
    pub fn handle_event(&mut self, event: &TuiEvent, buffer: &mut String) -> Option<InputEvent> {
        self.cursor.clamp(buffer);
        let pos = self.cursor.pos;

        match event {
            TuiEvent::InputChar(c) => {
                buffer.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                buffer.insert_str(pos, &text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if pos > 0 => {
                let prev = prev_char_boundary(buffer, pos);
                buffer.drain(prev..pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if pos < buffer.len() => {
                let next = next_char_boundary(buffer, pos);
                buffer.drain(pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if pos > 0 => {
                self.cursor.pos = prev_char_boundary(buffer, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if pos < buffer.len() => {
                self.cursor.pos = next_char_boundary(buffer, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                let line_start = buffer[..pos].rfind('\n').map_or(0, |i| i + 1);
                (pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = buffer[pos..].find('\n').map_or(buffer.len(), |i| pos + i);
                (pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(buffer, -1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(buffer, 1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

/// Transient input box component, created each frame.
pub struct InputBox<'a> {
    pub state: &'a mut InputBoxState,
    pub buffer: &'a str,
    /// Reply pending: render greyed out and hide the cursor
    pub disabled: bool,
    pub palette: Palette,
}

impl<'a> InputBox<'a> {
    pub fn new(
        state: &'a mut InputBoxState,
        buffer: &'a str,
        disabled: bool,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            buffer,
            disabled,
            palette,
        }
    }

    fn counter(&self) -> Span<'static> {
        let count = self.buffer.chars().count();
        let color = if count > MAX_MESSAGE_CHARS {
            self.palette.error
        } else {
            self.palette.text_muted
        };
        Span::styled(format!(" {}/{} ", count, MAX_MESSAGE_CHARS), Style::default().fg(color))
    }

    fn visible_lines(&self, area_width: u16) -> Vec<Line<'a>> {
        let text_style = Style::default().fg(if self.disabled {
            self.palette.text_muted
        } else {
            self.palette.text
        });

        if self.buffer.is_empty() {
            return vec![Line::from(Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(self.palette.text_muted)
                    .add_modifier(Modifier::ITALIC),
            ))];
        }

        let buffer = self.buffer;
        visual_rows(buffer, inner_width(area_width))
            .into_iter()
            .skip(usize::from(self.state.cursor.scroll_offset))
            .take(usize::from(MAX_VISIBLE_LINES))
            .map(|row| Line::styled(&buffer[row], text_style))
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total = visual_rows(self.buffer, inner_width(area.width)).len();
        let max_visible = usize::from(MAX_VISIBLE_LINES);
        if total <= max_visible {
            return;
        }

        // content_length is the max scroll position, not the row count
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(total - max_visible)
            .position(usize::from(self.state.cursor.scroll_offset));
        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl<'a> Component for InputBox<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.cursor.clamp(self.buffer);
        self.state.cursor.last_area_width = area.width;
        self.state.cursor.update_scroll_offset(self.buffer, area.width);

        let (border_color, title) = if self.disabled {
            (self.palette.text_muted, " Waiting for reply... ")
        } else {
            (self.palette.primary_light, " Message ")
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::horizontal(1))
            .title(title)
            .title_bottom(Line::from(self.counter()).right_aligned())
            .style(Style::default().bg(self.palette.paper));

        let paragraph = Paragraph::new(self.visible_lines(area.width)).block(block);
        frame.render_widget(paragraph, area);
        self.render_scrollbar(frame, area);

        if !self.disabled {
            let position = self.state.cursor.screen_pos(self.buffer, area);
            frame.set_cursor_position(position);
        }
    }
}
